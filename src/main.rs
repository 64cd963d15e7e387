//! Interactive terminal front end for the assessment workflow.

use std::io::Write;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::task::JoinHandle;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use skill_roadmap::adapters::ai::{
    GeminiClient, GeminiConfig, OfflineClient, OpenAIClient, OpenAIConfig,
};
use skill_roadmap::adapters::document::UnavailableRenderer;
use skill_roadmap::adapters::fallback::{StaticFallbackCatalog, DEFAULT_FALLBACK_TOPIC};
use skill_roadmap::application::{
    AssessmentWorkflow, CancelSignal, RoadmapSynthesizer, SynthesizerSettings,
};
use skill_roadmap::config::{AppConfig, GenerationConfig, GenerationProvider, TelemetryConfig};
use skill_roadmap::domain::assessment::PRESET_TOPICS;
use skill_roadmap::domain::session::Session;
use skill_roadmap::ports::{ExportFormat, GenerationClient, TransportFailure};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.telemetry)?;

    let client = build_client(&config.generation)?;
    tracing::info!(
        provider = %client.provider_info().name,
        model = %client.provider_info().model,
        "generation client ready"
    );

    let settings = SynthesizerSettings {
        question_count: config.assessment.question_count,
        max_output_tokens: config.generation.max_output_tokens,
        temperature: config.generation.temperature,
        default_topic: DEFAULT_FALLBACK_TOPIC.to_string(),
    };
    let synthesizer =
        RoadmapSynthesizer::new(client, Arc::new(StaticFallbackCatalog::new()), settings)?;
    let workflow = AssessmentWorkflow::new(Arc::new(synthesizer));

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    run(&workflow, &mut input, config.assessment.default_weeks).await?;
    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured filter.
fn init_tracing(
    telemetry: &TelemetryConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&telemetry.log_filter));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout belongs to the conversation with the learner
    if telemetry.json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
    }
}

fn build_client(
    config: &GenerationConfig,
) -> Result<Arc<dyn GenerationClient>, TransportFailure> {
    let secret = |key: &Option<secrecy::Secret<String>>| {
        key.as_ref()
            .map(|k| k.expose_secret().clone())
            .unwrap_or_default()
    };

    let client: Arc<dyn GenerationClient> = match config.provider {
        GenerationProvider::Gemini => {
            let mut gemini = GeminiConfig::new(secret(&config.gemini_api_key))
                .with_timeout(config.timeout());
            if let Some(model) = &config.model {
                gemini = gemini.with_model(model.as_str());
            }
            if let Some(url) = &config.base_url {
                gemini = gemini.with_base_url(url.as_str());
            }
            Arc::new(GeminiClient::new(gemini)?)
        }
        GenerationProvider::OpenAI => {
            let mut openai = OpenAIConfig::new(secret(&config.openai_api_key))
                .with_timeout(config.timeout());
            if let Some(model) = &config.model {
                openai = openai.with_model(model.as_str());
            }
            if let Some(url) = &config.base_url {
                openai = openai.with_base_url(url.as_str());
            }
            Arc::new(OpenAIClient::new(openai)?)
        }
        GenerationProvider::Offline => Arc::new(OfflineClient::new()),
    };
    Ok(client)
}

// ───────────────────────────────────────────────────────────────
// Interactive loop
// ───────────────────────────────────────────────────────────────

async fn run(
    workflow: &AssessmentWorkflow,
    input: &mut Input,
    default_weeks: u32,
) -> std::io::Result<()> {
    println!("Skill Roadmap: find your level, get a plan.\n");

    loop {
        let Some(session) = choose_topic(workflow, input, default_weeks).await? else {
            return Ok(());
        };
        print_note(&session);

        if !take_quiz(workflow, input, &session).await? {
            return Ok(());
        }

        let (signal, watcher) = interruptible();
        let result = workflow.submit_quiz_cancellable(&signal).await;
        watcher.abort();
        match result {
            Ok(session) => print_note(&session),
            Err(error) => {
                eprintln!("Could not build a roadmap: {error}");
                return Ok(());
            }
        }

        match workflow.report().await {
            Ok(report) => println!("\n{report}"),
            Err(error) => eprintln!("Could not produce the report: {error}"),
        }

        offer_export(workflow, input).await?;

        let again = prompt(input, "Start over with another topic? [y/N] ").await?;
        if !matches!(again.as_deref(), Some("y" | "Y" | "yes")) {
            return Ok(());
        }
        if let Err(error) = workflow.restart().await {
            eprintln!("Could not restart: {error}");
            return Ok(());
        }
        println!();
    }
}

/// Asks for a topic and week count until one is accepted. `None` on quit.
async fn choose_topic(
    workflow: &AssessmentWorkflow,
    input: &mut Input,
    default_weeks: u32,
) -> std::io::Result<Option<Session>> {
    loop {
        println!("Popular topics:");
        for (number, topic) in PRESET_TOPICS.iter().enumerate() {
            println!("  {}. {topic}", number + 1);
        }
        let Some(answer) = prompt(input, "Topic (number or your own, q to quit): ").await? else {
            return Ok(None);
        };
        if answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        let topic = match answer.parse::<usize>() {
            Ok(number) if (1..=PRESET_TOPICS.len()).contains(&number) => {
                PRESET_TOPICS[number - 1].to_string()
            }
            _ => answer,
        };

        let weeks_prompt = format!("Weeks available [6/12] (default {default_weeks}): ");
        let Some(weeks) = prompt(input, &weeks_prompt).await? else {
            return Ok(None);
        };
        let weeks = if weeks.is_empty() {
            default_weeks
        } else {
            match weeks.parse::<u32>() {
                Ok(weeks) => weeks,
                Err(_) => {
                    eprintln!("Please enter 6 or 12.\n");
                    continue;
                }
            }
        };

        println!("\nPreparing a quiz on {topic}...");
        let (signal, watcher) = interruptible();
        let result = workflow.submit_topic_cancellable(&topic, weeks, &signal).await;
        watcher.abort();
        match result {
            Ok(session) => return Ok(Some(session)),
            Err(error) => eprintln!("{error}\n"),
        }
    }
}

/// Walks through every question. `false` when input ends early.
async fn take_quiz(
    workflow: &AssessmentWorkflow,
    input: &mut Input,
    session: &Session,
) -> std::io::Result<bool> {
    let Some(quiz) = session.quiz() else {
        return Ok(false);
    };
    let total = quiz.len();

    for (position, question) in quiz.questions().iter().enumerate() {
        println!("\nQuestion {} of {total}: {}", position + 1, question.text());
        for (letter, option) in ('a'..).zip(question.options().iter()) {
            println!("  {letter}) {option}");
        }

        loop {
            let Some(answer) = prompt(input, "Your answer: ").await? else {
                return Ok(false);
            };
            let Some(index) = option_index(&answer) else {
                eprintln!("Answer with a letter from a to d.");
                continue;
            };
            match workflow.record_answer(question.id().value(), index).await {
                Ok(_) => break,
                Err(error) => eprintln!("{error}"),
            }
        }
    }

    println!("\nBuilding your roadmap...");
    Ok(true)
}

async fn offer_export(workflow: &AssessmentWorkflow, input: &mut Input) -> std::io::Result<()> {
    let Some(answer) = prompt(input, "Save the roadmap? [text/pdf/image, Enter to skip] ").await?
    else {
        return Ok(());
    };
    if answer.is_empty() {
        return Ok(());
    }
    let format = match answer.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(error) => {
            eprintln!("{error}");
            return Ok(());
        }
    };

    match workflow.export(format, &UnavailableRenderer).await {
        Ok(document) => {
            tokio::fs::write(&document.filename, &document.content).await?;
            println!("Saved {}", document.filename);
        }
        Err(error) => eprintln!("Export failed: {error}"),
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Helpers
// ───────────────────────────────────────────────────────────────

/// Prints `message` and reads one trimmed line. `None` at end of input.
async fn prompt(input: &mut Input, message: &str) -> std::io::Result<Option<String>> {
    print!("{message}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

fn print_note(session: &Session) {
    if let Some(note) = session.last_error() {
        println!("(note: {note})");
    }
}

/// Accepts `a`-`d` or `1`-`4`.
fn option_index(answer: &str) -> Option<u8> {
    match answer.to_ascii_lowercase().as_str() {
        "a" | "1" => Some(0),
        "b" | "2" => Some(1),
        "c" | "3" => Some(2),
        "d" | "4" => Some(3),
        _ => None,
    }
}

/// Ctrl-C cancels the generation in flight; bundled content is used instead.
fn interruptible() -> (CancelSignal, JoinHandle<()>) {
    let (handle, signal) = CancelSignal::channel();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted; falling back to bundled content");
            handle.cancel();
        }
    });
    (signal, watcher)
}
