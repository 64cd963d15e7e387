//! Response Parser - structural validation of generated quiz and roadmap
//! payloads.
//!
//! Both parsers share the same outline: locate the bracketed array, decode
//! it into loosely-typed entries, then validate every entry into the
//! domain type. The first invalid entry aborts the whole parse; partially
//! valid payloads are never returned.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

use super::extractor::extract_array;
use super::ParseError;
use crate::domain::assessment::{OptionIndex, Question, Quiz, OPTION_COUNT};
use crate::domain::foundation::QuestionId;
use crate::domain::roadmap::RoadmapStep;

/// Parses a generated quiz.
///
/// Explicit ids are kept; entries without a usable id take the lowest
/// positive id not claimed by another entry.
pub fn parse_quiz(text: &str) -> Result<Quiz, ParseError> {
    let raws = decode_entries(text)?
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<RawQuestion>(entry)
                .map_err(|e| ParseError::invalid_entry(index, e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut claimed = HashSet::with_capacity(raws.len());
    for (index, raw) in raws.iter().enumerate() {
        if let Some(id) = explicit_id(raw) {
            if !claimed.insert(id) {
                return Err(ParseError::invalid_entry(
                    index,
                    format!("duplicate question id {}", id),
                ));
            }
        }
    }

    let mut next_free = 1u32;
    let mut questions = Vec::with_capacity(raws.len());

    for (index, raw) in raws.into_iter().enumerate() {
        let id = match explicit_id(&raw) {
            Some(id) => id,
            None => {
                let id = loop {
                    let candidate = QuestionId::new(next_free)
                        .ok_or_else(|| ParseError::invalid_entry(index, "cannot assign question id"))?;
                    next_free = next_free.saturating_add(1);
                    if !claimed.contains(&candidate) {
                        break candidate;
                    }
                };
                claimed.insert(id);
                id
            }
        };

        let options: [String; OPTION_COUNT] = raw.options.try_into().map_err(|opts: Vec<String>| {
            ParseError::invalid_entry(
                index,
                format!("expected {} options, got {}", OPTION_COUNT, opts.len()),
            )
        })?;

        let correct = u8::try_from(raw.correct_answer)
            .ok()
            .and_then(|n| OptionIndex::new(n).ok())
            .ok_or_else(|| {
                ParseError::invalid_entry(
                    index,
                    format!("correct answer index {} is outside 0..=3", raw.correct_answer),
                )
            })?;

        let question = Question::new(id, raw.question, options, correct, raw.concept_tag)
            .map_err(|e| ParseError::invalid_entry(index, e.to_string()))?;
        questions.push(question);
    }

    Quiz::new(questions).map_err(|e| ParseError::malformed(e.to_string()))
}

fn explicit_id(raw: &RawQuestion) -> Option<QuestionId> {
    raw.id
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .and_then(QuestionId::new)
}

/// Parses generated roadmap steps, returned in week order.
pub fn parse_roadmap(text: &str) -> Result<Vec<RoadmapStep>, ParseError> {
    let entries = decode_entries(text)?;

    let mut steps = Vec::with_capacity(entries.len());
    let mut seen_weeks = HashSet::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let raw: RawStep = serde_json::from_value(entry)
            .map_err(|e| ParseError::invalid_entry(index, e.to_string()))?;

        let week = coerce_week(&raw.week).ok_or_else(|| {
            ParseError::invalid_entry(index, format!("week {} is not a positive integer", raw.week))
        })?;

        if !seen_weeks.insert(week) {
            return Err(ParseError::invalid_entry(index, format!("duplicate week {}", week)));
        }

        let mut step = RoadmapStep::new(week, raw.title, raw.description)
            .map_err(|e| ParseError::invalid_entry(index, e.to_string()))?
            .with_concepts(clean_list(raw.concepts))
            .with_resources(clean_list(raw.resources));

        if let Some(milestone) = raw.milestone.map(|m| m.trim().to_string()) {
            if !milestone.is_empty() {
                step = step.with_milestone(milestone);
            }
        }

        steps.push(step);
    }

    steps.sort_by_key(|step| step.week);
    Ok(steps)
}

fn decode_entries(text: &str) -> Result<Vec<Value>, ParseError> {
    let region = extract_array(text)?;
    let entries: Vec<Value> =
        serde_json::from_str(region).map_err(|e| ParseError::malformed(e.to_string()))?;

    if entries.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(entries)
}

fn coerce_week(value: &Value) -> Option<u32> {
    let week = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;

    u32::try_from(week).ok().filter(|w| *w > 0)
}

fn clean_list(items: Option<Vec<String>>) -> Vec<String> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    #[serde(default)]
    id: Option<Value>,
    #[serde(alias = "text")]
    question: String,
    options: Vec<String>,
    #[serde(alias = "correctOptionIndex", alias = "correct_answer")]
    correct_answer: i64,
    #[serde(alias = "concept_tag", alias = "concept")]
    concept_tag: String,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    week: Value,
    title: String,
    description: String,
    #[serde(default)]
    concepts: Option<Vec<String>>,
    #[serde(default)]
    resources: Option<Vec<String>>,
    #[serde(default)]
    milestone: Option<String>,
}
