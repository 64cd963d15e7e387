//! Bundled quizzes and roadmaps, compiled into the binary.
//!
//! Entries are stored as plain tables and assembled into domain values on
//! first use. A table row that fails domain validation is dropped from the
//! catalog and logged; the tests below check that none do.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::assessment::{OptionIndex, ProficiencyLevel, Question, Quiz};
use crate::domain::foundation::{QuestionId, ValidationError};
use crate::domain::roadmap::{RoadmapStep, TimeCommitment};
use crate::ports::FallbackCatalog;

/// Topic whose content stands in when a requested topic has none.
pub const DEFAULT_FALLBACK_TOPIC: &str = "Python";

// ───────────────────────────────────────────────────────────────
// Raw tables
// ───────────────────────────────────────────────────────────────

struct QuestionRow {
    text: &'static str,
    options: [&'static str; 4],
    correct: u8,
    tag: &'static str,
}

struct StepRow {
    title: &'static str,
    description: &'static str,
    concepts: &'static [&'static str],
    resources: &'static [&'static str],
    milestone: &'static str,
}

const PYTHON_QUIZ: &[QuestionRow] = &[
    QuestionRow {
        text: "Which keyword is used to define a function in Python?",
        options: ["function", "def", "define", "func"],
        correct: 1,
        tag: "Functions",
    },
    QuestionRow {
        text: "Which data type is mutable in Python?",
        options: ["tuple", "string", "list", "int"],
        correct: 2,
        tag: "Data Types",
    },
];

const PYTHON_OOP: StepRow = StepRow {
    title: "Object-Oriented Programming Fundamentals",
    description: "Learn the core principles of OOP including classes, objects, inheritance, and polymorphism.",
    concepts: &["Classes", "Objects", "Inheritance", "Polymorphism"],
    resources: &["Python OOP Tutorial", "Real Python OOP Guide"],
    milestone: "Create a simple class hierarchy with inheritance",
};

const PYTHON_ERRORS: StepRow = StepRow {
    title: "Error Handling and Exceptions",
    description: "Understand how to handle errors gracefully in Python using try-except blocks.",
    concepts: &["Try-Except", "Custom Exceptions", "Finally Block"],
    resources: &["Python Exceptions Tutorial", "Official Documentation"],
    milestone: "Implement robust error handling in a sample application",
};

const PYTHON_BASICS_REVIEW: StepRow = StepRow {
    title: "Python Basics Review",
    description: "Solidify your understanding of Python fundamentals including data types, control structures, and functions.",
    concepts: &["Data Types", "Control Flow", "Functions"],
    resources: &["Python Basics Tutorial", "Practice Exercises"],
    milestone: "Complete 10 practice problems demonstrating core concepts",
};

const PYTHON_SYNTAX: StepRow = StepRow {
    title: "Syntax, Variables and Data Types",
    description: "Set up Python and get comfortable with variables, numbers, strings, lists and dictionaries.",
    concepts: &["Variables", "Data Types", "Collections"],
    resources: &["Official Python Tutorial", "Practice Exercises"],
    milestone: "Write a script that stores and prints structured data",
};

const PYTHON_CONTROL_FLOW: StepRow = StepRow {
    title: "Control Flow and Functions",
    description: "Use conditionals and loops, then package logic into reusable functions.",
    concepts: &["Control Flow", "Loops", "Functions"],
    resources: &["Python Basics Tutorial", "Official Documentation"],
    milestone: "Build a small command-line calculator",
};

const PYTHON_CONCURRENCY: StepRow = StepRow {
    title: "Concurrency and Async IO",
    description: "Compare threads, processes and asyncio, and learn when each one fits.",
    concepts: &["Threading", "Multiprocessing", "Asyncio"],
    resources: &["asyncio Documentation", "Real Python Concurrency Guide"],
    milestone: "Parallelize a slow I/O-bound script with asyncio",
};

const PYTHON_PACKAGING: StepRow = StepRow {
    title: "Testing and Packaging",
    description: "Write tests with pytest and publish a package with a clean project layout.",
    concepts: &["Pytest", "Packaging", "Virtual Environments"],
    resources: &["Pytest Documentation", "Python Packaging Guide"],
    milestone: "Publish a tested package to a local index",
};

type RoadmapKey = (&'static str, ProficiencyLevel, TimeCommitment);

const ROADMAP_TABLE: &[(RoadmapKey, &[StepRow])] = &[
    (
        ("Python", ProficiencyLevel::Foundational, TimeCommitment::SixWeeks),
        &[PYTHON_SYNTAX, PYTHON_CONTROL_FLOW],
    ),
    (
        ("Python", ProficiencyLevel::Intermediate, TimeCommitment::SixWeeks),
        &[PYTHON_OOP, PYTHON_ERRORS],
    ),
    (
        ("Python", ProficiencyLevel::Intermediate, TimeCommitment::TwelveWeeks),
        &[PYTHON_BASICS_REVIEW, PYTHON_OOP],
    ),
    (
        ("Python", ProficiencyLevel::Advanced, TimeCommitment::SixWeeks),
        &[PYTHON_CONCURRENCY, PYTHON_PACKAGING],
    ),
];

const QUIZ_TABLE: &[(&str, &[QuestionRow])] = &[("Python", PYTHON_QUIZ)];

// ───────────────────────────────────────────────────────────────
// Assembly
// ───────────────────────────────────────────────────────────────

fn build_quiz(rows: &[QuestionRow]) -> Result<Quiz, ValidationError> {
    let questions = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let id = QuestionId::new(i as u32 + 1)
                .ok_or_else(|| ValidationError::invalid_format("id", "must be positive"))?;
            Question::new(
                id,
                row.text,
                row.options.map(str::to_string),
                OptionIndex::new(row.correct)?,
                row.tag,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Quiz::new(questions)
}

fn build_steps(rows: &[StepRow]) -> Result<Vec<RoadmapStep>, ValidationError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            Ok(RoadmapStep::new(i as u32 + 1, row.title, row.description)?
                .with_concepts(row.concepts.iter().copied())
                .with_resources(row.resources.iter().copied())
                .with_milestone(row.milestone))
        })
        .collect()
}

static QUIZZES: Lazy<HashMap<&'static str, Quiz>> = Lazy::new(|| {
    QUIZ_TABLE
        .iter()
        .filter_map(|(topic, rows)| match build_quiz(rows) {
            Ok(quiz) => Some((*topic, quiz)),
            Err(error) => {
                tracing::error!(topic, %error, "dropping invalid bundled quiz");
                None
            }
        })
        .collect()
});

static ROADMAPS: Lazy<Vec<(RoadmapKey, Vec<RoadmapStep>)>> = Lazy::new(|| {
    ROADMAP_TABLE
        .iter()
        .filter_map(|(key, rows)| match build_steps(rows) {
            Ok(steps) => Some((*key, steps)),
            Err(error) => {
                tracing::error!(topic = key.0, level = %key.1, %error, "dropping invalid bundled roadmap");
                None
            }
        })
        .collect()
});

/// Catalog backed by the tables above.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFallbackCatalog;

impl StaticFallbackCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl FallbackCatalog for StaticFallbackCatalog {
    fn quiz(&self, topic: &str) -> Option<Quiz> {
        QUIZZES.get(topic).cloned()
    }

    fn roadmap(
        &self,
        topic: &str,
        level: ProficiencyLevel,
        weeks: TimeCommitment,
    ) -> Option<Vec<RoadmapStep>> {
        ROADMAPS
            .iter()
            .find(|((t, l, w), _)| *t == topic && *l == level && *w == weeks)
            .map(|(_, steps)| steps.clone())
    }
}
