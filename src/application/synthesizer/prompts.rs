//! Prompt templates for quiz and roadmap generation.

use crate::domain::assessment::ScoreResult;
use crate::domain::roadmap::TimeCommitment;

/// Asks for `count` four-option questions about `topic` as a JSON array.
pub fn quiz_prompt(topic: &str, count: usize) -> String {
    format!(
        r#"Generate a {count}-question multiple-choice quiz about {topic}.
For each question, provide:
1. The question text
2. Exactly four answer options
3. The zero-based index of the correct option (0, 1, 2 or 3)
4. A short concept tag naming the knowledge area the question tests

Format the response as a JSON array like this:
[
  {{
    "id": 1,
    "question": "Question text?",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "correctAnswer": 0,
    "conceptTag": "Concept Name"
  }}
]"#
    )
}

/// Asks for a `weeks`-entry roadmap tailored to the score and weak areas.
pub fn roadmap_prompt(topic: &str, score: &ScoreResult, weeks: TimeCommitment) -> String {
    let weeks = weeks.weeks();
    let level = score.level();
    let focus = if score.weak_concepts().is_empty() {
        "no specific weak areas".to_string()
    } else {
        score
            .weak_concepts()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        r#"Create a personalized learning roadmap for {topic} at {level} level.
The user scored {correct} out of {total} and needs help with: {focus}.
Create a {weeks}-week roadmap with exactly {weeks} entries, one per week, with specific learning objectives and activities.

Format the response as a JSON array of objects with this structure:
[
  {{
    "week": 1,
    "title": "Focus Area Title",
    "description": "Detailed description of what to learn this week",
    "concepts": ["Concept 1", "Concept 2"],
    "resources": ["Resource 1", "Resource 2"],
    "milestone": "What you should achieve by the end of the week"
  }}
]

IMPORTANT: Return only the JSON array, no additional text."#,
        correct = score.correct_count(),
        total = score.total_questions(),
    )
}
