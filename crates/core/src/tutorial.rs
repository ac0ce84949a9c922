//! Tutorial definitions.
//!
//! A tutorial is one training unit with a fixed display order. The payload
//! shape is constrained by the tutorial type: text carries inline body
//! text, video and image carry a URL, quizzes carry a structured question
//! list.

use serde::{Deserialize, Serialize};

use crate::types::TutorialId;

/// One training unit in the onboarding catalog.
///
/// Immutable after catalog load. `order` defines the display and
/// navigation sequence and need not equal `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    /// Unique, stable identifier.
    pub id: TutorialId,
    pub title: String,
    pub description: String,
    /// Type discriminant plus payload (`type` / `content` on the wire).
    #[serde(flatten)]
    pub content: TutorialContent,
    /// Human-readable duration hint, e.g. "5 minutes".
    #[serde(rename = "estimatedTime")]
    pub estimated_time: String,
    /// Position in the display sequence (1-based).
    pub order: u32,
}

/// Tutorial payload, tagged by the tutorial type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum TutorialContent {
    /// Inline body text.
    Text(String),
    /// URL of a video to embed.
    Video(String),
    /// URL of an image to display.
    Image(String),
    /// Multiple-choice quiz.
    Quiz(QuizContent),
}

/// Question list for a quiz tutorial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizContent {
    pub questions: Vec<QuizQuestion>,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
}
