// src/models/quiz.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// A multiple-choice question as served by `api.php`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(deserialize_with = "lenient::int_id")]
    pub id: i64,

    /// Base64 of the HTML question text.
    #[serde(alias = "question")]
    pub prompt: String,

    pub options: QuizOptions,

    /// Letter of the correct option ("A".."D").
    #[serde(alias = "answer", alias = "correct_answer")]
    pub correct_option: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOptions {
    #[serde(rename = "A", alias = "a", alias = "option_a")]
    pub a: String,
    #[serde(rename = "B", alias = "b", alias = "option_b")]
    pub b: String,
    #[serde(rename = "C", alias = "c", alias = "option_c")]
    pub c: String,
    #[serde(rename = "D", alias = "d", alias = "option_d")]
    pub d: String,
}

/// DTO for sending a question to the exam screen (excludes the correct option).
#[derive(Debug, Serialize)]
pub struct PublicQuizQuestion {
    pub id: i64,
    /// Decoded and sanitized HTML.
    pub prompt: String,
    pub options: QuizOptions,
}

/// One answered question inside an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: i64,
    pub chosen_option: String,
    pub is_correct: bool,
}

/// A student's run through a quiz paper.
///
/// The exam screen holds this between requests and posts it back; see
/// `calc::quiz` for the lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    /// In the order the questions were first answered.
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub score: usize,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}
