// src/calc/error.rs

use serde::Serialize;
use thiserror::Error;

/// Rejected marks entry.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Negative, or more than the paper's full marks.
    #[error("marks obtained {obtained} must be between 0 and {full_marks}")]
    OutOfRange { obtained: i64, full_marks: u32 },

    /// No marks entered for a paper at submission time.
    #[error("marks obtained are required")]
    Required,

    #[error("marks obtained must be a whole number, got {raw:?}")]
    NonNumeric { raw: String },
}

/// Misuse of a `QuizAttempt`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("attempt was already submitted")]
    AlreadyFinished,

    #[error("answer refers to unknown question {0}")]
    UnknownQuestion(i64),

    /// `started_at` is later than the time the attempt is submitted.
    #[error("attempt start time is in the future")]
    StartedInFuture,
}

/// Totals that do not fit in a `Decimal`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("{0} total overflowed")]
    Overflow(&'static str),
}
