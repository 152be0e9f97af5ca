// src/calc/mod.rs

//! Pure result, quiz and ledger computations.
//!
//! Nothing in here performs I/O; handlers fetch data, call these functions and
//! serialize what comes back.

pub mod error;
pub mod grade;
pub mod ledger;
pub mod pagination;
pub mod quiz;

pub use error::{AttemptError, LedgerError, ValidationError};
pub use grade::{
    Grade, PaperIssue, ResultSummary, ValidationStage, check_papers, compute_totals,
    validate_paper, validate_papers,
};
pub use ledger::{Ledger, TransactionSummary, summarize_transactions};
pub use pagination::{Page, paginate};
pub use quiz::{AttemptSummary, QuizScore, compute_quiz_score};
