// src/calc/grade.rs

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{
    calc::ValidationError,
    models::paper::{Paper, PaperInput},
};

/// Letter bucket for a percentage. Ordered `Fail < D < C < B < A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "FAIL")]
    Fail,
    D,
    C,
    B,
    A,
}

impl Grade {
    /// | Percentage | Grade |
    /// |------------|-------|
    /// | >= 85      | A     |
    /// | >= 70      | B     |
    /// | >= 55      | C     |
    /// | >= 40      | D     |
    /// | < 40       | FAIL  |
    pub fn from_percentage(percentage: Decimal) -> Self {
        match percentage {
            p if p >= Decimal::from(85) => Grade::A,
            p if p >= Decimal::from(70) => Grade::B,
            p if p >= Decimal::from(55) => Grade::C,
            p if p >= Decimal::from(40) => Grade::D,
            _ => Grade::Fail,
        }
    }
}

/// Totals for a set of papers. Always derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub total_full: u64,
    pub total_pass: u64,
    pub total_obtained: i64,
    /// Two decimal places, serialized as a string ("72.50").
    pub percentage: Decimal,
    /// `None` when there are no full marks to grade against.
    pub grade: Option<Grade>,
}

/// Sums marks across papers and grades the percentage.
///
/// Papers without entered marks contribute 0 obtained. When the total full
/// marks is 0 (no papers, or only speed papers) the percentage is `0.00` and
/// no grade is given.
pub fn compute_totals(papers: &[Paper]) -> ResultSummary {
    let total_full: u64 = papers.iter().map(|p| u64::from(p.full_marks)).sum();
    let total_pass: u64 = papers.iter().map(|p| u64::from(p.pass_marks)).sum();
    let total_obtained: i64 = papers.iter().filter_map(|p| p.marks_obtained).sum();

    if total_full == 0 {
        return ResultSummary {
            total_full,
            total_pass,
            total_obtained,
            percentage: Decimal::new(0, 2),
            grade: None,
        };
    }

    let mut percentage = (Decimal::from(total_obtained) * Decimal::from(100)
        / Decimal::from(total_full))
    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    percentage.rescale(2);

    ResultSummary {
        total_full,
        total_pass,
        total_obtained,
        percentage,
        grade: Some(Grade::from_percentage(percentage)),
    }
}

/// When a paper is being checked. Blank marks are fine while editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStage {
    #[default]
    Editing,
    Submission,
}

pub fn validate_paper(paper: &Paper, stage: ValidationStage) -> Result<(), ValidationError> {
    match paper.marks_obtained {
        None if stage == ValidationStage::Submission => Err(ValidationError::Required),
        None => Ok(()),
        Some(obtained) if obtained < 0 || obtained > i64::from(paper.full_marks) => {
            Err(ValidationError::OutOfRange {
                obtained,
                full_marks: paper.full_marks,
            })
        }
        Some(_) => Ok(()),
    }
}

/// A failed paper in a marks form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperIssue {
    pub index: usize,
    pub paper_name: String,
    pub error: ValidationError,
}

/// Validates every paper so the form can show all errors at once.
pub fn validate_papers(papers: &[Paper], stage: ValidationStage) -> Vec<PaperIssue> {
    papers
        .iter()
        .enumerate()
        .filter_map(|(index, paper)| {
            validate_paper(paper, stage).err().map(|error| PaperIssue {
                index,
                paper_name: paper.paper_name.clone(),
                error,
            })
        })
        .collect()
}

/// Parses and validates raw form/API papers in one pass.
pub fn check_papers(
    inputs: Vec<PaperInput>,
    stage: ValidationStage,
) -> Result<Vec<Paper>, Vec<PaperIssue>> {
    let mut papers = Vec::with_capacity(inputs.len());
    let mut issues = Vec::new();

    for (index, input) in inputs.into_iter().enumerate() {
        let paper_name = input.paper_name.clone();
        match input.into_paper() {
            Ok(paper) => {
                if let Err(error) = validate_paper(&paper, stage) {
                    issues.push(PaperIssue {
                        index,
                        paper_name,
                        error,
                    });
                }
                papers.push(paper);
            }
            Err(error) => issues.push(PaperIssue {
                index,
                paper_name,
                error,
            }),
        }
    }

    if issues.is_empty() { Ok(papers) } else { Err(issues) }
}
