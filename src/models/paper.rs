// src/models/paper.rs

use serde::{Deserialize, Serialize};

use crate::{calc::ValidationError, models::lenient};

/// A single subject/exam component of a student's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub paper_name: String,
    pub full_marks: u32,
    pub pass_marks: u32,

    /// `None` until marks have been entered.
    /// Signed so that a negative entry reaches validation instead of failing to parse.
    pub marks_obtained: Option<i64>,
}

/// A paper as typed into the marks form or returned by `api.php`.
///
/// "Speed" papers come without full/pass marks; those default to 0.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperInput {
    #[serde(alias = "name", alias = "paper")]
    pub paper_name: String,

    #[serde(default, deserialize_with = "lenient::count")]
    pub full_marks: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub pass_marks: u32,

    #[serde(default, alias = "obtained_marks", alias = "marks")]
    pub marks_obtained: Option<RawMarks>,
}

/// Raw marks value before numeric parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawMarks {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawMarks {
    /// Parses a whole number of marks. Blank text means "not entered".
    pub fn parse(&self) -> Result<Option<i64>, ValidationError> {
        match self {
            RawMarks::Int(v) => Ok(Some(*v)),
            RawMarks::Float(f) => whole_number(*f)
                .map(Some)
                .ok_or_else(|| ValidationError::NonNumeric { raw: f.to_string() }),
            RawMarks::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                if let Ok(v) = trimmed.parse::<i64>() {
                    return Ok(Some(v));
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(whole_number)
                    .map(Some)
                    .ok_or_else(|| ValidationError::NonNumeric { raw: s.clone() })
            }
        }
    }
}

fn whole_number(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl PaperInput {
    /// Converts the form value into a `Paper`. Range checks happen in `calc::validate_paper`.
    pub fn into_paper(self) -> Result<Paper, ValidationError> {
        let marks_obtained = match &self.marks_obtained {
            Some(raw) => raw.parse()?,
            None => None,
        };
        Ok(Paper {
            paper_name: self.paper_name,
            full_marks: self.full_marks,
            pass_marks: self.pass_marks,
            marks_obtained,
        })
    }
}

/// `{student, marks: {papers: [...]}}` as returned by the result endpoint.
/// The student record is passed through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentResult {
    #[serde(default)]
    pub student: serde_json::Value,
    #[serde(default)]
    pub marks: MarksBlock,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarksBlock {
    #[serde(default)]
    pub papers: Vec<PaperInput>,
}
