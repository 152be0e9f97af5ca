// src/handlers/results.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    calc::{PaperIssue, ResultSummary, ValidationStage, check_papers, compute_totals},
    error::AppError,
    models::paper::{Paper, PaperInput},
    upstream::Upstream,
};

/// DTO for a marks form.
#[derive(Debug, Deserialize)]
pub struct PapersRequest {
    pub papers: Vec<PaperInput>,
    #[serde(default)]
    pub stage: ValidationStage,
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<PaperIssue>,
}

#[derive(Debug, Serialize)]
pub struct StudentResultResponse {
    pub student: serde_json::Value,
    pub papers: Vec<Paper>,
    pub summary: ResultSummary,
}

/// Computes totals, percentage and grade for a marks form.
///
/// Invalid papers are reported together with 422.
pub async fn compute_result(
    Json(req): Json<PapersRequest>,
) -> Result<impl IntoResponse, AppError> {
    let papers = check_papers(req.papers, req.stage).map_err(AppError::Validation)?;
    Ok(Json(compute_totals(&papers)))
}

/// Checks a marks form without computing anything.
pub async fn validate_result(Json(req): Json<PapersRequest>) -> impl IntoResponse {
    let issues = check_papers(req.papers, req.stage).err().unwrap_or_default();
    Json(ValidationReport {
        valid: issues.is_empty(),
        issues,
    })
}

/// Fetches a student's marks from the remote API and grades them.
pub async fn get_student_result(
    State(upstream): State<Arc<dyn Upstream>>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = student_id.trim();
    if student_id.is_empty() || student_id.len() > 64 {
        return Err(AppError::BadRequest("Invalid student id".to_string()));
    }

    let result = upstream.fetch_result(student_id).await.map_err(|e| {
        tracing::error!("Failed to fetch result for {}: {:?}", student_id, e);
        AppError::from(e)
    })?;

    let papers = check_papers(result.marks.papers, ValidationStage::Editing).map_err(|issues| {
        tracing::warn!(
            "Upstream result for {} has {} invalid papers",
            student_id,
            issues.len()
        );
        AppError::Validation(issues)
    })?;
    let summary = compute_totals(&papers);

    Ok(Json(StudentResultResponse {
        student: result.student,
        papers,
        summary,
    }))
}
