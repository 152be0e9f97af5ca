// src/handlers/quiz.rs

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    calc::{AttemptSummary, compute_quiz_score},
    error::AppError,
    models::quiz::{PublicQuizQuestion, QuizAttempt, QuizQuestion},
    upstream::Upstream,
    utils::html::decode_prompt,
};

/// DTO for scoring a set of answers in one go.
#[derive(Debug, Deserialize)]
pub struct ScoreQuizRequest {
    pub questions: Vec<QuizQuestion>,

    /// Key: Question ID
    /// Value: chosen option letter
    #[serde(default)]
    pub answers: HashMap<i64, String>,
}

/// DTO for answering one question of a running attempt.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub attempt: QuizAttempt,
    pub question: QuizQuestion,
    pub chosen_option: String,
}

/// DTO for submitting an attempt.
#[derive(Debug, Deserialize)]
pub struct FinishAttemptRequest {
    pub attempt: QuizAttempt,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Serialize)]
pub struct FinishAttemptResponse {
    pub attempt: QuizAttempt,
    #[serde(flatten)]
    pub summary: AttemptSummary,
}

/// Fetches an exam paper and returns it without answers, prompts decoded.
pub async fn get_quiz(
    State(upstream): State<Arc<dyn Upstream>>,
    Path(exam_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let exam_id = exam_id.trim();
    if exam_id.is_empty() || exam_id.len() > 64 {
        return Err(AppError::BadRequest("Invalid exam id".to_string()));
    }

    let questions = upstream.fetch_quiz(exam_id).await.map_err(|e| {
        tracing::error!("Failed to fetch quiz {}: {:?}", exam_id, e);
        AppError::from(e)
    })?;

    let public_questions = questions
        .into_iter()
        .map(|q| -> Result<PublicQuizQuestion, AppError> {
            Ok(PublicQuizQuestion {
                id: q.id,
                prompt: decode_prompt(&q.prompt)?,
                options: q.options,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(public_questions))
}

/// Scores answers against a paper.
pub async fn score_quiz(Json(req): Json<ScoreQuizRequest>) -> impl IntoResponse {
    Json(compute_quiz_score(&req.questions, &req.answers))
}

/// Opens a new attempt stamped with the server clock.
pub async fn start_attempt() -> impl IntoResponse {
    Json(QuizAttempt::start(Utc::now()))
}

/// Records an answer and returns the updated attempt.
pub async fn answer_question(
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut attempt = req.attempt;
    attempt.record_answer(&req.question, &req.chosen_option)?;
    Ok(Json(attempt))
}

/// Seals an attempt and returns its score and elapsed time.
pub async fn finish_attempt(
    Json(req): Json<FinishAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.questions.is_empty() {
        return Err(AppError::BadRequest("No questions submitted".to_string()));
    }

    let mut attempt = req.attempt;
    let summary = attempt.finish(&req.questions, Utc::now())?;
    tracing::info!(
        "Attempt finished: {}/{} correct in {}s",
        summary.score.correct_count,
        summary.total_questions,
        summary.elapsed_seconds
    );

    Ok(Json(FinishAttemptResponse { attempt, summary }))
}
