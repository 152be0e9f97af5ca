// src/upstream.rs

//! Client for the remote `api.php` system of record.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::models::{
    envelope::ApiEnvelope, paper::StudentResult, quiz::QuizQuestion, transaction::Transaction,
};

pub const TASK_RESULT: &str = "get_result";
pub const TASK_QUIZ: &str = "get_exam_questions";
pub const TASK_TRANSACTIONS: &str = "get_transactions";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request timed out after {0}s")]
    Timeout(u64),

    #[error("upstream unreachable: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode upstream response: {0}")]
    Decode(String),

    /// The API answered with a failure status (`status: "error"` / `success: false`).
    #[error("upstream rejected the request: {0}")]
    Rejected(String),
}

/// The data the service needs from the remote API.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch_result(&self, student_id: &str) -> Result<StudentResult, UpstreamError>;

    async fn fetch_quiz(&self, exam_id: &str) -> Result<Vec<QuizQuestion>, UpstreamError>;

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, UpstreamError>;
}

/// `api.php?task=...` over HTTP.
pub struct HttpUpstream {
    base_url: Url,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(base_url: Url, timeout_secs: u64) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self {
            base_url,
            timeout_secs,
            client,
        })
    }

    /// Runs one task and returns the envelope body.
    #[instrument(skip(self, params))]
    async fn get_task(&self, task: &str, params: &[(&str, &str)]) -> Result<Value, UpstreamError> {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("task", task);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(self.timeout_secs)
            } else {
                UpstreamError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        let envelope = ApiEnvelope::from_value(value);
        if !envelope.ok {
            let message = envelope
                .message
                .unwrap_or_else(|| "request failed".to_string());
            tracing::warn!(task, %message, "upstream rejected task");
            return Err(UpstreamError::Rejected(message));
        }

        Ok(envelope.body)
    }

    async fn get_task_as<T: DeserializeOwned>(
        &self,
        task: &str,
        params: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let body = self.get_task(task, params).await?;
        serde_json::from_value(body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch_result(&self, student_id: &str) -> Result<StudentResult, UpstreamError> {
        self.get_task_as(TASK_RESULT, &[("student_id", student_id)])
            .await
    }

    async fn fetch_quiz(&self, exam_id: &str) -> Result<Vec<QuizQuestion>, UpstreamError> {
        self.get_task_as(TASK_QUIZ, &[("exam_id", exam_id)]).await
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, UpstreamError> {
        self.get_task_as(TASK_TRANSACTIONS, &[]).await
    }
}
