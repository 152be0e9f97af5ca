// src/handlers/transactions.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    calc::{Ledger, Page, TransactionSummary},
    config::{Config, MAX_PAGE_SIZE},
    error::AppError,
    models::transaction::Transaction,
    upstream::Upstream,
};

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize, Validate)]
pub struct PageParams {
    /// 1-based page number (default: 1).
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<usize>,

    /// Items per page (default from config, max 100).
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: Option<usize>,
}

/// DTO for paging a list the client already holds.
#[derive(Debug, Deserialize, Validate)]
pub struct TransactionPageRequest {
    pub transactions: Vec<Transaction>,
    #[serde(flatten)]
    #[validate(nested)]
    pub params: PageParams,
}

#[derive(Debug, Serialize)]
pub struct TransactionPageResponse {
    pub page: Page<Transaction>,
    /// Over every transaction, not only this page.
    pub summary: TransactionSummary,
}

fn respond(ledger: &Ledger, params: &PageParams, config: &Config) -> TransactionPageResponse {
    let page = params.page.unwrap_or(1);
    let page_size = params
        .page_size
        .unwrap_or(config.default_page_size)
        .min(MAX_PAGE_SIZE);

    TransactionPageResponse {
        page: ledger.page(page, page_size),
        summary: ledger.summary().clone(),
    }
}

/// Pages a posted transaction list and summarizes the whole list.
pub async fn page_transactions(
    State(config): State<Config>,
    Json(req): Json<TransactionPageRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let ledger =
        Ledger::new(req.transactions).map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Json(respond(&ledger, &req.params, &config)))
}

/// Fetches the ledger from the remote API, then pages and summarizes it.
pub async fn list_transactions(
    State(upstream): State<Arc<dyn Upstream>>,
    State(config): State<Config>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let transactions = upstream.fetch_transactions().await.map_err(|e| {
        tracing::error!("Failed to fetch transactions: {:?}", e);
        AppError::from(e)
    })?;

    let ledger = Ledger::new(transactions).map_err(|e| {
        tracing::error!("Upstream transactions could not be summarized: {}", e);
        AppError::BadGateway(e.to_string())
    })?;
    tracing::debug!("Fetched {} transactions", ledger.len());
    Ok(Json(respond(&ledger, &params, &config)))
}
