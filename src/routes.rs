// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{health, quiz, results, transactions},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the results and quiz sub-routers with the transaction routes.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (upstream client, config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let result_routes = Router::new()
        .route("/compute", post(results::compute_result))
        .route("/validate", post(results::validate_result))
        .route("/{student_id}", get(results::get_student_result));

    let quiz_routes = Router::new()
        .route("/score", post(quiz::score_quiz))
        .route("/attempt", post(quiz::start_attempt))
        .route("/attempt/answer", post(quiz::answer_question))
        .route("/attempt/finish", post(quiz::finish_attempt))
        .route("/{exam_id}", get(quiz::get_quiz));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/transactions", get(transactions::list_transactions))
        .route("/api/transactions/page", post(transactions::page_transactions))
        .nest("/api/results", result_routes)
        .nest("/api/quiz", quiz_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
