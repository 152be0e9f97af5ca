// tests/api_tests.rs

use std::sync::Arc;

use apprise::{
    config::Config,
    models::{
        paper::StudentResult,
        quiz::QuizQuestion,
        transaction::Transaction,
    },
    routes,
    state::AppState,
    upstream::{Upstream, UpstreamError},
};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};

/// Canned remote API.
struct FakeUpstream;

#[async_trait]
impl Upstream for FakeUpstream {
    async fn fetch_result(&self, student_id: &str) -> Result<StudentResult, UpstreamError> {
        match student_id {
            "OM-1" => Ok(serde_json::from_value(json!({
                "student": { "name": "Asha", "reg_no": "OM-1" },
                "marks": { "papers": [
                    { "paper_name": "Theory", "full_marks": "100", "pass_marks": "40", "marks_obtained": "88" },
                    { "paper_name": "Practical", "full_marks": 100, "pass_marks": 40, "marks_obtained": 84 },
                    { "paper_name": "Typing Speed", "full_marks": null, "pass_marks": null, "marks_obtained": "" }
                ]}
            }))
            .unwrap()),
            "OM-BAD" => Ok(serde_json::from_value(json!({
                "student": { "name": "Broken" },
                "marks": { "papers": [
                    { "paper_name": "Theory", "full_marks": 50, "pass_marks": 20, "marks_obtained": 70 }
                ]}
            }))
            .unwrap()),
            _ => Err(UpstreamError::Rejected("Student not found".into())),
        }
    }

    async fn fetch_quiz(&self, _exam_id: &str) -> Result<Vec<QuizQuestion>, UpstreamError> {
        Ok(serde_json::from_value(json!([{
            "id": "5",
            "question": STANDARD.encode("<p>Shortcut to copy?</p><script>x()</script>"),
            "options": { "A": "Ctrl+C", "B": "Ctrl+V", "C": "Ctrl+X", "D": "Ctrl+Z" },
            "answer": "A"
        }]))
        .unwrap())
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, UpstreamError> {
        Err(UpstreamError::Timeout(15))
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let config = Config::from_lookup(|key| match key {
        "RUST_LOG" => Some("error".to_string()),
        _ => None,
    });

    let state = AppState {
        upstream: Arc::new(FakeUpstream),
        config,
    };
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn question(id: i64, correct: &str) -> Value {
    json!({
        "id": id,
        "prompt": "",
        "options": { "A": "a", "B": "b", "C": "c", "D": "d" },
        "correct_option": correct
    })
}

#[tokio::test]
async fn health_check() {
    let address = spawn_app().await;
    let response = reqwest::get(format!("{}/health", address))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn unknown_route_404() {
    let address = spawn_app().await;
    let response = reqwest::get(format!("{}/random_path_that_does_not_exist", address))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn compute_result_grades_papers() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/results/compute", address))
        .json(&json!({
            "papers": [
                { "paper_name": "Theory", "full_marks": 100, "pass_marks": 40, "marks_obtained": "61" },
                { "paper_name": "Practical", "full_marks": 50, "pass_marks": 20, "marks_obtained": 30 }
            ]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total_full"], 150);
    assert_eq!(body["total_pass"], 60);
    assert_eq!(body["total_obtained"], 91);
    assert_eq!(body["percentage"], "60.67");
    assert_eq!(body["grade"], "C");
}

#[tokio::test]
async fn compute_result_with_no_papers() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{}/api/results/compute", address))
        .json(&json!({ "papers": [] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["percentage"], "0.00");
    assert_eq!(body["grade"], Value::Null);
}

#[tokio::test]
async fn compute_result_rejects_marks_above_full() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/results/compute", address))
        .json(&json!({
            "papers": [{ "paper_name": "Viva", "full_marks": 50, "pass_marks": 20, "marks_obtained": 60 }]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["issues"][0]["paper_name"], "Viva");
    assert_eq!(body["issues"][0]["error"]["kind"], "out_of_range");
}

#[tokio::test]
async fn validate_reports_required_at_submission() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{}/api/results/validate", address))
        .json(&json!({
            "stage": "submission",
            "papers": [
                { "paper_name": "Theory", "full_marks": 100, "pass_marks": 40, "marks_obtained": "" },
                { "paper_name": "Practical", "full_marks": 100, "pass_marks": 40, "marks_obtained": "7x" }
            ]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["valid"], false);
    assert_eq!(body["issues"][0]["error"]["kind"], "required");
    assert_eq!(body["issues"][1]["error"]["kind"], "non_numeric");
}

#[tokio::test]
async fn student_result_from_upstream() {
    let address = spawn_app().await;

    let response = reqwest::get(format!("{}/api/results/OM-1", address))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["student"]["name"], "Asha");
    assert_eq!(body["papers"].as_array().unwrap().len(), 3);
    assert_eq!(body["summary"]["total_full"], 200);
    assert_eq!(body["summary"]["percentage"], "86.00");
    assert_eq!(body["summary"]["grade"], "A");
}

#[tokio::test]
async fn student_result_errors() {
    let address = spawn_app().await;

    let missing = reqwest::get(format!("{}/api/results/OM-404", address))
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);

    let invalid = reqwest::get(format!("{}/api/results/OM-BAD", address))
        .await
        .unwrap();
    assert_eq!(invalid.status().as_u16(), 422);
}

#[tokio::test]
async fn quiz_paper_hides_answers_and_cleans_prompt() {
    let address = spawn_app().await;

    let body: Value = reqwest::get(format!("{}/api/quiz/12", address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let first = &body[0];
    assert_eq!(first["id"], 5);
    assert_eq!(first["prompt"], "<p>Shortcut to copy?</p>");
    assert_eq!(first["options"]["A"], "Ctrl+C");
    assert!(first.get("correct_option").is_none());
}

#[tokio::test]
async fn quiz_score_counts() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{}/api/quiz/score", address))
        .json(&json!({
            "questions": [
                question(1, "A"), question(2, "B"), question(3, "C"),
                question(4, "D"), question(5, "A")
            ],
            "answers": { "1": "A", "2": "B", "3": "C", "4": "B" }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body,
        json!({ "score": 3, "correct_count": 3, "incorrect_count": 1, "unanswered_count": 1 })
    );
}

#[tokio::test]
async fn quiz_attempt_flow() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let questions = vec![question(1, "A"), question(2, "B")];

    // 1. Start
    let attempt: Value = client
        .post(format!("{}/api/quiz/attempt", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(attempt["answers"], json!([]));
    assert_eq!(attempt["finished_at"], Value::Null);

    // 2. Answer
    let attempt: Value = client
        .post(format!("{}/api/quiz/attempt/answer", address))
        .json(&json!({ "attempt": attempt, "question": questions[0], "chosen_option": "A" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(attempt["score"], 1);
    assert_eq!(attempt["answers"][0]["is_correct"], true);

    // 3. Finish
    let finish = client
        .post(format!("{}/api/quiz/attempt/finish", address))
        .json(&json!({ "attempt": attempt, "questions": questions }))
        .send()
        .await
        .unwrap();
    assert_eq!(finish.status().as_u16(), 200);
    let finished: Value = finish.json().await.unwrap();
    assert_eq!(finished["correct_count"], 1);
    assert_eq!(finished["unanswered_count"], 1);
    assert_eq!(finished["total_questions"], 2);
    assert!(finished["elapsed_seconds"].as_i64().unwrap() >= 0);

    // 4. A sealed attempt cannot be submitted again
    let again = client
        .post(format!("{}/api/quiz/attempt/finish", address))
        .json(&json!({ "attempt": finished["attempt"], "questions": questions }))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status().as_u16(), 409);
}

#[tokio::test]
async fn attempt_started_in_the_future_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let questions = vec![question(1, "A")];

    let attempt = json!({
        "answers": [],
        "score": 0,
        "started_at": "2999-01-01T00:00:00Z",
        "finished_at": null
    });
    let response = client
        .post(format!("{}/api/quiz/attempt/finish", address))
        .json(&json!({ "attempt": attempt, "questions": questions }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "attempt start time is in the future");
}
