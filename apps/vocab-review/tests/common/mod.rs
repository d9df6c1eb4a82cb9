//! Shared integration test infrastructure.
//!
//! [`MockBackend`] serves the vocabulary REST API from memory on an
//! ephemeral local port, records what clients send and can be told to fail.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use vocab_review::api::ApiClient;

/// Mutable state behind the mock service.
#[derive(Default)]
pub struct MockState {
    /// Words returned by `GET /words/review`; `None` answers `null`.
    pub due_words: Option<Vec<Value>>,
    /// Wrap responses in `{ "data": ... }`.
    pub wrap: bool,
    pub fail_fetch: bool,
    pub fail_submit: bool,
    pub fail_check_in: bool,
    pub verdicts: Vec<(String, bool)>,
    pub consecutive_days: u32,
    pub checked_in_today: bool,
    pub badges: Vec<Value>,
    pub check_in_calls: usize,
    pub words: Vec<Value>,
    pub updates: Vec<(String, Value)>,
    pub deleted: Vec<String>,
    pub quotes: Vec<Value>,
    pub quote_updates: Vec<(String, Value)>,
    pub auth_headers: Vec<String>,
}

pub struct MockBackend {
    pub state: Arc<Mutex<MockState>>,
    pub base_url: String,
}

impl MockBackend {
    /// Start a mock service on 127.0.0.1 with the given initial state.
    pub async fn start(initial: MockState) -> Self {
        let state = Arc::new(Mutex::new(initial));
        let app = router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server failed");
        });

        Self {
            state,
            base_url: format!("http://{addr}/api"),
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, None)
    }

    pub fn update<F: FnOnce(&mut MockState)>(&self, f: F) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn verdicts(&self) -> Vec<(String, bool)> {
        self.state.lock().unwrap().verdicts.clone()
    }

    pub fn check_in_calls(&self) -> usize {
        self.state.lock().unwrap().check_in_calls
    }
}

type Shared = Arc<Mutex<MockState>>;

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/words/review", get(due_words))
        .route("/api/words/review/:id", post(submit_verdict))
        .route("/api/checkin/stats", get(check_in_stats))
        .route("/api/checkin", post(check_in))
        .route("/api/words", get(list_words))
        .route("/api/words/addWord", post(add_word))
        .route("/api/words/updateWord/:id", put(update_word))
        .route("/api/words/deleteWord/:id", delete(delete_word))
        .route("/api/words/batchDeleteWord", delete(batch_delete))
        .route("/api/words/stats", get(word_stats))
        .route("/api/quotes/random", get(random_quote))
        .route("/api/quotes", get(list_quotes))
        .route("/api/quotes/addQuote", post(add_quote))
        .route("/api/quotes/updateQuote/:id", put(update_quote))
        .route("/api/quotes/deleteQuote/:id", delete(delete_quote))
        .with_state(state)
}

fn reply(state: &MockState, body: Value) -> Response {
    if state.wrap {
        Json(json!({ "data": body })).into_response()
    } else {
        Json(body).into_response()
    }
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn record_auth(state: &mut MockState, headers: &HeaderMap) {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.auth_headers.push(value.to_string());
    }
}

async fn due_words(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    record_auth(&mut state, &headers);
    if state.fail_fetch {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }
    let body = match &state.due_words {
        Some(words) => Value::Array(words.clone()),
        None => Value::Null,
    };
    reply(&state, body)
}

async fn submit_verdict(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if state.fail_submit {
        return failure(StatusCode::SERVICE_UNAVAILABLE, "try again later");
    }
    let remembered = body["remembered"].as_bool().unwrap_or_default();
    state.verdicts.push((id, remembered));
    reply(&state, json!({ "success": true }))
}

async fn check_in_stats(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    reply(
        &state,
        json!({
            "consecutiveDays": state.consecutive_days,
            "todayCheckIn": state.checked_in_today,
            "badges": state.badges,
        }),
    )
}

async fn check_in(State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    state.check_in_calls += 1;
    if state.fail_check_in {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, "check-in failed");
    }
    if state.checked_in_today {
        return failure(StatusCode::BAD_REQUEST, "already checked in");
    }
    state.checked_in_today = true;
    state.consecutive_days += 1;
    let new_badge = (state.consecutive_days == 7).then(|| "One Week Strong".to_string());
    reply(
        &state,
        json!({
            "consecutiveDays": state.consecutive_days,
            "newBadge": new_badge,
        }),
    )
}

async fn list_words(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    reply(&state, Value::Array(state.words.clone()))
}

async fn add_word(State(state): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    if body["word"].as_str().unwrap_or_default().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "word is required");
    }
    body["_id"] = json!(format!("new{}", state.words.len() + 1));
    state.words.push(body.clone());
    reply(&state, body)
}

async fn update_word(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.updates.push((id, body));
    reply(&state, json!({ "success": true }))
}

async fn delete_word(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    if !state.words.iter().any(|w| w["_id"] == id) {
        return failure(StatusCode::NOT_FOUND, "word not found");
    }
    state.words.retain(|w| w["_id"] != id);
    state.deleted.push(id);
    StatusCode::NO_CONTENT.into_response()
}

async fn batch_delete(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let ids: Vec<String> = body["ids"]
        .as_array()
        .map(|ids| {
            ids.iter()
                .filter_map(|id| id.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    state.words.retain(|w| !ids.iter().any(|id| w["_id"] == *id));
    state.deleted.extend(ids);
    reply(&state, json!({ "success": true }))
}

async fn word_stats(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    let due = state.due_words.as_ref().map_or(0, Vec::len);
    reply(
        &state,
        json!({
            "todayReview": due,
            "todayReviewed": state.verdicts.len(),
            "todayAdded": state.words.len(),
        }),
    )
}

async fn random_quote(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    reply(
        &state,
        json!({
            "_id": "q1",
            "content": "Stay hungry, stay foolish.",
            "translation": "求知若饥，虚心若愚。",
            "author": "Steve Jobs",
        }),
    )
}

async fn list_quotes(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    reply(&state, Value::Array(state.quotes.clone()))
}

async fn add_quote(State(state): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    if body["content"].as_str().unwrap_or_default().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "content is required");
    }
    let id = format!("q{}", state.quotes.len() + 1);
    // Mongoose-style payload: both keys present.
    body["_id"] = json!(id);
    body["id"] = json!(id);
    state.quotes.push(body.clone());
    reply(&state, body)
}

async fn update_quote(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(quote) = state.quotes.iter_mut().find(|q| q["_id"] == id) else {
        return failure(StatusCode::NOT_FOUND, "quote not found");
    };
    if let (Some(quote), Some(fields)) = (quote.as_object_mut(), body.as_object()) {
        for (key, value) in fields {
            quote.insert(key.clone(), value.clone());
        }
    }
    state.quote_updates.push((id, body));
    reply(&state, json!({ "success": true }))
}

async fn delete_quote(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    if !state.quotes.iter().any(|q| q["_id"] == id) {
        return failure(StatusCode::NOT_FOUND, "quote not found");
    }
    state.quotes.retain(|q| q["_id"] != id);
    StatusCode::NO_CONTENT.into_response()
}
