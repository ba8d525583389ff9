#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use taskboard::config::{Config, Variant};
use taskboard::fragments::BundledFragments;
use taskboard::Client;
use tokio::net::TcpListener;
use tokio::time::sleep;

/// Requests for a user or task named `slow` take this long to answer.
pub const SLOW_REPLY: Duration = Duration::from_millis(150);

/// Requests the stub backend received, as `(method path, body)`.
#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<(String, Value)>>>);

impl Recorded {
    fn push(&self, what: impl Into<String>, body: Value) {
        self.0.lock().unwrap().push((what.into(), body));
    }

    pub fn all(&self) -> Vec<(String, Value)> {
        self.0.lock().unwrap().clone()
    }

    pub fn hits(&self, what: &str) -> usize {
        self.all().iter().filter(|(seen, _)| seen == what).count()
    }

    pub fn last_body(&self, what: &str) -> Option<Value> {
        self.all().into_iter().rev().find(|(seen, _)| seen == what).map(|(_, body)| body)
    }
}

pub struct StubApi {
    pub base_url: String,
    pub recorded: Recorded,
}

async fn login(State(rec): State<Recorded>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    rec.push("POST /api/v1/users/login", body.clone());
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({ "user": { "id": "u-42", "email": body["email"] }, "token": "tok-1" })),
        )
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid credentials" })))
    }
}

async fn register(State(rec): State<Recorded>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    rec.push("POST /api/v1/users/register", body.clone());
    if body["username"] == "slow" {
        sleep(SLOW_REPLY).await;
    }
    if body["email"] == "taken@example.com" || body["username"] == "taken" {
        return (StatusCode::CONFLICT, Json(json!({ "error": "Account already exists" })));
    }
    let mut user = body;
    user["id"] = json!("u-1");
    (StatusCode::CREATED, Json(user))
}

async fn recover(State(rec): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    rec.push("POST /api/v1/users/recover", body);
    Json(json!({ "sent": true }))
}

async fn add_task(State(rec): State<Recorded>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    rec.push("POST /api/tasks/addTask", body.clone());
    if body["title"] == "slow" {
        sleep(SLOW_REPLY).await;
    }
    let mut task = body;
    task["id"] = json!("t-1");
    (StatusCode::CREATED, Json(task))
}

async fn list_tasks(State(rec): State<Recorded>) -> Json<Value> {
    rec.push("GET /tasks", Value::Null);
    Json(json!([{ "id": "t-1", "title": "Existing" }]))
}

async fn create_task(State(rec): State<Recorded>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    rec.push("POST /tasks", body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn update_task(
    State(rec): State<Recorded>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.push(format!("PUT /tasks/{id}"), body.clone());
    let mut task = body;
    task["id"] = json!(id);
    Json(task)
}

async fn delete_task(State(rec): State<Recorded>, Path(id): Path<String>) -> StatusCode {
    rec.push(format!("DELETE /tasks/{id}"), Value::Null);
    StatusCode::NO_CONTENT
}

async fn boom() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "kaboom")
}

async fn teapot() -> (StatusCode, Json<Value>) {
    (StatusCode::IM_A_TEAPOT, Json(json!({ "error": "short and stout" })))
}

pub async fn spawn_stub_api() -> StubApi {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/v1/users/login", post(login))
        .route("/api/v1/users/register", post(register))
        .route("/api/v1/users/recover", post(recover))
        .route("/api/tasks/addTask", post(add_task))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/:id", put(update_task).delete(delete_task))
        .route("/boom", get(boom))
        .route("/teapot", get(teapot))
        .with_state(recorded.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub api");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub api");
    });

    StubApi {
        base_url: format!("http://{addr}"),
        recorded,
    }
}

pub fn config(api_url: &str, variant: Variant, redirect_ms: u64) -> Config {
    let mut config = Config::new(api_url, variant);
    config.redirect_delay = Duration::from_millis(redirect_ms);
    config
}

/// Client with bundled fragments, already rendered at `hash`.
pub async fn started_client(api_url: &str, variant: Variant, hash: &str, redirect_ms: u64) -> Client {
    let client = Client::with_fragments(&config(api_url, variant, redirect_ms), Arc::new(BundledFragments), hash);
    assert!(client.start().await);
    client
}

pub async fn wait_for(what: &str, mut cond: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(3);
    while !cond() {
        if Instant::now() > deadline {
            panic!("timed out waiting for {what}");
        }
        sleep(Duration::from_millis(5)).await;
    }
}
