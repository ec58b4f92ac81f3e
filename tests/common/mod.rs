//! An in-memory task server for integration tests.
//!
//! Speaks the task API over real HTTP on a loopback port. Ids are JSON
//! numbers, as many real backends send them.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use serde_json::{Value, json};

#[derive(Default)]
struct ServerState {
    tasks: Vec<Value>,
    next_id: u64,
    /// Answer every request with this status instead of serving it
    fail_with: Option<StatusCode>,
    /// "METHOD /path" per request, in arrival order
    requests: Vec<String>,
}

type Shared = Arc<Mutex<ServerState>>;

pub struct TaskServer {
    pub base_url: String,
    state: Shared,
}

impl TaskServer {
    /// Start serving `seed` on a fresh loopback port
    pub fn start(seed: Vec<Value>) -> TaskServer {
        let next_id = seed
            .iter()
            .filter_map(|t| t["id"].as_u64())
            .max()
            .unwrap_or(0)
            + 1;
        let state: Shared = Arc::new(Mutex::new(ServerState {
            tasks: seed,
            next_id,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/tasks", get(list_tasks).post(create_task))
            .route("/tasks/:id", put(replace_task).delete(delete_task))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        TaskServer {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn fail_with(&self, status: Option<StatusCode>) {
        self.state.lock().unwrap().fail_with = status;
    }

    pub fn tasks(&self) -> Vec<Value> {
        self.state.lock().unwrap().tasks.clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }
}

/// A task as the server stores it
pub fn task_json(id: u64, title: &str, due: &str, priority: &str, completed: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{} details", title),
        "dueDate": due,
        "priority": priority,
        "completed": completed,
    })
}

/// Three tasks whose display order differs from storage order
pub fn seed_tasks() -> Vec<Value> {
    vec![
        task_json(1, "Water plants", "2025-01-20", "Low", false),
        task_json(2, "File taxes", "2025-04-15", "High", false),
        task_json(3, "Book flights", "2025-01-05", "Medium", true),
    ]
}

/// A base URL nothing listens on
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Record the request; Some(status) if the server is told to fail
fn enter(state: &Shared, request: String) -> Option<StatusCode> {
    let mut s = state.lock().unwrap();
    s.requests.push(request);
    s.fail_with
}

fn id_matches(task: &Value, id: &str) -> bool {
    match &task["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    }
}

async fn list_tasks(State(state): State<Shared>) -> Response {
    if let Some(status) = enter(&state, "GET /tasks".into()) {
        return status.into_response();
    }
    let tasks = state.lock().unwrap().tasks.clone();
    Json(Value::Array(tasks)).into_response()
}

async fn create_task(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if let Some(status) = enter(&state, "POST /tasks".into()) {
        return status.into_response();
    }
    let mut s = state.lock().unwrap();
    let mut task = body;
    task["id"] = json!(s.next_id);
    task["completed"] = json!(false);
    s.next_id += 1;
    s.tasks.push(task.clone());
    (StatusCode::CREATED, Json(task)).into_response()
}

async fn replace_task(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(status) = enter(&state, format!("PUT /tasks/{}", id)) {
        return status.into_response();
    }
    let mut s = state.lock().unwrap();
    let Some(task) = s.tasks.iter_mut().find(|t| id_matches(t, &id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let stored_id = task["id"].clone();
    *task = body;
    task["id"] = stored_id;
    Json(task.clone()).into_response()
}

async fn delete_task(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    if let Some(status) = enter(&state, format!("DELETE /tasks/{}", id)) {
        return status.into_response();
    }
    let mut s = state.lock().unwrap();
    let before = s.tasks.len();
    s.tasks.retain(|t| !id_matches(t, &id));
    if s.tasks.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}
