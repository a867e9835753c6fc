//! Test utilities for tally-core
//!
//! A mock expense backend that speaks the same routes as the real one
//! (`/getUser`, `/expenses`, `/expenses/:id`) over an in-memory store.
//! Every route requires `Authorization: Bearer <token>`.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Local;
use serde_json::json;
use tokio::sync::oneshot;

use crate::models::{Expense, ExpenseUpdate, NewExpense};

#[derive(Clone)]
struct BackendState {
    token: String,
    username: String,
    expenses: Arc<Mutex<Vec<Expense>>>,
    next_id: Arc<Mutex<u64>>,
}

/// Mock expense backend for testing
pub struct MockExpenseBackend {
    addr: SocketAddr,
    expenses: Arc<Mutex<Vec<Expense>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockExpenseBackend {
    /// Start the mock backend on an available port, seeded with `expenses`
    pub async fn start(token: &str, username: &str, expenses: Vec<Expense>) -> Self {
        let expenses = Arc::new(Mutex::new(expenses));
        let state = BackendState {
            token: token.to_string(),
            username: username.to_string(),
            expenses: expenses.clone(),
            next_id: Arc::new(Mutex::new(1000)),
        };

        let app = Router::new()
            .route("/getUser", get(handle_get_user))
            .route("/expenses", post(handle_create))
            .route("/expenses/:id", put(handle_update).delete(handle_delete))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            expenses,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock backend
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Snapshot of the stored expenses
    pub fn expenses(&self) -> Vec<Expense> {
        self.expenses.lock().unwrap().clone()
    }

    /// Stop the mock backend
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockExpenseBackend {
    fn drop(&mut self) {
        self.stop();
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn authorized(state: &BackendState, headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| token == state.token)
}

async fn handle_get_user(State(state): State<BackendState>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Not authorized");
    }
    let expenses = state.expenses.lock().unwrap().clone();
    Json(json!({
        "user": {
            "username": state.username,
            "currency": "USD",
            "expenses": expenses,
        }
    }))
    .into_response()
}

async fn handle_create(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(body): Json<NewExpense>,
) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Not authorized");
    }
    if body.category.trim().is_empty() || body.amount <= 0.0 {
        return error(StatusCode::BAD_REQUEST, "Amount and category are required");
    }

    let id = {
        let mut next = state.next_id.lock().unwrap();
        *next += 1;
        next.to_string()
    };
    let mut expense = Expense::new(
        id,
        body.amount,
        body.category,
        Some(body.date.unwrap_or_else(|| Local::now().date_naive())),
    );
    if let Some(project) = body.project {
        expense = expense.with_project(project);
    }
    expense.description = body.description;

    state.expenses.lock().unwrap().push(expense.clone());
    (StatusCode::CREATED, Json(json!({ "result": expense }))).into_response()
}

async fn handle_update(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(update): Json<ExpenseUpdate>,
) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Not authorized");
    }

    let mut expenses = state.expenses.lock().unwrap();
    let Some(expense) = expenses.iter_mut().find(|e| e.id == id) else {
        return error(StatusCode::NOT_FOUND, "Expense not found");
    };

    if let Some(amount) = update.amount {
        expense.amount = amount;
    }
    if let Some(category) = update.category {
        expense.category = category;
    }
    if let Some(project) = update.project {
        expense.project = Some(project).filter(|p| !p.trim().is_empty());
    }
    if let Some(description) = update.description {
        expense.description = Some(description);
    }
    if let Some(date) = update.date {
        expense.date = Some(date);
    }

    Json(json!({ "expense": expense.clone() })).into_response()
}

async fn handle_delete(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Not authorized");
    }

    let mut expenses = state.expenses.lock().unwrap();
    let before = expenses.len();
    expenses.retain(|e| e.id != id);
    if expenses.len() == before {
        return error(StatusCode::NOT_FOUND, "Expense not found");
    }

    Json(json!({ "message": "Expense deleted" })).into_response()
}
