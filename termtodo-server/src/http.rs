//! REST routes for the `/todos` resource collection.
//!
//! | Operation | Method | Path          | Body        | Response          |
//! |-----------|--------|---------------|-------------|-------------------|
//! | List      | GET    | `/todos`      | —           | 200, task array   |
//! | Create    | POST   | `/todos`      | task draft  | 201, stored task  |
//! | Update    | PUT    | `/todos/{id}` | task patch  | 200, merged task  |
//! | Delete    | DELETE | `/todos/{id}` | —           | 204, empty        |
//!
//! Unknown ids on update/delete answer 404. Everything is JSON; there is no
//! authentication or pagination.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use termtodo_api::task::{Task, TaskPatch};
use tokio::task::JoinHandle;

use crate::store::TaskStore;

/// Builds the `/todos` router over a shared task store.
pub fn router(store: Arc<TaskStore>) -> Router {
    Router::new()
        .route("/todos", get(list_tasks).post(create_task))
        .route("/todos/{id}", put(update_task).delete(delete_task))
        .with_state(store)
}

/// Binds `bind_addr` and serves the `/todos` routes on a background task.
///
/// Returns the bound address (useful when binding port 0 in tests) and the
/// join handle of the server task.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn start_server_with_state(
    bind_addr: &str,
    store: Arc<TaskStore>,
) -> io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;
    let app = router(store);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task server terminated");
        }
    });
    Ok((addr, handle))
}

/// `GET /todos` — the full collection in insertion order.
async fn list_tasks(State(store): State<Arc<TaskStore>>) -> Json<Vec<Task>> {
    Json(store.list().await)
}

/// `POST /todos` — stores a new task, assigning its id.
async fn create_task(
    State(store): State<Arc<TaskStore>>,
    Json(draft): Json<Task>,
) -> impl IntoResponse {
    let task = store.insert(draft).await;
    tracing::info!(id = %task.id, title = %task.title, "task created");
    (StatusCode::CREATED, Json(task))
}

/// `PUT /todos/{id}` — merges a partial update into the stored task.
async fn update_task(
    State(store): State<Arc<TaskStore>>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Response {
    match store.update(&id, &patch).await {
        Some(task) => {
            tracing::debug!(id = %task.id, "task updated");
            Json(task).into_response()
        }
        None => {
            tracing::warn!(%id, "update for unknown task");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// `DELETE /todos/{id}` — removes the task if it exists.
async fn delete_task(State(store): State<Arc<TaskStore>>, Path(id): Path<String>) -> StatusCode {
    if store.remove(&id).await {
        tracing::info!(%id, "task deleted");
        StatusCode::NO_CONTENT
    } else {
        tracing::warn!(%id, "delete for unknown task");
        StatusCode::NOT_FOUND
    }
}
