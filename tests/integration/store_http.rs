//! Integration tests for the HTTP task store client.
//!
//! Each test starts an in-process server on an ephemeral port and drives
//! it through [`HttpTaskStore`], exercising the full JSON/HTTP round trip.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;

use termtodo::store::{HttpTaskStore, StoreError, TaskStore};
use termtodo_api::task::{Task, TaskPatch};
use termtodo_server::http::start_server_with_state;
use termtodo_server::store::TaskStore as ServerStore;

/// Starts a server on an ephemeral port and returns a client pointed at it.
async fn start_test_server() -> (HttpTaskStore, SocketAddr, tokio::task::JoinHandle<()>) {
    let store = Arc::new(ServerStore::new());
    let (addr, handle) = start_server_with_state("127.0.0.1:0", store)
        .await
        .expect("bind test server");
    let client = HttpTaskStore::new(&format!("http://{addr}")).expect("valid base url");
    (client, addr, handle)
}

#[tokio::test]
async fn list_starts_empty() {
    let (client, _, handle) = start_test_server().await;
    let tasks = client.list_tasks().await.expect("list");
    assert!(tasks.is_empty());
    handle.abort();
}

#[tokio::test]
async fn create_assigns_a_server_id_and_persists() {
    let (client, _, handle) = start_test_server().await;

    let created = client
        .create_task(Task::draft("Buy milk"))
        .await
        .expect("create");
    assert!(!created.id.is_empty());
    assert_eq!(created.title, "Buy milk");
    assert!(!created.completed);

    let tasks = client.list_tasks().await.expect("list");
    assert_eq!(tasks, vec![created]);
    handle.abort();
}

#[tokio::test]
async fn create_ignores_any_client_supplied_id() {
    let (client, _, handle) = start_test_server().await;

    let draft = Task {
        id: "client-chosen".to_string(),
        title: "T".to_string(),
        completed: false,
    };
    let created = client.create_task(draft).await.expect("create");
    assert_ne!(created.id, "client-chosen");
    handle.abort();
}

#[tokio::test]
async fn update_merges_a_partial_patch() {
    let (client, _, handle) = start_test_server().await;

    let created = client
        .create_task(Task::draft("Original"))
        .await
        .expect("create");

    // Only the completion flag; the title must survive the merge.
    let patch = TaskPatch {
        id: None,
        title: None,
        completed: Some(true),
    };
    let updated = client
        .update_task(created.id.clone(), patch)
        .await
        .expect("update");
    assert_eq!(updated.title, "Original");
    assert!(updated.completed);

    let tasks = client.list_tasks().await.expect("list");
    assert_eq!(tasks[0], updated);
    handle.abort();
}

#[tokio::test]
async fn update_with_a_full_record_replaces_both_fields() {
    let (client, _, handle) = start_test_server().await;

    let mut created = client.create_task(Task::draft("Old")).await.expect("create");
    created.title = "New".to_string();
    created.completed = true;

    let updated = client
        .update_task(created.id.clone(), TaskPatch::full(&created))
        .await
        .expect("update");
    assert_eq!(updated, created);
    handle.abort();
}

#[tokio::test]
async fn delete_removes_the_task() {
    let (client, _, handle) = start_test_server().await;

    let created = client.create_task(Task::draft("Gone")).await.expect("create");
    client.delete_task(created.id).await.expect("delete");

    let tasks = client.list_tasks().await.expect("list");
    assert!(tasks.is_empty());
    handle.abort();
}

#[tokio::test]
async fn unknown_id_surfaces_as_a_status_error() {
    let (client, _, handle) = start_test_server().await;

    let patch = TaskPatch {
        id: None,
        title: Some("x".to_string()),
        completed: None,
    };
    let err = client
        .update_task("missing".to_string(), patch)
        .await
        .expect_err("404 expected");
    assert!(matches!(
        err,
        StoreError::Status { status, .. } if status.as_u16() == 404
    ));

    let err = client
        .delete_task("missing".to_string())
        .await
        .expect_err("404 expected");
    assert!(matches!(err, StoreError::Status { .. }));
    handle.abort();
}

#[tokio::test]
async fn unreachable_server_surfaces_as_a_transport_error() {
    // Bind a port to learn an address, then free it before connecting.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpTaskStore::new(&format!("http://{addr}")).expect("valid base url");
    let err = client.list_tasks().await.expect_err("connection refused");
    assert!(matches!(err, StoreError::Transport(_)));
}
