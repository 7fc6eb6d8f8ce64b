//! End-to-end tests for the task list controller against a real server.
//!
//! A controller backed by [`HttpTaskStore`] drives an in-process server;
//! a second, freshly loaded controller verifies what actually persisted.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use termtodo::store::HttpTaskStore;
use termtodo::tasks::{Filter, StoreOutcome, TaskListController};
use termtodo_server::http::start_server_with_state;
use termtodo_server::store::TaskStore as ServerStore;

async fn start_test_server() -> (Arc<HttpTaskStore>, tokio::task::JoinHandle<()>) {
    let store = Arc::new(ServerStore::new());
    let (addr, handle) = start_server_with_state("127.0.0.1:0", store)
        .await
        .expect("bind test server");
    let client = HttpTaskStore::new(&format!("http://{addr}")).expect("valid base url");
    (Arc::new(client), handle)
}

/// Loads a fresh controller to observe the server's current state.
async fn server_snapshot(store: &Arc<HttpTaskStore>) -> Vec<termtodo_api::task::Task> {
    let mut probe = TaskListController::new(Arc::clone(store));
    probe.load();
    probe.settle().await;
    probe.tasks().to_vec()
}

#[tokio::test]
async fn add_round_trips_through_the_server() {
    let (store, handle) = start_test_server().await;
    let mut controller = TaskListController::new(Arc::clone(&store));

    controller.add("Buy milk");
    controller.add("Walk dog");
    let outcomes = controller.settle().await;
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| matches!(o, StoreOutcome::Added { .. }))
            .count(),
        2
    );
    assert_eq!(controller.tasks().len(), 2);

    let persisted = server_snapshot(&store).await;
    assert_eq!(persisted.len(), 2);
    handle.abort();
}

#[tokio::test]
async fn toggle_persists_the_full_record() {
    let (store, handle) = start_test_server().await;
    let mut controller = TaskListController::new(Arc::clone(&store));

    controller.add("Task");
    controller.settle().await;
    let id = controller.tasks()[0].id.clone();

    controller.toggle(&id);
    // Optimistic flip is visible before the round trip finishes.
    assert!(controller.tasks()[0].completed);
    controller.settle().await;

    let persisted = server_snapshot(&store).await;
    assert_eq!(persisted[0].title, "Task");
    assert!(persisted[0].completed);
    handle.abort();
}

#[tokio::test]
async fn save_edit_persists_and_leaves_editing_mode() {
    let (store, handle) = start_test_server().await;
    let mut controller = TaskListController::new(Arc::clone(&store));

    controller.add("Draft title");
    controller.settle().await;
    let id = controller.tasks()[0].id.clone();

    controller.start_edit(&id, "Draft title");
    controller
        .edit_buffer_mut()
        .expect("edit in progress")
        .replace_range(.., "Final title");
    controller.save_edit();
    assert!(controller.editing().is_some());

    let outcomes = controller.settle().await;
    assert!(outcomes.contains(&StoreOutcome::EditSaved));
    assert!(controller.editing().is_none());

    let persisted = server_snapshot(&store).await;
    assert_eq!(persisted[0].title, "Final title");
    handle.abort();
}

#[tokio::test]
async fn delete_removes_remotely_and_locally() {
    let (store, handle) = start_test_server().await;
    let mut controller = TaskListController::new(Arc::clone(&store));

    controller.add("Ephemeral");
    controller.settle().await;
    let id = controller.tasks()[0].id.clone();

    controller.delete(&id);
    controller.settle().await;
    assert!(controller.tasks().is_empty());
    assert!(server_snapshot(&store).await.is_empty());
    handle.abort();
}

#[tokio::test]
async fn filters_track_server_state() {
    let (store, handle) = start_test_server().await;
    let mut controller = TaskListController::new(Arc::clone(&store));

    controller.add("A");
    controller.add("B");
    controller.settle().await;
    let id = controller.tasks()[0].id.clone();
    controller.toggle(&id);
    controller.settle().await;

    controller.set_filter(Filter::Completed);
    assert_eq!(controller.filtered_tasks().len(), 1);
    controller.set_filter(Filter::Incomplete);
    assert_eq!(controller.filtered_tasks().len(), 1);
    assert!((controller.progress() - 50.0).abs() < f64::EPSILON);
    handle.abort();
}

#[tokio::test]
async fn toggle_failure_leaves_local_state_diverged() {
    let (store, handle) = start_test_server().await;
    let mut controller = TaskListController::new(Arc::clone(&store));

    controller.add("Task");
    controller.settle().await;
    let id = controller.tasks()[0].id.clone();

    // Kill the server so the next round trip fails.
    handle.abort();
    tokio::time::sleep(Duration::from_millis(50)).await;

    controller.toggle(&id);
    assert!(controller.tasks()[0].completed);
    let outcomes = controller.settle().await;
    assert!(matches!(outcomes[0], StoreOutcome::ToggleFailed(_)));
    // The flip is kept even though the server never saw it.
    assert!(controller.tasks()[0].completed);
}

#[tokio::test]
async fn delete_failure_keeps_the_task_visible() {
    let (store, handle) = start_test_server().await;
    let mut controller = TaskListController::new(Arc::clone(&store));

    controller.add("Task");
    controller.settle().await;
    let id = controller.tasks()[0].id.clone();

    handle.abort();
    tokio::time::sleep(Duration::from_millis(50)).await;

    controller.delete(&id);
    let outcomes = controller.settle().await;
    assert!(matches!(outcomes[0], StoreOutcome::RemoveFailed(_)));
    assert_eq!(controller.tasks().len(), 1);
}
