//! In-memory task collection backing the REST routes.
//!
//! The [`TaskStore`] keeps tasks in insertion order, which is the order the
//! list endpoint reports. Ids are assigned by the store on insert and never
//! change afterwards.

use termtodo_api::task::{Task, TaskPatch};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Insertion-ordered in-memory task collection.
///
/// Thread-safe via [`RwLock`]. The collection is small (a personal to-do
/// list), so lookups are linear scans.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    /// Creates a new, empty task store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all tasks in insertion order.
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Inserts a task, assigning a fresh id.
    ///
    /// Any id carried by `draft` is ignored; the stored task with its
    /// server-assigned id is returned.
    pub async fn insert(&self, draft: Task) -> Task {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            ..draft
        };
        let mut tasks = self.tasks.write().await;
        tasks.push(task.clone());
        task
    }

    /// Applies `patch` to the task with the given id.
    ///
    /// Only the fields present in the patch are changed; the id is never
    /// rewritten. Returns the merged task, or `None` if no task has that id.
    pub async fn update(&self, id: &str, patch: &TaskPatch) -> Option<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.iter_mut().find(|t| t.id == id)?;
        patch.apply_to(task);
        Some(task.clone())
    }

    /// Removes the task with the given id, returning whether one existed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        tasks.len() < before
    }

    /// Returns the number of stored tasks.
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Whether the store holds no tasks.
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}
