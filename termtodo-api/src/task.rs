//! Task wire types for the `/todos` resource collection.
//!
//! The backend exchanges tasks as plain JSON objects
//! (`{ "id": ..., "title": ..., "completed": ... }`). [`TaskPatch`] is the
//! typed partial-update payload for `PUT /todos/{id}`: unset fields are
//! omitted from the body entirely, so the server merges only what was sent.

use serde::{Deserialize, Serialize};

/// A to-do item as stored by the server and displayed by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier. Empty on a draft that has not been
    /// submitted yet; unique and immutable once assigned.
    pub id: String,
    /// Display text. Non-empty after creation (clients reject empty titles
    /// before submission).
    pub title: String,
    /// Completion flag.
    pub completed: bool,
}

impl Task {
    /// Creates an unsubmitted draft: empty id, not completed.
    ///
    /// The server ignores the id on create and assigns its own.
    #[must_use]
    pub fn draft(title: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            completed: false,
        }
    }

    /// Whether this task is still waiting for a server-assigned id.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.id.is_empty()
    }
}

/// A partial update to a task, sent as the body of `PUT /todos/{id}`.
///
/// Any subset of fields may be set. Clients that re-send the full record
/// on every update simply set all three fields (see [`TaskPatch::full`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// Task identifier, echoed when the full record is re-sent. The server
    /// never changes a stored id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// New title, if the title is being updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New completion flag, if it is being updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// A patch carrying the full current record of `task`.
    #[must_use]
    pub fn full(task: &Task) -> Self {
        Self {
            id: Some(task.id.clone()),
            title: Some(task.title.clone()),
            completed: Some(task.completed),
        }
    }

    /// Merges this patch into `task`, field by field.
    ///
    /// `title` and `completed` are updated independently; a patch touching
    /// one never alters the other. The stored id is left untouched.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}
