//! Task list controller: local collection, remote mutations, derived views.
//!
//! Every mutating operation follows the same shape: mutate the local
//! collection (optimistically for toggle and save-edit, not at all for add
//! and delete), spawn the matching store call, and return immediately. Each
//! call completes by sending a [`StoreEvent`] back to the controller, which
//! applies it when the owning loop drains events. Completions apply in the
//! order they arrive, not the order requests were issued; reissuing a
//! mutation for a task with a request still in flight leaves both to run
//! independently.
//!
//! Store failures never propagate to the caller. They are logged and
//! reported as [`StoreOutcome`] notices, and optimistic mutations are not
//! rolled back, so local state may diverge from the server until the next
//! full load.

use std::future::Future;
use std::sync::Arc;

use termtodo_api::task::{Task, TaskPatch};
use tokio::sync::mpsc;

use super::{EditState, Filter};
use crate::store::{StoreError, TaskStore};

/// Completion of a spawned store call.
#[derive(Debug)]
enum StoreEvent {
    /// `list_tasks` finished.
    Loaded(Result<Vec<Task>, StoreError>),
    /// `create_task` finished.
    Created(Result<Task, StoreError>),
    /// `update_task` issued by a toggle finished.
    Toggled {
        id: String,
        result: Result<Task, StoreError>,
    },
    /// `update_task` issued by a title edit finished.
    EditSaved {
        id: String,
        result: Result<Task, StoreError>,
    },
    /// `delete_task` finished.
    Deleted {
        id: String,
        result: Result<(), StoreError>,
    },
}

/// User-visible outcome of an applied store completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The collection was replaced by a fresh server snapshot.
    Loaded {
        /// Number of tasks in the snapshot.
        count: usize,
    },
    /// Loading failed; the collection is unchanged (empty on startup).
    LoadFailed(String),
    /// The server stored a new task; it is now in the collection.
    Added {
        /// Title of the stored task.
        title: String,
    },
    /// Creation failed; nothing was added locally.
    AddFailed(String),
    /// The server confirmed a toggle.
    ToggleConfirmed,
    /// A toggle failed remotely; the local flip is kept.
    ToggleFailed(String),
    /// The server confirmed a title edit; editing mode was left.
    EditSaved,
    /// A title edit failed remotely; the optimistic title and the editing
    /// state are both kept.
    EditFailed(String),
    /// The task was removed locally after the server confirmed deletion.
    Removed {
        /// Id of the removed task.
        id: String,
    },
    /// Deletion failed; the task is still present.
    RemoveFailed(String),
}

/// Owns the local task collection and reconciles it with a remote store.
///
/// One controller instance is the single writer of its state; presentation
/// code reads the derived views and calls the operations, and the owning
/// loop periodically applies completions via [`try_drain`].
///
/// [`try_drain`]: TaskListController::try_drain
pub struct TaskListController<S> {
    store: Arc<S>,
    tasks: Vec<Task>,
    filter: Filter,
    editing: Option<EditState>,
    events_tx: mpsc::UnboundedSender<StoreEvent>,
    events_rx: mpsc::UnboundedReceiver<StoreEvent>,
    in_flight: usize,
}

impl<S: TaskStore> TaskListController<S> {
    /// Creates a controller over `store` with an empty collection.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            store,
            tasks: Vec::new(),
            filter: Filter::default(),
            editing: None,
            events_tx,
            events_rx,
            in_flight: 0,
        }
    }

    // -- derived views ------------------------------------------------------

    /// The full collection, in load/creation order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The current view filter.
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    /// Tasks passing the current filter, original order preserved.
    #[must_use]
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    /// Exact completion percentage in `0.0..=100.0`; `0` for an empty list.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.tasks.len();
        if total == 0 {
            return 0.0;
        }
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        #[allow(clippy::cast_precision_loss)]
        {
            completed as f64 / total as f64 * 100.0
        }
    }

    /// The in-progress edit, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    /// Mutable pending title buffer of the in-progress edit.
    pub fn edit_buffer_mut(&mut self) -> Option<&mut String> {
        self.editing.as_mut().map(|e| &mut e.buffer)
    }

    /// Number of store calls still awaiting completion.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    // -- operations ---------------------------------------------------------

    /// Sets the view filter. Pure state change, no store interaction.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Requests a fresh server snapshot; the collection is replaced when it
    /// arrives. On failure the collection is left as it was.
    pub fn load(&mut self) {
        let store = Arc::clone(&self.store);
        self.dispatch(async move { StoreEvent::Loaded(store.list_tasks().await) });
    }

    /// Submits a new task with the given title.
    ///
    /// No-op when the trimmed title is empty; the store is not called.
    /// Nothing is inserted optimistically: the task is appended only once
    /// the server answers with the stored record.
    pub fn add(&mut self, title: &str) {
        if title.trim().is_empty() {
            return;
        }
        let draft = Task::draft(title);
        let store = Arc::clone(&self.store);
        self.dispatch(async move { StoreEvent::Created(store.create_task(draft).await) });
    }

    /// Flips `completed` for the task with `id`.
    ///
    /// The flip is applied locally before the store call is issued and is
    /// not undone if the call fails. The full record is re-sent. Unknown
    /// ids are ignored and the store is not called.
    pub fn toggle(&mut self, id: &str) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        task.completed = !task.completed;
        let patch = TaskPatch::full(task);
        let task_id = task.id.clone();
        let event_id = task_id.clone();
        let store = Arc::clone(&self.store);
        self.dispatch(async move {
            StoreEvent::Toggled {
                result: store.update_task(task_id, patch).await,
                id: event_id,
            }
        });
    }

    /// Deletes the task with `id` remotely.
    ///
    /// Pessimistic: the local entry is removed only once the server
    /// confirms. On failure the task stays, visibly unchanged.
    pub fn delete(&mut self, id: &str) {
        let task_id = id.to_string();
        let event_id = task_id.clone();
        let store = Arc::clone(&self.store);
        self.dispatch(async move {
            StoreEvent::Deleted {
                result: store.delete_task(task_id).await,
                id: event_id,
            }
        });
    }

    /// Begins editing the task with `id`, seeding the buffer with `title`.
    ///
    /// Any prior uncommitted edit is abandoned without a store call.
    pub fn start_edit(&mut self, id: &str, title: &str) {
        self.editing = Some(EditState {
            id: id.to_string(),
            buffer: title.to_string(),
        });
    }

    /// Abandons the in-progress edit without a store call.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Commits the pending title buffer.
    ///
    /// No-op when there is no edit in progress, the trimmed buffer is
    /// empty, or the edited task is no longer in the collection. The title
    /// is applied locally before the store call, preserving `completed`;
    /// editing mode is left only when the server confirms, so a failed
    /// save keeps both the optimistic title and the visible edit buffer.
    pub fn save_edit(&mut self) {
        let Some(edit) = self.editing.clone() else {
            return;
        };
        if edit.buffer.trim().is_empty() {
            return;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == edit.id) else {
            return;
        };
        task.title = edit.buffer;
        let patch = TaskPatch::full(task);
        let task_id = task.id.clone();
        let event_id = task_id.clone();
        let store = Arc::clone(&self.store);
        self.dispatch(async move {
            StoreEvent::EditSaved {
                result: store.update_task(task_id, patch).await,
                id: event_id,
            }
        });
    }

    // -- completions --------------------------------------------------------

    /// Applies every completion that has already arrived, in arrival order.
    pub fn try_drain(&mut self) -> Vec<StoreOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            outcomes.push(self.apply(event));
        }
        outcomes
    }

    /// Waits until no store calls are in flight, applying completions as
    /// they arrive.
    pub async fn settle(&mut self) -> Vec<StoreOutcome> {
        let mut outcomes = Vec::new();
        while self.in_flight > 0 {
            match self.events_rx.recv().await {
                Some(event) => outcomes.push(self.apply(event)),
                None => break,
            }
        }
        outcomes
    }

    /// Spawns a store call whose completion event is delivered back to this
    /// controller's channel.
    fn dispatch<F>(&mut self, call: F)
    where
        F: Future<Output = StoreEvent> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            // The receiver lives as long as the controller; a send failure
            // just means the controller is gone.
            let _ = tx.send(call.await);
        });
    }

    /// Applies one store completion to the local state.
    fn apply(&mut self, event: StoreEvent) -> StoreOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            StoreEvent::Loaded(Ok(tasks)) => {
                let count = tasks.len();
                self.tasks = tasks;
                StoreOutcome::Loaded { count }
            }
            StoreEvent::Loaded(Err(e)) => {
                tracing::error!(error = %e, "failed to load tasks");
                StoreOutcome::LoadFailed(e.to_string())
            }
            StoreEvent::Created(Ok(task)) => {
                let title = task.title.clone();
                self.tasks.push(task);
                StoreOutcome::Added { title }
            }
            StoreEvent::Created(Err(e)) => {
                tracing::error!(error = %e, "failed to create task");
                StoreOutcome::AddFailed(e.to_string())
            }
            StoreEvent::Toggled { result: Ok(_), .. } => StoreOutcome::ToggleConfirmed,
            StoreEvent::Toggled { id, result: Err(e) } => {
                tracing::error!(%id, error = %e, "toggle not accepted by server; keeping local flip");
                StoreOutcome::ToggleFailed(e.to_string())
            }
            StoreEvent::EditSaved { result: Ok(_), .. } => {
                self.editing = None;
                StoreOutcome::EditSaved
            }
            StoreEvent::EditSaved { id, result: Err(e) } => {
                tracing::error!(%id, error = %e, "edited title not accepted by server");
                StoreOutcome::EditFailed(e.to_string())
            }
            StoreEvent::Deleted { id, result: Ok(()) } => {
                self.tasks.retain(|t| t.id != id);
                StoreOutcome::Removed { id }
            }
            StoreEvent::Deleted { id, result: Err(e) } => {
                tracing::error!(%id, error = %e, "failed to delete task");
                StoreOutcome::RemoveFailed(e.to_string())
            }
        }
    }
}
