//! Client-side task list state.
//!
//! [`TaskListController`] owns the local task collection and keeps it in
//! step with the remote store: toggle and save-edit mutate locally before
//! the server answers, add and delete only after confirmation. Derived
//! views (filtered list, completion progress) are pure functions of the
//! controller state.

pub mod controller;

pub use controller::{StoreOutcome, TaskListController};

use std::fmt;
use std::str::FromStr;

use termtodo_api::task::Task;

/// View predicate applied to the task collection for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    /// Show every task.
    #[default]
    All,
    /// Show only completed tasks.
    Completed,
    /// Show only tasks not yet completed.
    Incomplete,
}

impl Filter {
    /// Cycles to the next filter: all -> incomplete -> completed -> all.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Incomplete,
            Self::Incomplete => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    /// Whether `task` passes this filter.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Incomplete => !task.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Completed => write!(f, "completed"),
            Self::Incomplete => write!(f, "incomplete"),
        }
    }
}

/// Error returned when parsing an unknown filter name.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter '{0}' (expected all, completed, or incomplete)")]
pub struct ParseFilterError(String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "incomplete" => Ok(Self::Incomplete),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

/// An in-progress title edit. At most one task is editable at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    /// Id of the task being edited.
    pub id: String,
    /// Pending title buffer, committed on save.
    pub buffer: String,
}
