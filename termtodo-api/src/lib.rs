//! Shared wire types for the `TermTodo` REST API.

pub mod task;
