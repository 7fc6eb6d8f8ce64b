//! `TermTodo` — terminal to-do list client library.

pub mod app;
pub mod config;
pub mod store;
pub mod tasks;
pub mod ui;
