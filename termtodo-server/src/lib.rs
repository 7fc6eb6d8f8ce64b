//! `TermTodo` backend library.
//!
//! Exposes the REST task server for use in tests and embedding. The server
//! holds an in-memory, insertion-ordered task collection and serves it as a
//! `/todos` resource collection (list, create, update, delete).

pub mod config;
pub mod http;
pub mod store;
