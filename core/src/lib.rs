//! Domain core for the todo service.
//!
//! # Overview
//! Holds everything below the HTTP layer: the `Todo` entity and its wire
//! envelopes, form validation, and the storage interface with its in-memory
//! and SQLite implementations.
//!
//! # Design
//! - Validation is a pure function from JSON to a typed value or a
//!   `FieldErrors` map; it never panics and never touches storage.
//! - Storage is an explicit `TodoStore` trait object injected into the
//!   server, so handlers can be driven against `MemoryStore` in tests.
//! - Each store operation is a single statement; concurrent writers to the
//!   same row follow last-write-wins.

pub mod error;
pub mod sqlite;
pub mod store;
pub mod types;
pub mod validate;

pub use error::StoreError;
pub use sqlite::SqliteStore;
pub use store::{MemoryStore, TodoStore};
pub use types::{
    ErrorResponse, MessageResponse, NewTodo, Todo, TodoListResponse, TodoPatch, TodoResponse,
};
pub use validate::{validate_new, validate_patch, validate_todo, FieldErrors};
