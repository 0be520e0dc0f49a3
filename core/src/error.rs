//! Error types for the storage layer.
//!
//! # Design
//! Storage faults are not recoverable by the caller in any meaningful way, so
//! there is one variant per backend rather than a fine-grained taxonomy. A
//! missing row is not an error here: lookups return `Option` / `bool` and the
//! HTTP layer decides how to report absence.

use thiserror::Error;

pub use sqlx::Error as SqlxError;

/// Errors returned by `TodoStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The SQLite backend failed (connection, schema, or statement).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
