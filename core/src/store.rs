//! Storage interface and the in-memory backend.
//!
//! # Design
//! `TodoStore` is the only way handlers reach persisted state. It is object
//! safe (`async_trait`) so the server holds an `Arc<dyn TodoStore>` and tests
//! can swap in `MemoryStore` without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::types::{NewTodo, Todo};

/// Persistence for todos, keyed by a storage-assigned integer id.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Every stored todo, ascending by id.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<Todo>, StoreError>;

    /// Insert a new row and return it with its assigned id.
    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError>;

    /// Overwrite title and completed for `todo.id`. Returns `false` if the
    /// row no longer exists.
    async fn save(&self, todo: &Todo) -> Result<bool, StoreError>;

    /// Hard delete. Returns `false` if there was nothing to delete.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<i64, Todo>,
    last_id: i64,
}

/// `TodoStore` backed by a map behind a `tokio` lock. Ids start at 1 and are
/// never reused, matching an autoincrement column.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let state = self.state.read().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let state = self.state.read().await;
        Ok(state.rows.get(&id).cloned())
    }

    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let todo = Todo {
            id: state.last_id,
            title: new.title,
            completed: new.completed,
        };
        state.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn save(&self, todo: &Todo) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.rows.get_mut(&todo.id) {
            Some(row) => {
                row.clone_from(todo);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.rows.remove(&id).is_some())
    }
}
