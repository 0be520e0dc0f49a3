//! Domain entity and wire envelopes for the todo API.
//!
//! # Design
//! `Todo` is both the persisted row (`sqlx::FromRow`) and the JSON object the
//! handlers emit. Request payloads are not deserialized straight into typed
//! structs: they arrive as `serde_json::Value` and go through
//! [`crate::validate`], which yields `NewTodo` / `TodoPatch` or a
//! [`FieldErrors`] map. Response envelopes carry the `todo` / `todos` /
//! `message` keys the browser client reads.

use serde::{Deserialize, Serialize};

use crate::validate::FieldErrors;

pub const MSG_CREATED: &str = "Item added to the list";
pub const MSG_UPDATED: &str = "Item updated";
pub const MSG_DELETED: &str = "Todo deleted";
pub const MSG_NOT_FOUND: &str = "Item not found";

/// A single persisted todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// A validated create payload. Storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}

/// A validated partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }

    /// Merge the supplied fields over `todo`. The id never changes.
    pub fn apply_to(&self, todo: &Todo) -> Todo {
        Todo {
            id: todo.id,
            title: self.title.clone().unwrap_or_else(|| todo.title.clone()),
            completed: self.completed.unwrap_or(todo.completed),
        }
    }
}

/// `GET /todos/` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}

/// Body for a single todo, optionally with a confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoResponse {
    pub todo: Todo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Plain `{ "message": "..." }` body used for deletes and not-found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Validation failure body: `{ "message": { field: [errors] } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: FieldErrors,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        Todo {
            id: 7,
            title: "Buy milk".to_string(),
            completed: false,
        }
    }

    #[test]
    fn todo_serializes_to_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn patch_applies_only_supplied_fields() {
        let patch = TodoPatch {
            title: None,
            completed: Some(true),
        };
        let merged = patch.apply_to(&sample());
        assert_eq!(merged.id, 7);
        assert_eq!(merged.title, "Buy milk");
        assert!(merged.completed);
    }

    #[test]
    fn empty_patch_is_identity() {
        let patch = TodoPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.apply_to(&sample()), sample());
    }

    #[test]
    fn todo_response_omits_missing_message() {
        let body = TodoResponse {
            todo: sample(),
            message: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("message").is_none());
        assert_eq!(json["todo"]["id"], 7);
    }
}
