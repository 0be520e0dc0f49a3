//! Validation of incoming todo forms.
//!
//! # Design
//! Forms arrive as loosely typed JSON. Each field is checked independently so
//! a single response can report every problem at once, keyed by field name.
//! Problems with the form as a whole land under `non_field_errors`.
//! Validation never touches storage; handlers decide what to do with the
//! outcome.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{NewTodo, Todo, TodoPatch};

/// Maximum title length, counted in Unicode scalar values.
pub const TITLE_MAX_LEN: usize = 200;

pub const TITLE: &str = "title";
pub const COMPLETED: &str = "completed";
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NOT_STRING: &str = "Not a valid string.";
pub const MSG_NOT_BOOL: &str = "Must be a valid boolean.";
pub const MSG_NO_DATA: &str = "No data provided.";

/// Field name to error messages. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("invalid fields: {}", summarize(.0))]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Shorthand for a single form-level error.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

fn summarize(errors: &BTreeMap<String, Vec<String>>) -> String {
    let mut out = String::new();
    for (field, messages) in errors {
        if !out.is_empty() {
            out.push_str("; ");
        }
        let _ = write!(out, "{field}: {}", messages.join(" "));
    }
    out
}

/// Validate a create form. `title` is required, `completed` defaults to false.
pub fn validate_new(form: &Value) -> Result<NewTodo, FieldErrors> {
    let fields = as_form(form)?;
    let mut errors = FieldErrors::default();

    let title = match fields.get(TITLE) {
        Some(value) => record(&mut errors, TITLE, parse_title(value)),
        None => {
            errors.add(TITLE, MSG_REQUIRED);
            None
        }
    };
    let completed = match fields.get(COMPLETED) {
        Some(value) => record(&mut errors, COMPLETED, parse_completed(value)),
        None => Some(false),
    };

    match (title, completed) {
        (Some(title), Some(completed)) if errors.is_empty() => Ok(NewTodo { title, completed }),
        _ => Err(errors),
    }
}

/// Validate a partial update form. Every field is optional, but a field that
/// is present must be valid.
pub fn validate_patch(form: &Value) -> Result<TodoPatch, FieldErrors> {
    let fields = as_form(form)?;
    let mut errors = FieldErrors::default();

    let title = fields
        .get(TITLE)
        .and_then(|value| record(&mut errors, TITLE, parse_title(value)));
    let completed = fields
        .get(COMPLETED)
        .and_then(|value| record(&mut errors, COMPLETED, parse_completed(value)));

    if errors.is_empty() {
        Ok(TodoPatch { title, completed })
    } else {
        Err(errors)
    }
}

/// Re-check a fully merged record before it is written back.
pub fn validate_todo(todo: &Todo) -> Result<(), FieldErrors> {
    match check_title(&todo.title) {
        Ok(_) => Ok(()),
        Err(message) => {
            let mut errors = FieldErrors::default();
            errors.add(TITLE, message);
            Err(errors)
        }
    }
}

fn as_form(form: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    match form {
        Value::Object(fields) => Ok(fields),
        Value::Null => Err(FieldErrors::non_field(MSG_NO_DATA)),
        other => Err(FieldErrors::non_field(format!(
            "Invalid data. Expected an object, but got {}.",
            json_type(other)
        ))),
    }
}

fn record<T>(errors: &mut FieldErrors, field: &str, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

fn parse_title(value: &Value) -> Result<String, String> {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => return Err(MSG_NULL.to_string()),
        _ => return Err(MSG_NOT_STRING.to_string()),
    };
    check_title(raw.trim())
}

fn check_title(title: &str) -> Result<String, String> {
    if title.trim().is_empty() {
        return Err(MSG_BLANK.to_string());
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(format!(
            "Ensure this field has no more than {TITLE_MAX_LEN} characters."
        ));
    }
    Ok(title.to_string())
}

fn parse_completed(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Null => Err(MSG_NULL.to_string()),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(MSG_NOT_BOOL.to_string()),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(MSG_NOT_BOOL.to_string()),
        },
        _ => Err(MSG_NOT_BOOL.to_string()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
