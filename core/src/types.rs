//! Request and response shapes for the todo API.
//!
//! # Design
//! These DTOs exist only at the HTTP boundary and are rebuilt for every
//! request. The wire uses camelCase (`isDone`). Input fields fall back to
//! their defaults when missing, so a body without a title is reported by the
//! title rule in [`crate::validate`] instead of failing to deserialize.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::{TodoId, TodoItem};
use crate::validate::validate_title;

/// A single todo as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoReadOutput {
    pub id: TodoId,
    pub title: String,
    pub is_done: bool,
}

impl From<TodoItem> for TodoReadOutput {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            is_done: item.is_done,
        }
    }
}

/// Request payload for creating a new todo. Unknown fields, including a
/// client-supplied `id`, are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct TodoCreateInput {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    pub is_done: bool,
}

/// Request payload for replacing the title and done flag of an existing todo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct TodoUpdateInput {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    pub is_done: bool,
}
