//! Persisted todo entity.
//!
//! # Design
//! `TodoItem` is the row shape the store owns. A todo that has not been
//! written yet has no identity, so it is a separate type (`NewTodo`) rather
//! than a `TodoItem` with a placeholder id. Stores turn a `NewTodo` into a
//! `TodoItem` by assigning the id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity assigned by the storage engine on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl TodoId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TodoId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A stored todo row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub is_done: bool,
}

/// A todo waiting for the store to assign its id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub is_done: bool,
}

impl NewTodo {
    pub fn into_item(self, id: TodoId) -> TodoItem {
        TodoItem {
            id,
            title: self.title,
            is_done: self.is_done,
        }
    }
}
