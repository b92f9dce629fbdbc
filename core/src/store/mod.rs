//! Storage seam for todo entities.
//!
//! # Design
//! `TodoStore` is the only way the service touches persisted state. It maps
//! entity operations onto a storage engine and applies no business rules:
//! titles arrive already trimmed and validated. Every method takes the
//! request's `CancellationToken`; implementations check it before doing any
//! work and may abort in-flight I/O when it fires.
//!
//! Absence is a value. `get_by_id` and `update` answer `None` and `delete`
//! answers `false` when the id has no row.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::StoreError;
use crate::model::{NewTodo, TodoId, TodoItem};

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Snapshot of every row, in the engine's natural order.
    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<TodoItem>, StoreError>;

    async fn get_by_id(
        &self,
        id: TodoId,
        cancel: &CancellationToken,
    ) -> Result<Option<TodoItem>, StoreError>;

    /// Insert a row and return it with the id the engine assigned.
    async fn add(&self, todo: NewTodo, cancel: &CancellationToken) -> Result<TodoItem, StoreError>;

    /// Overwrite `title` and `is_done` on the row with `todo.id`. Other
    /// columns of the existing row are left alone. No write happens when the
    /// row is missing.
    async fn update(
        &self,
        todo: TodoItem,
        cancel: &CancellationToken,
    ) -> Result<Option<TodoItem>, StoreError>;

    /// Remove the row, answering whether one existed.
    async fn delete(&self, id: TodoId, cancel: &CancellationToken) -> Result<bool, StoreError>;
}

/// Fail fast when the caller has already gone away.
pub fn ensure_active(cancel: &CancellationToken) -> Result<(), StoreError> {
    if cancel.is_cancelled() {
        return Err(StoreError::Cancelled);
    }
    Ok(())
}
