//! Application logic between the HTTP handlers and the store.
//!
//! # Design
//! `TodoService` is the only place that converts between the API shapes in
//! [`crate::types`] and the entities in [`crate::model`], and the only place
//! that normalizes input (titles are trimmed once, here). It holds a shared
//! handle to the store and nothing else, so building one per request is
//! cheap. Store failures are returned untouched.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::StoreError;
use crate::model::{NewTodo, TodoId, TodoItem};
use crate::store::TodoStore;
use crate::types::{TodoCreateInput, TodoReadOutput, TodoUpdateInput};

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<TodoReadOutput>, StoreError> {
        let items = self.store.get_all(cancel).await?;
        Ok(items.into_iter().map(TodoReadOutput::from).collect())
    }

    pub async fn get_by_id(
        &self,
        id: TodoId,
        cancel: &CancellationToken,
    ) -> Result<Option<TodoReadOutput>, StoreError> {
        let item = self.store.get_by_id(id, cancel).await?;
        Ok(item.map(TodoReadOutput::from))
    }

    pub async fn create(
        &self,
        input: TodoCreateInput,
        cancel: &CancellationToken,
    ) -> Result<TodoReadOutput, StoreError> {
        let draft = NewTodo {
            title: input.title.trim().to_string(),
            is_done: input.is_done,
        };
        let item = self.store.add(draft, cancel).await?;
        info!(id = %item.id, "todo created");
        Ok(item.into())
    }

    /// Answers `None` when no todo has this id.
    pub async fn update(
        &self,
        id: TodoId,
        input: TodoUpdateInput,
        cancel: &CancellationToken,
    ) -> Result<Option<TodoReadOutput>, StoreError> {
        let item = TodoItem {
            id,
            title: input.title.trim().to_string(),
            is_done: input.is_done,
        };
        let updated = self.store.update(item, cancel).await?;
        if updated.is_some() {
            info!(%id, "todo updated");
        }
        Ok(updated.map(TodoReadOutput::from))
    }

    pub async fn delete(&self, id: TodoId, cancel: &CancellationToken) -> Result<bool, StoreError> {
        let deleted = self.store.delete(id, cancel).await?;
        if deleted {
            info!(%id, "todo deleted");
        }
        Ok(deleted)
    }
}
