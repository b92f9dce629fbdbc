use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{ensure_active, TodoStore};
use crate::error::StoreError;
use crate::model::{NewTodo, TodoId, TodoItem};

/// Process-local store backed by an ordered map.
///
/// Ids start at 1 and are never handed out twice, even after a delete, which
/// matches an autoincrement column. Listing returns rows in id order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: RwLock<Rows>,
}

#[derive(Debug, Default)]
struct Rows {
    next_id: i64,
    by_id: BTreeMap<TodoId, TodoItem>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoStore for InMemoryStore {
    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<TodoItem>, StoreError> {
        ensure_active(cancel)?;
        let rows = self.rows.read().await;
        Ok(rows.by_id.values().cloned().collect())
    }

    async fn get_by_id(
        &self,
        id: TodoId,
        cancel: &CancellationToken,
    ) -> Result<Option<TodoItem>, StoreError> {
        ensure_active(cancel)?;
        let rows = self.rows.read().await;
        Ok(rows.by_id.get(&id).cloned())
    }

    async fn add(&self, todo: NewTodo, cancel: &CancellationToken) -> Result<TodoItem, StoreError> {
        ensure_active(cancel)?;
        let mut rows = self.rows.write().await;
        rows.next_id += 1;
        let item = todo.into_item(TodoId(rows.next_id));
        rows.by_id.insert(item.id, item.clone());
        debug!(id = %item.id, "inserted todo");
        Ok(item)
    }

    async fn update(
        &self,
        todo: TodoItem,
        cancel: &CancellationToken,
    ) -> Result<Option<TodoItem>, StoreError> {
        ensure_active(cancel)?;
        let mut rows = self.rows.write().await;
        let Some(existing) = rows.by_id.get_mut(&todo.id) else {
            return Ok(None);
        };
        existing.title = todo.title;
        existing.is_done = todo.is_done;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: TodoId, cancel: &CancellationToken) -> Result<bool, StoreError> {
        ensure_active(cancel)?;
        let mut rows = self.rows.write().await;
        Ok(rows.by_id.remove(&id).is_some())
    }
}
