//! SQLite-backed `TodoStore`.
//!
//! # Design
//! A file database gets a fresh connection per store call, in WAL mode so
//! readers never hold up the writer. An in-memory database only exists
//! inside one connection, so that connection is owned by the store and calls
//! take turns on it. Either way the work runs on tokio's blocking pool and
//! SQLite's autocommit issues the single commit for each write. There is no
//! transaction spanning calls.
//!
//! While a statement runs the caller's `CancellationToken` is raced against
//! it. If the token fires first the call reports `Cancelled`; a per-call
//! connection is also interrupted. The shared in-memory connection is not,
//! since the interrupt could land on another request's statement.
//!
//! The schema is bootstrapped once when the store is opened.

mod schema;

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use todo_core::store::ensure_active;
use todo_core::{NewTodo, StoreError, TodoId, TodoItem, TodoStore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Rusqlite-backed store. Cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct SqliteStore {
    target: Target,
}

#[derive(Debug)]
enum Target {
    File(String),
    Memory(Arc<Mutex<Connection>>),
}

fn connect(path: &str) -> rusqlite::Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path` and make sure
    /// the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let target = path.to_string_lossy().into_owned();
        let conn = connect(&target).map_err(StoreError::backend)?;
        schema::enable_wal(&conn).map_err(StoreError::backend)?;
        schema::bootstrap(&conn).map_err(StoreError::backend)?;
        debug!(path = %path.display(), "sqlite store opened");
        Ok(Self {
            target: Target::File(target),
        })
    }

    /// A private in-memory database that lives as long as this store.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::backend)?;
        schema::bootstrap(&conn).map_err(StoreError::backend)?;
        Ok(Self {
            target: Target::Memory(Arc::new(Mutex::new(conn))),
        })
    }

    /// Run `work` against the database off the async runtime.
    async fn run<T, F>(
        &self,
        op: &'static str,
        cancel: &CancellationToken,
        work: F,
    ) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        ensure_active(cancel)?;
        let (mut task, interrupt) = match &self.target {
            Target::File(path) => {
                let conn = connect(path).map_err(StoreError::backend)?;
                let interrupt = conn.get_interrupt_handle();
                let task = tokio::task::spawn_blocking(move || {
                    work(&conn).map_err(StoreError::backend)
                });
                (task, Some(interrupt))
            }
            Target::Memory(shared) => {
                let shared = Arc::clone(shared);
                let cancel = cancel.clone();
                let task = tokio::task::spawn_blocking(move || {
                    // a panicked call leaves the connection itself usable
                    let conn = shared.lock().unwrap_or_else(PoisonError::into_inner);
                    ensure_active(&cancel)?;
                    work(&conn).map_err(StoreError::backend)
                });
                (task, None)
            }
        };

        debug!(op, "sqlite call");
        tokio::select! {
            joined = &mut task => match joined {
                Ok(result) => result,
                Err(err) => Err(StoreError::Worker(err.to_string())),
            },
            () = cancel.cancelled() => {
                if let Some(interrupt) = interrupt {
                    interrupt.interrupt();
                }
                warn!(op, "sqlite call cancelled");
                Err(StoreError::Cancelled)
            }
        }
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<TodoItem> {
    Ok(TodoItem {
        id: row.get::<_, i64>(0)?.into(),
        title: row.get(1)?,
        is_done: row.get(2)?,
    })
}

fn find(conn: &Connection, id: TodoId) -> rusqlite::Result<Option<TodoItem>> {
    conn.query_row(
        "SELECT id, title, is_done FROM todos WHERE id = ?1",
        params![id.get()],
        read_row,
    )
    .optional()
}

/// Overwrite title and flag of an existing row. `false` when no row matched.
fn write_back(conn: &Connection, item: &TodoItem) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE todos SET title = ?2, is_done = ?3 WHERE id = ?1",
        params![item.id.get(), item.title, item.is_done],
    )?;
    Ok(changed > 0)
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<TodoItem>, StoreError> {
        self.run("get_all", cancel, |conn| {
            let mut stmt = conn.prepare("SELECT id, title, is_done FROM todos")?;
            let rows = stmt.query_map([], read_row)?;
            let items = rows.collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(items)
        })
        .await
    }

    async fn get_by_id(
        &self,
        id: TodoId,
        cancel: &CancellationToken,
    ) -> Result<Option<TodoItem>, StoreError> {
        self.run("get_by_id", cancel, move |conn| find(conn, id)).await
    }

    async fn add(&self, todo: NewTodo, cancel: &CancellationToken) -> Result<TodoItem, StoreError> {
        self.run("add", cancel, move |conn| {
            conn.execute(
                "INSERT INTO todos (title, is_done) VALUES (?1, ?2)",
                params![todo.title, todo.is_done],
            )?;
            Ok(todo.into_item(TodoId(conn.last_insert_rowid())))
        })
        .await
    }

    async fn update(
        &self,
        todo: TodoItem,
        cancel: &CancellationToken,
    ) -> Result<Option<TodoItem>, StoreError> {
        self.run("update", cancel, move |conn| {
            let Some(mut existing) = find(conn, todo.id)? else {
                return Ok(None);
            };
            existing.title = todo.title;
            existing.is_done = todo.is_done;
            // the row can vanish between the lookup and the write
            if !write_back(conn, &existing)? {
                return Ok(None);
            }
            Ok(Some(existing))
        })
        .await
    }

    async fn delete(&self, id: TodoId, cancel: &CancellationToken) -> Result<bool, StoreError> {
        self.run("delete", cancel, move |conn| {
            let removed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id.get()])?;
            Ok(removed > 0)
        })
        .await
    }
}
