//! Process configuration, from flags or the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use todo_core::{StoreError, TodoStore};
use todo_storage::SqliteStore;

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", about = "HTTP service for todo items", version)]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database file; created with its schema on first start.
    #[arg(long, env = "TODO_DATABASE", default_value = "todos.sqlite")]
    pub database: PathBuf,

    /// Keep todos in a throwaway in-memory database instead of `--database`.
    #[arg(long, env = "TODO_IN_MEMORY")]
    pub in_memory: bool,

    /// `tracing` filter directive, e.g. `info` or `todo_server=debug`.
    #[arg(long = "log", env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn open_store(&self) -> Result<Arc<dyn TodoStore>, StoreError> {
        let store = if self.in_memory {
            SqliteStore::in_memory()?
        } else {
            SqliteStore::open(&self.database)?
        };
        Ok(Arc::new(store))
    }
}
