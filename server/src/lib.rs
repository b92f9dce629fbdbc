//! HTTP front end for the todo service.
//!
//! # Overview
//! `app` wires the `/todos` routes to the handlers in [`controller`] over a
//! shared store handle; `run` serves that router on a listener until the
//! shutdown future resolves.

pub mod config;
pub mod controller;
pub mod error;
pub mod extract;

use std::future::Future;
use std::sync::Arc;

use axum::{routing::get, Router};
use todo_core::{TodoService, TodoStore};
use tokio::net::TcpListener;

use controller::{create_todo, delete_todo, get_todo, list_todos, update_todo};

pub use config::Config;
pub use error::ApiError;

/// Router state: the store handle every request's service is built from.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub fn service(&self) -> TodoService {
        TodoService::new(Arc::clone(&self.store))
    }
}

pub fn app(store: Arc<dyn TodoStore>) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(AppState::new(store))
}

pub async fn run<F>(
    listener: TcpListener,
    store: Arc<dyn TodoStore>,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}
