//! Todo domain core: entities, API shapes, validation, storage seam and the
//! service that ties them together.
//!
//! # Overview
//! The HTTP layer calls [`TodoService`]; the service calls a [`TodoStore`].
//! Nothing in this crate opens sockets or files, so the whole pipeline can be
//! exercised against [`InMemoryStore`].
//!
//! # Design
//! - Entities (`TodoItem`, `NewTodo`) never leave the service; handlers only
//!   see `TodoReadOutput`.
//! - Not-found is `Option`/`bool`, failures are `StoreError`.
//! - Titles are validated and stored trimmed.

pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod types;
pub mod validate;

pub use error::StoreError;
pub use model::{NewTodo, TodoId, TodoItem};
pub use service::TodoService;
pub use store::{InMemoryStore, TodoStore};
pub use types::{TodoCreateInput, TodoReadOutput, TodoUpdateInput};
pub use validate::validate_title;
