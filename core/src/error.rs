//! Error type for store operations.
//!
//! # Design
//! A missing row is not an error: stores answer `Option`/`bool` for that.
//! `StoreError` covers failures only, and nothing between the store and the
//! HTTP layer recovers from it.

use std::error::Error as StdError;

use thiserror::Error;

/// Errors returned by `TodoStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage engine rejected the operation (I/O, constraint, SQL).
    #[error("storage backend failed: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),

    /// The request was cancelled before the operation finished.
    #[error("operation cancelled")]
    Cancelled,

    /// The worker running the blocking storage call panicked or was aborted.
    #[error("storage worker failed: {0}")]
    Worker(String),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
