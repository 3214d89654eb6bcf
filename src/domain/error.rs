// src/domain/error.rs
use thiserror::Error;

/// Failure reported by a comment store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("decode error: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Blank input, rejected before any request is made
    #[error("{0}")]
    EmptyText(&'static str),
    #[error("No delete is pending confirmation")]
    NoPendingDelete,
    #[error(transparent)]
    Store(#[from] StoreError),
}
