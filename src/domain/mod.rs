// src/domain/mod.rs
pub mod comment;
pub mod error;

pub use comment::{Comment, CommentId, CommentPatch, NewComment};
pub use error::{BoardError, StoreError};
