// src/application/store.rs
use crate::domain::{Comment, CommentId, StoreError};
use async_trait::async_trait;

/// Remote comment collection.
///
/// Receivers are shared so several requests can be in flight at once.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// All comments, in the order the server returns them
    async fn list(&self) -> Result<Vec<Comment>, StoreError>;

    /// Create a comment under the admin identity and return the server's record
    async fn create(&self, text: &str) -> Result<Comment, StoreError>;

    /// Change only the text of an existing comment
    async fn update(&self, id: CommentId, text: &str) -> Result<Comment, StoreError>;

    async fn delete(&self, id: CommentId) -> Result<(), StoreError>;
}
