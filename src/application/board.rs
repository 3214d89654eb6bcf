// src/application/board.rs
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, instrument, warn};

use crate::application::{CommentStore, Confirmation};
use crate::constants::{
    ADD_FAILED, DELETE_FAILED, DELETE_PROMPT, EDIT_FAILED, EMPTY_EDITED_COMMENT,
    EMPTY_NEW_COMMENT, EXCERPT_LEN, LOAD_FAILED,
};
use crate::domain::{BoardError, Comment, CommentId, StoreError};
use crate::util::text::{excerpt, is_blank};

/// Everything a view needs to draw the board.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    /// Cached server records, in server order with local additions on top
    pub comments: Vec<Comment>,
    /// Set while any full list fetch is outstanding
    pub loading: bool,
    /// Message for the most recent failed operation
    pub error: Option<String>,
    pub pending_delete: Option<CommentId>,
    /// Outstanding list fetches; `loading` is true exactly while this is non-zero
    pub(crate) loads_in_flight: usize,
}

/// Marks one list fetch as outstanding until dropped, so `loading` clears
/// even when the fetch is abandoned mid-flight.
struct LoadGuard<'a> {
    state: &'a Mutex<BoardState>,
}

impl<'a> LoadGuard<'a> {
    fn begin(state: &'a Mutex<BoardState>) -> Self {
        let mut locked = state.lock().unwrap_or_else(|e| e.into_inner());
        locked.loads_in_flight += 1;
        locked.loading = true;
        Self { state }
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        let mut locked = self.state.lock().unwrap_or_else(|e| e.into_inner());
        locked.loads_in_flight = locked.loads_in_flight.saturating_sub(1);
        locked.loading = locked.loads_in_flight > 0;
    }
}

/// Owns the local copy of the comment list and keeps it in step with the store.
///
/// State sits behind a lock that is never held across an `.await`, so
/// operations may be driven concurrently; each response is applied when it
/// arrives and the latest arrival wins.
pub struct CommentBoard<S: CommentStore> {
    store: S,
    state: Mutex<BoardState>,
}

impl<S: CommentStore> CommentBoard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: Mutex::new(BoardState::default()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn fail(&self, message: &str, error: StoreError) -> BoardError {
        self.state().error = Some(message.to_string());
        error.into()
    }

    /// Replace the local list with the server's.
    ///
    /// On failure the list is left as it was. `loading` is cleared either way
    /// once no other fetch is outstanding.
    #[instrument(level = "debug", skip(self))]
    pub async fn initialize(&self) -> Result<(), BoardError> {
        let load = LoadGuard::begin(&self.state);
        let result = self.store.list().await;
        drop(load);

        match result {
            Ok(comments) => {
                info!(count = comments.len(), "Loaded comments");
                let mut state = self.state();
                state.comments = comments;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Error loading comments");
                Err(self.fail(LOAD_FAILED, e))
            }
        }
    }

    /// Create a comment and put the server's record at the top of the list.
    #[instrument(level = "debug", skip(self))]
    pub async fn add(&self, text: &str) -> Result<Comment, BoardError> {
        if is_blank(text) {
            debug!("Rejected blank comment");
            return Err(BoardError::EmptyText(EMPTY_NEW_COMMENT));
        }

        match self.store.create(text).await {
            Ok(comment) => {
                info!(id = %comment.id, "Added comment");
                self.state().comments.insert(0, comment.clone());
                Ok(comment)
            }
            Err(e) => {
                warn!(error = %e, "Error adding comment");
                Err(self.fail(ADD_FAILED, e))
            }
        }
    }

    /// Change a comment's text and swap in the server's record in place.
    #[instrument(level = "debug", skip(self))]
    pub async fn edit(&self, id: CommentId, text: &str) -> Result<Comment, BoardError> {
        if is_blank(text) {
            debug!(%id, "Rejected blank edit");
            return Err(BoardError::EmptyText(EMPTY_EDITED_COMMENT));
        }

        match self.store.update(id, text).await {
            Ok(updated) => {
                let mut state = self.state();
                match state.comments.iter_mut().find(|c| c.id == id) {
                    Some(slot) => *slot = updated.clone(),
                    None => debug!(%id, "Edited comment is no longer listed"),
                }
                info!(%id, "Edited comment");
                Ok(updated)
            }
            Err(e) => {
                warn!(%id, error = %e, "Error editing comment");
                Err(self.fail(EDIT_FAILED, e))
            }
        }
    }

    /// First step of a delete: remember the intent, touch nothing else.
    pub fn request_delete(&self, id: CommentId) {
        debug!(%id, "Delete requested");
        self.state().pending_delete = Some(id);
    }

    /// Drop a pending delete without contacting the store.
    pub fn cancel_delete(&self) -> Option<CommentId> {
        let cancelled = self.state().pending_delete.take();
        debug!(?cancelled, "Delete cancelled");
        cancelled
    }

    /// Second step of a delete: remove the pending comment on the server,
    /// then locally once the server has acknowledged it.
    #[instrument(level = "debug", skip(self))]
    pub async fn confirm_delete(&self) -> Result<CommentId, BoardError> {
        let id = self
            .state()
            .pending_delete
            .take()
            .ok_or(BoardError::NoPendingDelete)?;

        match self.store.delete(id).await {
            Ok(()) => {
                info!(%id, "Deleted comment");
                self.state().comments.retain(|c| c.id != id);
                Ok(id)
            }
            Err(e) => {
                warn!(%id, error = %e, "Error deleting comment");
                Err(self.fail(DELETE_FAILED, e))
            }
        }
    }

    /// Ask, then delete. Returns `Ok(false)` when the user declines.
    ///
    /// A two-step delete already pending for another comment is left in place.
    pub async fn delete<C>(&self, id: CommentId, confirmation: &mut C) -> Result<bool, BoardError>
    where
        C: Confirmation + ?Sized,
    {
        let previous = self.state().pending_delete.replace(id);
        debug!(%id, ?previous, "Delete requested");

        let prompt = self.delete_prompt(id);
        let outcome = if confirmation.confirm(&prompt) {
            self.confirm_delete().await.map(|_| true)
        } else {
            debug!(%id, "Delete declined");
            Ok(false)
        };

        let mut state = self.state();
        if state.pending_delete.map_or(true, |pending| pending == id) {
            state.pending_delete = previous.filter(|&pending| pending != id);
        }
        outcome
    }

    fn delete_prompt(&self, id: CommentId) -> String {
        let state = self.state();
        match state.comments.iter().find(|c| c.id == id) {
            Some(comment) => format!(
                "{DELETE_PROMPT} \"{}\"",
                excerpt(&comment.text, EXCERPT_LEN)
            ),
            None => DELETE_PROMPT.to_string(),
        }
    }

    pub fn dismiss_error(&self) {
        self.state().error = None;
    }

    pub fn snapshot(&self) -> BoardState {
        self.state().clone()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.state().comments.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn pending_delete(&self) -> Option<CommentId> {
        self.state().pending_delete
    }
}
