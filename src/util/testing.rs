// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::env;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::CommentStore;
use crate::constants::ADMIN_AUTHOR;
use crate::domain::{Comment, CommentId, StoreError};

/// The four store operations, for configuring failures and counting calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    List,
    Create,
    Update,
    Delete,
}

/// Deterministic timestamp for fixture comments.
pub fn fixture_date(id: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap() + chrono::Duration::minutes(id)
}

/// A server-shaped comment for tests.
pub fn sample_comment(id: i64, text: &str) -> Comment {
    Comment {
        id: CommentId(id),
        text: text.to_string(),
        author: ADMIN_AUTHOR.to_string(),
        likes: 0,
        image: None,
        date: fixture_date(id),
    }
}

/// In-memory stand-in for the comment backend
///
/// Behaves like the real server (assigns ids, stores newest first, answers 404
/// for unknown ids) and can be told to fail or stall per operation.
///
/// # Examples
///
/// ```
/// use comment_board::util::testing::{sample_comment, MockCommentStore, StoreOp};
///
/// let store = MockCommentStore::builder()
///     .with_comment(sample_comment(1, "hello"))
///     .failing(StoreOp::Delete)
///     .build();
/// assert_eq!(store.calls(StoreOp::List), 0);
/// ```
pub struct MockCommentStore {
    comments: Mutex<Vec<Comment>>,
    next_id: Mutex<i64>,
    /// Calls of an op that still succeed before it starts failing
    failing: HashMap<StoreOp, usize>,
    list_delays: Vec<Duration>,
    update_delays: HashMap<String, Duration>,
    calls: Mutex<HashMap<StoreOp, usize>>,
}

impl MockCommentStore {
    pub fn builder() -> MockCommentStoreBuilder {
        MockCommentStoreBuilder::new()
    }

    /// Number of times an operation reached the store
    pub fn calls(&self, op: StoreOp) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&op)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .sum()
    }

    /// Server-side contents
    pub fn stored(&self) -> Vec<Comment> {
        self.comments.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Count the call and return its 1-based number, or the simulated failure.
    fn record(&self, op: StoreOp) -> Result<usize, StoreError> {
        let call = {
            let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
            let count = calls.entry(op).or_insert(0);
            *count += 1;
            *count
        };

        match self.failing.get(&op) {
            Some(&healthy) if call > healthy => {
                debug!(?op, call, "Simulating store failure");
                Err(StoreError::Status {
                    status: 500,
                    message: "simulated failure".to_string(),
                })
            }
            _ => Ok(call),
        }
    }

    fn not_found(id: CommentId) -> StoreError {
        StoreError::Status {
            status: 404,
            message: format!("comment {id} not found"),
        }
    }
}

#[async_trait]
impl CommentStore for MockCommentStore {
    async fn list(&self) -> Result<Vec<Comment>, StoreError> {
        let call = self.record(StoreOp::List)?;
        if let Some(delay) = self.list_delays.get(call - 1).or(self.list_delays.last()) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.stored())
    }

    async fn create(&self, text: &str) -> Result<Comment, StoreError> {
        self.record(StoreOp::Create)?;
        let id = {
            let mut next_id = self.next_id.lock().unwrap_or_else(|e| e.into_inner());
            let id = *next_id;
            *next_id += 1;
            id
        };

        let comment = Comment {
            id: CommentId(id),
            text: text.trim().to_string(),
            author: ADMIN_AUTHOR.to_string(),
            likes: 0,
            image: Some(String::new()),
            date: fixture_date(id),
        };
        self.comments
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(0, comment.clone());
        Ok(comment)
    }

    async fn update(&self, id: CommentId, text: &str) -> Result<Comment, StoreError> {
        self.record(StoreOp::Update)?;
        if let Some(delay) = self.update_delays.get(text) {
            tokio::time::sleep(*delay).await;
        }

        let mut comments = self.comments.lock().unwrap_or_else(|e| e.into_inner());
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        comment.text = text.trim().to_string();
        Ok(comment.clone())
    }

    async fn delete(&self, id: CommentId) -> Result<(), StoreError> {
        self.record(StoreOp::Delete)?;
        let mut comments = self.comments.lock().unwrap_or_else(|e| e.into_inner());
        let before = comments.len();
        comments.retain(|c| c.id != id);
        if comments.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

/// Builder for MockCommentStore
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockCommentStoreBuilder {
    comments: Vec<Comment>,
    failing: HashMap<StoreOp, usize>,
    list_delays: Vec<Duration>,
    update_delays: HashMap<String, Duration>,
}

impl MockCommentStoreBuilder {
    pub fn new() -> Self {
        Self {
            comments: vec![],
            failing: HashMap::new(),
            list_delays: vec![],
            update_delays: HashMap::new(),
        }
    }

    /// Append a comment to the server-side list (list order is insertion order)
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    /// Make every call of `op` answer with HTTP 500
    pub fn failing(self, op: StoreOp) -> Self {
        self.failing_after(op, 0)
    }

    /// Let the first `healthy` calls of `op` succeed, then answer with HTTP 500
    pub fn failing_after(mut self, op: StoreOp, healthy: usize) -> Self {
        self.failing.insert(op, healthy);
        self
    }

    /// Hold back the next list response by `delay`; the last delay given
    /// applies to every later call.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delays.push(delay);
        self
    }

    /// Hold back the response of any update that sets `text`
    pub fn with_update_delay(mut self, text: &str, delay: Duration) -> Self {
        self.update_delays.insert(text.to_string(), delay);
        self
    }

    pub fn build(self) -> MockCommentStore {
        let next_id = self.comments.iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
        MockCommentStore {
            comments: Mutex::new(self.comments),
            next_id: Mutex::new(next_id),
            failing: self.failing,
            list_delays: self.list_delays,
            update_delays: self.update_delays,
            calls: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MockCommentStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "hyper_util", "reqwest", "mio", "mockito"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        init_test_setup().expect("Failed to initialize test setup");
    }

    #[tokio::test]
    async fn given_seeded_store_when_listing_then_returns_insertion_order() {
        let store = MockCommentStore::builder()
            .with_comment(sample_comment(2, "b"))
            .with_comment(sample_comment(1, "a"))
            .build();

        let listed = store.list().await.expect("List should succeed");

        assert_eq!(listed.iter().map(|c| c.id.0).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(store.calls(StoreOp::List), 1);
    }

    #[tokio::test]
    async fn given_seeded_store_when_creating_then_assigns_fresh_id_on_top() {
        let store = MockCommentStore::builder()
            .with_comment(sample_comment(5, "old"))
            .build();

        let created = store.create("new").await.expect("Create should succeed");

        assert_eq!(created.id, CommentId(6));
        assert_eq!(store.stored()[0], created);
    }

    #[tokio::test]
    async fn given_unknown_id_when_updating_then_returns_not_found() {
        let store = MockCommentStore::builder().build();

        let result = store.update(CommentId(9), "x").await;

        assert!(matches!(result, Err(StoreError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn given_failing_op_when_called_then_counts_call_and_fails() {
        let store = MockCommentStore::builder()
            .with_comment(sample_comment(1, "a"))
            .failing(StoreOp::Delete)
            .build();

        let result = store.delete(CommentId(1)).await;

        assert!(matches!(result, Err(StoreError::Status { status: 500, .. })));
        assert_eq!(store.calls(StoreOp::Delete), 1);
        assert_eq!(store.stored().len(), 1);
        assert_eq!(store.total_calls(), 1);
    }

    #[tokio::test]
    async fn given_failing_after_when_called_repeatedly_then_only_later_calls_fail() {
        let store = MockCommentStore::builder()
            .with_comment(sample_comment(1, "a"))
            .failing_after(StoreOp::List, 1)
            .build();

        let first = store.list().await;
        let second = store.list().await;

        assert_eq!(first.expect("first list succeeds").len(), 1);
        assert!(matches!(second, Err(StoreError::Status { status: 500, .. })));
        assert_eq!(store.calls(StoreOp::List), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn given_list_delays_when_listing_then_each_call_waits_its_own_delay() {
        let store = MockCommentStore::builder()
            .with_list_delay(Duration::from_millis(10))
            .with_list_delay(Duration::from_millis(40))
            .build();
        let start = tokio::time::Instant::now();

        store.list().await.unwrap();
        let after_first = start.elapsed();
        store.list().await.unwrap();
        store.list().await.unwrap();

        assert_eq!(after_first, Duration::from_millis(10));
        assert_eq!(start.elapsed(), Duration::from_millis(90));
    }
}
