// src/application/mod.rs
pub mod board;
pub mod confirm;
pub mod store;

pub use board::{BoardState, CommentBoard};
pub use confirm::{AssumeYes, Confirmation};
pub use store::CommentStore;
