// src/infrastructure/mod.rs
pub mod config;
pub mod rest;

pub use config::Config;
pub use rest::RestCommentStore;
