// src/constants.rs
//
// Application-wide constants: wire identities, endpoints and user-facing messages.

/// Backend API root used when neither the command line nor the config file names one.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable that may carry the backend API root.
///
/// Used in: `cli/args.rs`
pub const BASE_URL_ENV: &str = "COMMENT_BOARD_URL";

/// Collection path segment below the API root.
///
/// Used in: `infrastructure/rest.rs`
pub const COMMENTS_RESOURCE: &str = "comments";

/// The single identity every comment is created under.
///
/// Used in: `domain/comment.rs`
pub const ADMIN_AUTHOR: &str = "Admin";

pub const LOAD_FAILED: &str = "Failed to load comments. Please try again.";
pub const ADD_FAILED: &str = "Failed to add comment. Please try again.";
pub const EDIT_FAILED: &str = "Failed to edit comment. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete comment. Please try again.";

/// Local validation prompts, shown without contacting the backend.
pub const EMPTY_NEW_COMMENT: &str = "Please enter a comment";
pub const EMPTY_EDITED_COMMENT: &str = "Comment cannot be empty";

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this comment?";

/// Characters of comment text quoted in prompts before truncation.
///
/// Used in: `application/board.rs`, `ports/terminal.rs`
pub const EXCERPT_LEN: usize = 75;
