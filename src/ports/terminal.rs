// src/ports/terminal.rs
use crate::application::BoardState;
use crate::domain::Comment;
use tracing::instrument;

const HEADER: &str = "💬 Comments";
const LOADING: &str = "Loading comments...";
const EMPTY: &str = "No comments yet. Be the first to comment!";

/// Draws the board as plain text. Output depends on the state alone.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render(&self, state: &BoardState) -> String {
        let mut lines = vec![HEADER.to_string(), "=".repeat(40)];

        if let Some(error) = &state.error {
            lines.push(format!("[!] {error} (type `dismiss` to clear)"));
        }

        if state.loading {
            lines.push(LOADING.to_string());
        } else if state.comments.is_empty() {
            lines.push(EMPTY.to_string());
        } else {
            for comment in &state.comments {
                lines.push(String::new());
                lines.extend(self.comment_lines(comment));
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn comment_lines(&self, comment: &Comment) -> Vec<String> {
        let avatar = match comment.avatar() {
            Some(url) => format!("<{url}>"),
            None => format!(
                "[{}]",
                comment.author.chars().next().unwrap_or('?').to_uppercase()
            ),
        };

        let heading = format!(
            "#{id} {avatar} {author} · {date} · 👍 {likes}",
            id = comment.id,
            author = comment.author,
            date = comment.date.format("%Y-%m-%d %H:%M UTC"),
            likes = comment.likes,
        );
        std::iter::once(heading)
            .chain(comment.text.lines().map(|line| format!("    {line}")))
            .collect()
    }
}
