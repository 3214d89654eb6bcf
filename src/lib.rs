// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use application::{AssumeYes, CommentBoard, CommentStore};
use cli::args::{Args, Command};
use cli::prompt::PromptConfirmation;
use cli::shell::Shell;
use domain::CommentId;
use infrastructure::{Config, RestCommentStore};
use ports::TerminalPresenter;
use tracing::{debug, info};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting comment-board with arguments");

    // Initialize infrastructure
    let config = Config::discover(args.config.as_deref())?;
    let base_url = config.resolve_base_url(args.base_url.as_deref());
    info!(%base_url, "Using comment backend");
    let store = RestCommentStore::new(base_url)?;

    // Initialize application
    let board = CommentBoard::new(store);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    execute(&board, args.command, &mut input, &mut output).await
}

/// Mount the board, carry out one command against it and show the result.
///
/// The command runs even when the initial load fails. The board view is
/// printed either way; the first error is returned afterwards so the process
/// can exit non-zero.
pub async fn execute<S, R, W>(
    board: &CommentBoard<S>,
    command: Command,
    input: &mut R,
    output: &mut W,
) -> Result<()>
where
    S: CommentStore,
    R: BufRead,
    W: Write,
{
    if let Command::Shell = command {
        return Shell::new(board, input, output).run().await;
    }

    let presenter = TerminalPresenter::new();
    let loaded = board.initialize().await;

    let outcome = match command {
        Command::List { json: true } => {
            loaded?;
            let comments = board.comments();
            writeln!(output, "{}", serde_json::to_string_pretty(&comments)?)?;
            return Ok(());
        }
        Command::List { json: false } | Command::Shell => Ok(()),
        Command::Add { text } => board.add(&text).await.map(|comment| {
            info!(id = %comment.id, "Comment posted");
        }),
        Command::Edit { id, text } => board.edit(CommentId(id), &text).await.map(|_| ()),
        Command::Delete { id, yes } => {
            let deleted = if yes {
                board.delete(CommentId(id), &mut AssumeYes).await
            } else {
                let mut confirmation = PromptConfirmation::new(&mut *input, &mut *output);
                board.delete(CommentId(id), &mut confirmation).await
            };
            deleted.map(|done| {
                if !done {
                    info!(id, "Delete cancelled");
                }
            })
        }
    };
    // a failed load does not block the command; the first failure is reported
    let outcome = loaded.and(outcome);

    write!(output, "{}", presenter.render(&board.snapshot()))?;
    output.flush()?;
    Ok(outcome?)
}

#[cfg(test)]
/// must be public to be used from integration tests
mod tests {
    use crate::util::testing;
    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }
}
