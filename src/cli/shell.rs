// src/cli/shell.rs
use anyhow::Result;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};

use crate::application::{CommentBoard, CommentStore};
use crate::cli::prompt::PromptConfirmation;
use crate::domain::{BoardError, CommentId};
use crate::ports::TerminalPresenter;

const HELP: &str = "\
Commands:
  list | reload          fetch all comments again
  add <text>             post a comment as Admin
  edit <id> <text>       replace a comment's text
  delete <id>            delete a comment (asks first)
  dismiss                clear the error message
  help                   show this help
  quit | exit            leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Reload,
    Add(String),
    Edit(CommentId, String),
    Delete(CommentId),
    Dismiss,
    Help,
    Quit,
    Nothing,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Not a comment id: {0}")]
    InvalidId(String),
}

fn parse_id(raw: &str) -> Result<CommentId, ParseError> {
    raw.parse::<i64>()
        .map(CommentId)
        .map_err(|_| ParseError::InvalidId(raw.to_string()))
}

/// Parse one line of shell input.
///
/// Text arguments are taken verbatim (minus the separating space), so blank
/// text reaches the board and is rejected there.
pub fn parse_command(line: &str) -> Result<ShellCommand, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));

    match word {
        "" => Ok(ShellCommand::Nothing),
        "list" | "reload" => Ok(ShellCommand::Reload),
        "add" => Ok(ShellCommand::Add(rest.to_string())),
        "edit" => {
            let rest = rest.trim_start();
            let (id, text) = rest
                .split_once(' ')
                .ok_or(ParseError::Usage("edit <id> <text>"))?;
            Ok(ShellCommand::Edit(parse_id(id)?, text.to_string()))
        }
        "delete" => match rest.trim() {
            "" => Err(ParseError::Usage("delete <id>")),
            id => Ok(ShellCommand::Delete(parse_id(id)?)),
        },
        "dismiss" => Ok(ShellCommand::Dismiss),
        "help" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

/// Line-driven front end over one live board.
pub struct Shell<'a, S: CommentStore, R: BufRead, W: Write> {
    board: &'a CommentBoard<S>,
    presenter: TerminalPresenter,
    input: R,
    output: W,
}

impl<'a, S: CommentStore, R: BufRead, W: Write> Shell<'a, S, R, W> {
    pub fn new(board: &'a CommentBoard<S>, input: R, output: W) -> Self {
        Self {
            board,
            presenter: TerminalPresenter::new(),
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Load the board, then serve commands until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting shell");
        // A failed load is shown in the error banner
        let _ = self.board.initialize().await;
        self.render()?;
        writeln!(self.output, "Type `help` for commands.")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input");
                break;
            }

            match parse_command(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.execute(command).await?,
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let view = self.presenter.render(&self.board.snapshot());
        write!(self.output, "{view}")?;
        Ok(())
    }

    /// Print what went wrong locally. Remote failures already sit in the board's banner.
    fn report(&mut self, error: &BoardError) -> Result<()> {
        if !matches!(error, BoardError::Store(_)) {
            writeln!(self.output, "{error}")?;
        }
        Ok(())
    }

    async fn execute(&mut self, command: ShellCommand) -> Result<()> {
        debug!(?command, "Executing shell command");
        match command {
            ShellCommand::Nothing | ShellCommand::Quit => return Ok(()),
            ShellCommand::Help => {
                writeln!(self.output, "{HELP}")?;
                return Ok(());
            }
            ShellCommand::Reload => {
                let _ = self.board.initialize().await;
            }
            ShellCommand::Add(text) => match self.board.add(&text).await {
                Ok(comment) => writeln!(self.output, "Posted comment #{}", comment.id)?,
                Err(e) => self.report(&e)?,
            },
            ShellCommand::Edit(id, text) => match self.board.edit(id, &text).await {
                Ok(_) => writeln!(self.output, "Saved comment #{id}")?,
                Err(e) => self.report(&e)?,
            },
            ShellCommand::Delete(id) => {
                let mut confirmation = PromptConfirmation::new(&mut self.input, &mut self.output);
                match self.board.delete(id, &mut confirmation).await {
                    Ok(true) => writeln!(self.output, "Deleted comment #{id}")?,
                    Ok(false) => writeln!(self.output, "Cancelled.")?,
                    Err(e) => self.report(&e)?,
                }
            }
            ShellCommand::Dismiss => self.board.dismiss_error(),
        }
        self.render()
    }
}
