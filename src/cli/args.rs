// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::BASE_URL_ENV;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Backend API root (overrides the config file)
    #[arg(short, long, value_name = "URL", env = BASE_URL_ENV, global = true)]
    pub base_url: Option<String>,

    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List all comments
    List {
        /// Output comments as JSON instead of the board view
        #[arg(long)]
        json: bool,
    },

    /// Post a new comment as Admin
    Add {
        /// Comment text
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Replace the text of a comment
    Edit {
        /// Comment ID to edit
        #[arg(value_name = "COMMENT_ID")]
        id: i64,

        /// New comment text
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Delete a comment
    Delete {
        /// Comment ID to delete
        #[arg(value_name = "COMMENT_ID")]
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive session over a live board
    Shell,
}
