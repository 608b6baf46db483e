//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: one matching pass (default)
//! - status: period state and history for a date
//! - reset: clear the history file

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// coffeeconnection - pair channel members for coffee chats
#[derive(Parser, Debug)]
#[command(name = "coffeeconnection")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Date to act on (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Subcommand to run; a bare invocation is a live run
    pub fn action(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run { dry_run: false })
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Match today's share of the queue and announce the pairs
    Run {
        /// Print announcements instead of posting them, leave the history untouched
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Show the period state and who already had a coffee
    Status,

    /// Clear the history file, starting a fresh period
    Reset,
}
