//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fetch, clean, store and aggregate AI news articles.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Stage to run; defaults to a full fetch-and-process run
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch from the news API, then ingest, aggregate and preprocess
    Run,
    /// Repeat `run` every `schedule_interval_minutes` until interrupted
    Schedule,
    /// Ingest a saved API response or a JSON array of articles
    Ingest {
        /// Path to the JSON batch file
        file: PathBuf,
    },
    /// Rebuild cleaned title/content for every stored article
    Preprocess,
    /// Recompute the per-day article and keyword counts
    Aggregate,
    /// Write news_tokens.json to the data directory
    Export,
}
