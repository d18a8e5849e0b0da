//! Command-line interface for quiz_four.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quiz Four - quiz-gated Connect Four over a shared document store
#[derive(Parser, Debug)]
#[command(name = "quiz_four")]
#[command(about = "Quiz-gated Connect Four match coordinator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one match between two automated clients on an in-memory store
    Simulate {
        /// Path to a TOML config file (falls back to $QUIZ_FOUR_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Probability that a player answers a quiz word correctly
        #[arg(long)]
        accuracy: Option<f64>,

        /// Seed for a reproducible match
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Load and validate a config file, then print it
    CheckConfig {
        /// Path to a TOML config file (falls back to $QUIZ_FOUR_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
