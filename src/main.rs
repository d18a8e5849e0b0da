//! Quiz Four - CLI
//!
//! Runs automated matches and checks configuration files.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use quiz_four::{AppConfig, run_simulation};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,quiz_four=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            config,
            accuracy,
            seed,
        } => simulate(config, accuracy, seed).await,
        Command::CheckConfig { config } => check_config(config),
    }
}

/// Play one automated match and print the result.
#[instrument]
async fn simulate(config: Option<PathBuf>, accuracy: Option<f64>, seed: Option<u64>) -> Result<()> {
    let mut config = AppConfig::resolve(config.as_deref())?;
    config.override_simulation(accuracy, seed)?;

    info!("Starting simulated match");
    let report = run_simulation(&config).await?;

    println!("{}", report.final_state.board().render());
    match (report.outcome, report.winner_id()) {
        (Some(outcome), Some(winner)) => println!("{} ({}) after {} actions", outcome, winner, report.actions),
        (Some(outcome), None) => println!("{} after {} actions", outcome, report.actions),
        (None, _) => println!("Abandoned after {} actions", report.actions),
    }
    Ok(())
}

/// Validate a config file and print the effective settings.
#[instrument]
fn check_config(config: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::resolve(config.as_deref())?;
    println!("{}", toml::to_string_pretty(&config)?);
    info!("Config is valid");
    Ok(())
}
