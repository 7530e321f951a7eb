// ABOUTME: Formcheck CLI - analyzes recorded pose tracks for bike fit and running form
// ABOUTME: Provides analyze, detect-sport, and per-frame classify commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Full analysis, detecting the sport automatically
//! formcheck-cli analyze --input ride.json
//!
//! # Force the sport and print the report as JSON
//! formcheck-cli analyze --input run.json --sport running --format json
//!
//! # Only guess the sport
//! formcheck-cli detect-sport --input ride.json
//!
//! # Show the classifier scores of every sampled frame
//! formcheck-cli classify --input ride.json
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use formcheck::logging::LoggingConfig;
use formcheck::models::Sport;
use formcheck::replay::RecordedTrack;
use formcheck::AnalysisConfig;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "formcheck-cli",
    about = "Formcheck pose analysis CLI",
    long_about = "Analyze recorded pose tracks for bike fit (cycling) or running form."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(long, value_enum, global = true, default_value = "pretty")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Analyze a recorded track end to end
    Analyze {
        /// Recorded pose track (JSON)
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Sport to analyze as; `auto` detects it first
        #[arg(long, value_enum, default_value = "auto")]
        sport: SportArg,
    },

    /// Guess whether the track shows cycling or running
    DetectSport {
        /// Recorded pose track (JSON)
        #[arg(long, short = 'i')]
        input: PathBuf,
    },

    /// Show the classifier outcome of each sampled frame
    Classify {
        /// Recorded pose track (JSON)
        #[arg(long, short = 'i')]
        input: PathBuf,
    },
}

/// Sport selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SportArg {
    /// Detect from the track
    Auto,
    /// Bike fit
    Cycling,
    /// Running form
    Running,
}

impl SportArg {
    const fn sport(self) -> Option<Sport> {
        match self {
            Self::Auto => None,
            Self::Cycling => Some(Sport::Cycling),
            Self::Running => Some(Sport::Running),
        }
    }
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable text
    Pretty,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    let config = AnalysisConfig::from_environment()?;
    debug!(?config, "Analysis configuration loaded");

    match cli.command {
        Command::Analyze { input, sport } => {
            let track = RecordedTrack::load(&input).await?;
            commands::analyze::run(track, config, sport.sport(), cli.format).await?;
        }
        Command::DetectSport { input } => {
            let track = RecordedTrack::load(&input).await?;
            commands::detect::detect_sport(track, config, cli.format).await?;
        }
        Command::Classify { input } => {
            let track = RecordedTrack::load(&input).await?;
            commands::detect::classify(&track, &config, cli.format).await?;
        }
    }

    Ok(())
}
