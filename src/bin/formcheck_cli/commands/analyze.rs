// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Full analysis command for formcheck-cli
// ABOUTME: Runs the pipeline over a recorded track and prints the report

use formcheck::models::Sport;
use formcheck::replay::RecordedTrack;
use formcheck::{AnalysisConfig, AppResult};
use tracing::info;

use crate::helpers::display::display_report;
use crate::OutputFormat;

/// Analyze a recorded track, detecting the sport when `sport` is `None`
pub async fn run(
    track: RecordedTrack,
    config: AnalysisConfig,
    sport: Option<Sport>,
    format: OutputFormat,
) -> AppResult<()> {
    info!(
        duration_secs = track.duration_secs,
        samples = track.samples.len(),
        "Analyzing recorded track"
    );

    let report = track.into_analyzer(config).analyze(sport).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Pretty => display_report(&report),
    }
    Ok(())
}
