// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Sport detection commands for formcheck-cli
// ABOUTME: Majority-vote detection and the per-frame classifier table

use formcheck::intelligence::pipeline::classify_frames;
use formcheck::replay::RecordedTrack;
use formcheck::{AnalysisConfig, AppResult};
use serde_json::json;

use crate::helpers::display::{display_classifications, display_detection};
use crate::OutputFormat;

/// Guess the sport of a recorded track
pub async fn detect_sport(
    track: RecordedTrack,
    config: AnalysisConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let detection = track.into_analyzer(config).detect_sport().await?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "sport": detection }))?
        ),
        OutputFormat::Pretty => display_detection(detection),
    }
    Ok(())
}

/// Print the classifier outcome of every sport-detection frame
pub async fn classify(
    track: &RecordedTrack,
    config: &AnalysisConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let classifications = classify_frames(track, track, config).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&classifications)?),
        OutputFormat::Pretty => display_classifications(&classifications),
    }
    Ok(())
}
