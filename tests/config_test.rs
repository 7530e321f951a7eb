// ABOUTME: Integration tests for environment-driven analysis and logging configuration
// ABOUTME: Validates overrides reach the pipeline and invalid values surface as config errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{cyclist, init_test_logging, steady_track};
use formcheck::logging::{LogFormat, LoggingConfig};
use formcheck::models::Sport;
use formcheck::{AnalysisConfig, AppError, ErrorCode};
use serial_test::serial;
use std::env;

const ANALYSIS_KEYS: [&str; 3] = [
    "FORMCHECK_ANALYSIS_FRAMES",
    "FORMCHECK_ANALYSIS_CONFIDENCE",
    "FORMCHECK_FRAME_TIMEOUT_MS",
];

fn clear_analysis_env() {
    for key in ANALYSIS_KEYS {
        env::remove_var(key);
    }
}

#[test]
fn test_defaults_match_contract_values() {
    let config = AnalysisConfig::default();
    assert!((config.confidence.classification - 0.2).abs() < f64::EPSILON);
    assert!((config.confidence.analysis - 0.3).abs() < f64::EPSILON);
    assert_eq!(config.sampling.sport_detection_frames, 5);
    assert_eq!(config.sampling.analysis_frames, 10);
    assert!(config.validate().is_ok());
}

#[tokio::test]
#[serial]
async fn test_frame_count_override_reaches_pipeline() {
    init_test_logging();
    clear_analysis_env();
    env::set_var("FORMCHECK_ANALYSIS_FRAMES", "4");

    let config = AnalysisConfig::from_environment().unwrap();
    clear_analysis_env();

    let report = steady_track(&cyclist(), 10.0)
        .into_analyzer(config)
        .analyze(Some(Sport::Cycling))
        .await
        .unwrap();
    assert_eq!(report.frames_sampled, 4);
    assert_eq!(report.frames_analyzed, 4);
}

#[test]
#[serial]
fn test_out_of_range_threshold_is_config_error() {
    clear_analysis_env();
    env::set_var("FORMCHECK_ANALYSIS_CONFIDENCE", "1.5");

    let result = AnalysisConfig::from_environment();
    clear_analysis_env();

    let err = AppError::from(result.unwrap_err());
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains("between 0 and 1"), "{}", err.message);
}

#[test]
#[serial]
fn test_zero_timeout_is_rejected() {
    clear_analysis_env();
    env::set_var("FORMCHECK_FRAME_TIMEOUT_MS", "0");

    let result = AnalysisConfig::from_environment();
    clear_analysis_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("LOG_INCLUDE_LOCATION", "1");

    let config = LoggingConfig::from_env();
    let cli = LoggingConfig::for_cli(true);

    env::remove_var("LOG_FORMAT");
    env::remove_var("LOG_INCLUDE_LOCATION");

    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert_eq!(cli.level, "debug");
    assert_eq!(cli.format, LogFormat::Json);
}

#[test]
#[serial]
fn test_cli_logging_is_quiet_by_default() {
    env::remove_var("LOG_FORMAT");
    let cli = LoggingConfig::for_cli(false);
    assert_eq!(cli.level, "warn");
    assert_eq!(cli.format, LogFormat::Compact);
}
