// ABOUTME: Main library entry point for formcheck pose-based form analysis
// ABOUTME: Re-exports the core and intelligence crates plus logging and recorded-track replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Formcheck
//!
//! Bike-fit and running-form analysis from human pose estimates.
//!
//! The workspace is split the same way the data flows:
//!
//! - [`formcheck_core`]: keypoints, poses, angle records, recommendations,
//!   errors, and analysis configuration
//! - [`formcheck_intelligence`]: geometry, the sport classifier, the two form
//!   analyzers, aggregation, severity grading, summaries, and the async
//!   video pipeline
//!
//! This crate adds what a binary needs on top: [`logging`] setup and a
//! [`replay`] source that drives the pipeline from recorded poses.
//!
//! ## Example
//!
//! ```rust,no_run
//! use formcheck::{replay::RecordedTrack, AnalysisConfig};
//!
//! # async fn run() -> formcheck::AppResult<()> {
//! let track = RecordedTrack::load("ride.json").await?;
//! let report = track
//!     .into_analyzer(AnalysisConfig::default())
//!     .analyze(None)
//!     .await?;
//! println!("{}", report.summary.headline);
//! # Ok(())
//! # }
//! ```

/// Structured logging setup
pub mod logging;

/// Recorded pose tracks as frame source and detector
pub mod replay;

pub use formcheck_core::{config, constants, errors, models};
pub use formcheck_core::{AnalysisConfig, AppError, AppResult, ErrorCode};
pub use formcheck_intelligence as intelligence;
pub use formcheck_intelligence::{
    analyze_bike_fit, analyze_running_form, calculate_angle, calculate_asymmetry,
    calculate_detailed_metrics, calculate_severity, classify_sport, combine_analyses,
    detect_sport_type, enhance_bike_fit_recommendations, enhance_running_recommendations,
    generate_detailed_summary, generate_issue_markers, DetailedSummary, VideoAnalysisReport,
    VideoAnalyzer,
};
