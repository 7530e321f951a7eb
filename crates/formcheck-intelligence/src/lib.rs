// ABOUTME: Pose analysis engine for bike fit and running form
// ABOUTME: Geometry, classification, per-frame analyzers, aggregation, grading, and the video pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Formcheck Intelligence
//!
//! Everything between a detected [`Pose`](formcheck_core::models::Pose) and
//! the final [`VideoAnalysisReport`]. All analysis functions are pure and
//! synchronous; only the [`pipeline`] module awaits on frames and the pose
//! detector.
//!
//! Data flows leaves first:
//!
//! 1. [`geometry`] computes joint angles
//! 2. [`sport_classifier`] guesses cycling or running from a few frames
//! 3. [`bike_fit`] and [`running_form`] turn one pose into angles and rule hits
//! 4. [`statistics`] averages frames and derives distributions and asymmetry
//! 5. [`recommendation_enhancer`] grades hits with [`severity`] and [`drills`]
//! 6. [`summary`] and [`timeline`] present the result

/// Bike-fit analyzer
pub mod bike_fit;
/// Corrective drill library
pub mod drills;
/// Angle primitive and vertical reference
pub mod geometry;
/// Pose interpolation for playback
pub mod interpolation;
/// Async video pipeline
pub mod pipeline;
/// Severity grading, impact text, and drill selection
pub mod recommendation_enhancer;
/// Angle rule tables
pub mod rules;
/// Running-form analyzer
pub mod running_form;
/// Severity bands
pub mod severity;
/// Cycling-vs-running heuristic
pub mod sport_classifier;
/// Frame aggregation and statistics
pub mod statistics;
/// Narrative summary
pub mod summary;
/// Issue markers on the video timeline
pub mod timeline;

pub use bike_fit::analyze_bike_fit;
pub use geometry::calculate_angle;
pub use interpolation::{interpolate_pose, pose_at_time, TimedPose};
pub use pipeline::{
    build_report, classify_frames, detect_sport_type, FrameClassification, FrameSource,
    PoseDetector, SportAnalyzer, SportMetrics, VideoAnalysisReport, VideoAnalyzer,
};
pub use recommendation_enhancer::{
    enhance_bike_fit_recommendations, enhance_running_recommendations,
};
pub use running_form::analyze_running_form;
pub use severity::{calculate_severity, SeverityBand};
pub use sport_classifier::{classify_sport, ClassifierFeatures, SportScores};
pub use statistics::{calculate_asymmetry, calculate_detailed_metrics, combine_analyses};
pub use summary::{generate_detailed_summary, DetailedSummary};
pub use timeline::{generate_issue_markers, FrameAnalysis};
