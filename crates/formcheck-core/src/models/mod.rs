// ABOUTME: Core data models for pose analysis
// ABOUTME: Re-exports pose, angle, recommendation, analysis, sport, and metrics types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Per-frame and combined analysis results
pub mod analysis;
/// Closed per-sport angle records
pub mod angles;
/// Derived per-video statistics
pub mod metrics;
/// Keypoints and poses
pub mod pose;
/// Rule hits and graded recommendations
pub mod recommendation;
/// Supported sports
pub mod sport;

pub use analysis::{
    count_outcomes, BikeFitAnalysis, FormAnalysis, OverallRating, RunningFormAnalysis,
    SportAnalysis,
};
pub use angles::{
    AngleKey, AngleSet, BikeAngle, BikeFitAngles, RunningAngle, RunningAngles, SideAngle,
    SideAngles, SideComparison,
};
pub use metrics::{
    AngleStatistics, Asymmetry, AsymmetryEntry, BalanceStatus, DetailedMetrics, IssueMarker,
};
pub use pose::{BodySide, Keypoint, KeypointName, Point, Pose, SideLandmarks};
pub use recommendation::{
    EnhancedRecommendation, FormArea, Recommendation, RecommendationType, Severity,
};
pub use sport::{Sport, SportDetection};
