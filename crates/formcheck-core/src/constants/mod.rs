// ABOUTME: Contract constants shared by every analyzer and the sampling pipeline
// ABOUTME: Confidence gates, synthetic reference offsets, and sampling defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application constants organized by domain.
//!
//! These values are part of the public contract of the analyzers. The
//! defaults in [`crate::config::AnalysisConfig`] are built from them, so a
//! default configuration reproduces the documented behavior exactly.

/// Keypoint confidence gates
pub mod confidence {
    /// Minimum keypoint score (exclusive) for sport classification
    pub const CLASSIFICATION_KEYPOINT_THRESHOLD: f64 = 0.2;

    /// Minimum keypoint score (exclusive) for joint angle analysis
    pub const ANALYSIS_KEYPOINT_THRESHOLD: f64 = 0.3;

    /// Minimum whole-pose score (exclusive) for a frame to count
    pub const MIN_POSE_SCORE: f64 = 0.3;
}

/// Geometry helpers
pub mod geometry {
    /// Distance along the image vertical at which the torso reference point is synthesized
    ///
    /// The point sits on the hip side of the joint (larger y), so an upright
    /// torso measures 0 degrees against it.
    pub const VERTICAL_REFERENCE_OFFSET: f64 = 100.0;

    /// Upper bound of any normalized joint angle (degrees)
    pub const MAX_JOINT_ANGLE_DEGREES: f64 = 180.0;
}

/// Frame sampling defaults
pub mod sampling {
    /// Frames sampled for sport detection
    pub const SPORT_DETECTION_FRAMES: usize = 5;

    /// Frames sampled for form analysis
    pub const ANALYSIS_FRAMES: usize = 10;

    /// Per-frame pose detection timeout in milliseconds
    pub const FRAME_TIMEOUT_MS: u64 = 5_000;
}

/// Service identity used by logging
pub mod service_names {
    /// Name reported in structured logs
    pub const FORMCHECK: &str = "formcheck";
}
