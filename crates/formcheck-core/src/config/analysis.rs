// ABOUTME: Configuration-driven thresholds for pose analysis replacing magic numbers
// ABOUTME: Confidence gates, sampling parameters, and the sport classifier point table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analysis configuration.
//!
//! Defaults reproduce the documented contract values exactly. Environment
//! overrides exist for experimentation and tests; they are validated before
//! use.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::constants::{confidence, sampling};

/// Analysis configuration errors
#[derive(Debug, Error)]
pub enum AnalysisConfigError {
    /// Confidence value outside [0, 1] or unparsable
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Sampling parameter unparsable or zero
    #[error("Invalid sampling parameter: {0}")]
    InvalidSampling(String),

    /// Cross-field validation failure
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Keypoint and pose confidence gates (all exclusive lower bounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    /// Keypoint gate for sport classification
    pub classification: f64,
    /// Keypoint gate for angle analysis
    pub analysis: f64,
    /// Whole-pose gate for a frame to be used
    pub min_pose_score: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            classification: confidence::CLASSIFICATION_KEYPOINT_THRESHOLD,
            analysis: confidence::ANALYSIS_KEYPOINT_THRESHOLD,
            min_pose_score: confidence::MIN_POSE_SCORE,
        }
    }
}

/// Frame sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Frames sampled for sport detection
    pub sport_detection_frames: usize,
    /// Frames sampled for form analysis
    pub analysis_frames: usize,
    /// Per-frame pose detection timeout
    pub frame_timeout_ms: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sport_detection_frames: sampling::SPORT_DETECTION_FRAMES,
            analysis_frames: sampling::ANALYSIS_FRAMES,
            frame_timeout_ms: sampling::FRAME_TIMEOUT_MS,
        }
    }
}

impl SamplingConfig {
    /// Per-frame timeout as a `Duration`
    #[must_use]
    pub const fn frame_timeout(&self) -> Duration {
        Duration::from_millis(self.frame_timeout_ms)
    }
}

/// Points awarded when a feature crosses a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRule {
    /// Feature threshold (pixels or ratio)
    pub threshold: f64,
    /// Points added (or subtracted, for penalties)
    pub points: i32,
}

impl ScoreRule {
    /// Create a rule
    #[must_use]
    pub const fn new(threshold: f64, points: i32) -> Self {
        Self { threshold, points }
    }
}

/// Cycling side of the classifier point table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CyclingScoreTable {
    /// Lower bound (inclusive) of a seated hip-to-knee vertical distance
    pub seated_hip_knee_min: f64,
    /// Upper bound (exclusive) of a seated hip-to-knee vertical distance
    pub seated_hip_knee_max: f64,
    /// Points for a seated distance combined with a very horizontal torso
    pub seated_points: i32,
    /// Ankle y-variation below threshold
    pub low_ankle_variation: ScoreRule,
    /// Knee y-variation below threshold
    pub low_knee_variation: ScoreRule,
    /// Lean ratio above threshold
    pub strong_lean: ScoreRule,
    /// Penalty when the larger leg variation exceeds threshold
    pub large_leg_variation_penalty: ScoreRule,
}

/// Running side of the classifier point table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunningScoreTable {
    /// Hip-to-knee vertical distance at or above threshold
    pub large_hip_knee: ScoreRule,
    /// Knee y-variation above threshold
    pub knee_alternation: ScoreRule,
    /// Ankle y-variation above threshold
    pub ankle_alternation: ScoreRule,
    /// Points when shoulders are visible and the torso is not very horizontal
    pub upright_posture_points: i32,
    /// Lean ratio below threshold
    pub low_lean: ScoreRule,
}

/// Final decision thresholds of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// Running wins outright at this score
    pub running_wins_at: i32,
    /// Cycling wins at this score when strictly ahead of running
    pub cycling_wins_at: i32,
    /// Minimum score for a strictly greater score to win
    pub minimum_lead_score: i32,
}

/// Sport classifier configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SportClassifierConfig {
    /// Torso counts as very horizontal when horizontal offset > factor × vertical offset
    pub horizontal_factor: f64,
    /// Cycling points
    pub cycling: CyclingScoreTable,
    /// Running points
    pub running: RunningScoreTable,
    /// Decision thresholds
    pub decision: DecisionThresholds,
}

impl Default for SportClassifierConfig {
    fn default() -> Self {
        Self {
            horizontal_factor: 0.8,
            cycling: CyclingScoreTable {
                seated_hip_knee_min: 30.0,
                seated_hip_knee_max: 120.0,
                seated_points: 3,
                low_ankle_variation: ScoreRule::new(40.0, 2),
                low_knee_variation: ScoreRule::new(30.0, 2),
                strong_lean: ScoreRule::new(1.0, 3),
                large_leg_variation_penalty: ScoreRule::new(80.0, 3),
            },
            running: RunningScoreTable {
                large_hip_knee: ScoreRule::new(120.0, 3),
                knee_alternation: ScoreRule::new(20.0, 2),
                ankle_alternation: ScoreRule::new(30.0, 2),
                upright_posture_points: 2,
                low_lean: ScoreRule::new(0.5, 2),
            },
            decision: DecisionThresholds {
                running_wins_at: 6,
                cycling_wins_at: 7,
                minimum_lead_score: 4,
            },
        }
    }
}

/// Main analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Confidence gates
    pub confidence: ConfidenceThresholds,
    /// Sampling parameters
    pub sampling: SamplingConfig,
    /// Sport classifier point table
    pub classifier: SportClassifierConfig,
}

impl AnalysisConfig {
    /// Load configuration from environment variables with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    pub fn from_environment() -> Result<Self, AnalysisConfigError> {
        let mut config = Self::default();

        if let Some(value) = threshold_var("FORMCHECK_CLASSIFICATION_CONFIDENCE")? {
            config.confidence.classification = value;
        }
        if let Some(value) = threshold_var("FORMCHECK_ANALYSIS_CONFIDENCE")? {
            config.confidence.analysis = value;
        }
        if let Some(value) = threshold_var("FORMCHECK_MIN_POSE_SCORE")? {
            config.confidence.min_pose_score = value;
        }

        if let Ok(val) = env::var("FORMCHECK_SPORT_DETECTION_FRAMES") {
            config.sampling.sport_detection_frames = val.parse().map_err(|_| {
                AnalysisConfigError::InvalidSampling("FORMCHECK_SPORT_DETECTION_FRAMES".into())
            })?;
        }
        if let Ok(val) = env::var("FORMCHECK_ANALYSIS_FRAMES") {
            config.sampling.analysis_frames = val.parse().map_err(|_| {
                AnalysisConfigError::InvalidSampling("FORMCHECK_ANALYSIS_FRAMES".into())
            })?;
        }
        if let Ok(val) = env::var("FORMCHECK_FRAME_TIMEOUT_MS") {
            config.sampling.frame_timeout_ms = val.parse().map_err(|_| {
                AnalysisConfigError::InvalidSampling("FORMCHECK_FRAME_TIMEOUT_MS".into())
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), AnalysisConfigError> {
        for (name, value) in [
            ("classification", self.confidence.classification),
            ("analysis", self.confidence.analysis),
            ("min_pose_score", self.confidence.min_pose_score),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AnalysisConfigError::ValidationFailed(format!(
                    "{name} confidence must be between 0 and 1, got {value}"
                )));
            }
        }

        if self.sampling.sport_detection_frames == 0 || self.sampling.analysis_frames == 0 {
            return Err(AnalysisConfigError::ValidationFailed(
                "frame counts must be > 0".into(),
            ));
        }

        if self.sampling.frame_timeout_ms == 0 {
            return Err(AnalysisConfigError::ValidationFailed(
                "frame_timeout_ms must be > 0".into(),
            ));
        }

        let cycling = &self.classifier.cycling;
        if cycling.seated_hip_knee_min >= cycling.seated_hip_knee_max {
            return Err(AnalysisConfigError::ValidationFailed(
                "seated_hip_knee_min must be < seated_hip_knee_max".into(),
            ));
        }

        if self.classifier.horizontal_factor <= 0.0 {
            return Err(AnalysisConfigError::ValidationFailed(
                "horizontal_factor must be > 0".into(),
            ));
        }

        Ok(())
    }
}

fn threshold_var(key: &str) -> Result<Option<f64>, AnalysisConfigError> {
    env::var(key).map_or(Ok(None), |val| {
        val.parse()
            .map(Some)
            .map_err(|_| AnalysisConfigError::InvalidThreshold(key.to_owned()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_KEYS: [&str; 6] = [
        "FORMCHECK_CLASSIFICATION_CONFIDENCE",
        "FORMCHECK_ANALYSIS_CONFIDENCE",
        "FORMCHECK_MIN_POSE_SCORE",
        "FORMCHECK_SPORT_DETECTION_FRAMES",
        "FORMCHECK_ANALYSIS_FRAMES",
        "FORMCHECK_FRAME_TIMEOUT_MS",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults_match_contract_constants() {
        let config = AnalysisConfig::default();
        assert!((config.confidence.classification - 0.2).abs() < f64::EPSILON);
        assert!((config.confidence.analysis - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.sampling.sport_detection_frames, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        clear_env();
        env::set_var("FORMCHECK_ANALYSIS_CONFIDENCE", "0.5");
        env::set_var("FORMCHECK_ANALYSIS_FRAMES", "24");

        let config = AnalysisConfig::from_environment().unwrap();
        assert!((config.confidence.analysis - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.sampling.analysis_frames, 24);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_environment_values_are_rejected() {
        clear_env();
        env::set_var("FORMCHECK_MIN_POSE_SCORE", "not-a-number");
        assert!(matches!(
            AnalysisConfig::from_environment(),
            Err(AnalysisConfigError::InvalidThreshold(_))
        ));

        clear_env();
        env::set_var("FORMCHECK_CLASSIFICATION_CONFIDENCE", "1.5");
        assert!(matches!(
            AnalysisConfig::from_environment(),
            Err(AnalysisConfigError::ValidationFailed(_))
        ));
        clear_env();
    }

    #[test]
    fn test_zero_frames_fail_validation() {
        let mut config = AnalysisConfig::default();
        config.sampling.analysis_frames = 0;
        assert!(config.validate().is_err());
    }
}
