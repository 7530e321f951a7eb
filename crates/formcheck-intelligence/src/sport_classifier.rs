// ABOUTME: Heuristic cycling-vs-running classifier over keypoint geometry
// ABOUTME: Extracts posture features, scores them against the point table, and votes across frames
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Sport classification.
//!
//! Scoring is additive and rule based. All point values and pixel thresholds
//! live in [`SportClassifierConfig`] so the table can be tested on its own.

use formcheck_core::config::{AnalysisConfig, DecisionThresholds, SportClassifierConfig};
use formcheck_core::models::{KeypointName, Point, Pose, Sport, SportDetection};
use serde::{Deserialize, Serialize};

/// Posture features of one pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierFeatures {
    /// Vertical distance between the hip and knee midpoints
    pub hip_knee_vertical: f64,
    /// `|left_knee.y - right_knee.y|`
    pub knee_variation: f64,
    /// `|left_ankle.y - right_ankle.y|`, when both ankles are confident
    pub ankle_variation: Option<f64>,
    /// Horizontal over vertical shoulder-hip offset, when both shoulders are confident
    pub lean_ratio: Option<f64>,
    /// Torso horizontal offset exceeds the configured share of its vertical offset
    pub very_horizontal: bool,
}

impl ClassifierFeatures {
    /// Whether both shoulders were confident enough to measure the torso
    #[must_use]
    pub const fn shoulders_visible(&self) -> bool {
        self.lean_ratio.is_some()
    }

    /// Larger of the knee and ankle variations
    #[must_use]
    pub fn leg_variation(&self) -> f64 {
        self.ankle_variation
            .map_or(self.knee_variation, |ankle| ankle.max(self.knee_variation))
    }
}

/// Accumulated points per sport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportScores {
    /// Cycling points
    pub cycling: i32,
    /// Running points
    pub running: i32,
}

/// Extract posture features; `None` when hips or knees are not confident
#[must_use]
pub fn extract_features(
    pose: &Pose,
    threshold: f64,
    horizontal_factor: f64,
) -> Option<ClassifierFeatures> {
    let point = |name: KeypointName| pose.confident(name, threshold).map(|k| k.point());

    let left_hip = point(KeypointName::LeftHip)?;
    let right_hip = point(KeypointName::RightHip)?;
    let left_knee = point(KeypointName::LeftKnee)?;
    let right_knee = point(KeypointName::RightKnee)?;

    let hip = left_hip.midpoint(right_hip);
    let knee = left_knee.midpoint(right_knee);

    let ankle_variation = point(KeypointName::LeftAnkle)
        .zip(point(KeypointName::RightAnkle))
        .map(|(left, right)| (left.y - right.y).abs());

    let torso = point(KeypointName::LeftShoulder)
        .zip(point(KeypointName::RightShoulder))
        .map(|(left, right): (Point, Point)| {
            let shoulder = left.midpoint(right);
            let horizontal = (shoulder.x - hip.x).abs();
            let vertical = (shoulder.y - hip.y).abs();
            let ratio = if vertical > 0.0 {
                horizontal / vertical
            } else {
                f64::MAX
            };
            (ratio, horizontal > horizontal_factor * vertical)
        });

    Some(ClassifierFeatures {
        hip_knee_vertical: (knee.y - hip.y).abs(),
        knee_variation: (left_knee.y - right_knee.y).abs(),
        ankle_variation,
        lean_ratio: torso.map(|(ratio, _)| ratio),
        very_horizontal: torso.is_some_and(|(_, horizontal)| horizontal),
    })
}

/// Score features against the point table
#[must_use]
pub fn score_features(features: &ClassifierFeatures, table: &SportClassifierConfig) -> SportScores {
    let cycling_table = &table.cycling;
    let running_table = &table.running;
    let mut scores = SportScores::default();

    let seated = features.hip_knee_vertical >= cycling_table.seated_hip_knee_min
        && features.hip_knee_vertical < cycling_table.seated_hip_knee_max;
    if seated && features.very_horizontal {
        scores.cycling += cycling_table.seated_points;
    }
    if features
        .ankle_variation
        .is_some_and(|v| v < cycling_table.low_ankle_variation.threshold)
    {
        scores.cycling += cycling_table.low_ankle_variation.points;
    }
    if features.knee_variation < cycling_table.low_knee_variation.threshold {
        scores.cycling += cycling_table.low_knee_variation.points;
    }
    if features
        .lean_ratio
        .is_some_and(|r| r > cycling_table.strong_lean.threshold)
    {
        scores.cycling += cycling_table.strong_lean.points;
    }
    if features.leg_variation() > cycling_table.large_leg_variation_penalty.threshold {
        scores.cycling -= cycling_table.large_leg_variation_penalty.points;
    }

    if features.hip_knee_vertical >= running_table.large_hip_knee.threshold {
        scores.running += running_table.large_hip_knee.points;
    }
    if features.knee_variation > running_table.knee_alternation.threshold {
        scores.running += running_table.knee_alternation.points;
    }
    if features
        .ankle_variation
        .is_some_and(|v| v > running_table.ankle_alternation.threshold)
    {
        scores.running += running_table.ankle_alternation.points;
    }
    if features.shoulders_visible() && !features.very_horizontal {
        scores.running += running_table.upright_posture_points;
    }
    if features
        .lean_ratio
        .is_some_and(|r| r < running_table.low_lean.threshold)
    {
        scores.running += running_table.low_lean.points;
    }

    scores
}

/// Turn scores into a decision
///
/// Running wins at its threshold. Cycling wins with a strict lead when it
/// reaches either its own threshold or the minimum lead score. Otherwise the
/// frame defaults to running unless cycling is ahead.
#[must_use]
pub const fn decide(scores: SportScores, thresholds: &DecisionThresholds) -> Option<Sport> {
    let SportScores { cycling, running } = scores;
    let cycling_leads = cycling > running;

    if running >= thresholds.running_wins_at {
        Some(Sport::Running)
    } else if cycling_leads
        && (cycling >= thresholds.cycling_wins_at || cycling >= thresholds.minimum_lead_score)
    {
        Some(Sport::Cycling)
    } else if !cycling_leads {
        // Covers both a strict running lead and the uncertain tie
        Some(Sport::Running)
    } else {
        None
    }
}

/// Classify one pose as cycling or running
///
/// `None` means the frame should be skipped.
#[must_use]
pub fn classify_sport(pose: &Pose, config: &AnalysisConfig) -> Option<Sport> {
    let features = extract_features(
        pose,
        config.confidence.classification,
        config.classifier.horizontal_factor,
    )?;
    let scores = score_features(&features, &config.classifier);
    decide(scores, &config.classifier.decision)
}

/// Majority vote over per-frame classifications
///
/// Skipped frames do not vote. Ties go to running.
#[must_use]
pub fn majority_vote(votes: &[Option<Sport>]) -> SportDetection {
    let (cycling, running) = votes
        .iter()
        .flatten()
        .fold((0_usize, 0_usize), |(c, r), sport| match sport {
            Sport::Cycling => (c + 1, r),
            Sport::Running => (c, r + 1),
        });

    if cycling == 0 && running == 0 {
        SportDetection::Unknown
    } else if running >= cycling {
        SportDetection::Running
    } else {
        SportDetection::Cycling
    }
}
