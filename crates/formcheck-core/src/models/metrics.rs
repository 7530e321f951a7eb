// ABOUTME: Derived per-video statistics: angle distributions, left/right asymmetry, issue markers
// ABOUTME: Computed once per completed analysis run and never mutated afterwards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::angles::SideAngle;
use super::recommendation::{FormArea, Severity};

/// Distribution of one angle across all analyzed frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleStatistics {
    /// Smallest observed value
    pub min: i32,
    /// Largest observed value
    pub max: i32,
    /// Rounded mean
    pub avg: i32,
    /// Population standard deviation, one decimal
    pub std_dev: f64,
    /// `max - min`
    pub range: i32,
    /// Steadiness score (0-100) derived from the coefficient of variation
    pub consistency: i32,
    /// Observed values in frame order
    pub values: Vec<i32>,
}

/// Per-angle statistics keyed by the sport's angle names
pub type DetailedMetrics<K> = BTreeMap<K, AngleStatistics>;

/// Left/right balance classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
    /// Under 5% difference
    Balanced,
    /// Under 10% difference
    Minor,
    /// 10% or more
    Significant,
}

/// Left/right comparison of one side angle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsymmetryEntry {
    /// Mean left value, one decimal
    pub left: f64,
    /// Mean right value, one decimal
    pub right: f64,
    /// Absolute difference of the means, one decimal
    pub difference: f64,
    /// Difference relative to the mean of both sides, percent, one decimal
    pub percent_diff: f64,
    /// Balance classification
    pub status: BalanceStatus,
}

/// Asymmetry per side angle
pub type Asymmetry = BTreeMap<SideAngle, AsymmetryEntry>;

/// Display-only projection of an issue onto the video timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueMarker {
    /// Video time in seconds
    pub time_secs: f64,
    /// Area of the issue
    pub area: FormArea,
    /// Message of the issue
    pub message: String,
    /// Severity of the issue
    pub severity: Severity,
}
