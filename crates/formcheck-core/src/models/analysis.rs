// ABOUTME: Per-frame and combined analysis results for bike fit and running form
// ABOUTME: FormAnalysis trait exposes angles, sides, and recommendations to the aggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::angles::{AngleSet, BikeFitAngles, RunningAngles, SideComparison};
use super::pose::BodySide;
use super::recommendation::{Recommendation, RecommendationType};
use super::sport::Sport;

/// Overall form rating of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverallRating {
    /// No warnings and enough praised angles
    Excellent,
    /// At most one warning
    Good,
    /// Bike fit with several warnings
    NeedsAdjustment,
    /// Running form with several warnings
    NeedsImprovement,
}

impl OverallRating {
    /// Kebab-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::NeedsAdjustment => "needs-adjustment",
            Self::NeedsImprovement => "needs-improvement",
        }
    }
}

/// Count warnings and successes in a recommendation list
#[must_use]
pub fn count_outcomes(recommendations: &[Recommendation]) -> (usize, usize) {
    recommendations
        .iter()
        .fold((0, 0), |(warnings, successes), rec| match rec.kind {
            RecommendationType::Warning => (warnings + 1, successes),
            RecommendationType::Success => (warnings, successes + 1),
            RecommendationType::Info | RecommendationType::Error => (warnings, successes),
        })
}

/// Common view over sport-specific analyses
pub trait FormAnalysis: Clone + Debug + Send + Sync {
    /// Angle record type of the sport
    type Angles: AngleSet;

    /// Sport this analysis belongs to
    const SPORT: Sport;

    /// Measured angles
    fn angles(&self) -> &Self::Angles;

    /// Replace the measured angles
    fn set_angles(&mut self, angles: Self::Angles);

    /// Raw rule hits
    fn recommendations(&self) -> &[Recommendation];

    /// Overall rating
    fn overall(&self) -> OverallRating;

    /// Left/right angles, for sports that track both sides
    fn sides(&self) -> Option<&SideComparison> {
        None
    }

    /// Whole-pose confidence of the analyzed frame
    fn confidence(&self) -> Option<f64>;
}

/// Bike-fit result for one frame, or the combined per-video result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeFitAnalysis {
    /// Measured cycling angles
    pub angles: BikeFitAngles,
    /// Rule hits in evaluation order
    pub recommendations: Vec<Recommendation>,
    /// Overall rating
    pub overall: OverallRating,
    /// Side the angles were measured on
    pub side: BodySide,
    /// Whole-pose confidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl FormAnalysis for BikeFitAnalysis {
    type Angles = BikeFitAngles;

    const SPORT: Sport = Sport::Cycling;

    fn angles(&self) -> &BikeFitAngles {
        &self.angles
    }

    fn set_angles(&mut self, angles: BikeFitAngles) {
        self.angles = angles;
    }

    fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    fn overall(&self) -> OverallRating {
        self.overall
    }

    fn confidence(&self) -> Option<f64> {
        self.confidence
    }
}

/// Running-form result for one frame, or the combined per-video result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningFormAnalysis {
    /// Measured running angles
    pub angles: RunningAngles,
    /// Rule hits in evaluation order
    pub recommendations: Vec<Recommendation>,
    /// Overall rating
    pub overall: OverallRating,
    /// Per-side angles
    pub sides: SideComparison,
    /// Horizontal ankle-minus-knee offset of the left leg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foot_strike_offset: Option<f64>,
    /// Whole-pose confidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl FormAnalysis for RunningFormAnalysis {
    type Angles = RunningAngles;

    const SPORT: Sport = Sport::Running;

    fn angles(&self) -> &RunningAngles {
        &self.angles
    }

    fn set_angles(&mut self, angles: RunningAngles) {
        self.angles = angles;
    }

    fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    fn overall(&self) -> OverallRating {
        self.overall
    }

    fn sides(&self) -> Option<&SideComparison> {
        Some(&self.sides)
    }

    fn confidence(&self) -> Option<f64> {
        self.confidence
    }
}

/// Analysis of either sport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum SportAnalysis {
    /// Bike-fit analysis
    Cycling(BikeFitAnalysis),
    /// Running-form analysis
    Running(RunningFormAnalysis),
}

impl SportAnalysis {
    /// Sport of the wrapped analysis
    #[must_use]
    pub const fn sport(&self) -> Sport {
        match self {
            Self::Cycling(_) => Sport::Cycling,
            Self::Running(_) => Sport::Running,
        }
    }

    /// Overall rating of the wrapped analysis
    #[must_use]
    pub const fn overall(&self) -> OverallRating {
        match self {
            Self::Cycling(analysis) => analysis.overall,
            Self::Running(analysis) => analysis.overall,
        }
    }

    /// Raw recommendations of the wrapped analysis
    #[must_use]
    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            Self::Cycling(analysis) => &analysis.recommendations,
            Self::Running(analysis) => &analysis.recommendations,
        }
    }
}
