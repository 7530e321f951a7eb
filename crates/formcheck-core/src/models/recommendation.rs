// ABOUTME: Recommendation types produced by the angle rules and the severity enhancer
// ABOUTME: FormArea names the body area; EnhancedRecommendation adds severity, impact, and drills
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body area a recommendation talks about
///
/// `Other` carries areas produced outside the built-in analyzers so they can
/// flow through enhancement without being recognized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormArea {
    /// Cycling knee extension
    Knee,
    /// Cycling hip angle
    Hip,
    /// Cycling back angle
    Back,
    /// Cycling elbow bend
    Elbow,
    /// Running body lean
    BodyLean,
    /// Running knee lift
    KneeLift,
    /// Running hip extension
    HipExtension,
    /// Running arm swing
    ArmSwing,
    /// Running foot strike position
    FootStrike,
    /// Area not covered by the built-in rules
    Other(String),
}

impl FormArea {
    /// Stable snake-case name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Knee => "knee",
            Self::Hip => "hip",
            Self::Back => "back",
            Self::Elbow => "elbow",
            Self::BodyLean => "body_lean",
            Self::KneeLift => "knee_lift",
            Self::HipExtension => "hip_extension",
            Self::ArmSwing => "arm_swing",
            Self::FootStrike => "foot_strike",
            Self::Other(name) => name,
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Knee => "Knee extension",
            Self::Hip => "Hip angle",
            Self::Back => "Back angle",
            Self::Elbow => "Elbow bend",
            Self::BodyLean => "Body lean",
            Self::KneeLift => "Knee lift",
            Self::HipExtension => "Hip extension",
            Self::ArmSwing => "Arm swing",
            Self::FootStrike => "Foot strike",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for FormArea {
    fn from(value: String) -> Self {
        match value.as_str() {
            "knee" => Self::Knee,
            "hip" => Self::Hip,
            "back" => Self::Back,
            "elbow" => Self::Elbow,
            "body_lean" => Self::BodyLean,
            "knee_lift" => Self::KneeLift,
            "hip_extension" => Self::HipExtension,
            "arm_swing" => Self::ArmSwing,
            "foot_strike" => Self::FootStrike,
            _ => Self::Other(value),
        }
    }
}

impl From<FormArea> for String {
    fn from(area: FormArea) -> Self {
        match area {
            FormArea::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for FormArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome class of an angle rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    /// Angle is in the praised range
    Success,
    /// Angle needs adjustment
    Warning,
    /// Informational note
    Info,
    /// Analysis problem
    Error,
}

/// Raw rule hit produced by an analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Area the rule is about
    pub area: FormArea,
    /// Message shown to the athlete
    pub message: String,
    /// Rule outcome
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    /// Measured value that triggered the rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl Recommendation {
    /// Create a recommendation carrying the measured angle
    pub fn new(
        area: FormArea,
        kind: RecommendationType,
        message: impl Into<String>,
        angle: Option<f64>,
    ) -> Self {
        Self {
            area,
            message: message.into(),
            kind,
            angle,
        }
    }

    /// Success recommendation
    pub fn success(area: FormArea, message: impl Into<String>, angle: f64) -> Self {
        Self::new(area, RecommendationType::Success, message, Some(angle))
    }

    /// Warning recommendation
    pub fn warning(area: FormArea, message: impl Into<String>, angle: f64) -> Self {
        Self::new(area, RecommendationType::Warning, message, Some(angle))
    }

    /// Informational recommendation
    pub fn info(area: FormArea, message: impl Into<String>, angle: f64) -> Self {
        Self::new(area, RecommendationType::Info, message, Some(angle))
    }
}

/// How far an angle deviates from its optimal range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Small or no deviation
    Minor,
    /// Noticeable deviation
    Moderate,
    /// Large deviation, fix first
    Critical,
}

impl Severity {
    /// Sort weight used to order recommendations
    #[must_use]
    pub const fn priority_score(self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::Moderate => 2,
            Self::Minor => 1,
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Moderate => "moderate",
            Self::Minor => "minor",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommendation after severity grading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedRecommendation {
    /// The raw rule hit
    #[serde(flatten)]
    pub recommendation: Recommendation,
    /// Severity grade
    pub severity: Severity,
    /// What the deviation costs the athlete
    pub impact: String,
    /// Corrective drills, possibly empty
    pub drills: Vec<String>,
    /// Sort weight (critical 3, moderate 2, minor 1)
    pub priority_score: u8,
}

impl EnhancedRecommendation {
    /// Area of the underlying recommendation
    #[must_use]
    pub const fn area(&self) -> &FormArea {
        &self.recommendation.area
    }

    /// Message of the underlying recommendation
    #[must_use]
    pub fn message(&self) -> &str {
        &self.recommendation.message
    }

    /// First suggested drill, if any
    #[must_use]
    pub fn first_drill(&self) -> Option<&str> {
        self.drills.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_area_string_mapping() {
        assert_eq!(FormArea::from("knee_lift".to_owned()), FormArea::KneeLift);
        assert_eq!(
            FormArea::from("cadence".to_owned()),
            FormArea::Other("cadence".to_owned())
        );
        assert_eq!(String::from(FormArea::BodyLean), "body_lean");
    }

    #[test]
    fn test_enhanced_recommendation_flattens_base_fields() {
        let enhanced = EnhancedRecommendation {
            recommendation: Recommendation::warning(FormArea::Knee, "Knee too bent", 100.0),
            severity: Severity::Critical,
            impact: "Power loss".to_owned(),
            drills: vec![],
            priority_score: Severity::Critical.priority_score(),
        };
        let json = serde_json::to_value(&enhanced).unwrap();
        assert_eq!(json["area"], "knee");
        assert_eq!(json["type"], "warning");
        assert_eq!(json["severity"], "critical");
        assert_eq!(json["priority_score"], 3);
    }
}
