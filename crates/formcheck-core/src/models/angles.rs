// ABOUTME: Closed per-sport joint angle records with optional values
// ABOUTME: AngleKey/AngleSet traits let aggregation iterate any sport's angles generically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Joint angle records.
//!
//! Each sport has a fixed set of named angles. A value of `None` means the
//! keypoints needed for that angle were not confident enough in the frame; it
//! never means zero degrees.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use super::recommendation::FormArea;

/// Name of one angle within a closed per-sport angle set
pub trait AngleKey:
    Copy + Eq + Ord + Hash + Debug + Serialize + Send + Sync + 'static
{
    /// Every key of the set, in reporting order
    const ALL: &'static [Self];

    /// Stable snake-case key
    fn as_str(self) -> &'static str;

    /// Human-readable label for narrative output
    fn label(self) -> &'static str;
}

/// Sparse record of integer degree values keyed by an [`AngleKey`]
pub trait AngleSet: Clone + Default + PartialEq + Debug + Send + Sync {
    /// Key type of this record
    type Key: AngleKey;

    /// Value for `key`, if measured
    fn get(&self, key: Self::Key) -> Option<i32>;

    /// Replace the value for `key`
    fn set(&mut self, key: Self::Key, value: Option<i32>);

    /// Measured values in key order
    fn present(&self) -> Vec<(Self::Key, i32)> {
        Self::Key::ALL
            .iter()
            .filter_map(|&key| self.get(key).map(|value| (key, value)))
            .collect()
    }

    /// Whether no angle was measured
    fn is_empty(&self) -> bool {
        Self::Key::ALL.iter().all(|&key| self.get(key).is_none())
    }
}

/// Cycling angle names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BikeAngle {
    /// Hip-knee-ankle angle
    Knee,
    /// Shoulder-hip-knee angle
    Hip,
    /// Shoulder-elbow-wrist angle
    Elbow,
    /// Torso angle from vertical
    Back,
}

impl BikeAngle {
    /// Recommendation area for this angle
    #[must_use]
    pub const fn area(self) -> FormArea {
        match self {
            Self::Knee => FormArea::Knee,
            Self::Hip => FormArea::Hip,
            Self::Elbow => FormArea::Elbow,
            Self::Back => FormArea::Back,
        }
    }
}

impl AngleKey for BikeAngle {
    const ALL: &'static [Self] = &[Self::Knee, Self::Hip, Self::Elbow, Self::Back];

    fn as_str(self) -> &'static str {
        match self {
            Self::Knee => "knee",
            Self::Hip => "hip",
            Self::Elbow => "elbow",
            Self::Back => "back",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Knee => "Knee extension",
            Self::Hip => "Hip angle",
            Self::Elbow => "Elbow bend",
            Self::Back => "Back angle",
        }
    }
}

/// Running angle names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningAngle {
    /// Forward lean of the torso
    BodyLean,
    /// Averaged hip-knee-ankle angle
    KneeLift,
    /// Averaged shoulder-hip-knee angle
    HipExtension,
    /// Averaged shoulder-elbow-wrist angle
    ArmSwing,
}

impl RunningAngle {
    /// Recommendation area for this angle
    #[must_use]
    pub const fn area(self) -> FormArea {
        match self {
            Self::BodyLean => FormArea::BodyLean,
            Self::KneeLift => FormArea::KneeLift,
            Self::HipExtension => FormArea::HipExtension,
            Self::ArmSwing => FormArea::ArmSwing,
        }
    }
}

impl AngleKey for RunningAngle {
    const ALL: &'static [Self] = &[
        Self::BodyLean,
        Self::KneeLift,
        Self::HipExtension,
        Self::ArmSwing,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::BodyLean => "body_lean",
            Self::KneeLift => "knee_lift",
            Self::HipExtension => "hip_extension",
            Self::ArmSwing => "arm_swing",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::BodyLean => "Body lean",
            Self::KneeLift => "Knee lift",
            Self::HipExtension => "Hip extension",
            Self::ArmSwing => "Arm swing",
        }
    }
}

/// Per-side running angle names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideAngle {
    /// Hip-knee-ankle angle of one leg
    KneeAngle,
    /// Shoulder-hip-knee angle of one side
    HipAngle,
    /// Shoulder-elbow-wrist angle of one arm
    ElbowAngle,
}

impl AngleKey for SideAngle {
    const ALL: &'static [Self] = &[Self::KneeAngle, Self::HipAngle, Self::ElbowAngle];

    fn as_str(self) -> &'static str {
        match self {
            Self::KneeAngle => "knee_angle",
            Self::HipAngle => "hip_angle",
            Self::ElbowAngle => "elbow_angle",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::KneeAngle => "Knee angle",
            Self::HipAngle => "Hip angle",
            Self::ElbowAngle => "Elbow angle",
        }
    }
}

/// Cycling angles for one frame (or the per-video average)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BikeFitAngles {
    /// Knee angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knee: Option<i32>,
    /// Hip angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip: Option<i32>,
    /// Elbow angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elbow: Option<i32>,
    /// Back angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<i32>,
}

impl AngleSet for BikeFitAngles {
    type Key = BikeAngle;

    fn get(&self, key: BikeAngle) -> Option<i32> {
        match key {
            BikeAngle::Knee => self.knee,
            BikeAngle::Hip => self.hip,
            BikeAngle::Elbow => self.elbow,
            BikeAngle::Back => self.back,
        }
    }

    fn set(&mut self, key: BikeAngle, value: Option<i32>) {
        match key {
            BikeAngle::Knee => self.knee = value,
            BikeAngle::Hip => self.hip = value,
            BikeAngle::Elbow => self.elbow = value,
            BikeAngle::Back => self.back = value,
        }
    }
}

/// Running angles for one frame (or the per-video average)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningAngles {
    /// Body lean in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_lean: Option<i32>,
    /// Knee lift angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knee_lift: Option<i32>,
    /// Hip extension angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip_extension: Option<i32>,
    /// Arm swing (elbow) angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arm_swing: Option<i32>,
}

impl AngleSet for RunningAngles {
    type Key = RunningAngle;

    fn get(&self, key: RunningAngle) -> Option<i32> {
        match key {
            RunningAngle::BodyLean => self.body_lean,
            RunningAngle::KneeLift => self.knee_lift,
            RunningAngle::HipExtension => self.hip_extension,
            RunningAngle::ArmSwing => self.arm_swing,
        }
    }

    fn set(&mut self, key: RunningAngle, value: Option<i32>) {
        match key {
            RunningAngle::BodyLean => self.body_lean = value,
            RunningAngle::KneeLift => self.knee_lift = value,
            RunningAngle::HipExtension => self.hip_extension = value,
            RunningAngle::ArmSwing => self.arm_swing = value,
        }
    }
}

/// Angles measured on one body side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideAngles {
    /// Knee angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knee_angle: Option<i32>,
    /// Hip angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip_angle: Option<i32>,
    /// Elbow angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elbow_angle: Option<i32>,
}

impl AngleSet for SideAngles {
    type Key = SideAngle;

    fn get(&self, key: SideAngle) -> Option<i32> {
        match key {
            SideAngle::KneeAngle => self.knee_angle,
            SideAngle::HipAngle => self.hip_angle,
            SideAngle::ElbowAngle => self.elbow_angle,
        }
    }

    fn set(&mut self, key: SideAngle, value: Option<i32>) {
        match key {
            SideAngle::KneeAngle => self.knee_angle = value,
            SideAngle::HipAngle => self.hip_angle = value,
            SideAngle::ElbowAngle => self.elbow_angle = value,
        }
    }
}

/// Left and right angles of one frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideComparison {
    /// Subject's left side
    pub left: SideAngles,
    /// Subject's right side
    pub right: SideAngles,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_skips_missing_angles() {
        let angles = BikeFitAngles {
            knee: Some(150),
            back: Some(40),
            ..BikeFitAngles::default()
        };
        assert_eq!(
            angles.present(),
            vec![(BikeAngle::Knee, 150), (BikeAngle::Back, 40)]
        );
        assert!(!angles.is_empty());
        assert!(RunningAngles::default().is_empty());
    }

    #[test]
    fn test_missing_angles_are_omitted_from_json() {
        let angles = RunningAngles {
            knee_lift: Some(120),
            ..RunningAngles::default()
        };
        let json = serde_json::to_value(&angles).unwrap();
        assert_eq!(json, serde_json::json!({ "knee_lift": 120 }));
    }
}
