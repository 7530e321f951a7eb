// ABOUTME: Keypoint vocabulary and pose types produced by the external pose-estimation model
// ABOUTME: Decoding skips landmark names outside the 17-point body schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::errors::AppError;

/// The 17 body landmarks recognized by the analyzers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypointName {
    /// Nose
    Nose,
    /// Left eye
    LeftEye,
    /// Right eye
    RightEye,
    /// Left ear
    LeftEar,
    /// Right ear
    RightEar,
    /// Left shoulder
    LeftShoulder,
    /// Right shoulder
    RightShoulder,
    /// Left elbow
    LeftElbow,
    /// Right elbow
    RightElbow,
    /// Left wrist
    LeftWrist,
    /// Right wrist
    RightWrist,
    /// Left hip
    LeftHip,
    /// Right hip
    RightHip,
    /// Left knee
    LeftKnee,
    /// Right knee
    RightKnee,
    /// Left ankle
    LeftAnkle,
    /// Right ankle
    RightAnkle,
}

impl KeypointName {
    /// Every recognized landmark, in schema order
    pub const ALL: [Self; 17] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Schema name of the landmark
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for KeypointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeypointName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown keypoint name: {s}")))
    }
}

/// Body side, used for side selection and left/right comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySide {
    /// Subject's left side
    Left,
    /// Subject's right side
    Right,
}

/// Landmarks of one body side, grouped for the angle triples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideLandmarks {
    /// Shoulder landmark
    pub shoulder: KeypointName,
    /// Elbow landmark
    pub elbow: KeypointName,
    /// Wrist landmark
    pub wrist: KeypointName,
    /// Hip landmark
    pub hip: KeypointName,
    /// Knee landmark
    pub knee: KeypointName,
    /// Ankle landmark
    pub ankle: KeypointName,
}

impl BodySide {
    /// Landmark names for this side
    #[must_use]
    pub const fn landmarks(self) -> SideLandmarks {
        match self {
            Self::Left => SideLandmarks {
                shoulder: KeypointName::LeftShoulder,
                elbow: KeypointName::LeftElbow,
                wrist: KeypointName::LeftWrist,
                hip: KeypointName::LeftHip,
                knee: KeypointName::LeftKnee,
                ankle: KeypointName::LeftAnkle,
            },
            Self::Right => SideLandmarks {
                shoulder: KeypointName::RightShoulder,
                elbow: KeypointName::RightElbow,
                wrist: KeypointName::RightWrist,
                hip: KeypointName::RightHip,
                knee: KeypointName::RightKnee,
                ankle: KeypointName::RightAnkle,
            },
        }
    }
}

/// Plain 2D point in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (grows downwards)
    pub y: f64,
}

impl Point {
    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A named, confidence-scored 2D body landmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Landmark name
    pub name: KeypointName,
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
    /// Detection confidence (0..1)
    pub score: f64,
}

impl Keypoint {
    /// Create a keypoint
    #[must_use]
    pub const fn new(name: KeypointName, x: f64, y: f64, score: f64) -> Self {
        Self { name, x, y, score }
    }

    /// Position without the score
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One pose estimate for one video frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Detected landmarks, unique by name
    #[serde(deserialize_with = "deserialize_known_keypoints")]
    pub keypoints: Vec<Keypoint>,
    /// Whole-pose confidence reported by the model
    pub score: f64,
}

impl Pose {
    /// Create a pose, keeping the first keypoint for any duplicated name
    #[must_use]
    pub fn new(keypoints: Vec<Keypoint>, score: f64) -> Self {
        let mut unique: Vec<Keypoint> = Vec::with_capacity(keypoints.len());
        for keypoint in keypoints {
            if !unique.iter().any(|k| k.name == keypoint.name) {
                unique.push(keypoint);
            }
        }
        Self {
            keypoints: unique,
            score,
        }
    }

    /// Pose without any keypoints
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            keypoints: Vec::new(),
            score: 0.0,
        }
    }

    /// Look up a keypoint by name
    #[must_use]
    pub fn keypoint(&self, name: KeypointName) -> Option<&Keypoint> {
        self.keypoints.iter().find(|k| k.name == name)
    }

    /// Look up a keypoint whose score is strictly above `threshold`
    #[must_use]
    pub fn confident(&self, name: KeypointName, threshold: f64) -> Option<&Keypoint> {
        self.keypoint(name).filter(|k| k.score > threshold)
    }

    /// Score of a keypoint, zero when it is missing
    #[must_use]
    pub fn score_of(&self, name: KeypointName) -> f64 {
        self.keypoint(name).map_or(0.0, |k| k.score)
    }
}

/// Keypoint as emitted by the model, with a free-form name
#[derive(Deserialize)]
struct RawKeypoint {
    name: String,
    x: f64,
    y: f64,
    #[serde(default)]
    score: f64,
}

fn deserialize_known_keypoints<'de, D>(deserializer: D) -> Result<Vec<Keypoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawKeypoint>::deserialize(deserializer)?;
    let mut keypoints: Vec<Keypoint> = Vec::with_capacity(raw.len());
    for point in raw {
        match point.name.parse::<KeypointName>() {
            Ok(name) if keypoints.iter().all(|k| k.name != name) => {
                keypoints.push(Keypoint::new(name, point.x, point.y, point.score));
            }
            Ok(name) => debug!(keypoint = %name, "Dropping duplicate keypoint"),
            Err(_) => debug!(keypoint = %point.name, "Ignoring unrecognized keypoint"),
        }
    }
    Ok(keypoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypoint_name_round_trip_through_str() {
        for name in KeypointName::ALL {
            assert_eq!(name.as_str().parse::<KeypointName>().unwrap(), name);
        }
        assert!("left_toe".parse::<KeypointName>().is_err());
    }

    #[test]
    fn test_pose_decoding_skips_unknown_names() {
        let json = r#"{
            "keypoints": [
                {"name": "left_knee", "x": 10.0, "y": 20.0, "score": 0.9},
                {"name": "left_big_toe", "x": 11.0, "y": 40.0, "score": 0.9},
                {"name": "left_knee", "x": 99.0, "y": 99.0, "score": 0.1}
            ],
            "score": 0.8
        }"#;
        let pose: Pose = serde_json::from_str(json).unwrap();

        assert_eq!(pose.keypoints.len(), 1);
        let knee = pose.keypoint(KeypointName::LeftKnee).unwrap();
        assert!((knee.x - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_confident_uses_strict_threshold() {
        let pose = Pose::new(
            vec![Keypoint::new(KeypointName::RightHip, 0.0, 0.0, 0.3)],
            0.9,
        );
        assert!(pose.confident(KeypointName::RightHip, 0.3).is_none());
        assert!(pose.confident(KeypointName::RightHip, 0.2).is_some());
        assert!(pose.confident(KeypointName::LeftHip, 0.0).is_none());
    }
}
