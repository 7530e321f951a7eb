// ABOUTME: Fixed library of corrective drills keyed by the kind of deviation
// ABOUTME: The enhancer picks a key from the side of the optimal range an angle falls on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Corrective exercise family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKey {
    /// Knee over-extended on the bike
    SaddleTooHigh,
    /// Knee over-flexed on the bike
    SaddleTooLow,
    /// Closed hip angle on the bike
    HipMobility,
    /// Open hip angle on the bike
    HipEngagement,
    /// Upright back on the bike
    AeroPosition,
    /// Aggressive back on the bike
    BackRelief,
    /// Locked elbows
    ElbowBend,
    /// Cramped arms on the bike
    ReachExtension,
    /// Not enough forward lean
    ForwardLean,
    /// Too much forward lean
    PostureControl,
    /// Insufficient knee drive
    KneeDrive,
    /// Over-flexed stride
    RelaxedStride,
    /// Limited push-off
    HipExtension,
    /// Arms held too straight
    ArmCarriage,
    /// Arms held too tight
    ArmRelaxation,
}

/// Drills for an exercise family
#[must_use]
pub const fn drills(key: ExerciseKey) -> &'static [&'static str] {
    match key {
        ExerciseKey::SaddleTooHigh => &[
            "Lower the saddle in 2-3 mm steps and re-check",
            "Heel-drop pedaling drill: 5 x 1 min at easy cadence",
            "Hamstring flexibility routine after rides",
        ],
        ExerciseKey::SaddleTooLow => &[
            "Raise the saddle in 2-3 mm steps and re-check",
            "Single-leg pedaling drill: 4 x 30 s per leg",
            "Quadriceps and hip flexor stretches",
        ],
        ExerciseKey::HipMobility => &[
            "Hip flexor lunge stretch: 3 x 30 s per side",
            "Raise the handlebars or fit a shorter stem",
            "Core stability planks: 3 x 45 s",
        ],
        ExerciseKey::HipEngagement => &[
            "Lower the handlebars gradually for a more efficient position",
            "Glute bridges: 3 x 15",
        ],
        ExerciseKey::AeroPosition => &[
            "Ride short intervals in the drops",
            "Thoracic extension over a foam roller: 2 x 10",
            "Side planks: 3 x 30 s per side",
        ],
        ExerciseKey::BackRelief => &[
            "Raise the handlebars or shorten reach",
            "Child's pose: 3 x 30 s",
            "Dead bugs: 3 x 12",
        ],
        ExerciseKey::ElbowBend => &[
            "Ride with soft elbows and check every few minutes",
            "Bent-arm plank holds: 3 x 20 s",
        ],
        ExerciseKey::ReachExtension => &[
            "Fit a longer stem or move the saddle back",
            "Band pull-aparts: 3 x 15",
        ],
        ExerciseKey::ForwardLean => &[
            "Falling starts, leaning from the ankles: 6 x 20 m",
            "Wall lean drill: 3 x 30 s",
            "Hill strides: 6 x 15 s",
        ],
        ExerciseKey::PostureControl => &[
            "Run tall with the head stacked over the hips",
            "Core stability planks: 3 x 45 s",
            "Monster walks for glute activation: 2 x 15 m",
        ],
        ExerciseKey::KneeDrive => &[
            "High knees: 3 x 20 m",
            "A-skips: 3 x 20 m",
            "Standing knee raises: 3 x 12 per leg",
        ],
        ExerciseKey::RelaxedStride => &[
            "Relaxed strides at easy pace: 6 x 80 m",
            "Butt kicks: 3 x 20 m",
        ],
        ExerciseKey::HipExtension => &[
            "Kneeling hip flexor stretch: 3 x 30 s per side",
            "Glute bridges: 3 x 15",
            "B-skips: 3 x 20 m",
        ],
        ExerciseKey::ArmCarriage => &[
            "Seated arm swings at 90 degrees: 3 x 30 s",
            "Arm swing in front of a mirror",
        ],
        ExerciseKey::ArmRelaxation => &[
            "Shake out the arms every few minutes",
            "Shoulder shrug and drop: 2 x 10",
        ],
    }
}
