// ABOUTME: Linear interpolation between timestamped poses for smooth playback overlays
// ABOUTME: Only keypoints present in both bracketing poses are interpolated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use formcheck_core::models::{Keypoint, Pose};
use serde::{Deserialize, Serialize};

/// Pose observed at a point in the video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedPose {
    /// Video time in seconds
    pub time_secs: f64,
    /// Pose at that time
    pub pose: Pose,
}

impl TimedPose {
    /// Create a timed pose
    #[must_use]
    pub const fn new(time_secs: f64, pose: Pose) -> Self {
        Self { time_secs, pose }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a).mul_add(t, a)
}

/// Interpolate from `a` (t = 0) to `b` (t = 1)
///
/// `t` is clamped to `[0, 1]`. Keypoints missing from either pose are
/// dropped; the result keeps the keypoint order of `a`.
#[must_use]
pub fn interpolate_pose(a: &Pose, b: &Pose, t: f64) -> Pose {
    let t = t.clamp(0.0, 1.0);
    let keypoints = a
        .keypoints
        .iter()
        .filter_map(|from| {
            let to = b.keypoint(from.name)?;
            Some(Keypoint::new(
                from.name,
                lerp(from.x, to.x, t),
                lerp(from.y, to.y, t),
                lerp(from.score, to.score, t),
            ))
        })
        .collect();

    Pose {
        keypoints,
        score: lerp(a.score, b.score, t),
    }
}

/// Pose at `time_secs` from samples sorted by time
///
/// Times before the first or after the last sample clamp to that sample.
/// Returns `None` when there are no samples.
#[must_use]
pub fn pose_at_time(samples: &[TimedPose], time_secs: f64) -> Option<Pose> {
    let first = samples.first()?;
    let next_index = samples.partition_point(|s| s.time_secs <= time_secs);

    if next_index == 0 {
        return Some(first.pose.clone());
    }
    let previous = &samples[next_index - 1];
    let Some(next) = samples.get(next_index) else {
        return Some(previous.pose.clone());
    };

    let span = next.time_secs - previous.time_secs;
    let t = if span > 0.0 {
        (time_secs - previous.time_secs) / span
    } else {
        0.0
    };
    Some(interpolate_pose(&previous.pose, &next.pose, t))
}
