// ABOUTME: Angle-between-three-points primitive shared by every analyzer
// ABOUTME: Also synthesizes the vertical reference point used for torso angles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Geometry primitives.

#![allow(clippy::cast_possible_truncation)] // Safe: angles are bounded to [0, 180]

use formcheck_core::constants::geometry::{MAX_JOINT_ANGLE_DEGREES, VERTICAL_REFERENCE_OFFSET};
use formcheck_core::models::Point;

/// Angle at vertex `b` between the rays `b -> a` and `b -> c`, in degrees
///
/// The raw `atan2` difference is normalized to `[0, 180]` by reflecting any
/// value above 180 to `360 - value`. Coincident points yield a finite value
/// (`atan2(0, 0)` is zero), never a panic or NaN.
#[must_use]
pub fn calculate_angle(a: Point, b: Point, c: Point) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let degrees = (radians.to_degrees()).abs();

    if degrees > MAX_JOINT_ANGLE_DEGREES {
        360.0 - degrees
    } else {
        degrees
    }
}

/// [`calculate_angle`] rounded to whole degrees
#[must_use]
pub fn rounded_angle(a: Point, b: Point, c: Point) -> i32 {
    calculate_angle(a, b, c).round() as i32
}

/// Point on the vertical through `origin`, offset towards the hips
///
/// Image y grows downwards, so an upright torso measured against this point
/// reads 0 degrees and a fully horizontal torso reads 90.
#[must_use]
pub fn vertical_reference(origin: Point) -> Point {
    Point::new(origin.x, origin.y + VERTICAL_REFERENCE_OFFSET)
}

/// Mean of the present values, rounded to whole degrees
#[must_use]
pub fn rounded_mean(values: &[i32]) -> Option<i32> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().copied().map(f64::from).sum();
    Some((sum / values.len() as f64).round() as i32)
}
