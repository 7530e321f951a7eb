// ABOUTME: Bike-fit analyzer measuring knee, hip, back, and elbow angles on one body side
// ABOUTME: Maps each angle through its rule table and rates the overall fit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Bike-fit analysis of a single pose.
//!
//! The side facing the camera is chosen by knee confidence. Right is used
//! only when its knee score is strictly higher, so ties measure the left
//! side.

use formcheck_core::config::ConfidenceThresholds;
use formcheck_core::models::{
    count_outcomes, AngleSet, BikeAngle, BikeFitAnalysis, BikeFitAngles, BodySide, KeypointName,
    OverallRating, Point, Pose, Recommendation,
};

use crate::geometry::{rounded_angle, vertical_reference};
use crate::rules::{evaluate, AngleRule, RuleBound};

/// Knee extension at the bottom of the stroke
pub const KNEE_RULES: &[AngleRule] = &[
    AngleRule::warning(
        RuleBound::Above(170),
        "Knee too straight at the bottom of the stroke, saddle may be too high",
    ),
    AngleRule::warning(
        RuleBound::Below(90),
        "Knee too bent at the bottom of the stroke, saddle may be too low",
    ),
    AngleRule::success(
        RuleBound::Within(140, 160),
        "Knee extension is in the optimal range",
    ),
];

/// Shoulder-hip-knee angle
pub const HIP_RULES: &[AngleRule] = &[
    AngleRule::warning(
        RuleBound::Below(40),
        "Hip angle too closed, consider raising the bars or shortening reach",
    ),
    AngleRule::success(RuleBound::Within(40, 70), "Hip angle is in a good range"),
];

/// Torso angle from vertical
pub const BACK_RULES: &[AngleRule] = &[
    AngleRule::info(
        RuleBound::Below(30),
        "Very upright position, comfortable but less aerodynamic",
    ),
    AngleRule::success(
        RuleBound::Within(35, 50),
        "Aerodynamic back angle with a good comfort balance",
    ),
    AngleRule::warning(
        RuleBound::Above(60),
        "Back angle very aggressive, may cause discomfort on longer rides",
    ),
];

/// Shoulder-elbow-wrist angle
pub const ELBOW_RULES: &[AngleRule] = &[
    AngleRule::warning(
        RuleBound::Above(170),
        "Arms too straight, keep a slight bend to absorb road vibration",
    ),
    AngleRule::success(RuleBound::Within(140, 170), "Elbow bend is in a good range"),
];

/// Successes needed (with zero warnings) for an excellent fit
const EXCELLENT_MIN_SUCCESSES: usize = 2;

/// Rule table of a cycling angle
#[must_use]
pub const fn rules_for(angle: BikeAngle) -> &'static [AngleRule] {
    match angle {
        BikeAngle::Knee => KNEE_RULES,
        BikeAngle::Hip => HIP_RULES,
        BikeAngle::Elbow => ELBOW_RULES,
        BikeAngle::Back => BACK_RULES,
    }
}

/// Side with the more confident knee; right only when strictly higher
#[must_use]
pub fn select_side(pose: &Pose) -> BodySide {
    if pose.score_of(KeypointName::RightKnee) > pose.score_of(KeypointName::LeftKnee) {
        BodySide::Right
    } else {
        BodySide::Left
    }
}

/// Measure cycling angles on the chosen side
#[must_use]
pub fn measure_angles(pose: &Pose, side: BodySide, threshold: f64) -> BikeFitAngles {
    let marks = side.landmarks();
    let point = |name: KeypointName| pose.confident(name, threshold).map(|k| k.point());
    let triple = |a: KeypointName, b: KeypointName, c: KeypointName| -> Option<i32> {
        Some(rounded_angle(point(a)?, point(b)?, point(c)?))
    };

    let back = point(marks.shoulder)
        .zip(point(marks.hip))
        .map(|(shoulder, hip): (Point, Point)| {
            rounded_angle(vertical_reference(shoulder), shoulder, hip)
        });

    BikeFitAngles {
        knee: triple(marks.hip, marks.knee, marks.ankle),
        hip: triple(marks.shoulder, marks.hip, marks.knee),
        elbow: triple(marks.shoulder, marks.elbow, marks.wrist),
        back,
    }
}

/// Apply the rule tables in knee, hip, back, elbow order
#[must_use]
pub fn evaluate_angles(angles: &BikeFitAngles) -> Vec<Recommendation> {
    [BikeAngle::Knee, BikeAngle::Hip, BikeAngle::Back, BikeAngle::Elbow]
        .into_iter()
        .filter_map(|key| {
            angles
                .get(key)
                .and_then(|value| evaluate(rules_for(key), key.area(), value))
        })
        .collect()
}

/// Overall bike-fit rating from the rule hits
#[must_use]
pub fn rate(recommendations: &[Recommendation]) -> OverallRating {
    let (warnings, successes) = count_outcomes(recommendations);
    if warnings == 0 && successes >= EXCELLENT_MIN_SUCCESSES {
        OverallRating::Excellent
    } else if warnings <= 1 {
        OverallRating::Good
    } else {
        OverallRating::NeedsAdjustment
    }
}

/// Analyze one pose for bike fit
///
/// Returns `None` only when there is no pose. A pose without keypoints
/// yields an analysis with no angles and no recommendations.
#[must_use]
pub fn analyze_bike_fit(
    pose: Option<&Pose>,
    thresholds: &ConfidenceThresholds,
) -> Option<BikeFitAnalysis> {
    let pose = pose?;
    let side = select_side(pose);
    let angles = measure_angles(pose, side, thresholds.analysis);
    let recommendations = evaluate_angles(&angles);
    let overall = rate(&recommendations);

    Some(BikeFitAnalysis {
        angles,
        recommendations,
        overall,
        side,
        confidence: Some(pose.score),
    })
}
