// ABOUTME: Running-form analyzer measuring both sides, posture lean, arm carriage, and foot strike
// ABOUTME: Averages per-side angles into the running angle record and rates the form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Running-form analysis of a single pose.

use formcheck_core::config::ConfidenceThresholds;
use formcheck_core::models::{
    count_outcomes, AngleKey, AngleSet, BodySide, FormArea, KeypointName, OverallRating, Pose,
    Recommendation, RecommendationType, RunningAngle, RunningAngles, RunningFormAnalysis,
    SideAngles, SideComparison,
};

use crate::geometry::{rounded_angle, rounded_mean, vertical_reference};
use crate::rules::{evaluate, AngleRule, RuleBound};

/// Forward lean of the torso
pub const BODY_LEAN_RULES: &[AngleRule] = &[
    AngleRule::warning(
        RuleBound::Below(3),
        "Running too upright, lean slightly forward from the ankles",
    ),
    AngleRule::success(RuleBound::Within(5, 12), "Good forward lean"),
    AngleRule::warning(
        RuleBound::Above(15),
        "Leaning too far forward, this can strain the lower back",
    ),
];

/// Averaged knee angle
pub const KNEE_LIFT_RULES: &[AngleRule] = &[
    AngleRule::warning(
        RuleBound::Above(160),
        "Insufficient knee lift, drive the knees forward",
    ),
    AngleRule::success(RuleBound::Within(100, 140), "Good knee lift"),
];

/// Averaged hip angle
pub const HIP_EXTENSION_RULES: &[AngleRule] = &[
    AngleRule::warning(
        RuleBound::Below(140),
        "Limited hip extension, push off fully behind you",
    ),
    AngleRule::success(RuleBound::AtLeast(160), "Good hip extension"),
];

/// Averaged elbow angle
pub const ARM_SWING_RULES: &[AngleRule] = &[
    AngleRule::info(
        RuleBound::Above(120),
        "Arms too straight, bend the elbows to about 90 degrees",
    ),
    AngleRule::success(RuleBound::Within(80, 110), "Good arm carriage"),
    AngleRule::info(
        RuleBound::Below(70),
        "Arms too bent, relax the elbows slightly",
    ),
];

/// Horizontal ankle-minus-knee offset (pixels) bounding a good landing
pub const FOOT_STRIKE_TOLERANCE: f64 = 30.0;

/// Successes needed (with zero warnings) for excellent form
const EXCELLENT_MIN_SUCCESSES: usize = 3;

/// Rule table of a running angle
#[must_use]
pub const fn rules_for(angle: RunningAngle) -> &'static [AngleRule] {
    match angle {
        RunningAngle::BodyLean => BODY_LEAN_RULES,
        RunningAngle::KneeLift => KNEE_LIFT_RULES,
        RunningAngle::HipExtension => HIP_EXTENSION_RULES,
        RunningAngle::ArmSwing => ARM_SWING_RULES,
    }
}

/// Knee, hip, and elbow angles of one side
#[must_use]
pub fn measure_side(pose: &Pose, side: BodySide, threshold: f64) -> SideAngles {
    let marks = side.landmarks();
    let point = |name: KeypointName| pose.confident(name, threshold).map(|k| k.point());
    let triple = |a: KeypointName, b: KeypointName, c: KeypointName| -> Option<i32> {
        Some(rounded_angle(point(a)?, point(b)?, point(c)?))
    };

    SideAngles {
        knee_angle: triple(marks.hip, marks.knee, marks.ankle),
        hip_angle: triple(marks.shoulder, marks.hip, marks.knee),
        elbow_angle: triple(marks.shoulder, marks.elbow, marks.wrist),
    }
}

/// Torso lean measured from the shoulder midpoint to the hip midpoint
#[must_use]
pub fn measure_body_lean(pose: &Pose, threshold: f64) -> Option<i32> {
    let point = |name: KeypointName| pose.confident(name, threshold).map(|k| k.point());
    let shoulder = point(KeypointName::LeftShoulder)?.midpoint(point(KeypointName::RightShoulder)?);
    let hip = point(KeypointName::LeftHip)?.midpoint(point(KeypointName::RightHip)?);
    Some(rounded_angle(vertical_reference(shoulder), shoulder, hip))
}

/// Left ankle x minus left knee x
#[must_use]
pub fn measure_foot_strike(pose: &Pose, threshold: f64) -> Option<f64> {
    let knee = pose.confident(KeypointName::LeftKnee, threshold)?;
    let ankle = pose.confident(KeypointName::LeftAnkle, threshold)?;
    Some(ankle.x - knee.x)
}

/// Foot-strike rule; a negative offset beyond the tolerance is not flagged
#[must_use]
pub fn evaluate_foot_strike(offset: f64) -> Option<Recommendation> {
    if offset.abs() < FOOT_STRIKE_TOLERANCE {
        Some(Recommendation::new(
            FormArea::FootStrike,
            RecommendationType::Success,
            "Good landing position under the body",
            None,
        ))
    } else if offset > FOOT_STRIKE_TOLERANCE {
        Some(Recommendation::new(
            FormArea::FootStrike,
            RecommendationType::Warning,
            "Overstriding, land with the foot closer beneath the hips",
            None,
        ))
    } else {
        None
    }
}

/// Build the running angle record from the side measurements
#[must_use]
pub fn combine_sides(sides: &SideComparison, body_lean: Option<i32>) -> RunningAngles {
    let both = |pick: fn(&SideAngles) -> Option<i32>| -> Option<i32> {
        let values: Vec<i32> = [pick(&sides.left), pick(&sides.right)]
            .into_iter()
            .flatten()
            .collect();
        rounded_mean(&values)
    };

    RunningAngles {
        body_lean,
        knee_lift: both(|s| s.knee_angle),
        hip_extension: both(|s| s.hip_angle),
        arm_swing: both(|s| s.elbow_angle),
    }
}

/// Apply the rule tables in body lean, knee lift, hip extension, arm swing order
#[must_use]
pub fn evaluate_angles(angles: &RunningAngles) -> Vec<Recommendation> {
    RunningAngle::ALL
        .iter()
        .filter_map(|&key| {
            angles
                .get(key)
                .and_then(|value| evaluate(rules_for(key), key.area(), value))
        })
        .collect()
}

/// Overall running-form rating from the rule hits
#[must_use]
pub fn rate(recommendations: &[Recommendation]) -> OverallRating {
    let (warnings, successes) = count_outcomes(recommendations);
    if warnings == 0 && successes >= EXCELLENT_MIN_SUCCESSES {
        OverallRating::Excellent
    } else if warnings <= 1 {
        OverallRating::Good
    } else {
        OverallRating::NeedsImprovement
    }
}

/// Analyze one pose for running form
///
/// Returns `None` only when there is no pose.
#[must_use]
pub fn analyze_running_form(
    pose: Option<&Pose>,
    thresholds: &ConfidenceThresholds,
) -> Option<RunningFormAnalysis> {
    let pose = pose?;
    let threshold = thresholds.analysis;

    let sides = SideComparison {
        left: measure_side(pose, BodySide::Left, threshold),
        right: measure_side(pose, BodySide::Right, threshold),
    };
    let angles = combine_sides(&sides, measure_body_lean(pose, threshold));
    let foot_strike_offset = measure_foot_strike(pose, threshold);

    let mut recommendations = evaluate_angles(&angles);
    recommendations.extend(foot_strike_offset.and_then(evaluate_foot_strike));
    let overall = rate(&recommendations);

    Some(RunningFormAnalysis {
        angles,
        recommendations,
        overall,
        sides,
        foot_strike_offset,
        confidence: Some(pose.score),
    })
}
