// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, pose builders, and recorded-track fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `formcheck`
//!
//! This module provides common fixtures to reduce duplication across
//! integration tests.

use formcheck::intelligence::TimedPose;
use formcheck::models::{
    BikeFitAnalysis, BikeFitAngles, BodySide, Keypoint, KeypointName, OverallRating, Pose,
    RunningAngles, RunningFormAnalysis, SideAngles, SideComparison,
};
use formcheck::replay::RecordedTrack;
use std::env;
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; quiet by default
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Pose from `(name, x, y)` triples, every keypoint at `score`
pub fn pose_with_score(points: &[(KeypointName, f64, f64)], score: f64) -> Pose {
    Pose::new(
        points
            .iter()
            .map(|&(name, x, y)| Keypoint::new(name, x, y, score))
            .collect(),
        score,
    )
}

/// Pose from `(name, x, y)` triples with confident keypoints
pub fn pose(points: &[(KeypointName, f64, f64)]) -> Pose {
    pose_with_score(points, 0.9)
}

/// Side-on cyclist, left side facing the camera
///
/// Measures knee 122, hip 67, back 68, elbow 159.
pub fn cyclist() -> Pose {
    pose(&[
        (KeypointName::LeftShoulder, 300.0, 200.0),
        (KeypointName::RightShoulder, 300.0, 205.0),
        (KeypointName::LeftElbow, 360.0, 250.0),
        (KeypointName::LeftWrist, 420.0, 270.0),
        (KeypointName::LeftHip, 150.0, 260.0),
        (KeypointName::RightHip, 150.0, 262.0),
        (KeypointName::LeftKnee, 220.0, 330.0),
        (KeypointName::RightKnee, 215.0, 340.0),
        (KeypointName::LeftAnkle, 200.0, 420.0),
        (KeypointName::RightAnkle, 205.0, 430.0),
    ])
}

/// Upright runner mid-stride
///
/// Measures body lean 2, knee lift 148, hip extension 166, arm swing 76,
/// foot strike offset -10.
pub fn runner() -> Pose {
    pose(&[
        (KeypointName::LeftShoulder, 200.0, 100.0),
        (KeypointName::RightShoulder, 202.0, 100.0),
        (KeypointName::LeftElbow, 215.0, 170.0),
        (KeypointName::LeftWrist, 250.0, 160.0),
        (KeypointName::RightElbow, 190.0, 175.0),
        (KeypointName::RightWrist, 225.0, 165.0),
        (KeypointName::LeftHip, 195.0, 250.0),
        (KeypointName::RightHip, 197.0, 250.0),
        (KeypointName::LeftKnee, 230.0, 350.0),
        (KeypointName::RightKnee, 170.0, 400.0),
        (KeypointName::LeftAnkle, 220.0, 480.0),
        (KeypointName::RightAnkle, 120.0, 440.0),
    ])
}

/// Track repeating one pose every second
pub fn steady_track(pose: &Pose, duration_secs: f64) -> RecordedTrack {
    let samples = (0..=duration_secs as usize)
        .map(|second| TimedPose::new(second as f64, pose.clone()))
        .collect();
    RecordedTrack::new(duration_secs, samples).unwrap()
}

/// Bike-fit analysis with the given angles and no recommendations
pub fn bike_analysis(angles: BikeFitAngles) -> BikeFitAnalysis {
    BikeFitAnalysis {
        angles,
        recommendations: Vec::new(),
        overall: OverallRating::Good,
        side: BodySide::Left,
        confidence: Some(0.9),
    }
}

/// Bike-fit analysis measuring only the knee
pub fn knee_only(knee: i32) -> BikeFitAnalysis {
    bike_analysis(BikeFitAngles {
        knee: Some(knee),
        ..BikeFitAngles::default()
    })
}

/// Running analysis with the given left and right knee angles
pub fn running_knees(left: i32, right: i32) -> RunningFormAnalysis {
    RunningFormAnalysis {
        angles: RunningAngles::default(),
        recommendations: Vec::new(),
        overall: OverallRating::Good,
        sides: SideComparison {
            left: SideAngles {
                knee_angle: Some(left),
                ..SideAngles::default()
            },
            right: SideAngles {
                knee_angle: Some(right),
                ..SideAngles::default()
            },
        },
        foot_strike_offset: None,
        confidence: Some(0.9),
    }
}
