// ABOUTME: Integration tests for loading recorded pose tracks from disk
// ABOUTME: Validates JSON decoding, unknown keypoint handling, and file errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{cyclist, init_test_logging};
use formcheck::intelligence::TimedPose;
use formcheck::models::{KeypointName, SportDetection};
use formcheck::replay::RecordedTrack;
use formcheck::{AnalysisConfig, ErrorCode};
use std::io::Write;
use tempfile::NamedTempFile;

const TRACK_JSON: &str = r#"{
    "duration_secs": 4.0,
    "samples": [
        { "time_secs": 3.0, "pose": { "score": 0.8, "keypoints": [
            { "name": "left_hip", "x": 10.0, "y": 20.0, "score": 0.9 },
            { "name": "left_pinky", "x": 1.0, "y": 1.0, "score": 0.9 }
        ] } },
        { "time_secs": 1.0, "pose": { "score": 0.7, "keypoints": [
            { "name": "left_hip", "x": 0.0, "y": 20.0, "score": 0.9 }
        ] } }
    ]
}"#;

fn write_track(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_load_sorts_samples_and_skips_unknown_keypoints() {
    init_test_logging();
    let file = write_track(TRACK_JSON);
    let track = RecordedTrack::load(file.path()).await.unwrap();

    assert_eq!(track.samples.len(), 2);
    assert!(track.samples[0].time_secs < track.samples[1].time_secs);
    let later = &track.samples[1].pose;
    assert_eq!(later.keypoints.len(), 1);
    assert!(later.keypoint(KeypointName::LeftHip).is_some());
}

#[tokio::test]
async fn test_missing_file_is_invalid_input() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let err = RecordedTrack::load(dir.path().join("missing.json"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.source.is_some());
}

#[tokio::test]
async fn test_invalid_duration_is_rejected() {
    init_test_logging();
    let file = write_track(r#"{ "duration_secs": -1.0, "samples": [] }"#);
    let err = RecordedTrack::load(file.path()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_saved_track_round_trips_through_the_pipeline() {
    init_test_logging();
    let samples = (0..=12)
        .map(|second| TimedPose::new(f64::from(second), cyclist()))
        .collect();
    let track = RecordedTrack::new(12.0, samples).unwrap();
    let file = write_track(&serde_json::to_string(&track).unwrap());

    let loaded = RecordedTrack::load(file.path()).await.unwrap();
    assert_eq!(loaded, track);

    let detection = loaded
        .into_analyzer(AnalysisConfig::default())
        .detect_sport()
        .await
        .unwrap();
    assert_eq!(detection, SportDetection::Cycling);
}
