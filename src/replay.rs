// ABOUTME: Recorded pose tracks that stand in for a video and a pose model
// ABOUTME: Loads timestamped poses from JSON and replays them through the analysis pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Offline replay of recorded pose tracks
//!
//! A [`RecordedTrack`] is a JSON document of timestamped poses, for example
//! exported from an earlier detection run:
//!
//! ```json
//! {
//!   "duration_secs": 12.0,
//!   "samples": [
//!     { "time_secs": 0.5, "pose": { "score": 0.9, "keypoints": [
//!       { "name": "left_hip", "x": 300.0, "y": 400.0, "score": 0.9 }
//!     ] } }
//!   ]
//! }
//! ```
//!
//! The track acts as both the frame source (a frame is just its timestamp)
//! and the pose detector (interpolating between the nearest samples).

use async_trait::async_trait;
use formcheck_core::config::AnalysisConfig;
use formcheck_core::errors::{AppError, AppResult};
use formcheck_core::models::Pose;
use formcheck_intelligence::interpolation::{pose_at_time, TimedPose};
use formcheck_intelligence::pipeline::{FrameSource, PoseDetector, VideoAnalyzer};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

/// Timestamped poses covering one video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedTrack {
    /// Length of the recorded video in seconds
    pub duration_secs: f64,
    /// Pose samples, sorted by time after loading
    #[serde(default)]
    pub samples: Vec<TimedPose>,
}

/// Analyzer driving a shared recorded track
pub type ReplayAnalyzer = VideoAnalyzer<Arc<RecordedTrack>, Arc<RecordedTrack>>;

impl RecordedTrack {
    /// Create a track, sorting samples by time
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the duration is not positive or a sample
    /// time is not finite
    pub fn new(duration_secs: f64, mut samples: Vec<TimedPose>) -> AppResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(AppError::invalid_input(format!(
                "Track duration must be positive, got {duration_secs}"
            )));
        }
        if let Some(bad) = samples.iter().find(|s| !s.time_secs.is_finite()) {
            return Err(AppError::invalid_input("Sample time must be finite")
                .with_details(json!({ "time_secs": bad.time_secs.to_string() })));
        }
        samples.sort_by(|a, b| a.time_secs.total_cmp(&b.time_secs));
        Ok(Self {
            duration_secs,
            samples,
        })
    }

    /// Parse and validate a track from JSON
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` for malformed JSON and `InvalidInput`
    /// for an invalid duration or sample time
    pub fn from_json(json: &str) -> AppResult<Self> {
        let raw: Self = serde_json::from_str(json)?;
        let track = Self::new(raw.duration_secs, raw.samples)?;
        debug!(
            duration_secs = track.duration_secs,
            samples = track.samples.len(),
            "Loaded recorded track"
        );
        Ok(track)
    }

    /// Read a track from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the file cannot be read, otherwise the
    /// errors of [`RecordedTrack::from_json`]
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).await.map_err(|e| {
            AppError::invalid_input(format!("Cannot read track {}: {e}", path.display()))
                .with_source(e)
        })?;
        Self::from_json(&contents)
    }

    /// Build a pipeline that uses this track as both video and detector
    #[must_use]
    pub fn into_analyzer(self, config: AnalysisConfig) -> ReplayAnalyzer {
        let track = Arc::new(self);
        VideoAnalyzer::new(Arc::clone(&track), track, config)
    }
}

#[async_trait]
impl FrameSource for RecordedTrack {
    type Frame = f64;

    fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    async fn frame_at(&self, time_secs: f64) -> AppResult<f64> {
        if !(0.0..=self.duration_secs).contains(&time_secs) {
            return Err(AppError::frame_unavailable(format!(
                "No frame at {time_secs:.2}s in a {:.2}s track",
                self.duration_secs
            ))
            .with_frame_time(time_secs));
        }
        Ok(time_secs)
    }
}

#[async_trait]
impl PoseDetector<f64> for RecordedTrack {
    async fn detect(&self, frame: &f64) -> AppResult<Option<Pose>> {
        Ok(pose_at_time(&self.samples, *frame))
    }
}
