// ABOUTME: Unified error handling for pose analysis runs
// ABOUTME: Defines ErrorCode, AppError with analysis context, and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace reports an [`AppError`] carrying a
//! stable [`ErrorCode`], a human-readable message and optional analysis
//! context. Per-frame failures are swallowed by the pipeline; only run-level
//! conditions surface as errors.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::config::AnalysisConfigError;

/// Standard error codes used throughout the workspace
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,

    // Analysis (4000-4999)
    /// Aggregation was asked to combine zero frame analyses
    #[serde(rename = "EMPTY_ANALYSIS_SET")]
    EmptyAnalysisSet = 4000,
    /// No sampled frame produced a usable pose
    #[serde(rename = "NO_SUBJECT_DETECTED")]
    NoSubjectDetected = 4001,

    // Video and detector collaborators (5000-5999)
    /// The frame source could not provide a frame
    #[serde(rename = "FRAME_UNAVAILABLE")]
    FrameUnavailable = 5000,
    /// The pose detector failed to initialize
    #[serde(rename = "DETECTOR_UNAVAILABLE")]
    DetectorUnavailable = 5001,
    /// The pose detector failed on a single frame
    #[serde(rename = "DETECTION_FAILED")]
    DetectionFailed = 5002,

    // Configuration (6000-6999)
    /// Configuration is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Serialization or deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::EmptyAnalysisSet => "At least one frame analysis is required",
            Self::NoSubjectDetected => {
                "Could not detect a subject in the video. Make sure the full body is visible"
            }
            Self::FrameUnavailable => "The video frame could not be read",
            Self::DetectorUnavailable => "The pose detector could not be initialized",
            Self::DetectionFailed => "Pose detection failed for a frame",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Analysis run the error belongs to
    pub analysis_id: Option<Uuid>,
    /// Video time (seconds) of the frame involved, if any
    pub frame_time_secs: Option<f64>,
    /// Additional key-value context
    pub details: Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            analysis_id: None,
            frame_time_secs: None,
            details: Value::Object(Map::new()),
        }
    }
}

/// Unified error type for the workspace
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Attach the analysis run id
    #[must_use]
    pub fn with_analysis_id(mut self, analysis_id: Uuid) -> Self {
        self.context.analysis_id = Some(analysis_id);
        self
    }

    /// Attach the video time of the frame involved
    #[must_use]
    pub fn with_frame_time(mut self, frame_time_secs: f64) -> Self {
        self.context.frame_time_secs = Some(frame_time_secs);
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Aggregation called without any frame analyses
    #[must_use]
    pub fn empty_analysis_set(operation: &str) -> Self {
        Self::new(
            ErrorCode::EmptyAnalysisSet,
            format!("{operation} requires at least one frame analysis"),
        )
    }

    /// No sampled frame yielded a usable pose
    #[must_use]
    pub fn no_subject_detected(frames_sampled: usize) -> Self {
        Self::new(
            ErrorCode::NoSubjectDetected,
            format!(
                "Could not detect subject in any of {frames_sampled} sampled frames. \
                 Try a video with better lighting and the whole body in view"
            ),
        )
        .with_details(json!({ "frames_sampled": frames_sampled }))
    }

    /// Frame could not be read from the video
    pub fn frame_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FrameUnavailable, message)
    }

    /// Pose detector failed to start
    pub fn detector_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DetectorUnavailable, message)
    }

    /// Pose detector failed on one frame
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DetectionFailed, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<AnalysisConfigError> for AppError {
    fn from(error: AnalysisConfigError) -> Self {
        Self::config(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Serializable error report handed to callers (CLI output, UI layer)
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Analysis run, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<Uuid>,
    /// Extra context
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            code: error.code,
            message: error.message,
            analysis_id: error.context.analysis_id,
            details: error.context.details,
        }
    }
}
