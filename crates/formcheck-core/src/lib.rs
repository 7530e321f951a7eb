// ABOUTME: Core types and constants for the formcheck pose analysis workspace
// ABOUTME: Foundation crate with error handling, pose/angle data model, and analysis configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Formcheck Core
//!
//! Foundation crate providing shared types and constants for bike-fit and
//! running-form analysis. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Contract constants (confidence gates, sampling defaults)
//! - **models**: Keypoints, poses, per-sport angle records, recommendations, analyses
//! - **config**: Environment-overridable analysis configuration

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Keypoint, Pose, angle records, analyses)
pub mod models;

/// Analysis configuration (confidence gates, sampling, classifier table)
pub mod config;

pub use config::AnalysisConfig;
pub use errors::{AppError, AppResult, ErrorCode};
