// ABOUTME: Configuration module for formcheck-core
// ABOUTME: Re-exports analysis configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Analysis thresholds, sampling, and classifier configuration
pub mod analysis;

pub use analysis::{
    AnalysisConfig, AnalysisConfigError, ConfidenceThresholds, CyclingScoreTable,
    DecisionThresholds, RunningScoreTable, SamplingConfig, ScoreRule, SportClassifierConfig,
};
