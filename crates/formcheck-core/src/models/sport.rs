// ABOUTME: Sport enumeration for the supported analyzers and the sport detection outcome
// ABOUTME: Provides parsing and display implementations used by the CLI and reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Sport with a dedicated form analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    /// Cycling, analyzed for bike fit
    Cycling,
    /// Running, analyzed for running form
    Running,
}

impl Sport {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cycling => "cycling",
            Self::Running => "running",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cycling" | "bike" | "ride" => Ok(Self::Cycling),
            "running" | "run" => Ok(Self::Running),
            other => Err(AppError::invalid_input(format!("Unsupported sport: {other}"))),
        }
    }
}

/// Result of video-level sport detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportDetection {
    /// Majority of sampled frames look like cycling
    Cycling,
    /// Majority of sampled frames look like running
    Running,
    /// Detector unavailable or no confident classification
    Unknown,
}

impl SportDetection {
    /// Detected sport, if any
    #[must_use]
    pub const fn sport(self) -> Option<Sport> {
        match self {
            Self::Cycling => Some(Sport::Cycling),
            Self::Running => Some(Sport::Running),
            Self::Unknown => None,
        }
    }
}

impl From<Sport> for SportDetection {
    fn from(sport: Sport) -> Self {
        match sport {
            Sport::Cycling => Self::Cycling,
            Sport::Running => Self::Running,
        }
    }
}

impl fmt::Display for SportDetection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycling => f.write_str("cycling"),
            Self::Running => f.write_str("running"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}
