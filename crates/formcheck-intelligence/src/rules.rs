// ABOUTME: Data-driven angle rule tables mapping a measured angle to a recommendation
// ABOUTME: Each table is evaluated first-match; values outside every bound produce nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use formcheck_core::models::{FormArea, Recommendation, RecommendationType};

/// Range an angle must fall in for a rule to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleBound {
    /// Strictly greater than the value
    Above(i32),
    /// Strictly less than the value
    Below(i32),
    /// Greater than or equal to the value
    AtLeast(i32),
    /// Inclusive range
    Within(i32, i32),
}

impl RuleBound {
    /// Whether `value` satisfies the bound
    #[must_use]
    pub const fn matches(self, value: i32) -> bool {
        match self {
            Self::Above(limit) => value > limit,
            Self::Below(limit) => value < limit,
            Self::AtLeast(limit) => value >= limit,
            Self::Within(min, max) => value >= min && value <= max,
        }
    }
}

/// One row of an angle rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleRule {
    /// Range that triggers the rule
    pub bound: RuleBound,
    /// Outcome class
    pub kind: RecommendationType,
    /// Message shown to the athlete
    pub message: &'static str,
}

impl AngleRule {
    /// Warning row
    #[must_use]
    pub const fn warning(bound: RuleBound, message: &'static str) -> Self {
        Self {
            bound,
            kind: RecommendationType::Warning,
            message,
        }
    }

    /// Success row
    #[must_use]
    pub const fn success(bound: RuleBound, message: &'static str) -> Self {
        Self {
            bound,
            kind: RecommendationType::Success,
            message,
        }
    }

    /// Informational row
    #[must_use]
    pub const fn info(bound: RuleBound, message: &'static str) -> Self {
        Self {
            bound,
            kind: RecommendationType::Info,
            message,
        }
    }
}

/// Evaluate a rule table against a measured angle
#[must_use]
pub fn evaluate(rules: &[AngleRule], area: FormArea, value: i32) -> Option<Recommendation> {
    rules
        .iter()
        .find(|rule| rule.bound.matches(value))
        .map(|rule| Recommendation::new(area, rule.kind, rule.message, Some(f64::from(value))))
}
