// ABOUTME: Severity grading of a measured angle against its optimal range
// ABOUTME: Deviation is measured from the nearest bound as a percentage of the range width
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use formcheck_core::models::Severity;
use serde::{Deserialize, Serialize};

/// Default deviation percentage at which an angle is critical
pub const DEFAULT_CRITICAL_PERCENT: f64 = 20.0;

/// Default deviation percentage at which an angle is moderate
pub const DEFAULT_MODERATE_PERCENT: f64 = 10.0;

/// Grade `value` against `[optimal_min, optimal_max]`
///
/// Inside the range is always minor. Outside, the distance to the nearest
/// bound is divided by the range width. A zero-width range with the value
/// outside it grades critical.
#[must_use]
pub fn calculate_severity(
    value: f64,
    optimal_min: f64,
    optimal_max: f64,
    critical_percent: f64,
    moderate_percent: f64,
) -> Severity {
    SeverityBand::with_percents(optimal_min, optimal_max, critical_percent, moderate_percent)
        .grade(value)
}

/// Optimal range with its grading percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityBand {
    /// Lower optimal bound (inclusive)
    pub optimal_min: f64,
    /// Upper optimal bound (inclusive)
    pub optimal_max: f64,
    /// Deviation percentage at which the angle is critical
    pub critical_percent: f64,
    /// Deviation percentage at which the angle is moderate
    pub moderate_percent: f64,
}

impl SeverityBand {
    /// Band with the default 20/10 percentages
    #[must_use]
    pub const fn new(optimal_min: f64, optimal_max: f64) -> Self {
        Self::with_percents(
            optimal_min,
            optimal_max,
            DEFAULT_CRITICAL_PERCENT,
            DEFAULT_MODERATE_PERCENT,
        )
    }

    /// Band with explicit percentages
    #[must_use]
    pub const fn with_percents(
        optimal_min: f64,
        optimal_max: f64,
        critical_percent: f64,
        moderate_percent: f64,
    ) -> Self {
        Self {
            optimal_min,
            optimal_max,
            critical_percent,
            moderate_percent,
        }
    }

    /// Whether `value` lies inside the optimal range
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.optimal_min && value <= self.optimal_max
    }

    /// Distance from the nearest bound, zero inside the range
    #[must_use]
    pub fn distance(&self, value: f64) -> f64 {
        if value < self.optimal_min {
            self.optimal_min - value
        } else if value > self.optimal_max {
            value - self.optimal_max
        } else {
            0.0
        }
    }

    /// Severity of `value`
    #[must_use]
    pub fn grade(&self, value: f64) -> Severity {
        if self.contains(value) {
            return Severity::Minor;
        }

        let width = self.optimal_max - self.optimal_min;
        if width <= 0.0 {
            return Severity::Critical;
        }

        let deviation_percent = self.distance(value) / width * 100.0;
        if deviation_percent >= self.critical_percent {
            Severity::Critical
        } else if deviation_percent >= self.moderate_percent {
            Severity::Moderate
        } else {
            Severity::Minor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_is_minor() {
        assert_eq!(calculate_severity(150.0, 140.0, 160.0, 20.0, 10.0), Severity::Minor);
        assert_eq!(calculate_severity(150.0, 150.0, 150.0, 20.0, 10.0), Severity::Minor);
    }

    #[test]
    fn test_out_of_range_grades() {
        // 40 below a 20-wide range is 200%
        assert_eq!(calculate_severity(100.0, 140.0, 160.0, 20.0, 10.0), Severity::Critical);
        // 3 below is 15%
        assert_eq!(calculate_severity(137.0, 140.0, 160.0, 20.0, 10.0), Severity::Moderate);
        // 1 above is 5%
        assert_eq!(calculate_severity(161.0, 140.0, 160.0, 20.0, 10.0), Severity::Minor);
    }

    #[test]
    fn test_zero_width_band_outside_is_critical() {
        assert_eq!(SeverityBand::new(150.0, 150.0).grade(151.0), Severity::Critical);
    }

    #[test]
    fn test_distance() {
        let band = SeverityBand::new(35.0, 50.0);
        assert!((band.distance(30.0) - 5.0).abs() < f64::EPSILON);
        assert!(band.distance(40.0).abs() < f64::EPSILON);
        assert!((band.distance(62.0) - 12.0).abs() < f64::EPSILON);
    }
}
