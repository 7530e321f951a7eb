// ABOUTME: Narrative report built from enhanced recommendations, angles, metrics, and asymmetry
// ABOUTME: Produces a headline, strengths, improvements, and the single top priority
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Summary generation.
//!
//! The praise ranges here are narrative only and intentionally differ from
//! the analyzers' success ranges for some running angles.

use formcheck_core::models::{
    AngleKey, AngleSet, Asymmetry, BalanceStatus, DetailedMetrics, EnhancedRecommendation,
    OverallRating, RecommendationType, Severity, Sport,
};
use serde::{Deserialize, Serialize};

/// Consistency at or above which an angle is praised
pub const CONSISTENCY_STRENGTH_MIN: i32 = 85;

/// Consistency below which an angle is listed as an improvement
pub const CONSISTENCY_IMPROVEMENT_MAX: i32 = 70;

const MAX_ISSUE_IMPROVEMENTS: usize = 4;
const MAX_ASYMMETRY_IMPROVEMENTS: usize = 2;
const MAX_CONSISTENCY_IMPROVEMENTS: usize = 2;

const STRENGTHS_PLACEHOLDER: &str = "Keep recording sessions to build a baseline of strengths";
const IMPROVEMENTS_PLACEHOLDER: &str = "No significant improvements needed, keep up the good work";
const MAINTENANCE_PRIORITY: &str = "Maintain your current form and re-check it periodically";

/// Human-readable report of one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedSummary {
    /// One-line verdict
    pub headline: String,
    /// What the athlete does well
    pub strengths: Vec<String>,
    /// What to work on, most important first
    pub improvements: Vec<String>,
    /// The single thing to fix first
    pub top_priority: String,
}

/// Narrative praise range of one angle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthRange {
    /// Angle name
    pub angle: &'static str,
    /// Lower bound (inclusive)
    pub min: i32,
    /// Upper bound (inclusive)
    pub max: i32,
    /// Praise text
    pub praise: &'static str,
}

const BIKE_STRENGTHS: &[StrengthRange] = &[
    StrengthRange {
        angle: "knee",
        min: 140,
        max: 160,
        praise: "Optimal knee extension",
    },
    StrengthRange {
        angle: "hip",
        min: 40,
        max: 70,
        praise: "Well-balanced hip angle",
    },
    StrengthRange {
        angle: "elbow",
        min: 140,
        max: 170,
        praise: "Relaxed elbow bend",
    },
    StrengthRange {
        angle: "back",
        min: 35,
        max: 50,
        praise: "Efficient aerodynamic back angle",
    },
];

const RUNNING_STRENGTHS: &[StrengthRange] = &[
    StrengthRange {
        angle: "knee_lift",
        min: 70,
        max: 95,
        praise: "Strong knee drive",
    },
    StrengthRange {
        angle: "body_lean",
        min: 3,
        max: 8,
        praise: "Efficient forward lean",
    },
    StrengthRange {
        angle: "arm_swing",
        min: 70,
        max: 100,
        praise: "Compact arm swing",
    },
];

/// Praise ranges of a sport
#[must_use]
pub const fn strength_ranges(sport: Sport) -> &'static [StrengthRange] {
    match sport {
        Sport::Cycling => BIKE_STRENGTHS,
        Sport::Running => RUNNING_STRENGTHS,
    }
}

const fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn headline(issues: &[&EnhancedRecommendation], sport: Sport) -> String {
    let count = |severity| issues.iter().filter(|r| r.severity == severity).count();
    let critical = count(Severity::Critical);
    let moderate = count(Severity::Moderate);
    let minor = count(Severity::Minor);

    if critical > 0 {
        let verb = if critical == 1 { "needs" } else { "need" };
        format!(
            "{critical} critical issue{} {verb} immediate attention",
            plural(critical)
        )
    } else if moderate > 0 {
        format!(
            "Solid {sport} form with {moderate} area{} to refine",
            plural(moderate)
        )
    } else if minor > 0 {
        format!("Strong {sport} form, only minor tweaks suggested")
    } else {
        format!("No {sport} form issues detected")
    }
}

fn strengths<S: AngleSet>(
    angles: &S,
    metrics: Option<&DetailedMetrics<S::Key>>,
    asymmetry: Option<&Asymmetry>,
    sport: Sport,
) -> Vec<String> {
    let mut strengths: Vec<String> = strength_ranges(sport)
        .iter()
        .filter_map(|range| {
            let key = <S::Key as AngleKey>::ALL.iter().find(|k| k.as_str() == range.angle)?;
            let value = angles.get(*key)?;
            (range.min..=range.max)
                .contains(&value)
                .then(|| format!("{} ({value}°)", range.praise))
        })
        .collect();

    if let Some(metrics) = metrics {
        strengths.extend(
            metrics
                .iter()
                .filter(|(_, stats)| stats.consistency >= CONSISTENCY_STRENGTH_MIN)
                .map(|(key, stats)| {
                    format!(
                        "Consistent {} across the video ({}% consistency)",
                        key.label().to_lowercase(),
                        stats.consistency
                    )
                }),
        );
    }

    if let Some(asymmetry) = asymmetry {
        strengths.extend(
            asymmetry
                .iter()
                .filter(|(_, entry)| entry.status == BalanceStatus::Balanced)
                .map(|(key, _)| format!("{} balanced between left and right", key.label())),
        );
    }

    if strengths.is_empty() {
        strengths.push(STRENGTHS_PLACEHOLDER.to_owned());
    }
    strengths
}

fn improvements<K: AngleKey>(
    recommendations: &[EnhancedRecommendation],
    metrics: Option<&DetailedMetrics<K>>,
    asymmetry: Option<&Asymmetry>,
) -> Vec<String> {
    let mut improvements: Vec<String> = recommendations
        .iter()
        .filter(|r| matches!(r.severity, Severity::Critical | Severity::Moderate))
        .take(MAX_ISSUE_IMPROVEMENTS)
        .map(|r| format!("{}: {}", r.area().label(), r.message()))
        .collect();

    if let Some(asymmetry) = asymmetry {
        improvements.extend(
            asymmetry
                .iter()
                .filter(|(_, entry)| entry.status != BalanceStatus::Balanced)
                .take(MAX_ASYMMETRY_IMPROVEMENTS)
                .map(|(key, entry)| {
                    format!(
                        "{} differs by {:.1}% between left and right",
                        key.label(),
                        entry.percent_diff
                    )
                }),
        );
    }

    if let Some(metrics) = metrics {
        let mut unsteady: Vec<_> = metrics
            .iter()
            .filter(|(_, stats)| stats.consistency < CONSISTENCY_IMPROVEMENT_MAX)
            .collect();
        unsteady.sort_by_key(|(_, stats)| stats.consistency);
        improvements.extend(unsteady.into_iter().take(MAX_CONSISTENCY_IMPROVEMENTS).map(
            |(key, stats)| {
                format!(
                    "Work on {} consistency (currently {}%)",
                    key.label().to_lowercase(),
                    stats.consistency
                )
            },
        ));
    }

    if improvements.is_empty() {
        improvements.push(IMPROVEMENTS_PLACEHOLDER.to_owned());
    }
    improvements
}

fn top_priority(recommendations: &[EnhancedRecommendation]) -> String {
    let first = |severity| recommendations.iter().find(|r| r.severity == severity);

    first(Severity::Critical)
        .or_else(|| first(Severity::Moderate))
        .map_or_else(
            || MAINTENANCE_PRIORITY.to_owned(),
            |rec| {
                rec.first_drill().map_or_else(
                    || rec.message().to_owned(),
                    |drill| format!("{} Start with: {drill}", rec.message()),
                )
            },
        )
}

/// Build the narrative report
///
/// `recommendations` must already be sorted by priority, as returned by
/// the enhancer. Only non-success recommendations count towards the
/// headline, which is one of four fixed templates picked by the most severe
/// issue present. The overall rating does not change the wording.
#[must_use]
pub fn generate_detailed_summary<S: AngleSet>(
    recommendations: &[EnhancedRecommendation],
    angles: &S,
    metrics: Option<&DetailedMetrics<S::Key>>,
    asymmetry: Option<&Asymmetry>,
    _overall: OverallRating,
    sport: Sport,
) -> DetailedSummary {
    let issues: Vec<&EnhancedRecommendation> = recommendations
        .iter()
        .filter(|r| r.recommendation.kind != RecommendationType::Success)
        .collect();

    DetailedSummary {
        headline: headline(&issues, sport),
        strengths: strengths(angles, metrics, asymmetry, sport),
        improvements: improvements(recommendations, metrics, asymmetry),
        top_priority: top_priority(recommendations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation_enhancer::{enhance_recommendations, BIKE_FIT_GUIDANCE};
    use formcheck_core::models::{
        AngleStatistics, AsymmetryEntry, BikeAngle, BikeFitAngles, FormArea, Recommendation,
        RunningAngles, SideAngle,
    };
    use std::collections::BTreeMap;

    fn stats(consistency: i32) -> AngleStatistics {
        AngleStatistics {
            min: 0,
            max: 0,
            avg: 0,
            std_dev: 0.0,
            range: 0,
            consistency,
            values: Vec::new(),
        }
    }

    #[test]
    fn test_clean_run_uses_placeholders_and_maintenance() {
        let summary = generate_detailed_summary(
            &[],
            &BikeFitAngles::default(),
            None,
            None,
            OverallRating::Good,
            Sport::Cycling,
        );
        assert_eq!(summary.headline, "No cycling form issues detected");
        assert_eq!(summary.strengths, vec![STRENGTHS_PLACEHOLDER.to_owned()]);
        assert_eq!(summary.improvements, vec![IMPROVEMENTS_PLACEHOLDER.to_owned()]);
        assert_eq!(summary.top_priority, MAINTENANCE_PRIORITY);
    }

    #[test]
    fn test_clean_headline_ignores_overall_rating() {
        for overall in [OverallRating::Excellent, OverallRating::Good] {
            let summary = generate_detailed_summary(
                &[],
                &RunningAngles::default(),
                None,
                None,
                overall,
                Sport::Running,
            );
            assert_eq!(summary.headline, "No running form issues detected");
        }
    }

    #[test]
    fn test_critical_issue_drives_headline_and_priority() {
        let recs = enhance_recommendations(
            &[
                Recommendation::warning(FormArea::Knee, "Knee too bent", 85.0),
                Recommendation::warning(FormArea::Elbow, "Arms locked", 176.0),
            ],
            BIKE_FIT_GUIDANCE,
        );
        let summary = generate_detailed_summary(
            &recs,
            &BikeFitAngles::default(),
            None,
            None,
            OverallRating::NeedsAdjustment,
            Sport::Cycling,
        );
        assert_eq!(summary.headline, "1 critical issue needs immediate attention");
        assert!(summary.top_priority.starts_with("Knee too bent Start with: Raise the saddle"));
        assert_eq!(summary.improvements.len(), 2);
    }

    #[test]
    fn test_strengths_use_narrative_ranges() {
        let angles = RunningAngles {
            knee_lift: Some(90),
            body_lean: Some(10),
            ..RunningAngles::default()
        };
        let summary = generate_detailed_summary(
            &[],
            &angles,
            None,
            None,
            OverallRating::Good,
            Sport::Running,
        );
        assert_eq!(summary.strengths, vec!["Strong knee drive (90°)".to_owned()]);
    }

    #[test]
    fn test_metrics_and_asymmetry_callouts() {
        let mut metrics: DetailedMetrics<BikeAngle> = BTreeMap::new();
        metrics.insert(BikeAngle::Knee, stats(92));
        metrics.insert(BikeAngle::Hip, stats(40));
        metrics.insert(BikeAngle::Elbow, stats(60));
        metrics.insert(BikeAngle::Back, stats(65));

        let mut asymmetry = Asymmetry::new();
        asymmetry.insert(
            SideAngle::KneeAngle,
            AsymmetryEntry {
                left: 100.0,
                right: 120.0,
                difference: 20.0,
                percent_diff: 18.2,
                status: BalanceStatus::Significant,
            },
        );

        let summary = generate_detailed_summary(
            &[],
            &BikeFitAngles::default(),
            Some(&metrics),
            Some(&asymmetry),
            OverallRating::Good,
            Sport::Cycling,
        );
        assert!(summary.strengths[0].contains("92% consistency"));
        assert_eq!(
            summary.improvements,
            vec![
                "Knee angle differs by 18.2% between left and right".to_owned(),
                "Work on hip angle consistency (currently 40%)".to_owned(),
                "Work on elbow bend consistency (currently 60%)".to_owned(),
            ]
        );
    }
}
