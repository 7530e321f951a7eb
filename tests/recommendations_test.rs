// ABOUTME: Integration tests for severity grading, recommendation enhancement, and summaries
// ABOUTME: Checks band grading, priority ordering, drill lookup, and narrative headlines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{cyclist, runner};
use formcheck::config::ConfidenceThresholds;
use formcheck::intelligence::recommendation_enhancer::{
    enhance_recommendation, BIKE_FIT_GUIDANCE, GENERAL_IMPACT,
};
use formcheck::intelligence::severity::{DEFAULT_CRITICAL_PERCENT, DEFAULT_MODERATE_PERCENT};
use formcheck::models::{
    BikeFitAngles, FormArea, OverallRating, Recommendation, RecommendationType,
    RunningFormAnalysis, Severity, Sport,
};
use formcheck::{
    analyze_bike_fit, analyze_running_form, calculate_severity, enhance_bike_fit_recommendations,
    enhance_running_recommendations, generate_detailed_summary,
};

fn default_severity(value: f64, min: f64, max: f64) -> Severity {
    calculate_severity(
        value,
        min,
        max,
        DEFAULT_CRITICAL_PERCENT,
        DEFAULT_MODERATE_PERCENT,
    )
}

#[test]
fn test_severity_reference_values() {
    assert_eq!(default_severity(150.0, 140.0, 160.0), Severity::Minor);
    assert_eq!(
        calculate_severity(100.0, 140.0, 160.0, 20.0, 10.0),
        Severity::Critical
    );
    assert_eq!(
        calculate_severity(137.0, 140.0, 160.0, 20.0, 10.0),
        Severity::Moderate
    );
    assert_eq!(default_severity(150.0, 150.0, 150.0), Severity::Minor);
}

#[test]
fn test_severity_just_outside_range_is_minor() {
    // 1 degree over a 20 degree band is 5%
    assert_eq!(default_severity(161.0, 140.0, 160.0), Severity::Minor);
}

#[test]
fn test_enhancers_on_missing_analysis() {
    assert!(enhance_bike_fit_recommendations(None).is_empty());
    assert!(enhance_running_recommendations(None).is_empty());
}

#[test]
fn test_enhanced_recommendations_sorted_by_priority() {
    let analysis = analyze_bike_fit(Some(&cyclist()), &ConfidenceThresholds::default()).unwrap();
    let enhanced = enhance_bike_fit_recommendations(Some(&analysis));

    assert_eq!(enhanced.len(), analysis.recommendations.len());
    assert!(enhanced
        .windows(2)
        .all(|pair| pair[0].priority_score >= pair[1].priority_score));

    let first = &enhanced[0];
    assert_eq!(first.area(), &FormArea::Back);
    assert_eq!(first.severity, Severity::Critical);
    assert_eq!(first.priority_score, 3);
    assert!(!first.drills.is_empty());
}

#[test]
fn test_unknown_area_is_minor_without_drills() {
    let rec = Recommendation::warning(FormArea::Other("cadence".into()), "Spin faster", 60.0);
    let enhanced = enhance_recommendation(&rec, BIKE_FIT_GUIDANCE);
    assert_eq!(enhanced.severity, Severity::Minor);
    assert!(enhanced.drills.is_empty());
    assert_eq!(enhanced.impact, GENERAL_IMPACT);
}

#[test]
fn test_missing_angle_is_minor_without_drills() {
    let rec = Recommendation::new(
        FormArea::Knee,
        RecommendationType::Warning,
        "Knee issue",
        None,
    );
    let enhanced = enhance_recommendation(&rec, BIKE_FIT_GUIDANCE);
    assert_eq!(enhanced.severity, Severity::Minor);
    assert!(enhanced.drills.is_empty());
}

#[test]
fn test_running_summary_flags_critical_lean() {
    let analysis: RunningFormAnalysis =
        analyze_running_form(Some(&runner()), &ConfidenceThresholds::default()).unwrap();
    let enhanced = enhance_running_recommendations(Some(&analysis));
    assert_eq!(enhanced[0].area(), &FormArea::BodyLean);
    assert_eq!(enhanced[0].severity, Severity::Critical);

    let summary = generate_detailed_summary(
        &enhanced,
        &analysis.angles,
        None,
        None,
        analysis.overall,
        Sport::Running,
    );
    assert!(summary.headline.starts_with("1 critical issue"), "{}", summary.headline);
    assert!(summary.top_priority.contains("Start with:"), "{}", summary.top_priority);
    assert!(!summary.improvements.is_empty());
}

#[test]
fn test_clean_summary_without_issues() {
    let summary = generate_detailed_summary(
        &[],
        &BikeFitAngles::default(),
        None,
        None,
        OverallRating::Excellent,
        Sport::Cycling,
    );
    assert_eq!(summary.headline, "No cycling form issues detected");
    assert_eq!(summary.improvements.len(), 1);
    assert_eq!(
        summary.top_priority,
        "Maintain your current form and re-check it periodically"
    );
}
