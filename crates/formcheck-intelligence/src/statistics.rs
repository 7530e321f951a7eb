// ABOUTME: Frame aggregation: averaged angles, per-angle distribution statistics, and asymmetry
// ABOUTME: Pure functions over the ordered sequence of per-frame analyses of one video
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Aggregation of per-frame analyses.

#![allow(clippy::cast_possible_truncation)] // Safe: averages of bounded angles

use std::collections::BTreeMap;

use formcheck_core::errors::{AppError, AppResult};
use formcheck_core::models::{
    AngleKey, AngleSet, AngleStatistics, Asymmetry, AsymmetryEntry, BalanceStatus,
    DetailedMetrics, FormAnalysis, SideAngle,
};

/// Percent difference below which two sides are balanced
pub const BALANCED_PERCENT: f64 = 5.0;

/// Percent difference below which an imbalance is minor
pub const MINOR_IMBALANCE_PERCENT: f64 = 10.0;

/// Angle key type of an analysis
pub type KeyOf<A> = <<A as FormAnalysis>::Angles as AngleSet>::Key;

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Average every angle across the frames where it was present
///
/// The result is the last frame's analysis with its angles replaced. Each
/// angle is divided by its own presence count, not the frame count.
///
/// # Errors
///
/// Returns `EmptyAnalysisSet` when `analyses` is empty
pub fn combine_analyses<A: FormAnalysis>(analyses: &[A]) -> AppResult<A> {
    let last = analyses
        .last()
        .ok_or_else(|| AppError::empty_analysis_set("combine_analyses"))?;

    let mut averaged = A::Angles::default();
    for &key in <KeyOf<A> as AngleKey>::ALL {
        let values: Vec<f64> = analyses
            .iter()
            .filter_map(|analysis| analysis.angles().get(key))
            .map(f64::from)
            .collect();
        if !values.is_empty() {
            averaged.set(key, Some(mean(&values).round() as i32));
        }
    }

    let mut combined = last.clone();
    combined.set_angles(averaged);
    Ok(combined)
}

/// Consistency score (0-100) from the coefficient of variation
#[must_use]
pub fn consistency_score(avg: f64, std_dev: f64) -> i32 {
    if avg.abs() < f64::EPSILON {
        return 0;
    }
    let cv = std_dev / avg * 100.0;
    let score = if cv < 5.0 {
        2.0f64.mul_add(-cv, 100.0)
    } else if cv < 10.0 {
        3.0f64.mul_add(-(cv - 5.0), 90.0)
    } else if cv < 15.0 {
        3.0f64.mul_add(-(cv - 10.0), 75.0)
    } else {
        2.0f64.mul_add(-(cv - 15.0), 60.0).max(0.0)
    };
    score.round() as i32
}

/// Distribution statistics of one angle
///
/// Returns `None` for an empty value list.
#[must_use]
pub fn angle_statistics(values: &[i32]) -> Option<AngleStatistics> {
    let min = *values.iter().min()?;
    let max = *values.iter().max()?;
    let samples: Vec<f64> = values.iter().copied().map(f64::from).collect();
    let avg = mean(&samples);
    let variance = samples.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / samples.len() as f64;
    let std_dev = variance.sqrt();

    Some(AngleStatistics {
        min,
        max,
        avg: avg.round() as i32,
        std_dev: round_to_tenth(std_dev),
        range: max - min,
        consistency: consistency_score(avg, std_dev),
        values: values.to_vec(),
    })
}

/// Per-angle statistics across all frames
///
/// Returns `None` for an empty input sequence.
#[must_use]
pub fn calculate_detailed_metrics<A: FormAnalysis>(
    analyses: &[A],
) -> Option<DetailedMetrics<KeyOf<A>>> {
    if analyses.is_empty() {
        return None;
    }

    let mut collected: BTreeMap<KeyOf<A>, Vec<i32>> = BTreeMap::new();
    for analysis in analyses {
        for (key, value) in analysis.angles().present() {
            collected.entry(key).or_default().push(value);
        }
    }

    Some(
        collected
            .into_iter()
            .filter_map(|(key, values)| angle_statistics(&values).map(|stats| (key, stats)))
            .collect(),
    )
}

/// Balance classification of a percent difference
#[must_use]
pub fn balance_status(percent_diff: f64) -> BalanceStatus {
    if percent_diff < BALANCED_PERCENT {
        BalanceStatus::Balanced
    } else if percent_diff < MINOR_IMBALANCE_PERCENT {
        BalanceStatus::Minor
    } else {
        BalanceStatus::Significant
    }
}

/// Compare two per-side averages
#[must_use]
pub fn asymmetry_entry(left_avg: f64, right_avg: f64) -> AsymmetryEntry {
    let difference = (left_avg - right_avg).abs();
    let midpoint = (left_avg + right_avg) / 2.0;
    let percent_diff = if midpoint.abs() < f64::EPSILON {
        0.0
    } else {
        difference / midpoint * 100.0
    };

    AsymmetryEntry {
        left: round_to_tenth(left_avg),
        right: round_to_tenth(right_avg),
        difference: round_to_tenth(difference),
        percent_diff: round_to_tenth(percent_diff),
        status: balance_status(percent_diff),
    }
}

/// Left/right asymmetry across all frames
///
/// Each side's values are accumulated independently over every frame, so a
/// frame that only saw one side still contributes. Returns `None` when no
/// angle has data on both sides, which includes sports without side data.
#[must_use]
pub fn calculate_asymmetry<A: FormAnalysis>(analyses: &[A]) -> Option<Asymmetry> {
    let mut asymmetry = Asymmetry::new();

    for &key in SideAngle::ALL {
        let mut left = Vec::new();
        let mut right = Vec::new();
        for sides in analyses.iter().filter_map(A::sides) {
            left.extend(sides.left.get(key).map(f64::from));
            right.extend(sides.right.get(key).map(f64::from));
        }
        if !left.is_empty() && !right.is_empty() {
            asymmetry.insert(key, asymmetry_entry(mean(&left), mean(&right)));
        }
    }

    (!asymmetry.is_empty()).then_some(asymmetry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::errors::ErrorCode;
    use formcheck_core::models::{
        BikeAngle, BikeFitAnalysis, BikeFitAngles, BodySide, OverallRating, RunningAngles,
        RunningFormAnalysis, SideAngles, SideComparison,
    };

    fn bike(knee: Option<i32>, hip: Option<i32>) -> BikeFitAnalysis {
        BikeFitAnalysis {
            angles: BikeFitAngles {
                knee,
                hip,
                ..BikeFitAngles::default()
            },
            recommendations: Vec::new(),
            overall: OverallRating::Good,
            side: BodySide::Left,
            confidence: None,
        }
    }

    fn running(left_knee: Option<i32>, right_knee: Option<i32>) -> RunningFormAnalysis {
        RunningFormAnalysis {
            angles: RunningAngles::default(),
            recommendations: Vec::new(),
            overall: OverallRating::Good,
            sides: SideComparison {
                left: SideAngles {
                    knee_angle: left_knee,
                    ..SideAngles::default()
                },
                right: SideAngles {
                    knee_angle: right_knee,
                    ..SideAngles::default()
                },
            },
            foot_strike_offset: None,
            confidence: None,
        }
    }

    #[test]
    fn test_combine_uses_per_key_divisor_and_last_frame() {
        let mut last = bike(Some(151), None);
        last.side = BodySide::Right;
        let combined = combine_analyses(&[bike(Some(140), Some(50)), bike(None, None), last])
            .unwrap();
        assert_eq!(combined.angles.knee, Some(146));
        assert_eq!(combined.angles.hip, Some(50));
        assert_eq!(combined.side, BodySide::Right);
    }

    #[test]
    fn test_combine_rejects_empty_input() {
        let err = combine_analyses::<BikeFitAnalysis>(&[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyAnalysisSet);
    }

    #[test]
    fn test_detailed_metrics_of_a_steady_ramp() {
        let frames: Vec<_> = [90, 95, 100, 105, 110]
            .into_iter()
            .map(|knee| bike(Some(knee), None))
            .collect();
        let metrics = calculate_detailed_metrics(&frames).unwrap();
        let knee = &metrics[&BikeAngle::Knee];
        assert_eq!((knee.min, knee.max, knee.avg, knee.range), (90, 110, 100, 20));
        assert_eq!(knee.values.len(), 5);
        assert!((knee.std_dev - 7.1).abs() < 1e-9);
        assert!(!metrics.contains_key(&BikeAngle::Hip));
    }

    #[test]
    fn test_detailed_metrics_edge_cases() {
        assert!(calculate_detailed_metrics::<BikeFitAnalysis>(&[]).is_none());
        let single = calculate_detailed_metrics(&[bike(Some(150), None)]).unwrap();
        let knee = &single[&BikeAngle::Knee];
        assert!(knee.std_dev.abs() < f64::EPSILON);
        assert_eq!(knee.consistency, 100);
    }

    #[test]
    fn test_consistency_bands() {
        assert_eq!(consistency_score(0.0, 3.0), 0);
        assert_eq!(consistency_score(100.0, 2.0), 96);
        assert_eq!(consistency_score(100.0, 7.0), 84);
        assert_eq!(consistency_score(100.0, 12.0), 69);
        assert_eq!(consistency_score(100.0, 20.0), 50);
        assert_eq!(consistency_score(100.0, 80.0), 0);
    }

    #[test]
    fn test_asymmetry_minor_imbalance() {
        let asymmetry = calculate_asymmetry(&[running(Some(100), Some(110))]).unwrap();
        let knee = &asymmetry[&SideAngle::KneeAngle];
        assert!((knee.percent_diff - 9.5).abs() < 1e-9);
        assert_eq!(knee.status, BalanceStatus::Minor);
    }

    #[test]
    fn test_asymmetry_significant_imbalance() {
        let frames = vec![running(Some(90), Some(120)); 3];
        let knee = calculate_asymmetry(&frames).unwrap()[&SideAngle::KneeAngle].clone();
        assert_eq!(knee.status, BalanceStatus::Significant);
        assert!(knee.difference > 10.0);
    }

    #[test]
    fn test_asymmetry_accumulates_sides_independently() {
        let frames = [running(Some(100), None), running(None, Some(100))];
        let knee = calculate_asymmetry(&frames).unwrap()[&SideAngle::KneeAngle].clone();
        assert_eq!(knee.status, BalanceStatus::Balanced);
    }

    #[test]
    fn test_asymmetry_absent_without_both_sides() {
        assert!(calculate_asymmetry(&[running(Some(100), None)]).is_none());
        assert!(calculate_asymmetry::<RunningFormAnalysis>(&[]).is_none());
        assert!(calculate_asymmetry(&[bike(Some(150), None)]).is_none());
    }
}
