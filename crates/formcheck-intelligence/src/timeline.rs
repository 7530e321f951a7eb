// ABOUTME: Projects critical and moderate recommendations onto the video timeline
// ABOUTME: Each marker lands on the sampled frame where its angle deviated the most
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::cast_precision_loss)] // Safe: marker counts are tiny

use formcheck_core::models::{
    AngleKey, AngleSet, EnhancedRecommendation, FormAnalysis, IssueMarker, Severity,
};
use serde::{Deserialize, Serialize};

use crate::recommendation_enhancer::optimal_band;
use crate::statistics::KeyOf;

/// Per-frame analysis with the video time it was taken at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis<A> {
    /// Video time in seconds
    pub time_secs: f64,
    /// Analysis of the frame
    pub analysis: A,
}

/// Time of the frame where `rec`'s angle is furthest outside its optimal range
fn worst_frame_time<A: FormAnalysis>(
    frames: &[FrameAnalysis<A>],
    rec: &EnhancedRecommendation,
) -> Option<f64> {
    let key = <KeyOf<A> as AngleKey>::ALL
        .iter()
        .copied()
        .find(|k| k.as_str() == rec.area().as_str())?;
    let band = optimal_band(rec.area())?;

    let mut worst: Option<(f64, f64)> = None;
    for frame in frames {
        let Some(value) = frame.analysis.angles().get(key) else {
            continue;
        };
        let deviation = band.distance(f64::from(value));
        match worst {
            Some((_, largest)) if deviation <= largest => {}
            _ => worst = Some((frame.time_secs, deviation)),
        }
    }
    worst.map(|(time, _)| time)
}

/// Timeline markers for the critical and moderate recommendations
///
/// Recommendations whose area has no per-frame angle are spread evenly
/// between the first and last analyzed frame. Markers are sorted by time.
#[must_use]
pub fn generate_issue_markers<A: FormAnalysis>(
    frames: &[FrameAnalysis<A>],
    recommendations: &[EnhancedRecommendation],
) -> Vec<IssueMarker> {
    let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
        return Vec::new();
    };

    let issues: Vec<&EnhancedRecommendation> = recommendations
        .iter()
        .filter(|r| matches!(r.severity, Severity::Critical | Severity::Moderate))
        .collect();

    let mut markers = Vec::with_capacity(issues.len());
    let mut unplaced = Vec::new();
    for rec in issues {
        match worst_frame_time(frames, rec) {
            Some(time_secs) => markers.push(marker(time_secs, rec)),
            None => unplaced.push(rec),
        }
    }

    let span = last.time_secs - first.time_secs;
    let slots = unplaced.len() as f64 + 1.0;
    for (index, rec) in unplaced.into_iter().enumerate() {
        let time_secs = span.mul_add((index as f64 + 1.0) / slots, first.time_secs);
        markers.push(marker(time_secs, rec));
    }

    markers.sort_by(|a, b| a.time_secs.total_cmp(&b.time_secs));
    markers
}

fn marker(time_secs: f64, rec: &EnhancedRecommendation) -> IssueMarker {
    IssueMarker {
        time_secs,
        area: rec.area().clone(),
        message: rec.message().to_owned(),
        severity: rec.severity,
    }
}
