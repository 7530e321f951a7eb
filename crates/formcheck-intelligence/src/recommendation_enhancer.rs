// ABOUTME: Grades raw rule hits with severity, impact wording, and corrective drills
// ABOUTME: Sport-specific guidance tables drive grading; output is sorted by priority
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recommendation enhancement.
//!
//! Every raw recommendation is graded, including successes and infos. Areas
//! missing from the sport's table, and recommendations without a measured
//! angle, come out minor with no drills.

use formcheck_core::models::{
    BikeFitAnalysis, EnhancedRecommendation, FormAnalysis, FormArea, Recommendation,
    RunningFormAnalysis, Severity,
};

use crate::drills::{drills, ExerciseKey};
use crate::severity::SeverityBand;

/// Impact used when no guidance applies
pub const GENERAL_IMPACT: &str = "Keep monitoring this area in future sessions";

/// Wording and drills for one side of an optimal range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationGuidance {
    /// Impact text for critical deviations
    pub critical_impact: &'static str,
    /// Impact text for moderate and minor deviations
    pub impact: &'static str,
    /// Corrective exercise family
    pub exercise: ExerciseKey,
}

/// Grading row for one recommendation area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaGuidance {
    /// Area name as produced by the analyzers
    pub area: &'static str,
    /// Optimal range and grading percentages
    pub band: SeverityBand,
    /// Guidance when the angle is below the range
    pub below: DeviationGuidance,
    /// Guidance when the angle is above the range
    pub above: DeviationGuidance,
    /// Impact text when the angle is inside the range
    pub in_range_impact: &'static str,
}

impl AreaGuidance {
    /// Severity, impact text, and exercise for a measured value
    #[must_use]
    pub fn assess(&self, value: f64) -> (Severity, &'static str, Option<ExerciseKey>) {
        let severity = self.band.grade(value);
        let side = if value < self.band.optimal_min {
            &self.below
        } else if value > self.band.optimal_max {
            &self.above
        } else {
            return (severity, self.in_range_impact, None);
        };

        let impact = if severity == Severity::Critical {
            side.critical_impact
        } else {
            side.impact
        };
        (severity, impact, Some(side.exercise))
    }
}

/// Bike-fit grading table
pub const BIKE_FIT_GUIDANCE: &[AreaGuidance] = &[
    AreaGuidance {
        area: "knee",
        band: SeverityBand::with_percents(140.0, 160.0, 25.0, 15.0),
        below: DeviationGuidance {
            critical_impact: "Severely reduced power output and high patellar stress",
            impact: "Reduced power output and extra load on the knee cap",
            exercise: ExerciseKey::SaddleTooLow,
        },
        above: DeviationGuidance {
            critical_impact: "Hip rocking and hamstring strain on every stroke",
            impact: "Slight overreach at the bottom of the stroke",
            exercise: ExerciseKey::SaddleTooHigh,
        },
        in_range_impact: "Efficient power transfer through the pedal stroke",
    },
    AreaGuidance {
        area: "hip",
        band: SeverityBand::with_percents(40.0, 70.0, 30.0, 20.0),
        below: DeviationGuidance {
            critical_impact: "Restricted breathing and compressed hip flexors",
            impact: "Hip flexors work in a shortened position",
            exercise: ExerciseKey::HipMobility,
        },
        above: DeviationGuidance {
            critical_impact: "Glutes barely engaged, large loss of power",
            impact: "Less glute engagement than an efficient position allows",
            exercise: ExerciseKey::HipEngagement,
        },
        in_range_impact: "Good balance of power and breathing room",
    },
    AreaGuidance {
        area: "back",
        band: SeverityBand::with_percents(35.0, 50.0, 30.0, 20.0),
        below: DeviationGuidance {
            critical_impact: "Large aerodynamic penalty at speed",
            impact: "Some aerodynamic drag in exchange for comfort",
            exercise: ExerciseKey::AeroPosition,
        },
        above: DeviationGuidance {
            critical_impact: "High lower back and neck strain on longer rides",
            impact: "Extra load on the lower back and neck",
            exercise: ExerciseKey::BackRelief,
        },
        in_range_impact: "Sustainable aerodynamic position",
    },
    AreaGuidance {
        area: "elbow",
        band: SeverityBand::with_percents(140.0, 170.0, 25.0, 15.0),
        below: DeviationGuidance {
            critical_impact: "Cramped cockpit loading the shoulders and wrists",
            impact: "Reach slightly short for relaxed arms",
            exercise: ExerciseKey::ReachExtension,
        },
        above: DeviationGuidance {
            critical_impact: "Road shock goes straight into the shoulders and neck",
            impact: "Less shock absorption through the arms",
            exercise: ExerciseKey::ElbowBend,
        },
        in_range_impact: "Arms absorb road vibration well",
    },
];

/// Running-form grading table
pub const RUNNING_GUIDANCE: &[AreaGuidance] = &[
    AreaGuidance {
        area: "body_lean",
        band: SeverityBand::with_percents(5.0, 12.0, 40.0, 25.0),
        below: DeviationGuidance {
            critical_impact: "Braking forces on every step and wasted momentum",
            impact: "Slight braking effect on each landing",
            exercise: ExerciseKey::ForwardLean,
        },
        above: DeviationGuidance {
            critical_impact: "High lower back load and risk of tripping forward",
            impact: "Extra load on the lower back",
            exercise: ExerciseKey::PostureControl,
        },
        in_range_impact: "Gravity assists forward momentum",
    },
    AreaGuidance {
        area: "knee_lift",
        band: SeverityBand::with_percents(100.0, 140.0, 30.0, 20.0),
        below: DeviationGuidance {
            critical_impact: "Very high energy cost per stride",
            impact: "More vertical motion than the pace needs",
            exercise: ExerciseKey::RelaxedStride,
        },
        above: DeviationGuidance {
            critical_impact: "Shuffling stride with greatly reduced stride length",
            impact: "Shorter stride and reduced propulsion",
            exercise: ExerciseKey::KneeDrive,
        },
        in_range_impact: "Efficient stride length and turnover",
    },
    AreaGuidance {
        area: "hip_extension",
        band: SeverityBand::with_percents(160.0, 180.0, 15.0, 10.0),
        below: DeviationGuidance {
            critical_impact: "Weak push-off that overloads the hamstrings",
            impact: "Propulsion is left on the ground at toe-off",
            exercise: ExerciseKey::HipExtension,
        },
        above: DeviationGuidance {
            critical_impact: "Lumbar hyperextension at toe-off",
            impact: "Lower back arches at toe-off",
            exercise: ExerciseKey::PostureControl,
        },
        in_range_impact: "Full push-off from the hips",
    },
    AreaGuidance {
        area: "arm_swing",
        band: SeverityBand::with_percents(80.0, 110.0, 30.0, 20.0),
        below: DeviationGuidance {
            critical_impact: "Tense shoulders that shorten the stride",
            impact: "Some tension carried in the shoulders",
            exercise: ExerciseKey::ArmRelaxation,
        },
        above: DeviationGuidance {
            critical_impact: "Long lever arms that slow cadence",
            impact: "Arm swing slightly out of rhythm with the legs",
            exercise: ExerciseKey::ArmCarriage,
        },
        in_range_impact: "Arms balance the leg drive",
    },
];

/// Row of `table` for `area`
#[must_use]
pub fn guidance_for<'a>(table: &'a [AreaGuidance], area: &FormArea) -> Option<&'a AreaGuidance> {
    table.iter().find(|row| row.area == area.as_str())
}

/// Optimal band of an area from either sport's table
#[must_use]
pub fn optimal_band(area: &FormArea) -> Option<SeverityBand> {
    guidance_for(BIKE_FIT_GUIDANCE, area)
        .or_else(|| guidance_for(RUNNING_GUIDANCE, area))
        .map(|row| row.band)
}

/// Grade one recommendation
#[must_use]
pub fn enhance_recommendation(
    recommendation: &Recommendation,
    table: &[AreaGuidance],
) -> EnhancedRecommendation {
    let assessed = recommendation
        .angle
        .zip(guidance_for(table, &recommendation.area))
        .map(|(value, row)| row.assess(value));

    let (severity, impact, exercise) = assessed.unwrap_or((Severity::Minor, GENERAL_IMPACT, None));

    EnhancedRecommendation {
        recommendation: recommendation.clone(),
        severity,
        impact: impact.to_owned(),
        drills: exercise
            .map(|key| drills(key).iter().map(|&d| d.to_owned()).collect())
            .unwrap_or_default(),
        priority_score: severity.priority_score(),
    }
}

/// Grade every recommendation and sort by descending priority
///
/// The sort is stable, so equal priorities keep their input order.
#[must_use]
pub fn enhance_recommendations(
    recommendations: &[Recommendation],
    table: &[AreaGuidance],
) -> Vec<EnhancedRecommendation> {
    let mut enhanced: Vec<EnhancedRecommendation> = recommendations
        .iter()
        .map(|rec| enhance_recommendation(rec, table))
        .collect();
    enhanced.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));
    enhanced
}

/// Enhance the rule hits of any analysis against `table`
#[must_use]
pub fn enhance_analysis<A: FormAnalysis>(
    analysis: Option<&A>,
    table: &[AreaGuidance],
) -> Vec<EnhancedRecommendation> {
    analysis.map_or_else(Vec::new, |a| {
        enhance_recommendations(a.recommendations(), table)
    })
}

/// Enhance a bike-fit analysis; empty for a missing analysis
#[must_use]
pub fn enhance_bike_fit_recommendations(
    analysis: Option<&BikeFitAnalysis>,
) -> Vec<EnhancedRecommendation> {
    enhance_analysis(analysis, BIKE_FIT_GUIDANCE)
}

/// Enhance a running-form analysis; empty for a missing analysis
#[must_use]
pub fn enhance_running_recommendations(
    analysis: Option<&RunningFormAnalysis>,
) -> Vec<EnhancedRecommendation> {
    enhance_analysis(analysis, RUNNING_GUIDANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::models::{BikeFitAngles, BodySide, OverallRating, RecommendationType};

    fn bike_analysis(recommendations: Vec<Recommendation>) -> BikeFitAnalysis {
        BikeFitAnalysis {
            angles: BikeFitAngles::default(),
            recommendations,
            overall: OverallRating::Good,
            side: BodySide::Left,
            confidence: None,
        }
    }

    #[test]
    fn test_missing_or_empty_analysis_yields_nothing() {
        assert!(enhance_bike_fit_recommendations(None).is_empty());
        assert!(enhance_running_recommendations(None).is_empty());
        assert!(enhance_bike_fit_recommendations(Some(&bike_analysis(Vec::new()))).is_empty());
    }

    #[test]
    fn test_output_is_sorted_by_priority() {
        let analysis = bike_analysis(vec![
            Recommendation::success(FormArea::Knee, "ok", 150.0),
            Recommendation::warning(FormArea::Hip, "closed", 34.0),
            Recommendation::warning(FormArea::Knee, "too bent", 85.0),
        ]);
        let enhanced = enhance_bike_fit_recommendations(Some(&analysis));
        let scores: Vec<u8> = enhanced.iter().map(|e| e.priority_score).collect();
        assert_eq!(scores, vec![3, 2, 1]);
        assert_eq!(enhanced[0].message(), "too bent");
        assert_eq!(enhanced[0].first_drill(), drills(ExerciseKey::SaddleTooLow).first().copied());
    }

    #[test]
    fn test_critical_and_non_critical_wording_differ() {
        let row = guidance_for(BIKE_FIT_GUIDANCE, &FormArea::Knee).unwrap();
        let (critical, critical_impact, _) = row.assess(100.0);
        let (moderate, impact, _) = row.assess(136.0);
        assert_eq!(critical, Severity::Critical);
        assert_eq!(moderate, Severity::Moderate);
        assert_ne!(critical_impact, impact);
    }

    #[test]
    fn test_in_range_has_no_drills() {
        let enhanced = enhance_recommendation(
            &Recommendation::success(FormArea::Knee, "ok", 150.0),
            BIKE_FIT_GUIDANCE,
        );
        assert_eq!(enhanced.severity, Severity::Minor);
        assert!(enhanced.drills.is_empty());
    }

    #[test]
    fn test_unknown_area_or_missing_angle_is_minor_without_drills() {
        let unknown = Recommendation::warning(FormArea::Other("cadence".into()), "slow", 60.0);
        let no_angle = Recommendation::new(
            FormArea::FootStrike,
            RecommendationType::Warning,
            "Overstriding",
            None,
        );
        for rec in [unknown, no_angle] {
            let enhanced = enhance_recommendation(&rec, RUNNING_GUIDANCE);
            assert_eq!(enhanced.severity, Severity::Minor);
            assert_eq!(enhanced.priority_score, 1);
            assert!(enhanced.drills.is_empty());
        }
    }

    #[test]
    fn test_equal_priorities_keep_input_order() {
        let recs = vec![
            Recommendation::success(FormArea::BodyLean, "first", 8.0),
            Recommendation::success(FormArea::KneeLift, "second", 120.0),
        ];
        let enhanced = enhance_recommendations(&recs, RUNNING_GUIDANCE);
        assert_eq!(enhanced[0].message(), "first");
        assert_eq!(enhanced[1].message(), "second");
    }

    #[test]
    fn test_optimal_band_covers_both_sports() {
        assert!(optimal_band(&FormArea::Back).is_some());
        assert!(optimal_band(&FormArea::ArmSwing).is_some());
        assert!(optimal_band(&FormArea::FootStrike).is_none());
    }
}
