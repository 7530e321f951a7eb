// ABOUTME: Async orchestration from frame sampling through pose detection to the final report
// ABOUTME: FrameSource and PoseDetector traits are the seams to video decoding and the pose model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Video analysis pipeline.
//!
//! Frames are requested one at a time in temporal order. Each detection is
//! bounded by the configured timeout; a failed, empty, timed-out, or
//! low-confidence detection drops that frame and the run carries on. A frame
//! source error fails the whole run. Per-frame analysis is pure and runs in
//! parallel with rayon, collected back in temporal order before aggregation.

#![allow(clippy::cast_precision_loss)] // Safe: frame counts are small

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use formcheck_core::config::{AnalysisConfig, ConfidenceThresholds};
use formcheck_core::errors::{AppError, AppResult};
use formcheck_core::models::{
    Asymmetry, BikeAngle, BikeFitAnalysis, DetailedMetrics, EnhancedRecommendation, FormAnalysis,
    IssueMarker, Pose, RunningAngle, RunningFormAnalysis, Sport, SportAnalysis, SportDetection,
};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::bike_fit::analyze_bike_fit;
use crate::interpolation::TimedPose;
use crate::recommendation_enhancer::{
    enhance_bike_fit_recommendations, enhance_running_recommendations,
};
use crate::running_form::analyze_running_form;
use crate::sport_classifier::{
    decide, extract_features, majority_vote, score_features, SportScores,
};
use crate::statistics::{calculate_asymmetry, calculate_detailed_metrics, combine_analyses, KeyOf};
use crate::summary::{generate_detailed_summary, DetailedSummary};
use crate::timeline::{generate_issue_markers, FrameAnalysis};

/// Random-access source of decoded video frames
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Decoded frame handed to the detector
    type Frame: Send + Sync;

    /// Video length in seconds
    fn duration_secs(&self) -> f64;

    /// Seek to `time_secs` and decode the frame there
    async fn frame_at(&self, time_secs: f64) -> AppResult<Self::Frame>;
}

/// Opaque pose-estimation capability
#[async_trait]
pub trait PoseDetector<F: Send + Sync>: Send + Sync {
    /// Load the model; called once before any detection
    async fn warm_up(&self) -> AppResult<()> {
        Ok(())
    }

    /// Estimate the pose in one frame; `None` when nobody is visible
    async fn detect(&self, frame: &F) -> AppResult<Option<Pose>>;
}

#[async_trait]
impl<T: FrameSource> FrameSource for Arc<T> {
    type Frame = T::Frame;

    fn duration_secs(&self) -> f64 {
        (**self).duration_secs()
    }

    async fn frame_at(&self, time_secs: f64) -> AppResult<Self::Frame> {
        (**self).frame_at(time_secs).await
    }
}

#[async_trait]
impl<F, T> PoseDetector<F> for Arc<T>
where
    F: Send + Sync,
    T: PoseDetector<F>,
{
    async fn warm_up(&self) -> AppResult<()> {
        (**self).warm_up().await
    }

    async fn detect(&self, frame: &F) -> AppResult<Option<Pose>> {
        (**self).detect(frame).await
    }
}

/// Evenly spaced sample times, excluding the very start and end
#[must_use]
pub fn sample_times(duration_secs: f64, count: usize) -> Vec<f64> {
    let slots = count as f64 + 1.0;
    (1..=count)
        .map(|i| duration_secs * i as f64 / slots)
        .collect()
}

fn validated_duration<S: FrameSource>(source: &S) -> AppResult<f64> {
    let duration = source.duration_secs();
    if !duration.is_finite() || duration <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "Video duration must be positive, got {duration}"
        )));
    }
    Ok(duration)
}

/// Detect the pose at one sample time
///
/// Returns `Ok(None)` for any per-frame detection problem. Only a frame
/// source failure is an error.
async fn detect_frame<S, D>(
    source: &S,
    detector: &D,
    time_secs: f64,
    config: &AnalysisConfig,
) -> AppResult<Option<Pose>>
where
    S: FrameSource,
    D: PoseDetector<S::Frame>,
{
    let frame = source
        .frame_at(time_secs)
        .await
        .map_err(|e| e.with_frame_time(time_secs))?;

    match timeout(config.sampling.frame_timeout(), detector.detect(&frame)).await {
        Ok(Ok(Some(pose))) if pose.score > config.confidence.min_pose_score => Ok(Some(pose)),
        Ok(Ok(Some(pose))) => {
            debug!(time_secs, score = pose.score, "Skipping low-confidence pose");
            Ok(None)
        }
        Ok(Ok(None)) => {
            debug!(time_secs, "No pose detected in frame");
            Ok(None)
        }
        Ok(Err(e)) => {
            warn!(time_secs, error = %e, "Pose detection failed, skipping frame");
            Ok(None)
        }
        Err(_) => {
            warn!(
                time_secs,
                timeout_ms = config.sampling.frame_timeout_ms,
                "Pose detection timed out, skipping frame"
            );
            Ok(None)
        }
    }
}

async fn sample_poses<S, D>(
    source: &S,
    detector: &D,
    count: usize,
    config: &AnalysisConfig,
) -> AppResult<Vec<TimedPose>>
where
    S: FrameSource,
    D: PoseDetector<S::Frame>,
{
    let duration = validated_duration(source)?;
    let mut poses = Vec::with_capacity(count);
    for time_secs in sample_times(duration, count) {
        if let Some(pose) = detect_frame(source, detector, time_secs, config).await? {
            poses.push(TimedPose::new(time_secs, pose));
        }
    }
    Ok(poses)
}

/// Classifier outcome for one sampled frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameClassification {
    /// Video time in seconds
    pub time_secs: f64,
    /// Whole-pose confidence, when a usable pose was found
    pub pose_score: Option<f64>,
    /// Points per sport, when the frame had confident hips and knees
    pub scores: Option<SportScores>,
    /// Per-frame decision
    pub sport: Option<Sport>,
}

/// Classify each frame of the sport-detection sample
///
/// # Errors
///
/// Returns an error when the video has no duration or a frame cannot be read
pub async fn classify_frames<S, D>(
    source: &S,
    detector: &D,
    config: &AnalysisConfig,
) -> AppResult<Vec<FrameClassification>>
where
    S: FrameSource,
    D: PoseDetector<S::Frame>,
{
    let duration = validated_duration(source)?;
    let mut classifications = Vec::with_capacity(config.sampling.sport_detection_frames);

    for time_secs in sample_times(duration, config.sampling.sport_detection_frames) {
        let pose = detect_frame(source, detector, time_secs, config).await?;
        let scores = pose.as_ref().and_then(|pose| {
            extract_features(
                pose,
                config.confidence.classification,
                config.classifier.horizontal_factor,
            )
            .map(|features| score_features(&features, &config.classifier))
        });
        classifications.push(FrameClassification {
            time_secs,
            pose_score: pose.as_ref().map(|p| p.score),
            scores,
            sport: scores.and_then(|s| decide(s, &config.classifier.decision)),
        });
    }

    Ok(classifications)
}

async fn vote_on_sport<S, D>(
    source: &S,
    detector: &D,
    config: &AnalysisConfig,
) -> AppResult<SportDetection>
where
    S: FrameSource,
    D: PoseDetector<S::Frame>,
{
    let votes: Vec<Option<Sport>> = classify_frames(source, detector, config)
        .await?
        .into_iter()
        .map(|c| c.sport)
        .collect();
    let detection = majority_vote(&votes);
    info!(
        sport = %detection,
        frames_sampled = votes.len(),
        frames_voting = votes.iter().flatten().count(),
        "Sport detection complete"
    );
    Ok(detection)
}

/// Guess the sport from a small frame sample
///
/// A detector that fails to warm up yields `Unknown`, as does a sample with
/// no confident classification.
///
/// # Errors
///
/// Returns an error when the video has no duration or a frame cannot be read
pub async fn detect_sport_type<S, D>(
    source: &S,
    detector: &D,
    config: &AnalysisConfig,
) -> AppResult<SportDetection>
where
    S: FrameSource,
    D: PoseDetector<S::Frame>,
{
    if let Err(e) = detector.warm_up().await {
        warn!(error = %e, "Pose detector unavailable, sport unknown");
        return Ok(SportDetection::Unknown);
    }
    vote_on_sport(source, detector, config).await
}

/// Sport-specific steps of the pipeline
pub trait SportAnalyzer: FormAnalysis + Serialize {
    /// Analyze one pose
    fn analyze_pose(pose: &Pose, thresholds: &ConfidenceThresholds) -> Option<Self>;

    /// Grade the recommendations of the combined analysis
    fn enhance(combined: &Self) -> Vec<EnhancedRecommendation>;

    /// Wrap into the sport-tagged analysis
    fn into_sport_analysis(self) -> SportAnalysis;

    /// Wrap per-angle statistics
    fn wrap_metrics(metrics: DetailedMetrics<KeyOf<Self>>) -> SportMetrics;
}

impl SportAnalyzer for BikeFitAnalysis {
    fn analyze_pose(pose: &Pose, thresholds: &ConfidenceThresholds) -> Option<Self> {
        analyze_bike_fit(Some(pose), thresholds)
    }

    fn enhance(combined: &Self) -> Vec<EnhancedRecommendation> {
        enhance_bike_fit_recommendations(Some(combined))
    }

    fn into_sport_analysis(self) -> SportAnalysis {
        SportAnalysis::Cycling(self)
    }

    fn wrap_metrics(metrics: DetailedMetrics<BikeAngle>) -> SportMetrics {
        SportMetrics::Cycling(metrics)
    }
}

impl SportAnalyzer for RunningFormAnalysis {
    fn analyze_pose(pose: &Pose, thresholds: &ConfidenceThresholds) -> Option<Self> {
        analyze_running_form(Some(pose), thresholds)
    }

    fn enhance(combined: &Self) -> Vec<EnhancedRecommendation> {
        enhance_running_recommendations(Some(combined))
    }

    fn into_sport_analysis(self) -> SportAnalysis {
        SportAnalysis::Running(self)
    }

    fn wrap_metrics(metrics: DetailedMetrics<RunningAngle>) -> SportMetrics {
        SportMetrics::Running(metrics)
    }
}

/// Per-angle statistics of either sport
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SportMetrics {
    /// Cycling angle statistics
    Cycling(DetailedMetrics<BikeAngle>),
    /// Running angle statistics
    Running(DetailedMetrics<RunningAngle>),
}

/// Complete result of one video analysis
#[derive(Debug, Clone, Serialize)]
pub struct VideoAnalysisReport {
    /// Unique id of this run
    pub analysis_id: Uuid,
    /// When the run finished
    pub analyzed_at: DateTime<Utc>,
    /// Sport the video was analyzed as
    pub sport: Sport,
    /// Frames requested from the video
    pub frames_sampled: usize,
    /// Frames that produced a usable pose
    pub frames_analyzed: usize,
    /// Mean whole-pose confidence of the analyzed frames
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_confidence: Option<f64>,
    /// Per-angle averages over all analyzed frames
    pub combined: SportAnalysis,
    /// Per-angle distribution statistics
    pub metrics: Option<SportMetrics>,
    /// Left/right comparison
    pub asymmetry: Option<Asymmetry>,
    /// Graded recommendations, highest priority first
    pub recommendations: Vec<EnhancedRecommendation>,
    /// Narrative report
    pub summary: DetailedSummary,
    /// Issues projected onto the video timeline
    pub markers: Vec<IssueMarker>,
}

/// Aggregate analyzed poses into a report
///
/// # Errors
///
/// Returns `NoSubjectDetected` when no pose yields an analysis
pub fn build_report<A: SportAnalyzer>(
    analysis_id: Uuid,
    frames_sampled: usize,
    poses: &[TimedPose],
    thresholds: &ConfidenceThresholds,
) -> AppResult<VideoAnalysisReport> {
    let frames: Vec<FrameAnalysis<A>> = poses
        .par_iter()
        .filter_map(|timed| {
            A::analyze_pose(&timed.pose, thresholds).map(|analysis| FrameAnalysis {
                time_secs: timed.time_secs,
                analysis,
            })
        })
        .collect();

    if frames.is_empty() {
        return Err(AppError::no_subject_detected(frames_sampled).with_analysis_id(analysis_id));
    }

    let analyses: Vec<A> = frames.iter().map(|f| f.analysis.clone()).collect();
    let combined = combine_analyses(&analyses)?;
    let confidences: Vec<f64> = analyses.iter().filter_map(A::confidence).collect();
    let mean_confidence = (!confidences.is_empty())
        .then(|| confidences.iter().sum::<f64>() / confidences.len() as f64);
    let metrics = calculate_detailed_metrics(&analyses);
    let asymmetry = calculate_asymmetry(&analyses);
    let recommendations = A::enhance(&combined);
    let summary = generate_detailed_summary(
        &recommendations,
        combined.angles(),
        metrics.as_ref(),
        asymmetry.as_ref(),
        combined.overall(),
        A::SPORT,
    );
    let markers = generate_issue_markers(&frames, &recommendations);

    Ok(VideoAnalysisReport {
        analysis_id,
        analyzed_at: Utc::now(),
        sport: A::SPORT,
        frames_sampled,
        frames_analyzed: frames.len(),
        mean_confidence,
        combined: combined.into_sport_analysis(),
        metrics: metrics.map(A::wrap_metrics),
        asymmetry,
        recommendations,
        summary,
        markers,
    })
}

/// Drives sport detection and form analysis for one video
pub struct VideoAnalyzer<S, D> {
    source: S,
    detector: D,
    config: AnalysisConfig,
}

impl<S, D> VideoAnalyzer<S, D>
where
    S: FrameSource,
    D: PoseDetector<S::Frame>,
{
    /// Create an analyzer
    #[must_use]
    pub const fn new(source: S, detector: D, config: AnalysisConfig) -> Self {
        Self {
            source,
            detector,
            config,
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Guess the sport of the video
    ///
    /// # Errors
    ///
    /// Returns an error when the video has no duration or a frame cannot be read
    pub async fn detect_sport(&self) -> AppResult<SportDetection> {
        detect_sport_type(&self.source, &self.detector, &self.config).await
    }

    /// Analyze the video, detecting the sport first when `sport` is `None`
    ///
    /// # Errors
    ///
    /// - `DetectorUnavailable` when the pose detector cannot be loaded
    /// - `NoSubjectDetected` when no sampled frame yields a usable pose, or
    ///   the sport cannot be detected
    /// - `FrameUnavailable` (or the source's own error) when the video stops
    ///   yielding frames
    pub async fn analyze(&self, sport: Option<Sport>) -> AppResult<VideoAnalysisReport> {
        let analysis_id = Uuid::new_v4();

        self.detector.warm_up().await.map_err(|e| {
            AppError::detector_unavailable(e.message.clone())
                .with_analysis_id(analysis_id)
                .with_source(e)
        })?;

        let sport = match sport {
            Some(sport) => sport,
            None => vote_on_sport(&self.source, &self.detector, &self.config)
                .await
                .map_err(|e| e.with_analysis_id(analysis_id))?
                .sport()
                .ok_or_else(|| {
                    AppError::no_subject_detected(self.config.sampling.sport_detection_frames)
                        .with_analysis_id(analysis_id)
                        .with_details(json!({ "stage": "sport_detection" }))
                })?,
        };

        let frames_sampled = self.config.sampling.analysis_frames;
        info!(%analysis_id, %sport, frames_sampled, "Starting video analysis");

        let poses = sample_poses(&self.source, &self.detector, frames_sampled, &self.config)
            .await
            .map_err(|e| e.with_analysis_id(analysis_id))?;

        let thresholds = &self.config.confidence;
        let report = match sport {
            Sport::Cycling => {
                build_report::<BikeFitAnalysis>(analysis_id, frames_sampled, &poses, thresholds)
            }
            Sport::Running => {
                build_report::<RunningFormAnalysis>(analysis_id, frames_sampled, &poses, thresholds)
            }
        }?;

        info!(
            %analysis_id,
            %sport,
            frames_analyzed = report.frames_analyzed,
            overall = report.combined.overall().as_str(),
            rule_hits = report.combined.recommendations().len(),
            recommendations = report.recommendations.len(),
            "Video analysis complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::models::{Keypoint, KeypointName};
    use formcheck_core::errors::ErrorCode;
    use std::time::Duration;
    use tokio::time::sleep;

    struct Clip {
        duration: f64,
        fail_after: Option<f64>,
    }

    #[async_trait]
    impl FrameSource for Clip {
        type Frame = f64;

        fn duration_secs(&self) -> f64 {
            self.duration
        }

        async fn frame_at(&self, time_secs: f64) -> AppResult<f64> {
            match self.fail_after {
                Some(limit) if time_secs > limit => {
                    Err(AppError::frame_unavailable("video removed"))
                }
                _ => Ok(time_secs),
            }
        }
    }

    enum Behaviour {
        Steady(Pose),
        FailWarmUp,
        Hang,
        Error,
    }

    struct FakeDetector(Behaviour);

    #[async_trait]
    impl PoseDetector<f64> for FakeDetector {
        async fn warm_up(&self) -> AppResult<()> {
            match self.0 {
                Behaviour::FailWarmUp => Err(AppError::internal("model missing")),
                _ => Ok(()),
            }
        }

        async fn detect(&self, _frame: &f64) -> AppResult<Option<Pose>> {
            match &self.0 {
                Behaviour::Steady(pose) => Ok(Some(pose.clone())),
                Behaviour::Hang => {
                    sleep(Duration::from_secs(60)).await;
                    Ok(None)
                }
                Behaviour::Error | Behaviour::FailWarmUp => {
                    Err(AppError::detection_failed("inference error"))
                }
            }
        }
    }

    fn cyclist() -> Pose {
        let kp = |name, x, y| Keypoint::new(name, x, y, 0.9);
        Pose::new(
            vec![
                kp(KeypointName::LeftShoulder, 300.0, 200.0),
                kp(KeypointName::RightShoulder, 300.0, 205.0),
                kp(KeypointName::LeftElbow, 360.0, 250.0),
                kp(KeypointName::LeftWrist, 420.0, 270.0),
                kp(KeypointName::LeftHip, 150.0, 260.0),
                kp(KeypointName::RightHip, 150.0, 262.0),
                kp(KeypointName::LeftKnee, 220.0, 330.0),
                kp(KeypointName::RightKnee, 215.0, 340.0),
                kp(KeypointName::LeftAnkle, 200.0, 420.0),
                kp(KeypointName::RightAnkle, 205.0, 430.0),
            ],
            0.9,
        )
    }

    fn clip() -> Clip {
        Clip {
            duration: 12.0,
            fail_after: None,
        }
    }

    #[test]
    fn test_sample_times_exclude_ends() {
        assert_eq!(sample_times(6.0, 5), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(sample_times(6.0, 0).is_empty());
    }

    #[tokio::test]
    async fn test_detects_cycling() {
        let detector = FakeDetector(Behaviour::Steady(cyclist()));
        let detection = detect_sport_type(&clip(), &detector, &AnalysisConfig::default())
            .await
            .unwrap();
        assert_eq!(detection, SportDetection::Cycling);
    }

    #[tokio::test]
    async fn test_warm_up_failure_is_unknown_sport() {
        let detector = FakeDetector(Behaviour::FailWarmUp);
        let detection = detect_sport_type(&clip(), &detector, &AnalysisConfig::default())
            .await
            .unwrap();
        assert_eq!(detection, SportDetection::Unknown);
    }

    #[tokio::test]
    async fn test_low_confidence_poses_do_not_vote() {
        let mut pose = cyclist();
        pose.score = 0.3;
        let detector = FakeDetector(Behaviour::Steady(pose));
        let detection = detect_sport_type(&clip(), &detector, &AnalysisConfig::default())
            .await
            .unwrap();
        assert_eq!(detection, SportDetection::Unknown);
    }

    #[tokio::test]
    async fn test_analyze_produces_report() {
        let analyzer = VideoAnalyzer::new(
            clip(),
            FakeDetector(Behaviour::Steady(cyclist())),
            AnalysisConfig::default(),
        );
        let report = analyzer.analyze(None).await.unwrap();
        assert_eq!(report.sport, Sport::Cycling);
        assert_eq!(report.frames_sampled, 10);
        assert_eq!(report.frames_analyzed, 10);
        assert!(report.metrics.is_some());
        assert!(report
            .recommendations
            .windows(2)
            .all(|w| w[0].priority_score >= w[1].priority_score));
    }

    #[tokio::test]
    async fn test_detection_errors_are_swallowed() {
        let analyzer = VideoAnalyzer::new(
            clip(),
            FakeDetector(Behaviour::Error),
            AnalysisConfig::default(),
        );
        let err = analyzer.analyze(Some(Sport::Running)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoSubjectDetected);
        assert!(err.context.analysis_id.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeouts_are_swallowed() {
        let mut config = AnalysisConfig::default();
        config.sampling.analysis_frames = 2;
        config.sampling.frame_timeout_ms = 10;
        let analyzer = VideoAnalyzer::new(clip(), FakeDetector(Behaviour::Hang), config);
        let err = analyzer.analyze(Some(Sport::Cycling)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoSubjectDetected);
    }

    #[tokio::test]
    async fn test_missing_frames_fail_the_run() {
        let source = Clip {
            duration: 12.0,
            fail_after: Some(5.0),
        };
        let analyzer = VideoAnalyzer::new(
            source,
            FakeDetector(Behaviour::Steady(cyclist())),
            AnalysisConfig::default(),
        );
        let err = analyzer.analyze(Some(Sport::Cycling)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FrameUnavailable);
        assert!(err.context.frame_time_secs.is_some());
    }

    #[tokio::test]
    async fn test_detector_unavailable_fails_analysis() {
        let analyzer = VideoAnalyzer::new(
            clip(),
            FakeDetector(Behaviour::FailWarmUp),
            AnalysisConfig::default(),
        );
        let err = analyzer.analyze(Some(Sport::Cycling)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DetectorUnavailable);
    }
}
