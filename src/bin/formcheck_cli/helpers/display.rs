// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for formcheck-cli
// ABOUTME: Renders analysis reports, sport detection, and frame classifications as text

use formcheck::intelligence::pipeline::{FrameClassification, SportMetrics};
use formcheck::models::{AngleKey, AngleStatistics, Sport, SportDetection};
use formcheck::VideoAnalysisReport;

fn print_metric_rows<K: AngleKey>(metrics: &[(K, &AngleStatistics)]) {
    for (key, stats) in metrics {
        println!(
            "   {:<16} avg {:>4}  range {:>4}-{:<4} std {:>5.1}  consistency {:>3}",
            key.label(),
            stats.avg,
            stats.min,
            stats.max,
            stats.std_dev,
            stats.consistency
        );
    }
}

/// Display a full analysis report
pub fn display_report(report: &VideoAnalysisReport) {
    println!("\n{} FORM ANALYSIS", report.sport.as_str().to_uppercase());
    println!("{}", "=".repeat(72));
    println!("   Analysis ID: {}", report.analysis_id);
    println!(
        "   Analyzed: {}",
        report.analyzed_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "   Frames: {} analyzed of {} sampled",
        report.frames_analyzed, report.frames_sampled
    );
    if let Some(confidence) = report.mean_confidence {
        println!("   Pose confidence: {:.0}%", confidence * 100.0);
    }
    println!("   Overall: {}", report.combined.overall().as_str());

    println!("\n{}", report.summary.headline);

    if !report.summary.strengths.is_empty() {
        println!("\nStrengths:");
        for strength in &report.summary.strengths {
            println!("   + {strength}");
        }
    }

    if !report.summary.improvements.is_empty() {
        println!("\nImprovements:");
        for improvement in &report.summary.improvements {
            println!("   - {improvement}");
        }
    }

    println!("\nTop priority: {}", report.summary.top_priority);

    if !report.recommendations.is_empty() {
        println!("\nRecommendations:");
        println!("{}", "-".repeat(72));
        for rec in &report.recommendations {
            println!(
                "   [{:<8}] {}: {}",
                rec.severity.as_str(),
                rec.area().label(),
                rec.message()
            );
            println!("              {}", rec.impact);
            if let Some(drill) = rec.first_drill() {
                println!("              Drill: {drill}");
            }
        }
    }

    match &report.metrics {
        Some(SportMetrics::Cycling(metrics)) => {
            println!("\nAngle statistics:");
            let rows: Vec<_> = metrics.iter().map(|(k, v)| (*k, v)).collect();
            print_metric_rows(&rows);
        }
        Some(SportMetrics::Running(metrics)) => {
            println!("\nAngle statistics:");
            let rows: Vec<_> = metrics.iter().map(|(k, v)| (*k, v)).collect();
            print_metric_rows(&rows);
        }
        None => {}
    }

    if let Some(asymmetry) = &report.asymmetry {
        println!("\nLeft/right balance:");
        for (angle, entry) in asymmetry {
            println!(
                "   {:<16} L {:>6.1}  R {:>6.1}  diff {:>5.1}%  {:?}",
                angle.label(),
                entry.left,
                entry.right,
                entry.percent_diff,
                entry.status
            );
        }
    }

    if !report.markers.is_empty() {
        println!("\nTimeline:");
        for marker in &report.markers {
            println!(
                "   {:>7.2}s  [{}] {}",
                marker.time_secs,
                marker.severity.as_str(),
                marker.message
            );
        }
    }
}

/// Display the sport detection outcome
pub fn display_detection(detection: SportDetection) {
    match detection.sport() {
        Some(sport) => println!("Detected sport: {sport}"),
        None => println!("Could not determine the sport from the sampled frames"),
    }
}

/// Display per-frame classifier results as a table
pub fn display_classifications(classifications: &[FrameClassification]) {
    println!(
        "{:>8}  {:>6}  {:>7}  {:>7}  {}",
        "time", "score", "cycling", "running", "vote"
    );
    println!("{}", "-".repeat(48));
    for frame in classifications {
        let score = frame
            .pose_score
            .map_or_else(|| "-".to_owned(), |s| format!("{s:.2}"));
        let (cycling, running) = frame.scores.map_or_else(
            || ("-".to_owned(), "-".to_owned()),
            |s| (s.cycling.to_string(), s.running.to_string()),
        );
        let vote = frame.sport.map_or("-", Sport::as_str);
        println!(
            "{:>7.2}s  {score:>6}  {cycling:>7}  {running:>7}  {vote}",
            frame.time_secs
        );
    }
}
