//! Text and JSON rendering for CLI output

use frame_probe_analysis::{AnalysisConfig, diagnose_with};
use frame_probe_core::{ComparisonResult, ImageMetrics, MetricsReport};
use std::fmt::Write;
use std::path::Path;

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Summary plus an `Issues:` block when the diagnosis is non-empty
pub fn metrics_text(metrics: &ImageMetrics, config: &AnalysisConfig) -> String {
    let mut out = metrics.summary();
    out.push('\n');

    let issues = diagnose_with(metrics, &config.thresholds);
    if !issues.is_empty() {
        out.push_str("\nIssues:\n");
        for issue in &issues {
            let _ = writeln!(out, "  - {}", issue);
        }
    }
    out
}

/// One `=== name ===` section per file
pub fn directory_text(results: &[ImageMetrics], config: &AnalysisConfig) -> String {
    let mut out = String::new();
    for (i, metrics) in results.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "=== {} ===", file_name(&metrics.path));
        out.push_str(&metrics_text(metrics, config));
    }
    out
}

pub fn comparison_text(result: &ComparisonResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Comparing: {} vs {}",
        file_name(&result.path_a),
        file_name(&result.path_b)
    );
    let _ = writeln!(out, "  Brightness: {:+.1}", result.brightness_diff);
    let _ = writeln!(out, "  Contrast: {:+.1}", result.contrast_diff);
    let _ = writeln!(out, "  Color temp: {:+.3}", result.color_temp_diff);
    let _ = writeln!(out, "  Saturation: {:+.3}", result.saturation_diff);
    let _ = writeln!(
        out,
        "  Histogram correlation: {:.3}",
        result.histogram_correlation
    );
    out
}

pub fn report_json(
    metrics: &ImageMetrics,
    diagnose: bool,
    config: &AnalysisConfig,
) -> MetricsReport {
    let report = MetricsReport::from(metrics);
    if diagnose {
        report.with_issues(diagnose_with(metrics, &config.thresholds))
    } else {
        report
    }
}

pub fn reports_json(
    results: &[ImageMetrics],
    diagnose: bool,
    config: &AnalysisConfig,
) -> Vec<MetricsReport> {
    results
        .iter()
        .map(|m| report_json(m, diagnose, config))
        .collect()
}
