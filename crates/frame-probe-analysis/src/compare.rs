//! Pairwise comparison of two metric sets

use frame_probe_core::{ComparisonResult, HISTOGRAM_BUCKETS, Histogram, ImageMetrics};

/// Pearson correlation of two histograms
///
/// Returns 0 when either histogram is flat. The denominator is taken as
/// `sqrt(var_a * var_b)` so that a histogram compared with itself yields
/// exactly 1.0.
pub fn histogram_correlation(a: &Histogram, b: &Histogram) -> f64 {
    let n = HISTOGRAM_BUCKETS as f64;
    let mean_a = a.iter().map(|&v| v as f64).sum::<f64>() / n;
    let mean_b = b.iter().map(|&v| v as f64).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&ha, &hb) in a.iter().zip(b) {
        let da = ha as f64 - mean_a;
        let db = hb as f64 - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    if var_a > 0.0 && var_b > 0.0 {
        (cov / (var_a * var_b).sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Compare two metric sets; differences are `b - a`
pub fn compare_metrics(a: &ImageMetrics, b: &ImageMetrics) -> ComparisonResult {
    ComparisonResult {
        path_a: a.path.clone(),
        path_b: b.path.clone(),
        brightness_diff: b.brightness_mean - a.brightness_mean,
        contrast_diff: b.contrast_ratio - a.contrast_ratio,
        color_temp_diff: b.color_temp - a.color_temp,
        saturation_diff: b.saturation_mean - a.saturation_mean,
        histogram_correlation: histogram_correlation(&a.histogram, &b.histogram),
    }
}
