//! Threshold-based diagnosis of a single metric set

use frame_probe_core::{Diagnosis, DiagnosisThresholds, HISTOGRAM_BUCKETS, ImageMetrics, Issue};

/// Diagnose with the default thresholds
pub fn diagnose(metrics: &ImageMetrics) -> Diagnosis {
    diagnose_with(metrics, &DiagnosisThresholds::default())
}

/// Diagnose with custom thresholds
///
/// Rules run in a fixed order. Exposure is one chain (underexposed, dark,
/// overexposed, bright) and color cast another, so each emits at most one
/// issue.
pub fn diagnose_with(metrics: &ImageMetrics, t: &DiagnosisThresholds) -> Diagnosis {
    let mut issues = Vec::new();
    let mean = metrics.brightness_mean;

    if mean < t.underexposed_below {
        issues.push(Issue::Underexposed);
    } else if mean < t.dark_below {
        issues.push(Issue::Dark);
    } else if mean > t.overexposed_above {
        issues.push(Issue::Overexposed);
    } else if mean > t.bright_above {
        issues.push(Issue::Bright);
    }

    if metrics.brightness_std < t.low_contrast_std_below {
        issues.push(Issue::LowContrast);
    }
    if metrics.contrast_ratio > t.high_contrast_ratio_above {
        issues.push(Issue::HighContrast);
    }

    if metrics.saturation_mean < t.desaturated_below {
        issues.push(Issue::Desaturated);
    }

    if metrics.color_temp < t.very_warm_below {
        issues.push(Issue::VeryWarm);
    } else if metrics.color_temp > t.very_cool_above {
        issues.push(Issue::VeryCool);
    }

    let total = metrics.total_pixels();
    if total > 0 {
        let shadow = metrics.histogram[0] as f64 / total as f64;
        let highlight = metrics.histogram[HISTOGRAM_BUCKETS - 1] as f64 / total as f64;

        if shadow > t.clipping_share_above {
            issues.push(Issue::ShadowClipping {
                percent: shadow * 100.0,
            });
        }
        if highlight > t.clipping_share_above {
            issues.push(Issue::HighlightClipping {
                percent: highlight * 100.0,
            });
        }
    }

    issues
}
