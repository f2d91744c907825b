//! JSON views of analysis results, rounded for display

use serde::Serialize;

use crate::diagnosis::Issue;
use crate::metrics::{ComparisonResult, Histogram, ImageMetrics};

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Brightness block of a [`MetricsReport`]
#[derive(Debug, Clone, Serialize)]
pub struct BrightnessReport {
    pub mean: f64,
    pub std: f64,
    pub min: u8,
    pub max: u8,
}

/// Image dimensions
#[derive(Debug, Clone, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Serializable view of [`ImageMetrics`]
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub brightness: BrightnessReport,
    pub contrast_ratio: f64,
    pub color_temp: f64,
    pub saturation_mean: f64,
    pub histogram: Histogram,
    pub dimensions: Dimensions,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<Issue>>,
}

impl MetricsReport {
    /// Attach a diagnosis to the report
    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = Some(issues);
        self
    }
}

impl From<&ImageMetrics> for MetricsReport {
    fn from(m: &ImageMetrics) -> Self {
        Self {
            brightness: BrightnessReport {
                mean: round_to(m.brightness_mean, 2),
                std: round_to(m.brightness_std, 2),
                min: m.brightness_min,
                max: m.brightness_max,
            },
            contrast_ratio: round_to(m.contrast_ratio, 2),
            color_temp: round_to(m.color_temp, 3),
            saturation_mean: round_to(m.saturation_mean, 3),
            histogram: m.histogram,
            dimensions: Dimensions {
                width: m.width,
                height: m.height,
            },
            path: m.path.clone(),
            issues: None,
        }
    }
}

/// Differences block of a [`ComparisonReport`]
#[derive(Debug, Clone, Serialize)]
pub struct DifferencesReport {
    pub brightness: f64,
    pub contrast: f64,
    pub color_temp: f64,
    pub saturation: f64,
}

/// Serializable view of [`ComparisonResult`]
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub path_a: String,
    pub path_b: String,
    pub differences: DifferencesReport,
    pub histogram_correlation: f64,
}

impl From<&ComparisonResult> for ComparisonReport {
    fn from(c: &ComparisonResult) -> Self {
        Self {
            path_a: c.path_a.clone(),
            path_b: c.path_b.clone(),
            differences: DifferencesReport {
                brightness: round_to(c.brightness_diff, 2),
                contrast: round_to(c.contrast_diff, 2),
                color_temp: round_to(c.color_temp_diff, 3),
                saturation: round_to(c.saturation_diff, 3),
            },
            histogram_correlation: round_to(c.histogram_correlation, 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::HISTOGRAM_BUCKETS;

    #[test]
    fn test_metrics_report_shape() {
        let mut histogram = [0; HISTOGRAM_BUCKETS];
        histogram[4] = 1;
        let metrics = ImageMetrics {
            brightness_mean: 76.245,
            brightness_std: 0.0,
            brightness_min: 76,
            brightness_max: 76,
            contrast_ratio: 1.0,
            color_temp: 0.0,
            saturation_mean: 1.0,
            histogram,
            width: 1,
            height: 1,
            path: "red.png".into(),
        };

        let value = serde_json::to_value(MetricsReport::from(&metrics)).unwrap();
        assert_eq!(value["brightness"]["min"], 76);
        assert_eq!(value["dimensions"]["width"], 1);
        assert_eq!(value["histogram"][4], 1);
        assert_eq!(value["path"], "red.png");
        assert!(value.get("issues").is_none());

        let mean = value["brightness"]["mean"].as_f64().unwrap();
        assert!((mean - 76.25).abs() < 0.011);
    }

    #[test]
    fn test_comparison_report_rounding() {
        let result = ComparisonResult {
            path_a: "a.png".into(),
            path_b: "b.png".into(),
            brightness_diff: -12.3456,
            contrast_diff: 0.0,
            color_temp_diff: 0.12345,
            saturation_diff: -0.0004,
            histogram_correlation: 0.99987,
        };
        let report = ComparisonReport::from(&result);
        assert_eq!(report.differences.brightness, -12.35);
        assert_eq!(report.differences.color_temp, 0.123);
        assert_eq!(report.histogram_correlation, 1.0);
    }
}
