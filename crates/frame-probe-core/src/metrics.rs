//! Metric types derived from a decoded image

use serde::{Deserialize, Serialize};

/// Number of luminance histogram buckets
pub const HISTOGRAM_BUCKETS: usize = 16;

/// Luminance histogram, pixel counts per 16-wide bucket
pub type Histogram = [u64; HISTOGRAM_BUCKETS];

/// Quantitative metrics extracted from a screenshot
///
/// Created once per decoded image and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetrics {
    /// Mean luminance (0-255)
    pub brightness_mean: f64,
    /// Population standard deviation of luminance
    pub brightness_std: f64,
    /// Darkest luminance, truncated
    pub brightness_min: u8,
    /// Brightest luminance, truncated
    pub brightness_max: u8,
    /// `max / max(min, 1)`, always >= 1
    pub contrast_ratio: f64,
    /// 0 = red dominant, 1 = blue dominant, 0.5 when undefined
    pub color_temp: f64,
    /// Mean HSV-style saturation (0-1)
    pub saturation_mean: f64,
    /// 16-bucket luminance histogram; sums to `width * height`
    pub histogram: Histogram,
    pub width: u32,
    pub height: u32,
    /// Where the pixels came from
    pub path: String,
}

impl ImageMetrics {
    /// Number of pixels the histogram accounts for
    pub fn total_pixels(&self) -> u64 {
        self.histogram.iter().sum()
    }

    /// Color temperature label used in summaries
    pub fn color_temp_label(&self) -> &'static str {
        if self.color_temp < 0.4 {
            "warm"
        } else if self.color_temp > 0.6 {
            "cool"
        } else {
            "neutral"
        }
    }

    /// Saturation label used in summaries
    pub fn saturation_label(&self) -> &'static str {
        if self.saturation_mean < 0.3 {
            "low"
        } else if self.saturation_mean > 0.6 {
            "high"
        } else {
            "medium"
        }
    }

    /// Human-readable multi-line summary
    pub fn summary(&self) -> String {
        [
            format!("Image: {}x{}", self.width, self.height),
            format!(
                "Brightness: {:.1} (std: {:.1})",
                self.brightness_mean, self.brightness_std
            ),
            format!(
                "Range: {}-{} (contrast: {:.1}x)",
                self.brightness_min, self.brightness_max, self.contrast_ratio
            ),
            format!("Color temp: {}", self.color_temp_label()),
            format!("Saturation: {}", self.saturation_label()),
        ]
        .join("\n")
    }
}

/// Signed differences between two images (`b - a`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub path_a: String,
    pub path_b: String,
    pub brightness_diff: f64,
    pub contrast_diff: f64,
    pub color_temp_diff: f64,
    pub saturation_diff: f64,
    /// Pearson correlation of the two histograms, 0 when either is flat
    pub histogram_correlation: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ImageMetrics {
        ImageMetrics {
            brightness_mean: 128.04,
            brightness_std: 42.0,
            brightness_min: 3,
            brightness_max: 250,
            contrast_ratio: 250.0 / 3.0,
            color_temp: 0.5,
            saturation_mean: 0.45,
            histogram: [1; HISTOGRAM_BUCKETS],
            width: 4,
            height: 4,
            path: "shot.png".into(),
        }
    }

    #[test]
    fn test_summary_lines() {
        let summary = sample().summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Image: 4x4");
        assert_eq!(lines[1], "Brightness: 128.0 (std: 42.0)");
        assert_eq!(lines[2], "Range: 3-250 (contrast: 83.3x)");
        assert_eq!(lines[3], "Color temp: neutral");
        assert_eq!(lines[4], "Saturation: medium");
    }

    #[test]
    fn test_labels() {
        let mut m = sample();
        m.color_temp = 0.2;
        m.saturation_mean = 0.1;
        assert_eq!(m.color_temp_label(), "warm");
        assert_eq!(m.saturation_label(), "low");

        m.color_temp = 0.9;
        m.saturation_mean = 0.9;
        assert_eq!(m.color_temp_label(), "cool");
        assert_eq!(m.saturation_label(), "high");
    }

    #[test]
    fn test_total_pixels() {
        assert_eq!(sample().total_pixels(), 16);
    }
}
