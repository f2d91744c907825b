//! Diagnosis types: issue tags and the thresholds that trigger them

use serde::{Deserialize, Serialize};
use std::fmt;

/// A visual issue detected from one set of metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Issue {
    Underexposed,
    Dark,
    Overexposed,
    Bright,
    LowContrast,
    HighContrast,
    Desaturated,
    VeryWarm,
    VeryCool,
    /// Share of pixels in the darkest bucket, as a percentage
    ShadowClipping { percent: f64 },
    /// Share of pixels in the brightest bucket, as a percentage
    HighlightClipping { percent: f64 },
}

impl Issue {
    /// Machine-readable tag
    pub fn tag(&self) -> &'static str {
        match self {
            Issue::Underexposed => "UNDEREXPOSED",
            Issue::Dark => "DARK",
            Issue::Overexposed => "OVEREXPOSED",
            Issue::Bright => "BRIGHT",
            Issue::LowContrast => "LOW_CONTRAST",
            Issue::HighContrast => "HIGH_CONTRAST",
            Issue::Desaturated => "DESATURATED",
            Issue::VeryWarm => "VERY_WARM",
            Issue::VeryCool => "VERY_COOL",
            Issue::ShadowClipping { .. } => "SHADOW_CLIPPING",
            Issue::HighlightClipping { .. } => "HIGHLIGHT_CLIPPING",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag();
        match self {
            Issue::Underexposed => write!(f, "{tag}: Image is very dark (mean < 30)"),
            Issue::Dark => write!(f, "{tag}: Image is darker than typical (mean < 60)"),
            Issue::Overexposed => write!(f, "{tag}: Image is very bright (mean > 220)"),
            Issue::Bright => write!(f, "{tag}: Image is brighter than typical (mean > 180)"),
            Issue::LowContrast => write!(f, "{tag}: Low dynamic range (std < 20)"),
            Issue::HighContrast => write!(f, "{tag}: Extreme contrast ratio (> 100x)"),
            Issue::Desaturated => write!(f, "{tag}: Very low color saturation"),
            Issue::VeryWarm => write!(f, "{tag}: Strong warm/red color cast"),
            Issue::VeryCool => write!(f, "{tag}: Strong cool/blue color cast"),
            Issue::ShadowClipping { percent } => {
                write!(f, "{tag}: {percent:.1}% pixels crushed")
            }
            Issue::HighlightClipping { percent } => {
                write!(f, "{tag}: {percent:.1}% pixels blown")
            }
        }
    }
}

impl Serialize for Issue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered issues for one image; recomputed on demand
pub type Diagnosis = Vec<Issue>;

/// Thresholds for each diagnosis rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisThresholds {
    /// Mean below this is `UNDEREXPOSED`
    pub underexposed_below: f64,
    /// Mean below this (and not underexposed) is `DARK`
    pub dark_below: f64,
    /// Mean above this is `OVEREXPOSED`
    pub overexposed_above: f64,
    /// Mean above this (and not overexposed) is `BRIGHT`
    pub bright_above: f64,
    /// Luminance std below this is `LOW_CONTRAST`
    pub low_contrast_std_below: f64,
    /// Contrast ratio above this is `HIGH_CONTRAST`
    pub high_contrast_ratio_above: f64,
    /// Mean saturation below this is `DESATURATED`
    pub desaturated_below: f64,
    /// Color temperature below this is `VERY_WARM`
    pub very_warm_below: f64,
    /// Color temperature above this is `VERY_COOL`
    pub very_cool_above: f64,
    /// Bucket share (0-1) above which the end buckets count as clipped
    pub clipping_share_above: f64,
}

impl Default for DiagnosisThresholds {
    fn default() -> Self {
        Self {
            underexposed_below: 30.0,
            dark_below: 60.0,
            overexposed_above: 220.0,
            bright_above: 180.0,
            low_contrast_std_below: 20.0,
            high_contrast_ratio_above: 100.0,
            desaturated_below: 0.1,
            very_warm_below: 0.3,
            very_cool_above: 0.7,
            clipping_share_above: 0.1,
        }
    }
}
