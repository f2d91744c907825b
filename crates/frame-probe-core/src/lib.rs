//! # frame-probe-core
//!
//! Core types for frame-probe screenshot analysis.
//!
//! This crate provides the types shared by the decoder, the analysis engine
//! and the tool surfaces:
//! - Decoded image representation
//! - Image metrics and comparison results
//! - Diagnosis issues and thresholds
//! - Rounded JSON reports
//! - Error taxonomy

pub mod diagnosis;
pub mod error;
pub mod image;
pub mod metrics;
pub mod report;

pub use diagnosis::{Diagnosis, DiagnosisThresholds, Issue};
pub use error::{FrameProbeError, Result, error_codes};
pub use image::{DecodedImage, Rgb};
pub use metrics::{ComparisonResult, HISTOGRAM_BUCKETS, Histogram, ImageMetrics};
pub use report::{ComparisonReport, MetricsReport};
