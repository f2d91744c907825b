//! # frame-probe-analysis
//!
//! Screenshot analysis engine.
//!
//! This crate provides:
//! - Metric extraction (brightness, contrast, color temperature, saturation, histogram)
//! - Pairwise comparison with histogram correlation
//! - Threshold-based diagnosis
//! - Directory batch runs, sequential or on the tokio blocking pool
//!
//! All single-file operations are synchronous and fail without partial
//! results.

pub mod batch;
pub mod compare;
pub mod config;
pub mod diagnose;
pub mod extract;

pub use batch::{
    BatchOutcome, SkippedFile, analyze_directory, analyze_directory_concurrent, png_files,
    run_batch,
};
pub use compare::{compare_metrics, histogram_correlation};
pub use config::AnalysisConfig;
pub use diagnose::{diagnose, diagnose_with};
pub use extract::extract_metrics;

use frame_probe_core::{ComparisonResult, FrameProbeError, ImageMetrics, Result};
use std::path::Path;
use tracing::debug;

/// Decode PNG bytes and extract metrics, tagging them with `path`
pub fn analyze_bytes(bytes: &[u8], path: impl Into<String>) -> Result<ImageMetrics> {
    let image = frame_probe_png::decode(bytes)?;
    extract_metrics(&image, path)
}

/// Read, decode and analyse one PNG file
pub fn analyze(path: impl AsRef<Path>) -> Result<ImageMetrics> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| FrameProbeError::io_at(path, e))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    analyze_bytes(&bytes, path.to_string_lossy())
}

/// Analyse two files and compare them; differences are `b - a`
pub fn compare(path_a: impl AsRef<Path>, path_b: impl AsRef<Path>) -> Result<ComparisonResult> {
    let a = analyze(path_a)?;
    let b = analyze(path_b)?;
    Ok(compare_metrics(&a, &b))
}

/// Result of analysing a path that may be a file or a directory
#[derive(Debug)]
pub enum PathAnalysis {
    File(ImageMetrics),
    Directory(BatchOutcome),
}

/// Analyse a file, or every PNG in a directory
///
/// Directories go through [`analyze_directory_concurrent`] with `workers`
/// tasks; a single file is decoded on the blocking pool.
pub async fn analyze_path(path: impl AsRef<Path>, workers: usize) -> Result<PathAnalysis> {
    let path = path.as_ref().to_path_buf();
    if path.is_dir() {
        analyze_directory_concurrent(&path, workers)
            .await
            .map(PathAnalysis::Directory)
    } else {
        tokio::task::spawn_blocking(move || analyze(&path))
            .await
            .map_err(|e| FrameProbeError::Worker(e.to_string()))?
            .map(PathAnalysis::File)
    }
}
