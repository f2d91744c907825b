//! Directory batch analysis
//!
//! A failure on one file is logged as a warning and the file is left out of
//! the results; the run itself only fails if the directory cannot be listed.

use frame_probe_core::{FrameProbeError, ImageMetrics, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::task::{Id, JoinSet};
use tracing::{debug, info, warn};

use crate::analyze;

/// A file that was skipped during a batch run
#[derive(Debug, Clone, serde::Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Metrics for every file that analysed cleanly, in filename order
    pub metrics: Vec<ImageMetrics>,
    /// Files that failed, in filename order
    pub skipped: Vec<SkippedFile>,
}

impl BatchOutcome {
    fn record(&mut self, path: &Path, result: Result<ImageMetrics>) {
        match result {
            Ok(m) => self.metrics.push(m),
            Err(e) => {
                warn!("Failed to analyze {}: {}", path.display(), e);
                self.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// Glob-style `*.png`: case-sensitive, leading dots included
fn is_png_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(".png"))
}

/// Entries matching `*.png` directly inside `dir`, sorted by name
///
/// Entries are not filtered by type; a directory named `x.png` is listed and
/// later fails analysis like any other unreadable file.
pub fn png_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| FrameProbeError::io_at(dir, e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_png_name(path))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!("Found {} PNG files in {}", files.len(), dir.display());
    Ok(files)
}

/// Analyse every PNG in a directory, keeping failures
pub fn run_batch(dir: &Path) -> Result<BatchOutcome> {
    let files = png_files(dir)?;
    info!("Analyzing {} files in {}", files.len(), dir.display());

    let mut outcome = BatchOutcome::default();
    for path in &files {
        outcome.record(path, analyze(path));
    }

    info!(
        "Batch done: {} analyzed, {} skipped",
        outcome.metrics.len(),
        outcome.skipped.len()
    );
    Ok(outcome)
}

/// Analyse every PNG in a directory
pub fn analyze_directory(dir: impl AsRef<Path>) -> Result<Vec<ImageMetrics>> {
    run_batch(dir.as_ref()).map(|outcome| outcome.metrics)
}

/// Analyse every PNG in a directory on the blocking pool
///
/// At most `workers` files are decoded at once. Results keep filename
/// order regardless of completion order.
pub async fn analyze_directory_concurrent(
    dir: impl AsRef<Path>,
    workers: usize,
) -> Result<BatchOutcome> {
    let dir = dir.as_ref().to_path_buf();
    let files = {
        let dir = dir.clone();
        tokio::task::spawn_blocking(move || png_files(&dir))
            .await
            .map_err(|e| FrameProbeError::Worker(e.to_string()))??
    };
    info!(
        "Analyzing {} files in {} ({} workers)",
        files.len(),
        dir.display(),
        workers.max(1)
    );

    Ok(analyze_files_concurrent(files, workers, |path: &Path| analyze(path)).await)
}

/// Run `analyze_one` over `files` with at most `workers` tasks in flight
///
/// A task that panics is recorded as a skipped file.
async fn analyze_files_concurrent(
    files: Vec<PathBuf>,
    workers: usize,
    analyze_one: fn(&Path) -> Result<ImageMetrics>,
) -> BatchOutcome {
    let workers = workers.max(1);
    let mut slots: Vec<Option<Result<ImageMetrics>>> = files.iter().map(|_| None).collect();
    let mut indices: HashMap<Id, usize> = HashMap::with_capacity(files.len());
    let mut tasks = JoinSet::new();

    for (idx, path) in files.iter().cloned().enumerate() {
        if tasks.len() >= workers {
            join_one(&mut tasks, &indices, &mut slots).await;
        }
        let handle = tasks.spawn_blocking(move || analyze_one(&path));
        indices.insert(handle.id(), idx);
    }
    while !tasks.is_empty() {
        join_one(&mut tasks, &indices, &mut slots).await;
    }

    let mut outcome = BatchOutcome::default();
    for (path, slot) in files.iter().zip(slots) {
        let result = slot.unwrap_or_else(|| {
            Err(FrameProbeError::Worker("analysis task produced no result".into()))
        });
        outcome.record(path, result);
    }

    info!(
        "Batch done: {} analyzed, {} skipped",
        outcome.metrics.len(),
        outcome.skipped.len()
    );
    outcome
}

async fn join_one(
    tasks: &mut JoinSet<Result<ImageMetrics>>,
    indices: &HashMap<Id, usize>,
    slots: &mut [Option<Result<ImageMetrics>>],
) {
    let (id, result) = match tasks.join_next_with_id().await {
        Some(Ok((id, result))) => (id, result),
        Some(Err(e)) => (
            e.id(),
            Err(FrameProbeError::Worker(format!("analysis task failed: {}", e))),
        ),
        None => return,
    };
    match indices.get(&id) {
        Some(&idx) => slots[idx] = Some(result),
        None => warn!("Result from unknown analysis task {}", id),
    }
}
