//! Analysis configuration

use frame_probe_core::{DiagnosisThresholds, FrameProbeError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable overriding [`AnalysisConfig::workers`]
pub const WORKERS_ENV: &str = "FRAME_PROBE_WORKERS";

/// Configuration for the analysis engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Diagnosis rule thresholds
    pub thresholds: DiagnosisThresholds,
    /// Files decoded concurrently by the async batch runner
    pub workers: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            thresholds: DiagnosisThresholds::default(),
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

impl AnalysisConfig {
    /// Defaults overlaid with environment variables
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Load a JSON config file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FrameProbeError::io_at(path, e))?;
        let config: Self = serde_json::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config.normalized())
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(WORKERS_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.workers = n,
                _ => warn!("Ignoring invalid {}={:?}", WORKERS_ENV, raw),
            }
        }
        self
    }

    fn normalized(mut self) -> Self {
        if self.workers == 0 {
            warn!("workers = 0 in config, using 1");
            self.workers = 1;
        }
        self
    }
}
