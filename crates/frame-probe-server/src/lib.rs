//! # frame-probe-server
//!
//! MCP server for frame-probe screenshot analysis.
//!
//! This crate provides:
//! - MCP JSON-RPC protocol handling
//! - Tool implementations (analyze_screenshot, compare_screenshots, etc.)
//! - stdio transport

pub mod mcp;
pub mod tools;
pub mod transport;

use frame_probe_analysis::AnalysisConfig;
use frame_probe_core::Result;

/// Server name reported during initialize
pub const SERVER_NAME: &str = "frame-probe";

/// frame-probe MCP server
#[derive(Debug, Clone, Default)]
pub struct FrameProbeServer {
    /// Thresholds and worker count used by every tool call
    config: AnalysisConfig,
}

impl FrameProbeServer {
    /// Create a new server with the given analysis configuration
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Run the server on stdio transport
    pub async fn run_stdio(self) -> Result<()> {
        transport::stdio::run(self).await
    }

    /// Get the analysis configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}
