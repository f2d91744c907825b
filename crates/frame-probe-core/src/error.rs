//! Error types for frame-probe

use std::path::PathBuf;
use thiserror::Error;

/// Result type for frame-probe operations
pub type Result<T> = std::result::Result<T, FrameProbeError>;

/// frame-probe error types
///
/// `Io`, `Format` and `Decode` are fatal to the single-file operation that
/// raised them. Batch runs convert them into warnings per file.
#[derive(Debug, Error)]
pub enum FrameProbeError {
    /// File could not be read
    #[error("I/O error{}: {source}", path.as_ref().map(|p| format!(" on {}", p.display())).unwrap_or_default())]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// Bad signature, missing or zero-size header, unknown filter byte
    #[error("Format error: {0}")]
    Format(String),

    /// Decompression failure or pixel data shorter than the header declares
    #[error("Decode error: {0}")]
    Decode(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Protocol error
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Background analysis task failed to complete
    #[error("Worker error: {0}")]
    Worker(String),
}

impl FrameProbeError {
    /// Wrap an I/O error with the path that produced it
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FrameProbeError::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// JSON-RPC error code for this error
    pub fn code(&self) -> i32 {
        match self {
            FrameProbeError::Format(_) => error_codes::FORMAT_ERROR,
            FrameProbeError::Decode(_) => error_codes::DECODE_ERROR,
            FrameProbeError::Io { .. } => error_codes::IO_ERROR,
            FrameProbeError::Serialization(_)
            | FrameProbeError::Protocol(_)
            | FrameProbeError::Worker(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<std::io::Error> for FrameProbeError {
    fn from(err: std::io::Error) -> Self {
        FrameProbeError::Io {
            path: None,
            source: err,
        }
    }
}

impl From<serde_json::Error> for FrameProbeError {
    fn from(err: serde_json::Error) -> Self {
        FrameProbeError::Serialization(err.to_string())
    }
}

/// JSON-RPC error codes for frame-probe
pub mod error_codes {
    pub const FORMAT_ERROR: i32 = -32010;
    pub const DECODE_ERROR: i32 = -32011;
    pub const IO_ERROR: i32 = -32012;
    pub const INTERNAL_ERROR: i32 = -32603;
}
