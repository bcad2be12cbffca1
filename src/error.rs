//! Error types for capture probing

use thiserror::Error;

/// Main error type for loading, decoding and rendering a capture
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Reading the capture or the configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON configuration could not be deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// A preamble bit pattern was empty, too long, or had non-binary digits
    #[error("Invalid preamble pattern {pattern:?}: {reason}")]
    InvalidPreamble { pattern: String, reason: &'static str },

    /// Survey block geometry that cannot describe any block
    #[error("Invalid block layout: {0}")]
    InvalidLayout(String),

    /// Building the record table failed
    #[error("Table error: {0}")]
    Table(#[from] polars::prelude::PolarsError),

    /// Rendering the chart failed
    #[error("Plot error: {0}")]
    Plot(String),

    /// Nothing to plot
    #[error("No frames were decoded from the capture")]
    NoFrames,
}

pub type ProbeResult<T> = Result<T, ProbeError>;
