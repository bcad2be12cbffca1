//! Exploration tooling for an undocumented sensor capture format.
//!
//! A capture is a raw dump of buffers. Each buffer starts with a 32-bit
//! preamble at an arbitrary bit alignment, followed by twelve bit-mirrored
//! little-endian header words and a block of raw pixel bytes. The crate finds
//! the preambles, decodes what follows them and summarises the frames.

pub mod capture_file;
pub mod config;
pub mod error;
pub mod parser;
pub mod plot;
pub mod processing;
pub mod report;
pub mod types;
pub mod utils;

pub use capture_file::{CaptureFile, ScanResult};
pub use config::{ProbeConfig, ScanConfig, SurveyConfig};
pub use error::{ProbeError, ProbeResult};
pub use parser::Preamble;
pub use types::{BitPosition, BufferHeader, BufferRecord, CaptureSummary, FrameGap, FrameStats};
