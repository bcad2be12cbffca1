//! Type definitions for the sensor capture format

pub mod frame;
pub mod header;
pub mod record;

// Re-export the main types for convenience
pub use frame::{CaptureSummary, FrameGap, FrameStats};
pub use header::{BufferHeader, HEADER_FIELD_NAMES};
pub use record::{BitPosition, BufferRecord};
