//! Per-frame aggregates and the capture-wide summary

use bon::Builder;

/// Statistics for one frame number across all of its buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct FrameStats {
    pub frame_num: u32,
    pub min_pixel: u8,
    pub buffer_count: usize,
}

/// A jump between two consecutive observed frame numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGap {
    pub start: u32,
    pub end: u32,
    /// `end - start`; a gap of size 2 means one frame is missing.
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Builder)]
pub struct CaptureSummary {
    pub file_size: usize,
    pub preambles_found: usize,
    pub records_decoded: usize,
    /// Ascending by frame number.
    pub frames: Vec<FrameStats>,
    pub gaps: Vec<FrameGap>,
}

impl CaptureSummary {
    pub fn first_frame(&self) -> Option<u32> {
        self.frames.first().map(|f| f.frame_num)
    }

    pub fn last_frame(&self) -> Option<u32> {
        self.frames.last().map(|f| f.frame_num)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_sequential(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn nonzero_min_frames(&self) -> impl Iterator<Item = &FrameStats> {
        self.frames.iter().filter(|f| f.min_pixel > 0)
    }

    /// `(frame_num, min_pixel)` pairs for plotting.
    pub fn plot_series(&self) -> Vec<(u32, u8)> {
        self.frames.iter().map(|f| (f.frame_num, f.min_pixel)).collect()
    }
}
