//! Types for one decoded buffer: where its preamble sat and what followed it

use crate::types::header::BufferHeader;
use bon::Builder;
use std::fmt;

/// Location of a preamble in the MSB-first stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitPosition {
    pub byte_pos: usize,
    pub bit_offset: u8,
}

impl BitPosition {
    pub fn from_bit_index(bit_index: usize) -> Self {
        Self {
            byte_pos: bit_index / 8,
            bit_offset: (bit_index % 8) as u8,
        }
    }

    pub fn bit_index(&self) -> usize {
        self.byte_pos * 8 + self.bit_offset as usize
    }
}

impl fmt::Display for BitPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}+{}", self.byte_pos, self.bit_offset)
    }
}

/// A preamble hit together with the header and payload decoded after it.
///
/// `header_bit` and `payload_bit` are stream bit indices; they are multiples
/// of eight unless the scan re-aligned to the preamble's bit offset.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct BufferRecord {
    /// For a clipped preamble this is bit 0, where its visible part begins.
    pub position: BitPosition,
    /// The preamble lost its first bit to the start of the capture.
    #[builder(default)]
    pub clipped: bool,
    pub header_bit: usize,
    pub header: BufferHeader,
    pub payload_bit: usize,
    pub payload_len: usize,
    pub min_pixel: Option<u8>,
}

impl BufferRecord {
    pub fn frame_num(&self) -> Option<u32> {
        self.header.frame_num
    }

    /// Frame number and minimum pixel, when the record carries both.
    pub fn frame_sample(&self) -> Option<(u32, u8)> {
        self.header.frame_num.zip(self.min_pixel)
    }
}
