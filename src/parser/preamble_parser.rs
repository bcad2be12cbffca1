//! Bit-level preamble search over the raw capture.

use crate::error::{ProbeError, ProbeResult};
use crate::parser::bits::bit_at;
use crate::types::record::BitPosition;
use log::debug;
use std::fmt;

/// The sync word every buffer starts with, as it appears in the stream:
/// 0x12345678 with all 32 bits mirrored (1E 6A 2C 48).
pub const DEFAULT_PREAMBLE_BITS: &str = "00011110011010100010110001001000";

/// A preamble bit pattern of up to 64 bits, matched MSB-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preamble {
    pattern: u64,
    len_bits: u32,
}

impl Default for Preamble {
    fn default() -> Self {
        Self::from_word_reversed(0x1234_5678)
    }
}

impl Preamble {
    /// Parse a string of '0'/'1' digits (1 to 64 of them).
    pub fn from_bits(bits: &str) -> ProbeResult<Self> {
        let invalid = |reason| ProbeError::InvalidPreamble {
            pattern: bits.to_string(),
            reason,
        };

        if bits.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if bits.len() > 64 {
            return Err(invalid("pattern is longer than 64 bits"));
        }

        let mut pattern = 0u64;
        for c in bits.chars() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                _ => return Err(invalid("pattern may only contain '0' and '1'")),
            };
            pattern = (pattern << 1) | bit;
        }

        Ok(Self {
            pattern,
            len_bits: bits.len() as u32,
        })
    }

    /// The stream form of a marker word the device writes LSB-first: the
    /// whole 32-bit word mirrored, so 0x12345678 becomes 0x1E6A2C48.
    pub fn from_word_reversed(word: u32) -> Self {
        Self {
            pattern: word.reverse_bits() as u64,
            len_bits: 32,
        }
    }

    pub fn len_bits(&self) -> u32 {
        self.len_bits
    }

    /// Whole bytes spanned by the pattern when it starts on a byte boundary.
    pub fn len_bytes(&self) -> usize {
        (self.len_bits as usize).div_ceil(8)
    }

    fn mask(&self) -> u64 {
        if self.len_bits == 64 {
            u64::MAX
        } else {
            (1u64 << self.len_bits) - 1
        }
    }
}

impl fmt::Display for Preamble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len_bits).rev() {
            write!(f, "{}", (self.pattern >> i) & 1)?;
        }
        Ok(())
    }
}

/// Find every stream bit position where `preamble` starts.
///
/// All eight bit alignments are searched in one pass and overlapping hits are
/// kept. Positions come back in ascending stream order, each exactly once.
/// A hit needs every pattern bit inside `data`.
pub fn find_preambles(data: &[u8], preamble: &Preamble) -> Vec<BitPosition> {
    let len = preamble.len_bits as usize;
    let mask = preamble.mask();
    let mut positions = Vec::new();

    if data.len() * 8 < len {
        return positions;
    }

    let mut window = 0u64;
    let mut consumed = 0usize;
    for &byte in data {
        for shift in (0..8).rev() {
            window = (window << 1) | ((byte >> shift) & 1) as u64;
            consumed += 1;
            if consumed >= len && window & mask == preamble.pattern {
                positions.push(BitPosition::from_bit_index(consumed - len));
            }
        }
    }

    debug!(
        "preamble {} matched {} times in {} bytes",
        preamble,
        positions.len(),
        data.len()
    );
    positions
}

/// Whether `data` opens with a preamble whose first bit was cut off.
///
/// This is the hit found by matching against the stream with one zero bit
/// put in front of it, so it only exists for patterns whose first bit is 0.
/// Such a preamble starts one bit before the capture: byte -1, bit 7.
pub fn starts_with_clipped_preamble(data: &[u8], preamble: &Preamble) -> bool {
    let tail_len = preamble.len_bits as usize - 1;
    if tail_len == 0 || (preamble.pattern >> tail_len) & 1 != 0 || data.len() * 8 < tail_len {
        return false;
    }

    let head = (0..tail_len).fold(0u64, |acc, i| {
        (acc << 1) | bit_at(data, i).map_or(0, u64::from)
    });
    head == preamble.pattern & ((1u64 << tail_len) - 1)
}
