//! Bit-order helpers for the capture stream.
//!
//! The capture is treated as one continuous MSB-first bit stream: bit 7 of
//! byte 0 is stream bit 0. Header words are stored with every byte
//! bit-mirrored, so most decoding starts by reversing bits.

use std::borrow::Cow;

/// Mirror the bit order of a byte (bit 7 becomes bit 0).
pub const fn reverse_bits(byte: u8) -> u8 {
    byte.reverse_bits()
}

pub fn reverse_bits_in_place(bytes: &mut [u8]) {
    for byte in bytes.iter_mut() {
        *byte = reverse_bits(*byte);
    }
}

/// Copy of `bytes` with every byte bit-mirrored, byte order unchanged.
pub fn reversed(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|&b| reverse_bits(b)).collect()
}

/// MSB-first bit lookup, `None` past the end of `data`.
pub fn bit_at(data: &[u8], bit_index: usize) -> Option<bool> {
    data.get(bit_index / 8)
        .map(|byte| (byte >> (7 - (bit_index % 8))) & 1 == 1)
}

/// Read up to `max_len` whole bytes starting at an arbitrary stream bit.
///
/// Byte-aligned reads borrow from `data`; unaligned reads shift the bits into
/// a fresh buffer. Bytes that would run past the end of `data` are dropped,
/// so the result may be shorter than `max_len` (or empty).
pub fn take_bits(data: &[u8], bit_index: usize, max_len: usize) -> Cow<'_, [u8]> {
    let total_bits = data.len() * 8;
    if bit_index >= total_bits {
        return Cow::Borrowed(&[]);
    }
    let available = (total_bits - bit_index) / 8;
    let len = available.min(max_len);
    let start = bit_index / 8;
    let shift = (bit_index % 8) as u32;

    if shift == 0 {
        return Cow::Borrowed(&data[start..start + len]);
    }

    let out = (0..len)
        .map(|i| (data[start + i] << shift) | (data[start + i + 1] >> (8 - shift)))
        .collect();
    Cow::Owned(out)
}

/// The four byte/bit order readings of a 32-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordVariant {
    Original,
    ReversedBytes,
    ReversedBits,
    ReversedBoth,
}

impl WordVariant {
    pub const ALL: [WordVariant; 4] = [
        WordVariant::Original,
        WordVariant::ReversedBytes,
        WordVariant::ReversedBits,
        WordVariant::ReversedBoth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WordVariant::Original => "original",
            WordVariant::ReversedBytes => "reversed bytes",
            WordVariant::ReversedBits => "reversed bits",
            WordVariant::ReversedBoth => "reversed both",
        }
    }

    pub fn apply(self, word: [u8; 4]) -> [u8; 4] {
        match self {
            WordVariant::Original => word,
            WordVariant::ReversedBytes => {
                let mut out = word;
                out.reverse();
                out
            }
            WordVariant::ReversedBits => word.map(reverse_bits),
            WordVariant::ReversedBoth => {
                let mut out = word.map(reverse_bits);
                out.reverse();
                out
            }
        }
    }
}

pub fn word_variants(word: [u8; 4]) -> [(WordVariant, [u8; 4]); 4] {
    WordVariant::ALL.map(|variant| (variant, variant.apply(word)))
}
