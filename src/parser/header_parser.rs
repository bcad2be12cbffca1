use crate::parser::bits::{reversed, take_bits};
use crate::types::header::{BufferHeader, HEADER_FIELD_NAMES};
use std::borrow::Cow;
use winnow::{Parser, binary::le_u32, combinator::repeat, error::ContextError};

/// Bytes occupied by a full header: twelve 32-bit words.
pub const HEADER_LEN: usize = HEADER_FIELD_NAMES.len() * 4;

/// Parses the header words from bytes that are already bit-corrected.
///
/// The layout is twelve little-endian u32 values in `HEADER_FIELD_NAMES`
/// order. A short input yields only the complete words; a trailing partial
/// word is left in `input`.
pub fn parse_header(input: &mut &[u8]) -> Result<BufferHeader, ContextError> {
    repeat(0..=HEADER_FIELD_NAMES.len(), le_u32)
        .map(|words: Vec<u32>| BufferHeader::from_words(&words))
        .parse_next(input)
}

/// Raw header bytes starting at stream bit `bit_index`, short at the end of
/// the capture.
pub fn take_header(data: &[u8], bit_index: usize) -> Cow<'_, [u8]> {
    take_bits(data, bit_index, HEADER_LEN)
}

/// Decodes a header straight from capture bytes: every byte is bit-mirrored,
/// then the words are read little-endian.
pub fn decode_header(raw: &[u8]) -> BufferHeader {
    let corrected = reversed(&raw[..raw.len().min(HEADER_LEN)]);
    let mut input = corrected.as_slice();
    // a bounded repeat of le_u32 cannot fail, it stops at the first short word
    parse_header(&mut input).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Capture-side encoding of header words (little-endian, bits mirrored).
    fn encode_words(words: &[u32]) -> Vec<u8> {
        let le: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        reversed(&le)
    }

    #[test]
    fn decodes_all_twelve_fields() {
        let words: Vec<u32> = (0..12).map(|i| 1000 + i).collect();
        let header = decode_header(&encode_words(&words));

        assert!(header.is_complete());
        assert_eq!(header.linked_list, Some(1000));
        assert_eq!(header.frame_num, Some(1001));
        assert_eq!(header.unix_time, Some(1011));
        let names: Vec<&str> = header.fields().map(|(name, _)| name).collect();
        assert_eq!(names, HEADER_FIELD_NAMES);
    }

    #[test]
    fn frame_number_reads_through_bit_reversal() {
        // 18727 = 0x4927, stored as 27 49 00 00 and then bit-mirrored
        let raw = [0x00, 0x00, 0x00, 0x00, 0xE4, 0x92, 0x00, 0x00];
        let header = decode_header(&raw);
        assert_eq!(header.linked_list, Some(0));
        assert_eq!(header.frame_num, Some(18727));
        assert_eq!(header.buffer_count, None);
    }

    #[test]
    fn truncated_header_keeps_complete_words_only() {
        let mut raw = encode_words(&[7, 8, 9]);
        raw.truncate(10);
        let header = decode_header(&raw);
        assert_eq!(header.linked_list, Some(7));
        assert_eq!(header.frame_num, Some(8));
        assert_eq!(header.buffer_count, None);
        assert!(!header.is_complete());
    }

    #[test]
    fn partial_word_is_left_unconsumed() {
        let data = [1u8, 0, 0, 0, 0xAA, 0xBB];
        let mut input = &data[..];
        let header = parse_header(&mut input).unwrap();
        assert_eq!(header.linked_list, Some(1));
        assert_eq!(input, &[0xAA, 0xBB]);
    }

    #[test]
    fn extra_bytes_beyond_header_are_ignored() {
        let mut raw = encode_words(&[0; 12]);
        raw.extend_from_slice(&[0xFF; 16]);
        let header = decode_header(&raw);
        assert_eq!(header.unix_time, Some(0));
    }

    #[test]
    fn empty_input_gives_empty_header() {
        assert_eq!(decode_header(&[]), BufferHeader::default());
    }
}
