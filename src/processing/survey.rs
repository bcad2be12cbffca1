//! Fixed-block survey of a capture.
//!
//! Before the preamble was known, the capture was cut into equal blocks and
//! each block start was checked for the marker word and for header-like
//! values. This module keeps that survey around for new captures whose block
//! geometry is still unknown.

use crate::config::SurveyConfig;
use crate::error::{ProbeError, ProbeResult};
use crate::parser::bits::{WordVariant, reverse_bits, reversed, word_variants};
use log::info;
use winnow::{
    Parser,
    binary::{Endianness, u32 as word},
    combinator::repeat,
    error::ContextError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOrder {
    Little,
    Big,
}

impl WordOrder {
    pub const BOTH: [WordOrder; 2] = [WordOrder::Little, WordOrder::Big];

    fn endianness(self) -> Endianness {
        match self {
            WordOrder::Little => Endianness::Little,
            WordOrder::Big => Endianness::Big,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WordOrder::Little => "little",
            WordOrder::Big => "big",
        }
    }
}

/// A block whose surrounding window contains the marker word.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerHit {
    pub block_num: usize,
    pub block_start: usize,
    pub window_start: usize,
    pub window: Vec<u8>,
    pub window_reversed: Vec<u8>,
    pub plain: bool,
    pub mirrored: bool,
}

/// A block whose leading words fall inside one of the configured ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestingBlock {
    pub block_num: usize,
    pub block_start: usize,
    pub order: WordOrder,
    pub values: Vec<u32>,
    pub matched_labels: Vec<String>,
    pub raw: Vec<u8>,
    pub reversed: Vec<u8>,
    pub previous: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurveyReport {
    pub file_size: usize,
    pub num_blocks: usize,
    pub header_bytes: usize,
    pub marker: [u8; 4],
    pub marker_reversed: [u8; 4],
    pub marker_hits: Vec<MarkerHit>,
    pub interesting: Vec<InterestingBlock>,
}

impl SurveyReport {
    /// Byte/bit order readings of the marker word.
    pub fn marker_variants(&self) -> [(WordVariant, [u8; 4]); 4] {
        word_variants(self.marker)
    }
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// Reads as many whole 32-bit words as `bytes` holds.
pub fn parse_words(bytes: &[u8], order: WordOrder) -> Vec<u32> {
    let mut input = bytes;
    repeat(0.., word::<_, ContextError>(order.endianness()))
        .parse_next(&mut input)
        .unwrap_or_default()
}

pub fn survey(data: &[u8], config: &SurveyConfig) -> ProbeResult<SurveyReport> {
    if config.block_size == 0 {
        return Err(ProbeError::InvalidLayout("block size must be non-zero".into()));
    }

    let num_blocks = data.len() / config.block_size;
    let marker = config.marker.to_be_bytes();
    let marker_reversed = marker.map(reverse_bits);

    info!(
        "surveying {} blocks of {} bytes",
        num_blocks.saturating_sub(config.skip_tail_blocks),
        config.block_size
    );

    let mut marker_hits = Vec::new();
    let mut interesting = Vec::new();

    for block_num in 0..num_blocks.saturating_sub(config.skip_tail_blocks) {
        let block_start = block_num * config.block_size;

        let window_start = block_start.saturating_sub(config.lookbehind);
        let window_end = block_start.saturating_add(config.lookahead).min(data.len());
        let window = &data[window_start..window_end];
        let plain = contains_subslice(window, &marker);
        let mirrored = contains_subslice(window, &marker_reversed);
        if plain || mirrored {
            marker_hits.push(MarkerHit {
                block_num,
                block_start,
                window_start,
                window: window.to_vec(),
                window_reversed: reversed(window),
                plain,
                mirrored,
            });
        }

        let probe_end = block_start.saturating_add(config.probe_len).min(data.len());
        let raw = &data[block_start..probe_end];
        let probe = reversed(raw);

        for order in WordOrder::BOTH {
            let values = parse_words(&probe, order);
            let matched_labels: Vec<String> = config
                .interesting_ranges
                .iter()
                .filter(|range| values.iter().any(|&v| range.contains(v)))
                .map(|range| range.label.clone())
                .collect();

            if matched_labels.is_empty() {
                continue;
            }

            let previous = (block_start >= config.lookbehind && config.lookbehind > 0)
                .then(|| data[block_start - config.lookbehind..block_start].to_vec());

            interesting.push(InterestingBlock {
                block_num,
                block_start,
                order,
                values,
                matched_labels,
                raw: raw.to_vec(),
                reversed: probe.clone(),
                previous,
            });
        }
    }

    Ok(SurveyReport {
        file_size: data.len(),
        num_blocks,
        header_bytes: config.header_bits / 8,
        marker,
        marker_reversed,
        marker_hits,
        interesting,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueRange;

    const BLOCK: usize = 512;

    fn blank_capture(blocks: usize) -> Vec<u8> {
        vec![0xFF; blocks * BLOCK]
    }

    #[test]
    fn words_follow_requested_order() {
        let bytes = [0x01, 0x00, 0x00, 0x00, 0xAA];
        assert_eq!(parse_words(&bytes, WordOrder::Little), vec![1]);
        assert_eq!(parse_words(&bytes, WordOrder::Big), vec![0x0100_0000]);
        assert!(parse_words(&[], WordOrder::Little).is_empty());
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let config = SurveyConfig::builder().block_size(0).build();
        assert!(matches!(survey(&[0; 16], &config), Err(ProbeError::InvalidLayout(_))));
    }

    #[test]
    fn short_capture_surveys_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let report = survey(&blank_capture(8), &SurveyConfig::default())?;
        assert_eq!(report.num_blocks, 8);
        assert_eq!(report.header_bytes, 48);
        assert!(report.marker_hits.is_empty());
        assert!(report.interesting.is_empty());
        Ok(())
    }

    #[test]
    fn blank_blocks_are_not_interesting() -> Result<(), Box<dyn std::error::Error>> {
        let report = survey(&blank_capture(12), &SurveyConfig::default())?;
        assert!(report.marker_hits.is_empty());
        assert!(report.interesting.is_empty());
        Ok(())
    }

    #[test]
    fn marker_is_found_plain_and_mirrored() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = blank_capture(12);
        data[2 * BLOCK + 10..2 * BLOCK + 14].copy_from_slice(&[0x12, 0x34, 0x56, 0x78]);
        data[3 * BLOCK - 20..3 * BLOCK - 16].copy_from_slice(&[0x48, 0x2C, 0x6A, 0x1E]);

        let report = survey(&data, &SurveyConfig::default())?;
        assert_eq!(report.marker_reversed, [0x48, 0x2C, 0x6A, 0x1E]);
        let blocks: Vec<usize> = report.marker_hits.iter().map(|h| h.block_num).collect();
        assert_eq!(blocks, vec![2, 3]);
        assert!(report.marker_hits[0].plain && !report.marker_hits[0].mirrored);
        assert!(report.marker_hits[1].mirrored && !report.marker_hits[1].plain);
        assert_eq!(report.marker_hits[1].window_start, 3 * BLOCK - 32);
        assert_eq!(report.marker_hits[1].window.len(), 96);
        Ok(())
    }

    #[test]
    fn frame_number_in_mirrored_word_is_flagged() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = blank_capture(16);
        // 18727 little-endian with each byte bit-mirrored
        let start = 4 * BLOCK;
        data[start..start + 4].copy_from_slice(&[0xE4, 0x92, 0x00, 0x00]);

        let report = survey(&data, &SurveyConfig::default())?;
        assert_eq!(report.interesting.len(), 1);
        let block = &report.interesting[0];
        assert_eq!(block.block_num, 4);
        assert_eq!(block.order, WordOrder::Little);
        assert_eq!(block.values[0], 18727);
        assert_eq!(block.values.len(), 8);
        assert_eq!(block.matched_labels, vec!["frame number".to_string()]);
        assert_eq!(block.previous.as_deref(), Some(&data[start - 32..start]));
        Ok(())
    }

    #[test]
    fn custom_ranges_replace_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = blank_capture(10);
        data[BLOCK..BLOCK + 4].copy_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        let config = SurveyConfig::builder()
            .interesting_ranges(vec![ValueRange::new("zero", 0, 1)])
            .build();

        let report = survey(&data, &config)?;
        // an all-zero word reads as zero in both orders
        assert_eq!(report.interesting.len(), 2);
        assert!(report.interesting.iter().all(|b| b.block_num == 1));
        Ok(())
    }

    #[test]
    fn huge_windows_stop_at_end_of_data() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = blank_capture(10);
        data[BLOCK + 200..BLOCK + 204].copy_from_slice(&[0x12, 0x34, 0x56, 0x78]);
        let config = SurveyConfig::builder()
            .lookahead(usize::MAX)
            .probe_len(usize::MAX)
            .build();

        let report = survey(&data, &config)?;
        assert_eq!(report.marker_hits.len(), 2);
        assert_eq!(report.marker_hits[1].window.len(), data.len() - (BLOCK - 32));
        Ok(())
    }

    #[test]
    fn marker_variants_include_stream_form() -> Result<(), Box<dyn std::error::Error>> {
        let report = survey(&[], &SurveyConfig::default())?;
        let variants = report.marker_variants();
        assert_eq!(variants[3].1, [0x1E, 0x6A, 0x2C, 0x48]);
        Ok(())
    }
}
