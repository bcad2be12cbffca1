use crate::config::ScanConfig;
use crate::parser::{
    HEADER_LEN, Preamble, decode_header, min_pixel, payload_at, starts_with_clipped_preamble,
    take_header,
};
use crate::types::{BitPosition, BufferRecord, CaptureSummary, FrameGap, FrameStats};
use itertools::Itertools;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Stream bit where the header after `position` begins.
///
/// By default the header starts on the byte boundary `len_bytes` after the
/// byte holding the preamble's first bit, whatever the bit offset. With
/// `realign_bits` it starts on the bit right after the preamble.
pub fn header_start_bit(
    position: &BitPosition,
    preamble: &Preamble,
    realign_bits: bool,
) -> usize {
    if realign_bits {
        position.bit_index() + preamble.len_bits() as usize
    } else {
        (position.byte_pos + preamble.len_bytes()) * 8
    }
}

/// Header start for a preamble that begins one bit before the capture
/// (byte -1, bit 7), following the same rules as [`header_start_bit`].
pub fn clipped_header_start_bit(preamble: &Preamble, realign_bits: bool) -> usize {
    if realign_bits {
        preamble.len_bits() as usize - 1
    } else {
        (preamble.len_bytes() - 1) * 8
    }
}

fn decode_record(
    data: &[u8],
    position: BitPosition,
    header_bit: usize,
    clipped: bool,
    config: &ScanConfig,
) -> BufferRecord {
    let header = decode_header(&take_header(data, header_bit));
    let payload_bit = header_bit + HEADER_LEN * 8;
    let payload = payload_at(data, payload_bit, config.payload_len);

    if !header.is_complete() {
        debug!("truncated header after preamble at {}", position);
    }

    BufferRecord::builder()
        .position(position)
        .clipped(clipped)
        .header_bit(header_bit)
        .header(header)
        .payload_bit(payload_bit)
        .payload_len(payload.len())
        .maybe_min_pixel(min_pixel(&payload))
        .build()
}

/// Decode the header and payload that follow each preamble hit.
pub fn decode_records(
    data: &[u8],
    positions: &[BitPosition],
    preamble: &Preamble,
    config: &ScanConfig,
) -> Vec<BufferRecord> {
    positions
        .iter()
        .map(|position| {
            let header_bit = header_start_bit(position, preamble, config.realign_bits);
            decode_record(data, *position, header_bit, false, config)
        })
        .collect()
}

/// The record behind a preamble cut off by the start of `data`, if any.
pub fn decode_clipped_record(
    data: &[u8],
    preamble: &Preamble,
    config: &ScanConfig,
) -> Option<BufferRecord> {
    if !starts_with_clipped_preamble(data, preamble) {
        return None;
    }
    debug!("capture starts inside a preamble");
    let header_bit = clipped_header_start_bit(preamble, config.realign_bits);
    Some(decode_record(
        data,
        BitPosition::from_bit_index(0),
        header_bit,
        true,
        config,
    ))
}

/// Minimum pixel per frame number, over every record that has both a frame
/// number and a non-empty payload.
pub fn aggregate_frames(records: &[BufferRecord]) -> BTreeMap<u32, FrameStats> {
    let mut frames: BTreeMap<u32, FrameStats> = BTreeMap::new();

    for (frame_num, pixel) in records.iter().filter_map(BufferRecord::frame_sample) {
        frames
            .entry(frame_num)
            .and_modify(|stats| {
                stats.min_pixel = stats.min_pixel.min(pixel);
                stats.buffer_count += 1;
            })
            .or_insert_with(|| {
                FrameStats::builder()
                    .frame_num(frame_num)
                    .min_pixel(pixel)
                    .buffer_count(1)
                    .build()
            });
    }

    frames
}

/// Jumps of more than one between consecutive frame numbers; `frames` must
/// be ascending.
pub fn find_gaps(frames: &[u32]) -> Vec<FrameGap> {
    frames
        .iter()
        .tuple_windows()
        .filter(|(a, b)| b.saturating_sub(**a) > 1)
        .map(|(&start, &end)| FrameGap {
            start,
            end,
            size: end - start,
        })
        .collect()
}

pub fn summarize(
    file_size: usize,
    preambles_found: usize,
    records: &[BufferRecord],
) -> CaptureSummary {
    let frames: Vec<FrameStats> = aggregate_frames(records).into_values().collect();
    let frame_nums: Vec<u32> = frames.iter().map(|f| f.frame_num).collect();
    let gaps = find_gaps(&frame_nums);

    if frames.is_empty() && preambles_found > 0 {
        warn!(
            "{} preambles found but none carried a frame number with pixel data",
            preambles_found
        );
    }

    CaptureSummary::builder()
        .file_size(file_size)
        .preambles_found(preambles_found)
        .records_decoded(records.len())
        .frames(frames)
        .gaps(gaps)
        .build()
}
