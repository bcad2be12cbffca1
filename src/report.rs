//! Console reporting for scans and surveys.

use crate::error::ProbeResult;
use crate::parser::Preamble;
use crate::parser::bits::reversed;
use crate::processing::{SurveyReport, records_to_dataframe};
use crate::types::{BufferRecord, CaptureSummary};
use crate::utils::misc::{format_size, hex_string};

/// Render the frame analysis of a scan as plain text.
pub fn format_summary(summary: &CaptureSummary) -> String {
    let mut result = String::new();

    result.push_str(&format!("File size: {}\n", format_size(summary.file_size)));

    result.push_str("\nFrame number analysis:\n");
    match (summary.first_frame(), summary.last_frame()) {
        (Some(first), Some(last)) => {
            result.push_str(&format!("First frame: {}\n", first));
            result.push_str(&format!("Last frame: {}\n", last));
        }
        _ => result.push_str("No frames decoded\n"),
    }
    result.push_str(&format!("Number of frames: {}\n", summary.frame_count()));

    if summary.frame_count() > 0 {
        if summary.is_sequential() {
            result.push_str("\nFrames are sequential (no gaps)\n");
        } else {
            result.push_str("\nFound gaps in frame numbers:\n");
            for gap in &summary.gaps {
                result.push_str(&format!(
                    "Gap between frame {} and {} (size: {})\n",
                    gap.start, gap.end, gap.size
                ));
            }
        }

        result.push_str("\nFrames with non-zero minimum values:\n");
        for frame in summary.nonzero_min_frames() {
            result.push_str(&format!("Frame {}: min={}\n", frame.frame_num, frame.min_pixel));
        }
    }

    result.push_str("\nAnalysis complete!\n");
    result.push_str(&format!("Processed {} unique frames\n", summary.frame_count()));
    result.push_str(&format!("Total preambles found: {}\n", summary.preambles_found));

    result
}

pub fn print_summary(summary: &CaptureSummary) {
    print!("{}", format_summary(summary));
}

/// Render a block survey as plain text.
pub fn format_survey(report: &SurveyReport) -> String {
    let mut result = String::new();

    result.push_str(&format!("File size: {}\n", format_size(report.file_size)));
    result.push_str(&format!("Number of complete blocks: {}\n", report.num_blocks));
    result.push_str(&format!("Header size: {} bytes\n", report.header_bytes));

    result.push_str("\nMarker patterns searched:\n");
    result.push_str(&format!("Original: {}\n", hex_string(&report.marker)));
    result.push_str(&format!("Bit-reversed: {}\n", hex_string(&report.marker_reversed)));
    for (variant, bytes) in report.marker_variants() {
        result.push_str(&format!("  {:<15} {}\n", variant.label(), hex_string(&bytes)));
    }

    for hit in &report.marker_hits {
        result.push_str(&format!(
            "\nFound marker near block {} (0x{:08X})\n",
            hit.block_num, hit.block_start
        ));
        result.push_str(&format!("Window: {}\n", hex_string(&hit.window)));
        result.push_str(&format!("Window (reversed): {}\n", hex_string(&hit.window_reversed)));
    }

    for block in &report.interesting {
        result.push_str(&format!(
            "\nInteresting values at block {} (0x{:08X}): {}\n",
            block.block_num,
            block.block_start,
            block.matched_labels.join(", ")
        ));
        result.push_str(&format!("Values ({}-endian): {:?}\n", block.order.label(), block.values));
        result.push_str(&format!("Original bytes: {}\n", hex_string(&block.raw)));
        result.push_str(&format!("Bit-reversed: {}\n", hex_string(&block.reversed)));
        if let Some(previous) = &block.previous {
            result.push_str(&format!("Previous (original): {}\n", hex_string(previous)));
            result.push_str(&format!(
                "Previous (reversed): {}\n",
                hex_string(&reversed(previous))
            ));
        }
    }

    result
}

pub fn print_survey(report: &SurveyReport) {
    print!("{}", format_survey(report));
}

pub fn print_preamble(preamble: &Preamble) {
    println!("Preamble bits: {}", preamble);
}

/// Print the first `rows` decoded headers as a table.
pub fn print_records_table(records: &[BufferRecord], rows: usize) -> ProbeResult<()> {
    if records.is_empty() {
        return Ok(());
    }
    let df = records_to_dataframe(records)?;
    println!("\nFirst decoded headers:\n{}", df.head(Some(rows)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FrameGap, FrameStats};

    fn frame(frame_num: u32, min_pixel: u8) -> FrameStats {
        FrameStats::builder()
            .frame_num(frame_num)
            .min_pixel(min_pixel)
            .buffer_count(1)
            .build()
    }

    #[test]
    fn summary_lists_gaps_and_nonzero_frames() {
        let summary = CaptureSummary::builder()
            .file_size(2_097_152)
            .preambles_found(5)
            .records_decoded(5)
            .frames(vec![frame(10, 0), frame(11, 4), frame(14, 0)])
            .gaps(vec![FrameGap { start: 11, end: 14, size: 3 }])
            .build();

        let text = format_summary(&summary);
        assert!(text.contains("File size: 2,097,152 bytes (2.0 MB)"));
        assert!(text.contains("First frame: 10"));
        assert!(text.contains("Last frame: 14"));
        assert!(text.contains("Number of frames: 3"));
        assert!(text.contains("Gap between frame 11 and 14 (size: 3)"));
        assert!(text.contains("Frame 11: min=4"));
        assert!(!text.contains("Frame 10: min"));
        assert!(text.contains("Total preambles found: 5"));
    }

    #[test]
    fn sequential_summary_says_so() {
        let summary = CaptureSummary::builder()
            .file_size(10)
            .preambles_found(2)
            .records_decoded(2)
            .frames(vec![frame(1, 0), frame(2, 0)])
            .gaps(vec![])
            .build();
        assert!(format_summary(&summary).contains("Frames are sequential (no gaps)"));
    }

    #[test]
    fn empty_summary_does_not_claim_frames() {
        let summary = CaptureSummary::builder()
            .file_size(0)
            .preambles_found(0)
            .records_decoded(0)
            .frames(vec![])
            .gaps(vec![])
            .build();
        let text = format_summary(&summary);
        assert!(text.contains("No frames decoded"));
        assert!(!text.contains("sequential"));
        assert!(text.contains("Processed 0 unique frames"));
    }

    #[test]
    fn empty_summary_renders_every_line() {
        let summary = CaptureSummary::builder()
            .file_size(0)
            .preambles_found(1)
            .records_decoded(1)
            .frames(vec![])
            .gaps(vec![])
            .build();
        assert_eq!(
            format_summary(&summary),
            "File size: 0 bytes (0.0 MB)\n\
             \nFrame number analysis:\n\
             No frames decoded\n\
             Number of frames: 0\n\
             \nAnalysis complete!\n\
             Processed 0 unique frames\n\
             Total preambles found: 1\n"
        );
    }

    #[test]
    fn survey_shows_marker_forms() -> Result<(), Box<dyn std::error::Error>> {
        let report = crate::processing::survey(&[], &crate::config::SurveyConfig::default())?;
        let text = format_survey(&report);
        assert!(text.contains("Original: 12 34 56 78"));
        assert!(text.contains("Bit-reversed: 48 2C 6A 1E"));
        assert!(text.contains("Number of complete blocks: 0"));
        Ok(())
    }
}
