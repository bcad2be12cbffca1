use crate::config::{ScanConfig, SurveyConfig};
use crate::error::ProbeResult;
use crate::parser::{Preamble, find_preambles};
use crate::processing::{self, SurveyReport};
use crate::types::{BitPosition, BufferRecord, CaptureSummary};
use crate::utils::file_utils::{CaptureBytes, read_binary_file_mmap};
use log::info;
use std::path::Path;

/// A raw capture held in memory, with the decode entry points.
pub struct CaptureFile {
    data: CaptureBytes,
}

/// Everything a scan produced: the hits, the decoded records and the frame
/// summary built from them.
///
/// `positions` holds only whole preambles; a preamble clipped by the start
/// of the capture shows up as the first record, flagged `clipped`.
pub struct ScanResult {
    pub positions: Vec<BitPosition>,
    pub records: Vec<BufferRecord>,
    pub summary: CaptureSummary,
}

impl CaptureFile {
    /// Map a capture file from disk.
    pub fn open(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let path = path.as_ref();
        let data = read_binary_file_mmap(path)?;
        let capture = Self { data };
        info!("loaded {} ({} bytes)", path.display(), capture.len());
        Ok(capture)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            data: CaptureBytes::Owned(bytes),
        }
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    pub fn len(&self) -> usize {
        self.data().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every bit position where the configured preamble starts.
    pub fn find_preambles(&self, config: &ScanConfig) -> ProbeResult<Vec<BitPosition>> {
        let preamble = config.preamble()?;
        Ok(find_preambles(self.data(), &preamble))
    }

    /// Decode the header and payload behind every preamble, including one
    /// clipped by the start of the capture.
    pub fn decode_records(&self, config: &ScanConfig) -> ProbeResult<Vec<BufferRecord>> {
        let preamble = config.preamble()?;
        let positions = find_preambles(self.data(), &preamble);
        Ok(self.records_at(&positions, &preamble, config))
    }

    fn records_at(
        &self,
        positions: &[BitPosition],
        preamble: &Preamble,
        config: &ScanConfig,
    ) -> Vec<BufferRecord> {
        processing::decode_clipped_record(self.data(), preamble, config)
            .into_iter()
            .chain(processing::decode_records(self.data(), positions, preamble, config))
            .collect()
    }

    /// Find preambles, decode records and aggregate them per frame.
    pub fn scan(&self, config: &ScanConfig) -> ProbeResult<ScanResult> {
        let preamble = config.preamble()?;
        let positions = find_preambles(self.data(), &preamble);
        let records = self.records_at(&positions, &preamble, config);
        let preambles_found = positions.len() + records.iter().filter(|r| r.clipped).count();
        info!("found {} preambles", preambles_found);

        let summary = processing::summarize(self.len(), preambles_found, &records);
        info!(
            "decoded {} records into {} frames",
            records.len(),
            summary.frame_count()
        );

        Ok(ScanResult {
            positions,
            records,
            summary,
        })
    }

    pub fn survey(&self, config: &SurveyConfig) -> ProbeResult<SurveyReport> {
        processing::survey(self.data(), config)
    }
}
