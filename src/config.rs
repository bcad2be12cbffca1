//! Scan and survey settings, optionally loaded from a JSON file.

use crate::error::ProbeResult;
use crate::parser::{DEFAULT_PREAMBLE_BITS, PAYLOAD_LEN, Preamble};
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PLOT_PATH: &str = "min_pixels_per_frame.png";

/// Settings for the preamble scan and frame analysis.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Preamble as a string of '0'/'1' digits, MSB first.
    #[builder(into, default = DEFAULT_PREAMBLE_BITS.to_string())]
    pub preamble_bits: String,
    #[builder(default = PAYLOAD_LEN)]
    pub payload_len: usize,
    /// Read header and payload from the exact bit after the preamble instead
    /// of the byte that follows the preamble's first byte.
    #[builder(default)]
    pub realign_bits: bool,
    #[builder(into, default = PathBuf::from(DEFAULT_PLOT_PATH))]
    pub plot_path: PathBuf,
    #[builder(default = 1200)]
    pub plot_width: u32,
    #[builder(default = 600)]
    pub plot_height: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ScanConfig {
    pub fn preamble(&self) -> ProbeResult<Preamble> {
        Preamble::from_bits(&self.preamble_bits)
    }
}

/// Half-open `[start, end)` range of word values worth flagging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub label: String,
    pub start: u32,
    pub end: u32,
}

impl ValueRange {
    pub fn new(label: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.start..self.end).contains(&value)
    }
}

fn default_ranges() -> Vec<ValueRange> {
    vec![
        ValueRange::new("frame number", 18_701, 18_900),
        ValueRange::new("buffer count", 0, 8),
        ValueRange::new("buffer number", 149_001, 151_000),
    ]
}

/// Settings for the fixed-block survey.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    #[builder(default = 512)]
    pub block_size: usize,
    /// Nominal header length in bits; reported only.
    #[builder(default = 384)]
    pub header_bits: usize,
    /// Leading block bytes decoded as candidate header words.
    #[builder(default = 32)]
    pub probe_len: usize,
    #[builder(default = 32)]
    pub lookbehind: usize,
    #[builder(default = 64)]
    pub lookahead: usize,
    /// Trailing blocks left out of the survey.
    #[builder(default = 8)]
    pub skip_tail_blocks: usize,
    /// Plain marker word; its bit-mirrored bytes are searched too.
    #[builder(default = 0x1234_5678)]
    pub marker: u32,
    #[builder(default = default_ranges())]
    pub interesting_ranges: Vec<ValueRange>,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub scan: ScanConfig,
    pub survey: SurveyConfig,
}

impl ProbeConfig {
    pub fn from_json_str(json: &str) -> ProbeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_capture_layout() {
        let config = ScanConfig::default();
        assert_eq!(config.preamble().unwrap(), Preamble::default());
        assert_eq!(config.payload_len, 512);
        assert!(!config.realign_bits);
        assert_eq!(config.plot_path, PathBuf::from("min_pixels_per_frame.png"));

        let survey = SurveyConfig::default();
        assert_eq!(survey.block_size, 512);
        assert_eq!(survey.header_bits / 8, 48);
        assert_eq!(survey.interesting_ranges.len(), 3);
    }

    #[test]
    fn ranges_are_half_open() {
        let range = ValueRange::new("frame number", 18_701, 18_900);
        assert!(!range.contains(18_700));
        assert!(range.contains(18_701));
        assert!(range.contains(18_899));
        assert!(!range.contains(18_900));
    }

    #[test]
    fn partial_json_keeps_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = ProbeConfig::from_json_str(
            r#"{
                "scan": { "payload_len": 256, "realign_bits": true },
                "survey": { "block_size": 1024 }
            }"#,
        )?;
        assert_eq!(config.scan.payload_len, 256);
        assert!(config.scan.realign_bits);
        assert_eq!(config.scan.preamble_bits, DEFAULT_PREAMBLE_BITS);
        assert_eq!(config.survey.block_size, 1024);
        assert_eq!(config.survey.probe_len, 32);
        Ok(())
    }

    #[test]
    fn empty_json_is_default() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(ProbeConfig::from_json_str("{}")?, ProbeConfig::default());
        Ok(())
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ProbeConfig::from_json_str("{ scan: ").unwrap_err();
        assert!(matches!(err, crate::error::ProbeError::Config(_)));
    }

    #[test]
    fn bad_preamble_is_reported_on_use() {
        let config = ScanConfig::builder().preamble_bits("01x").build();
        assert!(config.preamble().is_err());
    }
}
