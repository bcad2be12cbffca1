use crate::types::{BufferRecord, HEADER_FIELD_NAMES};
use polars::prelude::*;

/// Create a DataFrame with one row per decoded buffer: its position, every
/// header field and the payload statistics.
pub fn records_to_dataframe(records: &[BufferRecord]) -> Result<DataFrame, PolarsError> {
    let byte_pos: Vec<u64> = records.iter().map(|r| r.position.byte_pos as u64).collect();
    let bit_offset: Vec<u32> = records.iter().map(|r| r.position.bit_offset as u32).collect();
    let clipped: Vec<bool> = records.iter().map(|r| r.clipped).collect();
    let payload_len: Vec<u64> = records.iter().map(|r| r.payload_len as u64).collect();
    let min_pixel: Vec<Option<u32>> = records
        .iter()
        .map(|r| r.min_pixel.map(u32::from))
        .collect();

    let mut columns: Vec<Column> = vec![
        Series::new("byte_pos".into(), &byte_pos).into(),
        Series::new("bit_offset".into(), &bit_offset).into(),
        Series::new("clipped".into(), &clipped).into(),
    ];

    for (idx, name) in HEADER_FIELD_NAMES.iter().enumerate() {
        let values: Vec<Option<u32>> = records.iter().map(|r| r.header.values()[idx]).collect();
        columns.push(Series::new((*name).into(), &values).into());
    }

    columns.push(Series::new("payload_len".into(), &payload_len).into());
    columns.push(Series::new("min_pixel".into(), &min_pixel).into());

    DataFrame::new(columns)
}
