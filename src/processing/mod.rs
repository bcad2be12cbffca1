pub mod frames;
pub mod survey;
pub mod table;

// Re-export for easier access
pub use frames::{
    aggregate_frames, clipped_header_start_bit, decode_clipped_record, decode_records, find_gaps,
    header_start_bit, summarize,
};
pub use survey::{InterestingBlock, MarkerHit, SurveyReport, WordOrder, survey};
pub use table::records_to_dataframe;
