//! Capture stream parsing functionality

pub mod bits;
mod header_parser;
mod payload_parser;
mod preamble_parser;

// Re-export the parsing functions
pub use header_parser::{HEADER_LEN, decode_header, parse_header, take_header};
pub use payload_parser::{PAYLOAD_LEN, min_pixel, payload_at};
pub use preamble_parser::{
    DEFAULT_PREAMBLE_BITS, Preamble, find_preambles, starts_with_clipped_preamble,
};
