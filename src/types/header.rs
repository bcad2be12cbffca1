use bon::Builder;

/// Names of the header words, in stream order.
pub const HEADER_FIELD_NAMES: [&str; 12] = [
    "linked_list",
    "frame_num",
    "buffer_count",
    "frame_buffer_count",
    "write_buffer_count",
    "dropped_buffer_count",
    "timestamp",
    "write_timestamp",
    "pixel_count",
    "battery_voltage_raw",
    "input_voltage_raw",
    "unix_time",
];

/// Decoded buffer header. A field is `None` when the capture ended before its
/// word was complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct BufferHeader {
    pub linked_list: Option<u32>,
    pub frame_num: Option<u32>,
    pub buffer_count: Option<u32>,
    pub frame_buffer_count: Option<u32>,
    pub write_buffer_count: Option<u32>,
    pub dropped_buffer_count: Option<u32>,
    pub timestamp: Option<u32>,
    pub write_timestamp: Option<u32>,
    pub pixel_count: Option<u32>,
    pub battery_voltage_raw: Option<u32>,
    pub input_voltage_raw: Option<u32>,
    pub unix_time: Option<u32>,
}

impl BufferHeader {
    /// Build a header from the words that were present, in field order.
    pub fn from_words(words: &[u32]) -> Self {
        let word = |i: usize| words.get(i).copied();
        BufferHeader::builder()
            .maybe_linked_list(word(0))
            .maybe_frame_num(word(1))
            .maybe_buffer_count(word(2))
            .maybe_frame_buffer_count(word(3))
            .maybe_write_buffer_count(word(4))
            .maybe_dropped_buffer_count(word(5))
            .maybe_timestamp(word(6))
            .maybe_write_timestamp(word(7))
            .maybe_pixel_count(word(8))
            .maybe_battery_voltage_raw(word(9))
            .maybe_input_voltage_raw(word(10))
            .maybe_unix_time(word(11))
            .build()
    }

    pub fn values(&self) -> [Option<u32>; 12] {
        [
            self.linked_list,
            self.frame_num,
            self.buffer_count,
            self.frame_buffer_count,
            self.write_buffer_count,
            self.dropped_buffer_count,
            self.timestamp,
            self.write_timestamp,
            self.pixel_count,
            self.battery_voltage_raw,
            self.input_voltage_raw,
            self.unix_time,
        ]
    }

    /// `(name, value)` pairs in stream order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Option<u32>)> {
        HEADER_FIELD_NAMES.into_iter().zip(self.values())
    }

    pub fn is_complete(&self) -> bool {
        self.values().iter().all(Option::is_some)
    }
}
