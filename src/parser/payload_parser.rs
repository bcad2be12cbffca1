use crate::parser::bits::take_bits;
use std::borrow::Cow;

/// Pixel bytes that follow each header.
pub const PAYLOAD_LEN: usize = 512;

/// Slices the payload that starts at stream bit `bit_index`. Payload bytes are
/// raw sensor values and are not bit-mirrored. The slice is cut short at the
/// end of the capture.
pub fn payload_at(data: &[u8], bit_index: usize, len: usize) -> Cow<'_, [u8]> {
    take_bits(data, bit_index, len)
}

/// Smallest pixel value in the payload, `None` for an empty payload.
pub fn min_pixel(payload: &[u8]) -> Option<u8> {
    payload.iter().copied().min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_of_payload() {
        assert_eq!(min_pixel(&[9, 3, 200, 3, 17]), Some(3));
        assert_eq!(min_pixel(&[0xFF]), Some(0xFF));
        assert_eq!(min_pixel(&[]), None);
    }

    #[test]
    fn payload_is_truncated_at_capture_end() {
        let data = vec![5u8; 100];
        assert_eq!(payload_at(&data, 40 * 8, PAYLOAD_LEN).len(), 60);
        assert!(payload_at(&data, 100 * 8, PAYLOAD_LEN).is_empty());
    }

    #[test]
    fn payload_bytes_are_not_reversed() {
        let data = [0x00, 0x01, 0x80];
        assert_eq!(&*payload_at(&data, 8, 2), &[0x01, 0x80]);
    }
}
