//! BER length decoding.
//!
//! Length encoding follows X.690 Section 8.1.3:
//! - Short form: Single byte, bit 8=0, value 0-127
//! - Long form: Initial byte (bit 8=1, bits 7-1=count), followed by length bytes
//! - Indefinite form (0x80): Rejected
//!
//! Long-form lengths may use up to eight length octets. Values that would be
//! negative as a signed 64-bit integer are rejected.

use smallvec::SmallVec;

use crate::error::{DecodeErrorKind, Error, Result};

/// Widest long-form length accepted, in octets.
const MAX_LENGTH_OCTETS: usize = std::mem::size_of::<u64>();

/// Decode a length from bytes, returning (length, bytes_consumed)
///
/// The `base_offset` parameter is used to report error offsets correctly
/// when this is called from within a decoder. The caller is responsible for
/// checking the returned length against the data that follows.
pub fn decode_length(data: &[u8], base_offset: usize) -> Result<(usize, usize)> {
    let Some(&first) = data.first() else {
        return Err(Error::decode(base_offset, DecodeErrorKind::TruncatedData));
    };

    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }

    let num_octets = (first & 0x7F) as usize;

    if num_octets == 0 {
        return Err(Error::decode(
            base_offset,
            DecodeErrorKind::IndefiniteLength,
        ));
    }

    if num_octets > MAX_LENGTH_OCTETS {
        return Err(Error::decode(
            base_offset,
            DecodeErrorKind::LengthTooLong { octets: num_octets },
        ));
    }

    if data.len() < 1 + num_octets {
        return Err(Error::decode(base_offset, DecodeErrorKind::TruncatedData));
    }

    let value = data[1..=num_octets]
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | b as u64);

    if (value as i64) < 0 {
        return Err(Error::decode(base_offset, DecodeErrorKind::NegativeLength));
    }

    let len = usize::try_from(value).map_err(|_| {
        Error::decode(
            base_offset,
            DecodeErrorKind::LengthTooLong { octets: num_octets },
        )
    })?;

    Ok((len, 1 + num_octets))
}

/// Encode a length in minimal form.
///
/// The receiver never encodes messages; this exists so tests and benchmarks
/// can build well-formed datagrams.
pub fn encode_length(len: usize) -> SmallVec<[u8; 9]> {
    let mut out = SmallVec::new();
    if len <= 127 {
        out.push(len as u8);
        return out;
    }

    let bytes = (len as u64).to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form() {
        assert_eq!(decode_length(&[0], 0).unwrap(), (0, 1));
        assert_eq!(decode_length(&[127], 0).unwrap(), (127, 1));
        assert_eq!(decode_length(&[1], 0).unwrap(), (1, 1));
    }

    #[test]
    fn test_long_form_1_byte() {
        assert_eq!(decode_length(&[0x81, 128], 0).unwrap(), (128, 2));
        assert_eq!(decode_length(&[0x81, 255], 0).unwrap(), (255, 2));
    }

    #[test]
    fn test_long_form_2_bytes() {
        assert_eq!(decode_length(&[0x82, 0x01, 0x00], 0).unwrap(), (256, 3));
        assert_eq!(decode_length(&[0x82, 0xFF, 0xFF], 0).unwrap(), (65535, 3));
    }

    #[test]
    fn test_indefinite_rejected() {
        let err = decode_length(&[0x80], 3).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                offset: 3,
                kind: DecodeErrorKind::IndefiniteLength
            }
        ));
    }

    #[test]
    fn test_too_many_length_octets() {
        let err = decode_length(&[0x89, 0, 0, 0, 0, 0, 0, 0, 0, 1], 0).unwrap_err();
        assert_eq!(
            err.decode_kind(),
            Some(DecodeErrorKind::LengthTooLong { octets: 9 })
        );
    }

    #[test]
    fn test_negative_length_rejected() {
        let err =
            decode_length(&[0x88, 0x80, 0, 0, 0, 0, 0, 0, 0], 0).unwrap_err();
        assert_eq!(err.decode_kind(), Some(DecodeErrorKind::NegativeLength));
    }

    #[test]
    fn test_truncated_long_form() {
        let err = decode_length(&[0x82, 0x01], 0).unwrap_err();
        assert_eq!(err.decode_kind(), Some(DecodeErrorKind::TruncatedData));
        let err = decode_length(&[], 0).unwrap_err();
        assert_eq!(err.decode_kind(), Some(DecodeErrorKind::TruncatedData));
    }

    #[test]
    fn test_accept_oversized_length_encoding() {
        // Non-minimal length encodings are valid per X.690 Section 8.1.3.5 Note 2
        assert_eq!(decode_length(&[0x82, 0x00, 0x05], 0).unwrap(), (5, 3));
        assert_eq!(decode_length(&[0x81, 0x01], 0).unwrap(), (1, 2));
        assert_eq!(
            decode_length(&[0x83, 0x00, 0x00, 0x80], 0).unwrap(),
            (128, 4)
        );
    }

    #[test]
    fn test_encode_minimal() {
        assert_eq!(encode_length(0).as_slice(), &[0]);
        assert_eq!(encode_length(127).as_slice(), &[127]);
        assert_eq!(encode_length(128).as_slice(), &[0x81, 0x80]);
        assert_eq!(encode_length(256).as_slice(), &[0x82, 0x01, 0x00]);
    }
}
