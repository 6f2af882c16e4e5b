//! BER decoding.
//!
//! Zero-copy decoding using `Bytes` to avoid allocations.

use super::length::decode_length;
use super::tag;
use crate::error::{DecodeErrorKind, Error, Result};
use crate::oid::Oid;
use bytes::Bytes;

/// Capacity of the community string buffer, including the terminator slot.
pub const COMMUNITY_CAPACITY: usize = 256;

/// BER decoder that reads from a byte buffer.
///
/// Sub-decoders created for constructed types keep the absolute position of
/// their first byte so error offsets always refer to the whole datagram.
pub struct Decoder {
    data: Bytes,
    offset: usize,
    base: usize,
}

impl Decoder {
    /// Create a new decoder from bytes.
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            offset: 0,
            base: 0,
        }
    }

    /// Create a decoder from a byte slice (copies the data).
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Get the current offset within the datagram.
    pub fn offset(&self) -> usize {
        self.base + self.offset
    }

    /// Get remaining bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Check if we've reached the end.
    pub fn is_empty(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Peek at the next tag without consuming it.
    pub fn peek_tag(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    fn fail(&self, offset: usize, kind: DecodeErrorKind) -> Error {
        tracing::debug!(target: "snmp_trapd::ber", { snmp.offset = %offset, kind = %kind }, "decode failed");
        Error::decode(offset, kind)
    }

    /// Read a length and return it.
    pub fn read_length(&mut self) -> Result<usize> {
        let (len, consumed) = decode_length(&self.data[self.offset..], self.offset())
            .inspect_err(|e| tracing::debug!(target: "snmp_trapd::ber", { error = %e }, "bad length"))?;
        self.offset += consumed;
        Ok(len)
    }

    /// Read a tag and length, returning `(tag, content_length)`.
    ///
    /// Rejects multi-byte tags and any content length that runs past the
    /// data this decoder covers.
    pub fn read_header(&mut self) -> Result<(u8, usize)> {
        let start = self.offset();
        if self.remaining() < 2 {
            return Err(self.fail(start, DecodeErrorKind::TruncatedData));
        }

        let tag = self.data[self.offset];
        if tag::is_extension_id(tag) {
            return Err(self.fail(start, DecodeErrorKind::ExtensionTag(tag)));
        }
        self.offset += 1;

        let len = self.read_length()?;
        if len > self.remaining() {
            let kind = DecodeErrorKind::TlvOverflow {
                length: len,
                available: self.remaining(),
            };
            return Err(self.fail(start, kind));
        }
        Ok((tag, len))
    }

    /// Read and expect a specific tag, returning the content length.
    pub fn expect_tag(&mut self, expected: u8) -> Result<usize> {
        let start = self.offset();
        let (actual, len) = self.read_header()?;
        if actual != expected {
            return Err(self.fail(start, DecodeErrorKind::UnexpectedTag { expected, actual }));
        }
        Ok(len)
    }

    /// Read raw bytes without copying.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        if len > self.remaining() {
            let kind = DecodeErrorKind::TlvOverflow {
                length: len,
                available: self.remaining(),
            };
            return Err(self.fail(self.offset(), kind));
        }
        let bytes = self.data.slice(self.offset..self.offset + len);
        self.offset += len;
        Ok(bytes)
    }

    /// Read a BER INTEGER (signed, up to 64 bits).
    pub fn read_integer(&mut self) -> Result<i64> {
        let len = self.expect_tag(tag::universal::INTEGER)?;
        self.read_integer_value(len)
    }

    /// Read integer content given the length.
    ///
    /// The value is sign-extended from the high bit of the first byte.
    pub fn read_integer_value(&mut self, len: usize) -> Result<i64> {
        if len == 0 || len > std::mem::size_of::<i64>() {
            return Err(self.fail(
                self.offset(),
                DecodeErrorKind::InvalidIntegerLength { length: len },
            ));
        }

        let bytes = self.read_bytes(len)?;
        let init: i64 = if bytes[0] & 0x80 != 0 { -1 } else { 0 };
        Ok(bytes
            .iter()
            .fold(init, |acc, &b| (acc << 8) | b as i64))
    }

    /// Read Counter32/Gauge32/TimeTicks content given the length.
    ///
    /// Up to five bytes are accepted; a fifth byte is only allowed as a
    /// leading zero sign byte.
    pub fn read_unsigned32_value(&mut self, len: usize) -> Result<u32> {
        let start = self.offset();
        if len == 0 || len > 5 {
            return Err(self.fail(start, DecodeErrorKind::InvalidUnsigned32 { length: len }));
        }

        let bytes = self.read_bytes(len)?;
        if len == 5 && bytes[0] != 0 {
            return Err(self.fail(start, DecodeErrorKind::InvalidUnsigned32 { length: len }));
        }

        Ok(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
    }

    /// Read a Counter64.
    pub fn read_counter64(&mut self) -> Result<u64> {
        let len = self.expect_tag(tag::application::COUNTER64)?;
        self.read_counter64_value(len)
    }

    /// Read Counter64 content given the length.
    ///
    /// At most nine bytes; when all nine are present the first must be zero.
    pub fn read_counter64_value(&mut self, len: usize) -> Result<u64> {
        let start = self.offset();
        if len > 9 {
            return Err(self.fail(start, DecodeErrorKind::Integer64TooLong { length: len }));
        }

        let bytes = self.read_bytes(len)?;
        if len == 9 && bytes[0] != 0 {
            return Err(self.fail(start, DecodeErrorKind::InvalidInteger64Sign));
        }

        Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
    }

    /// Read an OCTET STRING or IpAddress into a buffer of `capacity` bytes.
    ///
    /// Returns the tag that was found along with the content. Content longer
    /// than `capacity` is an error, never silently truncated.
    pub fn read_string(&mut self, capacity: usize) -> Result<(u8, Bytes)> {
        let start = self.offset();
        let (found, len) = self.read_header()?;
        if found != tag::universal::OCTET_STRING && found != tag::application::IP_ADDRESS {
            let kind = DecodeErrorKind::UnexpectedTag {
                expected: tag::universal::OCTET_STRING,
                actual: found,
            };
            return Err(self.fail(start, kind));
        }
        if len > capacity {
            return Err(self.fail(
                self.offset(),
                DecodeErrorKind::BufferTooSmall {
                    length: len,
                    capacity,
                },
            ));
        }
        Ok((found, self.read_bytes(len)?))
    }

    /// Read the community string of a v1/v2c message.
    pub fn read_community(&mut self) -> Result<Bytes> {
        // One slot of the buffer is reserved for the terminator.
        let (_, community) = self.read_string(COMMUNITY_CAPACITY - 1)?;
        Ok(community)
    }

    /// Read an OBJECT IDENTIFIER.
    pub fn read_oid(&mut self) -> Result<Oid> {
        let len = self.expect_tag(tag::universal::OBJECT_IDENTIFIER)?;
        self.read_oid_value(len)
    }

    /// Read an OID given a pre-read length.
    pub fn read_oid_value(&mut self, len: usize) -> Result<Oid> {
        let start = self.offset();
        let bytes = self.read_bytes(len)?;
        Oid::from_ber(&bytes, start)
    }

    /// Read a BIT STRING, returning the content verbatim.
    ///
    /// The leading "unused bits" octet is kept as part of the content and is
    /// not validated.
    pub fn read_bit_string(&mut self) -> Result<Bytes> {
        let len = self.expect_tag(tag::universal::BIT_STRING)?;
        self.read_bytes(len)
    }

    /// Read a SEQUENCE, returning a decoder for its contents.
    pub fn read_sequence(&mut self) -> Result<Decoder> {
        self.read_constructed(tag::universal::SEQUENCE)
    }

    /// Read a constructed type with a specific tag, returning a decoder for its contents.
    pub fn read_constructed(&mut self, expected_tag: u8) -> Result<Decoder> {
        let len = self.expect_tag(expected_tag)?;
        self.sub_decoder(len)
    }

    /// Create a sub-decoder for a portion of the remaining data.
    pub fn sub_decoder(&mut self, len: usize) -> Result<Decoder> {
        let base = self.offset();
        let content = self.read_bytes(len)?;
        Ok(Decoder {
            data: content,
            offset: 0,
            base,
        })
    }

    /// Get remaining data as a slice.
    pub fn remaining_slice(&self) -> &[u8] {
        &self.data[self.offset..]
    }
}
