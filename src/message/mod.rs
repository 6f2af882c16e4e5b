//! SNMP message envelope.
//!
//! Community-based (v1/v2c) messages share one layout:
//! `SEQUENCE { version INTEGER, community OCTET STRING, pdu PDU }`.
//! The receiver decodes that envelope around a TRAP2 PDU. The community is
//! carried through for display only; no access decision is made on it.

use crate::ber::Decoder;
use crate::error::Result;
use crate::pdu::Pdu;
use bytes::Bytes;

/// SNMP version number for SNMPv1.
pub const SNMP_VERSION_1: i64 = 0;
/// SNMP version number for SNMPv2c.
pub const SNMP_VERSION_2C: i64 = 1;

/// A decoded community-based trap message.
#[derive(Debug, Clone)]
pub struct TrapMessage {
    /// Version field exactly as received.
    pub version: i64,
    /// Community string
    pub community: Bytes,
    /// The trap PDU
    pub pdu: Pdu,
}

impl TrapMessage {
    /// Decode a message from bytes.
    pub fn decode(data: Bytes) -> Result<Self> {
        let mut decoder = Decoder::new(data);
        let mut seq = decoder.read_sequence()?;

        let version = seq.read_integer()?;
        let community = seq.read_community()?;
        let pdu = Pdu::decode(&mut seq)?;

        tracing::trace!(target: "snmp_trapd::ber", { version, varbinds = pdu.varbinds.len() }, "decoded trap message");

        Ok(TrapMessage {
            version,
            community,
            pdu,
        })
    }

    /// Community as text, with invalid UTF-8 replaced.
    pub fn community_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.community)
    }
}

/// Decode one received datagram.
///
/// Any failure rejects the whole datagram; nothing is partially decoded.
pub fn decode_trap(data: &[u8]) -> Result<TrapMessage> {
    TrapMessage::decode(Bytes::copy_from_slice(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeErrorKind, Error};

    #[test]
    fn test_outer_length_overflow() {
        let err = decode_trap(&[0x30, 0x10, 0x02, 0x01, 0x01]).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                offset: 0,
                kind: DecodeErrorKind::TlvOverflow {
                    length: 16,
                    available: 3
                }
            }
        ));
    }

    #[test]
    fn test_community_too_long() {
        let mut data = vec![0x30, 0x82, 0x01, 0x07, 0x02, 0x01, 0x01, 0x04, 0x82, 0x01, 0x00];
        data.extend(std::iter::repeat_n(b'a', 256));
        let err = decode_trap(&data).unwrap_err();
        assert_eq!(
            err.decode_kind(),
            Some(DecodeErrorKind::BufferTooSmall {
                length: 256,
                capacity: 255
            })
        );
    }

    #[test]
    fn test_wrong_outer_tag() {
        let err = decode_trap(&[0x31, 0x00]).unwrap_err();
        assert_eq!(
            err.decode_kind(),
            Some(DecodeErrorKind::UnexpectedTag {
                expected: 0x30,
                actual: 0x31
            })
        );
    }

    #[test]
    fn test_minimal_trap() {
        let data = [
            0x30, 0x1B, 0x02, 0x01, 0x01, 0x04, 0x03, b'a', b'b', b'c', 0xA7, 0x11, 0x02,
            0x01, 0x01, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00, 0x30, 0x06, 0x30, 0x04, 0x06,
            0x00, 0x05, 0x00,
        ];
        let msg = decode_trap(&data).unwrap();
        assert_eq!(msg.version, SNMP_VERSION_2C);
        assert_eq!(msg.community_str(), "abc");
        assert_eq!(msg.pdu.varbinds.len(), 1);
    }
}
