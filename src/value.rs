//! SNMP value types.
//!
//! The `Value` enum represents every value type a trap varbind can carry,
//! including the three exception markers.

use crate::ber::{Decoder, tag};
use crate::error::{DecodeErrorKind, Error, Result};
use crate::format::hex;
use crate::oid::Oid;
use bytes::Bytes;

/// SNMP value.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// INTEGER (signed, decoded up to 64 bits)
    Integer(i64),

    /// OCTET STRING (arbitrary bytes).
    OctetString(Bytes),

    /// NULL
    Null,

    /// OBJECT IDENTIFIER
    ObjectIdentifier(Oid),

    /// BIT STRING, content kept verbatim including the unused-bits octet.
    BitString(Bytes),

    /// IpAddress (4 bytes, big-endian)
    IpAddress([u8; 4]),

    /// Counter32 (unsigned 32-bit, wrapping)
    Counter32(u32),

    /// Gauge32 / Unsigned32 (unsigned 32-bit, non-wrapping)
    Gauge32(u32),

    /// TimeTicks (hundredths of seconds)
    TimeTicks(u32),

    /// Opaque (legacy, arbitrary bytes)
    Opaque(Bytes),

    /// Counter64 (unsigned 64-bit, wrapping).
    Counter64(u64),

    /// noSuchObject exception.
    NoSuchObject,

    /// noSuchInstance exception.
    NoSuchInstance,

    /// endOfMibView exception.
    EndOfMibView,
}

impl Value {
    /// The BER tag this value was (or would be) encoded with.
    pub fn tag(&self) -> u8 {
        match self {
            Value::Integer(_) => tag::universal::INTEGER,
            Value::OctetString(_) => tag::universal::OCTET_STRING,
            Value::Null => tag::universal::NULL,
            Value::ObjectIdentifier(_) => tag::universal::OBJECT_IDENTIFIER,
            Value::BitString(_) => tag::universal::BIT_STRING,
            Value::IpAddress(_) => tag::application::IP_ADDRESS,
            Value::Counter32(_) => tag::application::COUNTER32,
            Value::Gauge32(_) => tag::application::GAUGE32,
            Value::TimeTicks(_) => tag::application::TIMETICKS,
            Value::Opaque(_) => tag::application::OPAQUE,
            Value::Counter64(_) => tag::application::COUNTER64,
            Value::NoSuchObject => tag::context::NO_SUCH_OBJECT,
            Value::NoSuchInstance => tag::context::NO_SUCH_INSTANCE,
            Value::EndOfMibView => tag::context::END_OF_MIB_VIEW,
        }
    }

    /// Try to get as i64.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_trapd::Value;
    ///
    /// assert_eq!(Value::Integer(-100).as_i64(), Some(-100));
    /// assert_eq!(Value::Counter32(42).as_i64(), None);
    /// ```
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u32 (Counter32, Gauge32 or TimeTicks).
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the raw bytes of a string-like value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(data) | Value::Opaque(data) | Value::BitString(data) => Some(data),
            Value::IpAddress(addr) => Some(addr),
            _ => None,
        }
    }

    /// Try to get as OID.
    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            Value::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    /// Check if this is an exception marker.
    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView
        )
    }

    /// Decode a varbind value, dispatching on its tag.
    ///
    /// Tags without a decoder fail the whole datagram with
    /// [`DecodeErrorKind::UnsupportedValueTag`].
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let start = decoder.offset();
        let (found, len) = decoder.read_header()?;

        match found {
            tag::universal::INTEGER => Ok(Value::Integer(decoder.read_integer_value(len)?)),
            tag::universal::OCTET_STRING => Ok(Value::OctetString(decoder.read_bytes(len)?)),
            tag::universal::NULL => {
                decoder.read_bytes(len)?;
                Ok(Value::Null)
            }
            tag::universal::OBJECT_IDENTIFIER => {
                Ok(Value::ObjectIdentifier(decoder.read_oid_value(len)?))
            }
            tag::universal::BIT_STRING => Ok(Value::BitString(decoder.read_bytes(len)?)),
            tag::application::IP_ADDRESS => {
                if len != 4 {
                    tracing::debug!(target: "snmp_trapd::ber", { snmp.offset = %start, kind = %DecodeErrorKind::InvalidIpAddressLength { length: len } }, "IpAddress is not 4 bytes");
                    return Err(Error::decode(
                        start,
                        DecodeErrorKind::InvalidIpAddressLength { length: len },
                    ));
                }
                let data = decoder.read_bytes(4)?;
                Ok(Value::IpAddress([data[0], data[1], data[2], data[3]]))
            }
            tag::application::COUNTER32 => {
                Ok(Value::Counter32(decoder.read_unsigned32_value(len)?))
            }
            tag::application::GAUGE32 => Ok(Value::Gauge32(decoder.read_unsigned32_value(len)?)),
            tag::application::TIMETICKS => {
                Ok(Value::TimeTicks(decoder.read_unsigned32_value(len)?))
            }
            tag::application::OPAQUE => Ok(Value::Opaque(decoder.read_bytes(len)?)),
            tag::application::COUNTER64 => {
                Ok(Value::Counter64(decoder.read_counter64_value(len)?))
            }
            tag::context::NO_SUCH_OBJECT => {
                decoder.read_bytes(len)?;
                Ok(Value::NoSuchObject)
            }
            tag::context::NO_SUCH_INSTANCE => {
                decoder.read_bytes(len)?;
                Ok(Value::NoSuchInstance)
            }
            tag::context::END_OF_MIB_VIEW => {
                decoder.read_bytes(len)?;
                Ok(Value::EndOfMibView)
            }
            other => {
                tracing::debug!(target: "snmp_trapd::ber", { snmp.offset = %start, kind = %DecodeErrorKind::UnsupportedValueTag(other) }, "bad type returned");
                Err(Error::decode(
                    start,
                    DecodeErrorKind::UnsupportedValueTag(other),
                ))
            }
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::OctetString(data) => {
                if let Ok(s) = std::str::from_utf8(data) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "0x{}", hex::encode(data))
                }
            }
            Value::Null => write!(f, "NULL"),
            Value::ObjectIdentifier(oid) => write!(f, "{}", oid),
            Value::BitString(data) => write!(f, "BITS(0x{})", hex::encode(data)),
            Value::IpAddress(addr) => {
                write!(f, "{}.{}.{}.{}", addr[0], addr[1], addr[2], addr[3])
            }
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => write!(f, "{}", v),
            Value::Opaque(data) => write!(f, "Opaque(0x{})", hex::encode(data)),
            Value::Counter64(v) => write!(f, "{}", v),
            Value::NoSuchObject => write!(f, "noSuchObject"),
            Value::NoSuchInstance => write!(f, "noSuchInstance"),
            Value::EndOfMibView => write!(f, "endOfMibView"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<Value> {
        Value::decode(&mut Decoder::from_slice(bytes))
    }

    #[test]
    fn test_timeticks() {
        assert_eq!(
            decode(&[0x43, 0x04, 0x02, 0x19, 0xA7, 0xFD]).unwrap(),
            Value::TimeTicks(0x0219A7FD)
        );
    }

    #[test]
    fn test_counters_and_gauge() {
        assert_eq!(decode(&[0x41, 0x01, 0x05]).unwrap(), Value::Counter32(5));
        assert_eq!(
            decode(&[0x42, 0x05, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap(),
            Value::Gauge32(u32::MAX)
        );
        assert_eq!(
            decode(&[0x46, 0x05, 0x01, 0x00, 0x00, 0x00, 0x00]).unwrap(),
            Value::Counter64(1 << 32)
        );
    }

    #[test]
    fn test_octet_string_binary() {
        assert_eq!(
            decode(&[0x04, 0x02, 0x00, 0x00]).unwrap(),
            Value::OctetString(Bytes::from_static(&[0, 0]))
        );
    }

    #[test]
    fn test_ip_address() {
        assert_eq!(
            decode(&[0x40, 0x04, 10, 0, 0, 1]).unwrap(),
            Value::IpAddress([10, 0, 0, 1])
        );
        let err = decode(&[0x40, 0x03, 10, 0, 0]).unwrap_err();
        assert_eq!(
            err.decode_kind(),
            Some(DecodeErrorKind::InvalidIpAddressLength { length: 3 })
        );
    }

    #[test]
    fn test_null_and_exceptions() {
        assert_eq!(decode(&[0x05, 0x00]).unwrap(), Value::Null);
        assert_eq!(decode(&[0x80, 0x00]).unwrap(), Value::NoSuchObject);
        assert_eq!(decode(&[0x81, 0x00]).unwrap(), Value::NoSuchInstance);
        assert_eq!(decode(&[0x82, 0x00]).unwrap(), Value::EndOfMibView);
        assert!(Value::EndOfMibView.is_exception());
        assert!(!Value::Null.is_exception());
    }

    #[test]
    fn test_unsupported_tag_fails() {
        let err = decode(&[0x47, 0x01, 0x00]).unwrap_err();
        assert_eq!(
            err.decode_kind(),
            Some(DecodeErrorKind::UnsupportedValueTag(0x47))
        );
    }

    #[test]
    fn test_tag_matches_decoded_type() {
        for bytes in [
            &[0x02, 0x01, 0x01][..],
            &[0x04, 0x00],
            &[0x06, 0x01, 0x2B],
            &[0x03, 0x01, 0x00],
            &[0x44, 0x00],
        ] {
            let value = decode(bytes).unwrap();
            assert_eq!(value.tag(), bytes[0]);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::IpAddress([192, 168, 3, 202]).to_string(), "192.168.3.202");
        assert_eq!(
            Value::OctetString(Bytes::from_static(&[0xFF, 0x00])).to_string(),
            "0xff00"
        );
    }
}
