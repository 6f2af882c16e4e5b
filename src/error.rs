//! Error types for snmp-trapd.
//!
//! [`Error`] covers socket, decode, OID parsing and MIB file failures.
//! [`DecodeErrorKind`] says why a datagram was rejected and
//! [`OidErrorKind`] why an OID string was.
//!
//! MIB text that fails to parse is not an [`Error`]: the module is recorded
//! with [`LoadStatus::SyntaxError`](crate::mib::LoadStatus::SyntaxError) and
//! loading carries on with the remaining modules.
//!
//! # Example
//!
//! ```
//! use snmp_trapd::{DecodeErrorKind, Error, message::decode_trap};
//!
//! // An outer SEQUENCE claiming more content than the datagram carries.
//! let result = decode_trap(&[0x30, 0x10, 0x02, 0x01, 0x01]);
//!
//! match result {
//!     Err(Error::Decode { offset, kind }) => {
//!         println!("dropping datagram: {} at offset {}", kind, offset);
//!         assert_eq!(kind, DecodeErrorKind::TlvOverflow { length: 16, available: 3 });
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a datagram failed BER decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// A TLV carried a tag other than the one the grammar requires.
    UnexpectedTag { expected: u8, actual: u8 },
    /// The datagram ended inside a TLV header.
    TruncatedData,
    /// Length octet 0x80.
    IndefiniteLength,
    /// Length field wider than the native length type.
    LengthTooLong { octets: usize },
    /// Long-form length with the sign bit set.
    NegativeLength,
    /// Declared length runs past the enclosing data.
    TlvOverflow { length: usize, available: usize },
    /// INTEGER content empty or wider than 64 bits.
    InvalidIntegerLength { length: usize },
    /// Subidentifier does not fit in 32 bits.
    SubidentifierOverflow,
    /// Last subidentifier byte still has its continuation bit set.
    InvalidOidEncoding,
    /// OID has more arcs than an SNMP variable may carry.
    TooManyArcs { max: usize },
    /// Counter64 content longer than 9 bytes.
    Integer64TooLong { length: usize },
    /// 9-byte Counter64 whose leading byte is not zero.
    InvalidInteger64Sign,
    /// Counter32/Gauge32/TimeTicks content empty, too long, or with a nonzero sign byte.
    InvalidUnsigned32 { length: usize },
    /// String does not fit the destination buffer.
    BufferTooSmall { length: usize, capacity: usize },
    /// IpAddress content other than 4 bytes.
    InvalidIpAddressLength { length: usize },
    /// Multi-byte ("extension id") tags are not supported.
    ExtensionTag(u8),
    /// Varbind value tag with no decoder.
    UnsupportedValueTag(u8),
    /// PDU is not an SNMPv2 trap.
    UnexpectedPduType(u8),
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedTag { expected, actual } => {
                write!(f, "wanted tag 0x{:02X}, found 0x{:02X}", expected, actual)
            }
            Self::TruncatedData => write!(f, "datagram ends inside a header"),
            Self::IndefiniteLength => write!(f, "indefinite length"),
            Self::LengthTooLong { octets } => write!(f, "{}-octet length field", octets),
            Self::NegativeLength => write!(f, "negative length"),
            Self::TlvOverflow { length, available } => {
                write!(
                    f,
                    "declared length {} exceeds remaining {} bytes",
                    length, available
                )
            }
            Self::InvalidIntegerLength { length } => {
                write!(f, "invalid integer length: {} bytes", length)
            }
            Self::SubidentifierOverflow => write!(f, "subidentifier exceeds 32 bits"),
            Self::InvalidOidEncoding => write!(f, "OID ends mid-subidentifier"),
            Self::TooManyArcs { max } => write!(f, "OID exceeds {} arcs", max),
            Self::Integer64TooLong { length } => write!(f, "Counter64 of {} bytes", length),
            Self::InvalidInteger64Sign => write!(f, "integer64 sign byte is not zero"),
            Self::InvalidUnsigned32 { length } => {
                write!(f, "invalid unsigned32 encoding ({} bytes)", length)
            }
            Self::BufferTooSmall { length, capacity } => {
                write!(f, "string of {} bytes exceeds buffer of {}", length, capacity)
            }
            Self::InvalidIpAddressLength { length } => {
                write!(f, "IpAddress of {} bytes", length)
            }
            Self::ExtensionTag(t) => write!(f, "extension tag 0x{:02X} not supported", t),
            Self::UnsupportedValueTag(t) => write!(f, "unsupported value tag 0x{:02X}", t),
            Self::UnexpectedPduType(t) => write!(f, "expected TRAP2 PDU, got tag 0x{:02X}", t),
        }
    }
}

/// Why an OID string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidErrorKind {
    Empty,
    /// An arc is not a decimal `u32`.
    InvalidArc,
    TooManyArcs { count: usize, max: usize },
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "no arcs"),
            Self::InvalidArc => write!(f, "arc is not a 32-bit number"),
            Self::TooManyArcs { count, max } => write!(f, "{} arcs, limit is {}", count, max),
        }
    }
}

/// Errors returned by the decoder, the MIB loader and the listener.
///
/// A listener only sees `Io` from [`TrapReceiver::recv`]; decode failures
/// are logged there and the datagram is dropped.
///
/// [`TrapReceiver::recv`]: crate::notification::TrapReceiver::recv
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Socket failure; `target` is the bind address when binding failed.
    #[error("socket error{}: {source}", target.map(|t| format!(" on {}", t)).unwrap_or_default())]
    Io {
        target: Option<SocketAddr>,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid OID{}: {kind}", input.as_ref().map(|s| format!(" {:?}", s)).unwrap_or_default())]
    InvalidOid {
        kind: OidErrorKind,
        input: Option<Box<str>>,
    },

    /// The datagram is not a well-formed TRAP2 message.
    #[error("malformed datagram at offset {offset}: {kind}")]
    Decode {
        offset: usize,
        kind: DecodeErrorKind,
    },

    /// A MIB directory or file could not be read.
    #[error("cannot read MIB path {}: {source}", path.display())]
    MibLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Receiver settings that cannot be used.
    #[error("bad configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn decode(offset: usize, kind: DecodeErrorKind) -> Self {
        Self::Decode { offset, kind }
    }

    pub fn invalid_oid_with_input(kind: OidErrorKind, input: impl Into<Box<str>>) -> Self {
        Self::InvalidOid {
            kind,
            input: Some(input.into()),
        }
    }

    pub fn mib_load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::MibLoad {
            path: path.into(),
            source,
        }
    }

    /// Address attached to a socket error.
    pub fn target(&self) -> Option<SocketAddr> {
        match self {
            Self::Io { target, .. } => *target,
            _ => None,
        }
    }

    /// The decode failure kind, if this is a decode error.
    pub fn decode_kind(&self) -> Option<DecodeErrorKind> {
        match self {
            Self::Decode { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
