// The Error enum carries OIDs and paths inline; boxing them buys little.
#![allow(clippy::result_large_err)]

//! # snmp-trapd
//!
//! SNMPv2c trap receiver: a BER decoder for TRAP2 messages, an SMIv1/v2 MIB
//! parser, and a resolver that prints OIDs and values by their MIB names.
//!
//! ## Features
//!
//! - Strict BER decoding; a malformed datagram is rejected as a whole
//! - MIB modules loaded from a directory, with imports and legacy module
//!   replacements resolved across files
//! - OID names in module, suffix, full, numeric and UCD styles, with table
//!   index decoding
//! - DISPLAY-HINT, enumeration and UNITS aware value rendering
//! - Async UDP listener built on Tokio
//!
//! ## Quick Start
//!
//! ```
//! use snmp_trapd::config::{DisplayConfig, MibOptions, OidOutputFormat};
//! use snmp_trapd::mib::MibDatabase;
//! use snmp_trapd::notification::decode_and_format;
//!
//! # fn main() -> Result<(), snmp_trapd::Error> {
//! let datagram = [
//!     0x30, 0x2B, 0x02, 0x01, 0x01, 0x04, 0x06, b'p', b'u', b'b', b'l', b'i', b'c', 0xA7,
//!     0x1E, 0x02, 0x01, 0x01, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00, 0x30, 0x13, 0x30, 0x11,
//!     0x06, 0x0A, 0x2B, 0x06, 0x01, 0x06, 0x03, 0x01, 0x01, 0x04, 0x01, 0x00, 0x06, 0x03,
//!     0x2B, 0x06, 0x01,
//! ];
//!
//! let db = MibDatabase::new(MibOptions::default());
//! let config = DisplayConfig {
//!     oid_output_format: OidOutputFormat::Numeric,
//!     ..Default::default()
//! };
//! let text = decode_and_format(&db, &config, &datagram)?;
//! assert_eq!(text, "\t.1.3.6.1.6.3.1.1.4.1.0 = OID: .1.3.6.1\n");
//! # Ok(())
//! # }
//! ```

pub mod ber;
pub mod config;
pub mod error;
pub mod format;
pub mod message;
pub mod mib;
pub mod notification;
pub mod oid;
pub mod pdu;
pub mod value;
pub mod varbind;

pub(crate) mod util;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{DecodeErrorKind, Error, OidErrorKind, Result};
pub use message::{TrapMessage, decode_trap};
pub use mib::MibDatabase;
pub use notification::{TrapReceiver, decode_and_format};
pub use oid::Oid;
pub use pdu::{Pdu, PduType};
pub use value::Value;
pub use varbind::VarBind;
