//! BER (Basic Encoding Rules) decoding for SNMP trap datagrams.
//!
//! Only the subset of X.690 needed to read SNMPv1/v2c messages is supported:
//! single-byte tags, definite lengths, and the primitive types carried in
//! variable bindings.
//!
//! Every read is bounds-checked against the enclosing TLV. A declared length
//! that runs past the data it was found in is a [`DecodeErrorKind::TlvOverflow`]
//! error, never an out-of-bounds read.
//!
//! [`DecodeErrorKind::TlvOverflow`]: crate::error::DecodeErrorKind::TlvOverflow

mod decode;
mod length;
pub mod tag;

pub use decode::{COMMUNITY_CAPACITY, Decoder};
pub use length::{decode_length, encode_length};
