//! SNMP Protocol Data Units (PDUs).
//!
//! The receiver only assembles SNMPv2 trap PDUs; the other notification
//! tags are recognised so they can be named in diagnostics.

use crate::ber::{Decoder, tag};
use crate::error::{DecodeErrorKind, Error, Result};
use crate::varbind::{VarBind, decode_varbind_list};

/// PDU type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PduType {
    TrapV1 = tag::pdu::TRAP_V1,
    InformRequest = tag::pdu::INFORM_REQUEST,
    TrapV2 = tag::pdu::TRAP_V2,
}

impl PduType {
    /// Create from tag byte.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            tag::pdu::TRAP_V1 => Some(Self::TrapV1),
            tag::pdu::INFORM_REQUEST => Some(Self::InformRequest),
            tag::pdu::TRAP_V2 => Some(Self::TrapV2),
            _ => None,
        }
    }

    /// Get the tag byte.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for PduType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrapV1 => write!(f, "TrapV1"),
            Self::InformRequest => write!(f, "InformRequest"),
            Self::TrapV2 => write!(f, "TrapV2"),
        }
    }
}

/// A decoded trap PDU.
///
/// `error_status` and `error_index` are carried as decoded; a TRAP2 PDU
/// gives them no meaning.
#[derive(Debug, Clone)]
pub struct Pdu {
    /// PDU type
    pub pdu_type: PduType,
    /// Request ID chosen by the sender
    pub request_id: i64,
    /// Error status (normally 0)
    pub error_status: i64,
    /// Error index (normally 0)
    pub error_index: i64,
    /// Variable bindings, in wire order
    pub varbinds: Vec<VarBind>,
}

impl Pdu {
    /// Decode a TRAP2 PDU.
    ///
    /// Any other PDU tag fails with [`DecodeErrorKind::UnexpectedPduType`].
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let start = decoder.offset();
        let (pdu_tag, len) = decoder.read_header()?;

        if pdu_tag != tag::pdu::TRAP_V2 {
            tracing::debug!(target: "snmp_trapd::ber", { snmp.offset = %start, kind = %DecodeErrorKind::UnexpectedPduType(pdu_tag) }, "not a TRAP2 PDU");
            return Err(Error::decode(
                start,
                DecodeErrorKind::UnexpectedPduType(pdu_tag),
            ));
        }

        let mut pdu = decoder.sub_decoder(len)?;
        let request_id = pdu.read_integer()?;
        let error_status = pdu.read_integer()?;
        let error_index = pdu.read_integer()?;
        let varbinds = decode_varbind_list(&mut pdu)?;

        Ok(Pdu {
            pdu_type: PduType::TrapV2,
            request_id,
            error_status,
            error_index,
            varbinds,
        })
    }

    /// Look up the first varbind with the given OID.
    pub fn find(&self, oid: &crate::oid::Oid) -> Option<&VarBind> {
        self.varbinds.iter().find(|vb| &vb.oid == oid)
    }
}
