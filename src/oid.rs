//! Object Identifier (OID) type.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for common OIDs.

use crate::error::{DecodeErrorKind, Error, OidErrorKind, Result};
use smallvec::SmallVec;
use std::fmt;

/// Maximum number of arcs (subidentifiers) allowed in an OID.
///
/// Per RFC 2578 Section 3.5: "there are at most 128 sub-identifiers in a value".
/// The first encoded subidentifier expands into two arcs, so at most
/// `MAX_OID_LEN - 1` subidentifiers are read from the wire.
pub const MAX_OID_LEN: usize = 128;

/// Object Identifier.
///
/// Stored as a sequence of arc values (u32). Uses SmallVec to avoid
/// heap allocation for OIDs with 16 or fewer arcs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_trapd::oid::Oid;
    ///
    /// let oid = Oid::new(vec![1, 3, 6, 1, 2, 1]);
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.2.1.1.1.0").
    ///
    /// A leading dot is accepted, as printed by the full and numeric output
    /// formats.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_trapd::oid::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.6.3.1.1.4.1.0").unwrap();
    /// assert_eq!(oid.len(), 11);
    /// assert!(Oid::parse("1.3.x").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.strip_prefix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Err(Error::invalid_oid_with_input(OidErrorKind::Empty, s));
        }

        let mut arcs = SmallVec::new();
        for part in trimmed.split('.') {
            let arc: u32 = part
                .parse()
                .map_err(|_| Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s))?;
            arcs.push(arc);
        }

        if arcs.len() > MAX_OID_LEN {
            return Err(Error::invalid_oid_with_input(
                OidErrorKind::TooManyArcs {
                    count: arcs.len(),
                    max: MAX_OID_LEN,
                },
                s,
            ));
        }

        Ok(Self { arcs })
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID has no arcs.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Check if this OID starts with another OID.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.starts_with(&other.arcs)
    }

    /// Encode the content octets of this OID (no tag or length).
    ///
    /// The first two arcs are folded into one subidentifier as
    /// `arc1 * 40 + arc2`. Used to build datagrams in tests and benchmarks.
    pub fn to_ber(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        match self.arcs.as_slice() {
            [] => {}
            [first] => encode_subidentifier(&mut bytes, first.saturating_mul(40)),
            [first, second, rest @ ..] => {
                encode_subidentifier(&mut bytes, first.saturating_mul(40).saturating_add(*second));
                for &arc in rest {
                    encode_subidentifier(&mut bytes, arc);
                }
            }
        }
        bytes
    }

    /// Decode OID content octets.
    ///
    /// `base_offset` is the absolute position of `data` in the datagram and
    /// is only used for error reporting.
    ///
    /// Empty content (`06 00`) decodes as `0.0`. The first subidentifier is
    /// split into two arcs: values below 40 give `0.x`, below 80 give
    /// `1.(x-40)`, and anything larger gives `2.(x-80)`.
    pub fn from_ber(data: &[u8], base_offset: usize) -> Result<Self> {
        let mut arcs: SmallVec<[u32; 16]> = SmallVec::new();
        arcs.push(0);

        let mut pos = 0;
        while pos < data.len() {
            if arcs.len() >= MAX_OID_LEN {
                tracing::debug!(target: "snmp_trapd::ber", { snmp.offset = %(base_offset + pos), kind = %DecodeErrorKind::TooManyArcs { max: MAX_OID_LEN } }, "OID too long");
                return Err(Error::decode(
                    base_offset + pos,
                    DecodeErrorKind::TooManyArcs { max: MAX_OID_LEN },
                ));
            }
            let (subid, consumed) = decode_subidentifier(&data[pos..], base_offset + pos)?;
            arcs.push(subid);
            pos += consumed;
        }

        let first = if arcs.len() >= 2 { arcs[1] } else { 0 };
        let (arc1, arc2) = match first {
            0..=39 => (0, first),
            40..=79 => (1, first - 40),
            _ => (2, first - 80),
        };
        arcs[0] = arc1;
        if arcs.len() >= 2 {
            arcs[1] = arc2;
        } else {
            arcs.push(arc2);
        }

        Ok(Self { arcs })
    }
}

/// Encode a subidentifier in base-128 variable length.
fn encode_subidentifier(bytes: &mut Vec<u8>, value: u32) {
    let groups = (32 - value.leading_zeros()).div_ceil(7).max(1);
    for i in (0..groups).rev() {
        let mut byte = ((value >> (i * 7)) & 0x7F) as u8;
        if i > 0 {
            byte |= 0x80;
        }
        bytes.push(byte);
    }
}

/// Decode a subidentifier, returning (value, bytes_consumed).
fn decode_subidentifier(data: &[u8], base_offset: usize) -> Result<(u32, usize)> {
    let mut value: u64 = 0;

    for (i, &byte) in data.iter().enumerate() {
        value = (value << 7) | (byte & 0x7F) as u64;
        if value > u32::MAX as u64 {
            tracing::debug!(target: "snmp_trapd::ber", { snmp.offset = %(base_offset + i), kind = %DecodeErrorKind::SubidentifierOverflow }, "subidentifier too large");
            return Err(Error::decode(
                base_offset + i,
                DecodeErrorKind::SubidentifierOverflow,
            ));
        }
        if byte & 0x80 == 0 {
            return Ok((value as u32, i + 1));
        }
    }

    // Ran out of content with the continuation bit still set.
    let offset = base_offset + data.len().saturating_sub(1);
    tracing::debug!(target: "snmp_trapd::ber", { snmp.offset = %offset, kind = %DecodeErrorKind::InvalidOidEncoding }, "subidentifier syntax error");
    Err(Error::decode(offset, DecodeErrorKind::InvalidOidEncoding))
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Macro to create an OID at compile time.
///
/// # Examples
///
/// ```
/// use snmp_trapd::oid;
///
/// let trap_oid = oid!(1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0);
/// assert_eq!(trap_oid.to_string(), "1.3.6.1.6.3.1.1.4.1.0");
/// assert!(trap_oid.starts_with(&oid!(1, 3, 6, 1, 6, 3)));
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1, 1, 1, 0]);
        assert!(Oid::parse("").is_err());
        assert!(Oid::parse("1..3").is_err());
    }

    #[test]
    fn test_display() {
        let oid = oid!(1, 3, 6, 1, 4, 1, 2636);
        assert_eq!(oid.to_string(), "1.3.6.1.4.1.2636");
    }

    #[test]
    fn test_from_ber_iso_prefix() {
        let oid = Oid::from_ber(&[0x2B, 0x06, 0x01, 0x04, 0x01, 0x94, 0x4C], 0).unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 4, 1, 2636]);
    }

    #[test]
    fn test_from_ber_first_arc_split() {
        assert_eq!(Oid::from_ber(&[0x27], 0).unwrap().arcs(), &[0, 39]);
        assert_eq!(Oid::from_ber(&[0x28], 0).unwrap().arcs(), &[1, 0]);
        assert_eq!(Oid::from_ber(&[0x50], 0).unwrap().arcs(), &[2, 0]);
        // 2.100 needs a two-byte first subidentifier
        assert_eq!(Oid::from_ber(&[0x81, 0x34], 0).unwrap().arcs(), &[2, 100]);
    }

    #[test]
    fn test_from_ber_empty_content() {
        assert_eq!(Oid::from_ber(&[], 0).unwrap().arcs(), &[0, 0]);
    }

    #[test]
    fn test_from_ber_continuation_on_last_byte() {
        let err = Oid::from_ber(&[0x2B, 0x86], 10).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                offset: 11,
                kind: DecodeErrorKind::InvalidOidEncoding
            }
        ));
    }

    #[test]
    fn test_from_ber_subid_overflow() {
        // 0x1_0000_0000 in base-128
        let err = Oid::from_ber(&[0x2B, 0x90, 0x80, 0x80, 0x80, 0x00], 0).unwrap_err();
        assert_eq!(err.decode_kind(), Some(DecodeErrorKind::SubidentifierOverflow));

        // u32::MAX still fits
        let oid = Oid::from_ber(&[0x2B, 0x8F, 0xFF, 0xFF, 0xFF, 0x7F], 0).unwrap();
        assert_eq!(oid.arcs(), &[1, 3, u32::MAX]);
    }

    #[test]
    fn test_from_ber_arc_limit() {
        let mut data = vec![0x2B];
        data.extend(std::iter::repeat_n(0x01, MAX_OID_LEN - 2));
        let oid = Oid::from_ber(&data, 0).unwrap();
        assert_eq!(oid.len(), MAX_OID_LEN);

        data.push(0x01);
        let err = Oid::from_ber(&data, 0).unwrap_err();
        assert_eq!(
            err.decode_kind(),
            Some(DecodeErrorKind::TooManyArcs { max: MAX_OID_LEN })
        );
    }

    #[test]
    fn test_to_ber() {
        assert_eq!(oid!(1, 3, 6, 1, 4, 1, 2636).to_ber(), vec![0x2B, 6, 1, 4, 1, 0x94, 0x4C]);
        assert_eq!(oid!(2, 100).to_ber(), vec![0x81, 0x34]);
    }
}
