//! Variable bindings carried by a trap.

use crate::ber::Decoder;
use crate::error::Result;
use crate::oid::Oid;
use crate::value::Value;

/// One `name = value` pair from the PDU's varbind list.
#[derive(Debug, Clone, PartialEq)]
pub struct VarBind {
    pub oid: Oid,
    pub value: Value,
}

impl VarBind {
    pub fn new(oid: Oid, value: Value) -> Self {
        Self { oid, value }
    }

    /// Decode one `SEQUENCE { name, value }`.
    ///
    /// Bytes left in the varbind SEQUENCE after the value are ignored.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let mut seq = decoder.read_sequence()?;
        let oid = seq.read_oid()?;
        let value = Value::decode(&mut seq)?;
        Ok(VarBind { oid, value })
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.oid, self.value)
    }
}

/// Decode the varbind list SEQUENCE, keeping wire order.
///
/// Any malformed varbind fails the whole list.
pub fn decode_varbind_list(decoder: &mut Decoder) -> Result<Vec<VarBind>> {
    let mut seq = decoder.read_sequence()?;

    // a trap varbind is rarely under 16 bytes
    let mut varbinds = Vec::with_capacity((seq.remaining() / 16).max(1));

    while !seq.is_empty() {
        varbinds.push(VarBind::decode(&mut seq)?);
    }

    Ok(varbinds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;
    use crate::oid;

    #[test]
    fn test_decode_single() {
        // SEQUENCE { 1.3.6.1.2.1.1.3.0, TimeTicks 100 }
        let bytes = [
            0x30, 0x0D, 0x06, 0x08, 0x2B, 0x06, 0x01, 0x02, 0x01, 0x01, 0x03, 0x00, 0x43, 0x01,
            0x64,
        ];
        let vb = VarBind::decode(&mut Decoder::from_slice(&bytes)).unwrap();
        assert_eq!(vb.oid, oid!(1, 3, 6, 1, 2, 1, 1, 3, 0));
        assert_eq!(vb.value, Value::TimeTicks(100));
    }

    #[test]
    fn test_decode_list_empty() {
        let list = decode_varbind_list(&mut Decoder::from_slice(&[0x30, 0x00])).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_decode_list_with_exception() {
        let bytes = [
            0x30, 0x0E, // list
            0x30, 0x05, 0x06, 0x01, 0x2B, 0x05, 0x00, // 1.3 = NULL
            0x30, 0x05, 0x06, 0x01, 0x2B, 0x81, 0x00, // 1.3 = noSuchInstance
        ];
        let list = decode_varbind_list(&mut Decoder::from_slice(&bytes)).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].value, Value::Null);
        assert_eq!(list[1].value, Value::NoSuchInstance);
    }

    #[test]
    fn test_bad_value_fails_list() {
        let bytes = [
            0x30, 0x07, 0x30, 0x05, 0x06, 0x01, 0x2B, 0x47, 0x00,
        ];
        let err = decode_varbind_list(&mut Decoder::from_slice(&bytes)).unwrap_err();
        assert_eq!(
            err.decode_kind(),
            Some(DecodeErrorKind::UnsupportedValueTag(0x47))
        );
    }

    #[test]
    fn test_varbind_display() {
        let vb = VarBind::new(oid!(1, 3, 6, 1), Value::Integer(42));
        assert_eq!(vb.to_string(), "1.3.6.1 = 42");
    }
}
