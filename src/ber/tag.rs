//! BER tag constants.

/// Low five bits all set: the tag number continues in following octets.
pub const EXTENSION_ID: u8 = 0x1F;

/// Returns true when `tag` uses the multi-byte tag number form.
pub fn is_extension_id(tag: u8) -> bool {
    tag & EXTENSION_ID == EXTENSION_ID
}

/// Universal class tags.
pub mod universal {
    pub const INTEGER: u8 = 0x02;
    pub const BIT_STRING: u8 = 0x03;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    pub const SEQUENCE: u8 = 0x30;
}

/// Application class tags (RFC 2578 SMIv2 types).
pub mod application {
    pub const IP_ADDRESS: u8 = 0x40;
    pub const COUNTER32: u8 = 0x41;
    pub const GAUGE32: u8 = 0x42;
    pub const TIMETICKS: u8 = 0x43;
    pub const OPAQUE: u8 = 0x44;
    pub const COUNTER64: u8 = 0x46;
}

/// Context class tags used as varbind exception markers (RFC 3416).
pub mod context {
    pub const NO_SUCH_OBJECT: u8 = 0x80;
    pub const NO_SUCH_INSTANCE: u8 = 0x81;
    pub const END_OF_MIB_VIEW: u8 = 0x82;
}

/// Context class constructed PDU tags.
pub mod pdu {
    pub const TRAP_V1: u8 = 0xA4;
    pub const INFORM_REQUEST: u8 = 0xA6;
    pub const TRAP_V2: u8 = 0xA7;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_id() {
        assert!(is_extension_id(0x1F));
        assert!(is_extension_id(0xBF));
        assert!(!is_extension_id(universal::SEQUENCE));
        assert!(!is_extension_id(pdu::TRAP_V2));
        assert!(!is_extension_id(0x1E));
    }
}
