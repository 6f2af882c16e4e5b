//! Trap datagrams and MIB directories used across the integration tests.

use snmp_trapd::config::MibOptions;
use snmp_trapd::mib::MibDatabase;
use snmp_trapd::{Oid, Pdu, PduType, Value, VarBind};
use std::path::PathBuf;
use std::sync::OnceLock;

// =============================================================================
// Datagrams
// =============================================================================

/// A TRAP2 from a router reporting bgpBackwardTransition for peer
/// 192.168.3.202.
///
/// Varbinds, in order:
/// - sysUpTime.0 = TimeTicks 35235837
/// - snmpTrapOID.0 = bgpBackwardTransition (1.3.6.1.2.1.15.7.2)
/// - bgpPeerLastError.192.168.3.202 = OCTET STRING 00 00
/// - bgpPeerState.192.168.3.202 = INTEGER 1
/// - snmpTrapEnterprise.0 = 1.3.6.1.4.1.2636.1.1.1.2.14
pub const SAMPLE_TRAP_HEX: &str = "\
30819102010104067075626c6963a781830204691421910201000201003075301006082b\
0601020101030043040219a7fd3016060a2b06010603010104010006082b060102010f07\
02301606102b060102010f03010e8140812803814a04020000301506102b060102010f03\
01028140812803814a020101301a060a2b060106030101040300060c2b06010401944c01\
0101020e";

/// Decode a hex string; panics on malformed input.
pub fn hex_bytes(hex: &str) -> Vec<u8> {
    assert!(hex.len() % 2 == 0, "odd hex length");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("valid hex"))
        .collect()
}

/// The sample trap as bytes.
pub fn sample_trap() -> Vec<u8> {
    hex_bytes(SAMPLE_TRAP_HEX)
}

/// A TRAP2 PDU holding the given varbinds.
pub fn trap_pdu(varbinds: Vec<(Oid, Value)>) -> Pdu {
    Pdu {
        pdu_type: PduType::TrapV2,
        request_id: 1,
        error_status: 0,
        error_index: 0,
        varbinds: varbinds
            .into_iter()
            .map(|(oid, value)| VarBind::new(oid, value))
            .collect(),
    }
}

// =============================================================================
// MIB directories
// =============================================================================

/// Path of a directory under `tests/fixtures`.
pub fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The `mibs` fixture directory loaded once per test binary.
pub fn fixture_db() -> &'static MibDatabase {
    static DB: OnceLock<MibDatabase> = OnceLock::new();
    DB.get_or_init(|| MibDatabase::init_mib(fixture_dir("mibs"), MibOptions::default()))
}

/// The `index` fixture directory: tables keyed by each decodable index type.
pub fn index_db() -> &'static MibDatabase {
    static DB: OnceLock<MibDatabase> = OnceLock::new();
    DB.get_or_init(|| MibDatabase::init_mib(fixture_dir("index"), MibOptions::default()))
}
