//! Property-based tests for snmp-trapd.
//!
//! Decoding must reject malformed datagrams without panicking, and
//! rendering must cope with any OID or value a well-formed datagram can
//! carry.

mod common;

use bytes::Bytes;
use common::{fixture_db, sample_trap, trap_pdu};
use proptest::prelude::*;
use snmp_trapd::ber::{decode_length, encode_length};
use snmp_trapd::config::{DisplayConfig, OidOutputFormat};
use snmp_trapd::format::Printer;
use snmp_trapd::mib::MibDatabase;
use snmp_trapd::notification::format_plain_trap;
use snmp_trapd::{Oid, Value, decode_trap};

// =============================================================================
// Strategies
// =============================================================================

/// OIDs whose first two arcs survive the `arc1 * 40 + arc2` fold.
fn arb_oid() -> impl Strategy<Value = Oid> {
    (0u32..=2, any::<u32>(), prop::collection::vec(any::<u32>(), 0..=16)).prop_map(
        |(arc1, arc2, rest)| {
            let arc2 = if arc1 < 2 { arc2 % 40 } else { arc2 % (u32::MAX - 80) };
            Oid::new([arc1, arc2].into_iter().chain(rest))
        },
    )
}

/// OIDs below the BGP peer table, with arbitrary index arcs.
fn arb_bgp_instance() -> impl Strategy<Value = Oid> {
    (1u32..=15, prop::collection::vec(any::<u32>(), 0..=8)).prop_map(|(column, index)| {
        Oid::new(
            [1, 3, 6, 1, 2, 1, 15, 3, 1, column]
                .into_iter()
                .chain(index),
        )
    })
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        prop::collection::vec(any::<u8>(), 0..64)
            .prop_map(|b| Value::OctetString(Bytes::from(b))),
        Just(Value::Null),
        arb_oid().prop_map(Value::ObjectIdentifier),
        any::<[u8; 4]>().prop_map(Value::IpAddress),
        any::<u32>().prop_map(Value::Counter32),
        any::<u32>().prop_map(Value::Gauge32),
        any::<u32>().prop_map(Value::TimeTicks),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(|b| Value::Opaque(Bytes::from(b))),
        any::<u64>().prop_map(Value::Counter64),
        Just(Value::NoSuchObject),
        Just(Value::NoSuchInstance),
        Just(Value::EndOfMibView),
    ]
}

fn arb_oid_format() -> impl Strategy<Value = OidOutputFormat> {
    prop_oneof![
        Just(OidOutputFormat::Module),
        Just(OidOutputFormat::Suffix),
        Just(OidOutputFormat::Full),
        Just(OidOutputFormat::Numeric),
        Just(OidOutputFormat::Ucd),
        Just(OidOutputFormat::None),
    ]
}

// =============================================================================
// BER
// =============================================================================

proptest! {
    #[test]
    fn length_decodes_to_encoded_value(len in 0usize..=(u32::MAX as usize)) {
        let encoded = encode_length(len);
        let (decoded, consumed) = decode_length(&encoded, 0).unwrap();
        prop_assert_eq!(decoded, len);
        prop_assert_eq!(consumed, encoded.len());
    }

    #[test]
    fn oid_first_subidentifier_split(oid in arb_oid()) {
        let decoded = Oid::from_ber(&oid.to_ber(), 0).unwrap();
        prop_assert_eq!(decoded, oid);
    }

    #[test]
    fn decode_random_bytes_never_panics(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode_trap(&data);
    }

    #[test]
    fn decode_corrupted_sample_never_panics(at in 0usize..148, byte in any::<u8>()) {
        let mut data = sample_trap();
        data[at] = byte;
        if let Ok(message) = decode_trap(&data) {
            let db = MibDatabase::new(Default::default());
            let config = DisplayConfig::default();
            let _ = format_plain_trap(&Printer::new(&db, &config), &message.pdu);
        }
    }
}

#[test]
fn every_prefix_of_sample_is_rejected() {
    let data = sample_trap();
    assert_eq!(data.len(), 148);
    for len in 0..data.len() {
        assert!(decode_trap(&data[..len]).is_err(), "prefix of {} bytes decoded", len);
    }
    assert!(decode_trap(&data).is_ok());
}

// =============================================================================
// Rendering
// =============================================================================

proptest! {
    #[test]
    fn render_any_varbind(oid in arb_oid(), value in arb_value(), format in arb_oid_format()) {
        let config = DisplayConfig {
            oid_output_format: format,
            ..Default::default()
        };
        let text = format_plain_trap(&Printer::new(fixture_db(), &config), &trap_pdu(vec![(oid, value)]));
        prop_assert!(text.starts_with('\t'));
        prop_assert!(text.ends_with('\n'));
    }

    #[test]
    fn render_table_instances(
        oid in arb_bgp_instance(),
        value in arb_value(),
        extended in any::<bool>(),
    ) {
        let config = DisplayConfig {
            extended_index: extended,
            ..Default::default()
        };
        let text = format_plain_trap(&Printer::new(fixture_db(), &config), &trap_pdu(vec![(oid, value)]));
        prop_assert!(text.starts_with("\tBGP4-MIB::"), "{}", text);
    }
}
