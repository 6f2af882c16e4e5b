//! End-to-end decoding and rendering of a captured TRAP2 datagram.

mod common;

use common::{fixture_db, sample_trap};
use snmp_trapd::config::{DisplayConfig, MibOptions, OidOutputFormat};
use snmp_trapd::format::Printer;
use snmp_trapd::mib::MibDatabase;
use snmp_trapd::notification::{check_trap_oid, decode_and_format, find_trap_oid, format_plain_trap};
use snmp_trapd::{DecodeErrorKind, Error, PduType, Value, decode_trap, oid};

fn lines(text: &str) -> Vec<&str> {
    text.lines().map(|line| line.trim_start_matches('\t')).collect()
}

#[test]
fn test_envelope_and_varbinds() {
    let message = decode_trap(&sample_trap()).unwrap();

    assert_eq!(message.version, 1);
    assert_eq!(message.community_str(), "public");
    assert_eq!(message.pdu.pdu_type, PduType::TrapV2);
    assert_eq!(message.pdu.request_id, 69142191);
    assert_eq!(message.pdu.error_status, 0);
    assert_eq!(message.pdu.error_index, 0);
    assert_eq!(message.pdu.varbinds.len(), 5);

    let vbs = &message.pdu.varbinds;
    assert_eq!(vbs[0].oid, oid!(1, 3, 6, 1, 2, 1, 1, 3, 0));
    assert_eq!(vbs[0].value, Value::TimeTicks(35235837));
    assert_eq!(
        vbs[1].value,
        Value::ObjectIdentifier(oid!(1, 3, 6, 1, 2, 1, 15, 7, 2))
    );
    assert_eq!(
        vbs[2].oid,
        oid!(1, 3, 6, 1, 2, 1, 15, 3, 1, 14, 192, 168, 3, 202)
    );
    assert_eq!(vbs[2].value, Value::OctetString(vec![0u8, 0].into()));
    assert_eq!(vbs[3].value, Value::Integer(1));
    assert_eq!(
        vbs[4].value,
        Value::ObjectIdentifier(oid!(1, 3, 6, 1, 4, 1, 2636, 1, 1, 1, 2, 14))
    );

    assert!(check_trap_oid(&message.pdu));
    let trap_oid = find_trap_oid(&message.pdu).unwrap();
    assert_eq!(trap_oid.oid, oid!(1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0));
}

#[test]
fn test_render_without_mibs() {
    let db = MibDatabase::new(MibOptions::default());
    let text = decode_and_format(&db, &DisplayConfig::default(), &sample_trap()).unwrap();

    assert_eq!(
        text,
        "\tiso.3.6.1.2.1.1.3.0 = Timeticks: (35235837) 4 days, 1:52:38.37\n\
         \tiso.3.6.1.6.3.1.1.4.1.0 = OID: iso.3.6.1.2.1.15.7.2\n\
         \tiso.3.6.1.2.1.15.3.1.14.192.168.3.202 = Hex-STRING: 00 00 \n\
         \tiso.3.6.1.2.1.15.3.1.2.192.168.3.202 = INTEGER: 1\n\
         \tiso.3.6.1.6.3.1.1.4.3.0 = OID: iso.3.6.1.4.1.2636.1.1.1.2.14\n"
    );
}

#[test]
fn test_render_numeric_without_mibs() {
    let db = MibDatabase::new(MibOptions::default());
    let config = DisplayConfig {
        oid_output_format: OidOutputFormat::Numeric,
        ..Default::default()
    };
    let text = decode_and_format(&db, &config, &sample_trap()).unwrap();

    assert_eq!(
        lines(&text)[1],
        ".1.3.6.1.6.3.1.1.4.1.0 = OID: .1.3.6.1.2.1.15.7.2"
    );
}

#[test]
fn test_render_with_mibs() {
    let db = fixture_db();
    let text = decode_and_format(db, &DisplayConfig::default(), &sample_trap()).unwrap();

    assert_eq!(
        lines(&text),
        vec![
            "SNMPv2-MIB::sysUpTime.0 = Timeticks: (35235837) 4 days, 1:52:38.37",
            "SNMPv2-MIB::snmpTrapOID.0 = OID: BGP4-MIB::bgpBackwardTransition",
            "BGP4-MIB::bgpPeerLastError.192.168.3.202 = Hex-STRING: 00 00 ",
            "BGP4-MIB::bgpPeerState.192.168.3.202 = INTEGER: idle(1)",
            "SNMPv2-MIB::snmpTrapEnterprise.0 = OID: SNMPv2-SMI::enterprises.2636.1.1.1.2.14",
        ]
    );
}

#[test]
fn test_render_with_mibs_numeric_enums() {
    let db = fixture_db();
    let config = DisplayConfig {
        print_numeric_enum: true,
        ..Default::default()
    };
    let message = decode_trap(&sample_trap()).unwrap();
    let text = format_plain_trap(&Printer::new(db, &config), &message.pdu);

    assert_eq!(
        lines(&text)[3],
        "BGP4-MIB::bgpPeerState.192.168.3.202 = INTEGER: 1"
    );
}

#[test]
fn test_render_with_mibs_suffix() {
    let db = fixture_db();
    let config = DisplayConfig {
        oid_output_format: OidOutputFormat::Suffix,
        ..Default::default()
    };
    let text = decode_and_format(db, &config, &sample_trap()).unwrap();

    assert_eq!(
        lines(&text)[1],
        "snmpTrapOID.0 = OID: bgpBackwardTransition"
    );
}

#[test]
fn test_truncated_datagram_rejected() {
    let data = sample_trap();
    let err = decode_trap(&data[..data.len() - 1]).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_wrong_pdu_type_rejected() {
    let mut data = sample_trap();
    // PDU tag sits after the version and community: 30 81 91 | 02 01 01 | 04 06 public
    assert_eq!(data[14], 0xA7);
    data[14] = 0xA4;
    let err = decode_trap(&data).unwrap_err();
    assert_eq!(
        err.decode_kind(),
        Some(DecodeErrorKind::UnexpectedPduType(0xA4))
    );
}
