//! Locating the snmpTrapOID.0 binding in a TRAP2 PDU.
//!
//! RFC 3416 puts sysUpTime.0 first and snmpTrapOID.0 second. Senders that
//! reorder the list are tolerated: the second position is tried first,
//! then the whole list.

use crate::pdu::Pdu;
use crate::varbind::VarBind;

/// Well-known notification OIDs.
pub mod oids {
    use crate::oid;
    use crate::oid::Oid;

    /// sysUpTime.0
    pub fn sys_uptime() -> Oid {
        oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)
    }

    /// snmpTrapOID.0
    pub fn snmp_trap_oid() -> Oid {
        oid!(1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0)
    }
}

/// The varbind carrying snmpTrapOID.0, if any.
pub fn find_trap_oid(pdu: &Pdu) -> Option<&VarBind> {
    let trap_oid = oids::snmp_trap_oid();
    match pdu.varbinds.get(1) {
        Some(vb) if vb.oid == trap_oid => Some(vb),
        _ => pdu.find(&trap_oid),
    }
}

/// Check that the PDU names its notification.
///
/// A missing snmpTrapOID.0 is logged; the caller still renders the
/// remaining variables.
pub fn check_trap_oid(pdu: &Pdu) -> bool {
    match find_trap_oid(pdu) {
        Some(vb) => {
            tracing::debug!(target: "snmp_trapd::notification", { trap_oid = %vb.value }, "found trap OID");
            true
        }
        None => {
            tracing::warn!(target: "snmp_trapd::notification", { varbinds = pdu.varbinds.len() }, "Cannot find TrapOID in TRAP2 PDU");
            false
        }
    }
}
