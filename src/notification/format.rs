//! Plain-text trap rendering.
//!
//! Each varbind becomes one line: a tab, the resolved OID, ` = `, and the
//! value rendered through the matched node's renderer.

use crate::format::{Annotations, Printer};
use crate::oid::Oid;
use crate::pdu::Pdu;
use crate::value::Value;

/// Append `name = value` for one variable.
pub fn sprint_variable(printer: &Printer<'_>, out: &mut String, oid: &Oid, value: &Value) {
    let subtree = printer.objid_tree(out, oid.arcs());
    out.push_str(" = ");

    match value {
        Value::NoSuchObject => {
            out.push_str("No Such Object available on this agent at this OID");
        }
        Value::NoSuchInstance => {
            out.push_str("No Such Instance currently exists at this OID");
        }
        Value::EndOfMibView => out.push_str(
            "No more variables left in this MIB View (It is past the end of the MIB tree)",
        ),
        _ => match subtree {
            Some(id) => {
                let node = printer.db().tree().node(id);
                let config = printer.config();
                let ann = Annotations {
                    enums: &node.enums,
                    hint: node.hint.as_deref().filter(|_| !config.no_display_hint),
                    units: node.units.as_deref().filter(|_| !config.dont_print_units),
                };
                printer.render(out, node.renderer, value, ann);
            }
            None => printer.by_type(out, value, Annotations::default()),
        },
    }
}

/// Render every varbind of `pdu`, in wire order, one line each.
pub fn format_plain_trap(printer: &Printer<'_>, pdu: &Pdu) -> String {
    let mut out = String::new();
    for vb in &pdu.varbinds {
        out.push('\t');
        sprint_variable(printer, &mut out, &vb.oid, &vb.value);
        out.push('\n');
    }
    out
}
