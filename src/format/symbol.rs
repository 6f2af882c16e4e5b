//! OID to symbolic name resolution.
//!
//! The walk descends the tree one sub-identifier at a time. Whatever is
//! left when the tree runs out is the instance part; if a table entry on
//! the way declared an INDEX (directly or via AUGMENTS), each index object
//! decodes its share of that part according to its type.

use std::fmt::Write;

use bytes::Bytes;

use super::{Annotations, Printer, is_print};
use crate::config::OidOutputFormat;
use crate::mib::{ANY_MODULE, IndexEntry, MibType, NodeId, is_anonymous};
use crate::value::Value;

/// Leading paths stripped by [`OidOutputFormat::Ucd`].
const UCD_PREFIXES: [&str; 6] = [
    ".1.3.6.1.2.1",
    ".iso.org.dod.internet.mgmt.mib-2",
    ".iso.org.dod.internet.experimental",
    ".iso.org.dod.internet.private",
    ".iso.org.dod.internet.snmpParties",
    ".iso.org.dod.internet.snmpSecrets",
];

/// `InetAddressType` values with a textual form.
const INET_IPV4: u32 = 1;
const INET_IPV6: u32 = 2;
const INET_IPV4Z: u32 = 3;
const INET_IPV6Z: u32 = 4;

/// Outcome of decoding one index: how many sub-identifiers it used, and
/// whether decoding may go on to the next index.
enum Step {
    Next(usize),
    Stop(usize),
}

/// Append the remaining sub-identifiers as `.N.N...` and drop the
/// trailing dot.
fn finish_printing(rest: &[u32], out: &mut String) {
    if !out.ends_with('.') {
        out.push('.');
    }
    for arc in rest {
        let _ = write!(out, "{}.", arc);
    }
    out.pop();
}

fn write_dotted_quad(out: &mut String, ids: &[u32]) {
    let _ = write!(out, "{}.{}.{}.{}", ids[0], ids[1], ids[2], ids[3]);
}

fn zone(ids: &[u32]) -> u32 {
    ids.iter().fold(0u32, |acc, &id| (acc << 8) | (id & 0xff))
}

impl<'a> Printer<'a> {
    /// Append the name of `arcs` in the configured output format and
    /// return the deepest node the walk matched.
    pub fn objid_tree(&self, out: &mut String, arcs: &[u32]) -> Option<NodeId> {
        let tree = self.db.tree();
        let mut buf = String::from(".");
        let mut known = 0;
        let subtree = self.get_symbol(arcs, tree.roots(), &mut buf, &[], Some(&mut known));

        match self.config.oid_output_format {
            OidOutputFormat::Full | OidOutputFormat::Numeric => out.push_str(&buf),
            format @ (OidOutputFormat::Suffix | OidOutputFormat::Module) => {
                let bytes = buf.as_bytes();
                let mut cp = if known != 0 {
                    known as isize - 2
                } else {
                    let mut i = bytes.len() as isize - 1;
                    while i >= 0 && !bytes[i as usize].is_ascii_alphabetic() {
                        i -= 1;
                    }
                    i
                };
                while cp >= 0 && bytes[cp as usize] != b'.' {
                    cp -= 1;
                }
                let start = (cp + 1) as usize;

                if format == OidOutputFormat::Module && start > 0 {
                    if let Some(id) = subtree {
                        let module = self.db.module_name(tree.node(id).modid());
                        if !module.starts_with('#') {
                            out.push_str(&module);
                            out.push_str("::");
                        }
                    }
                }
                out.push_str(&buf[start..]);
            }
            OidOutputFormat::Ucd => {
                let start = UCD_PREFIXES
                    .iter()
                    .find(|prefix| buf.len() > prefix.len() && buf.starts_with(*prefix))
                    .map_or(0, |prefix| prefix.len() + 1);
                out.push_str(&buf[start..]);
            }
            OidOutputFormat::None => {}
        }
        subtree
    }

    /// Walk `arcs` through the peer list `level`.
    ///
    /// `known` receives the output length at the point the tree ran out.
    fn get_symbol(
        &self,
        arcs: &[u32],
        level: &[NodeId],
        out: &mut String,
        mut in_dices: &'a [IndexEntry],
        known: Option<&mut usize>,
    ) -> Option<NodeId> {
        let tree = self.db.tree();
        let numeric = self.config.oid_output_format == OidOutputFormat::Numeric;

        if let Some(id) = arcs.first().and_then(|&subid| tree.match_peer(level, subid)) {
            let node = tree.node(id);
            if !node.indexes.is_empty() {
                in_dices = &node.indexes;
            } else if let Some(augments) = &node.augments {
                if let Some(target) = tree.find(augments, ANY_MODULE) {
                    in_dices = &tree.node(target).indexes;
                }
            }

            if numeric || is_anonymous(&node.label) {
                let _ = write!(out, "{}", node.subid);
            } else {
                out.push_str(&node.label);
            }

            let mut deeper = None;
            if arcs.len() > 1 {
                out.push('.');
                deeper = self.get_symbol(&arcs[1..], tree.children(id), out, in_dices, known);
            }
            return Some(deeper.unwrap_or(id));
        }

        if let Some(known) = known {
            *known = out.len();
        }

        let mut pos = 0;
        if !level.is_empty() && !in_dices.is_empty() && !arcs.is_empty() {
            let _ = write!(out, "{}.", arcs[0]);
            pos = 1;
        }
        if !numeric && !self.config.dont_breakdown_oids {
            pos = self.decode_indexes(arcs, pos, in_dices, out);
        }
        finish_printing(&arcs[pos..], out);
        None
    }

    /// Decode table indexes from `arcs[pos..]`; returns the position of
    /// the first sub-identifier left undecoded.
    fn decode_indexes(
        &self,
        arcs: &[u32],
        mut pos: usize,
        in_dices: &[IndexEntry],
        out: &mut String,
    ) -> usize {
        let tree = self.db.tree();
        let extended = self.config.extended_index;

        for entry in in_dices {
            if pos >= arcs.len() {
                break;
            }
            let Some(tp) = tree.find(&entry.label, ANY_MODULE) else {
                break;
            };
            if extended {
                if out.ends_with('.') {
                    out.pop();
                }
                out.push('[');
            }

            let step = match tree.node(tp).mib_type {
                MibType::OctetStr => self.octet_index(out, arcs, pos, tp, entry.implied),
                MibType::Integer
                | MibType::Integer32
                | MibType::UInteger
                | MibType::Unsigned32
                | MibType::Gauge => {
                    let arc = arcs[pos];
                    let label = tree
                        .node(tp)
                        .enums
                        .iter()
                        .find(|e| e.value == i64::from(arc));
                    match label {
                        Some(e) => out.push_str(&e.label),
                        None => {
                            let _ = write!(out, "{}", arc);
                        }
                    }
                    Step::Next(1)
                }
                MibType::TimeTicks => {
                    if extended {
                        out.push_str(&super::uptime_string(arcs[pos], self.config));
                    } else {
                        let _ = write!(out, "{}", arcs[pos]);
                    }
                    Step::Next(1)
                }
                MibType::ObjectId => self.objid_index(out, &arcs[pos..], entry.implied),
                MibType::IpAddress => {
                    if arcs.len() - pos < 4 {
                        Step::Stop(0)
                    } else {
                        write_dotted_quad(out, &arcs[pos..]);
                        Step::Next(4)
                    }
                }
                MibType::NetworkAddress => {
                    let ntype = arcs[pos];
                    let _ = write!(out, "{}.", ntype);
                    if ntype == 1 && arcs.len() - pos - 1 >= 4 {
                        write_dotted_quad(out, &arcs[pos + 1..]);
                        Step::Next(5)
                    } else {
                        Step::Stop(1)
                    }
                }
                _ => Step::Stop(0),
            };

            match step {
                Step::Next(used) => pos += used,
                Step::Stop(used) => return pos + used,
            }
            out.push(if extended { ']' } else { '.' });
        }
        pos
    }

    fn octet_index(
        &self,
        out: &mut String,
        arcs: &[u32],
        pos: usize,
        tp: NodeId,
        implied: bool,
    ) -> Step {
        let node = self.db.tree().node(tp);
        let rest = &arcs[pos..];
        let fixed = match node.ranges.as_slice() {
            [range] if range.low == range.high => Some(range.low),
            _ => None,
        };

        if let (true, Some(hint)) = (self.config.extended_index, node.hint.as_deref()) {
            let (skip, len) = if implied {
                (0, rest.len())
            } else if let Some(low) = fixed {
                match usize::try_from(low) {
                    Ok(len) => (0, len),
                    Err(_) => return Step::Stop(0),
                }
            } else {
                let len = rest[0] as usize;
                if len >= rest.len() {
                    return Step::Stop(0);
                }
                (1, len)
            };
            if len > rest.len() - skip {
                return Step::Stop(skip);
            }
            let bytes: Vec<u8> = rest[skip..skip + len].iter().map(|&id| id as u8).collect();
            let ann = Annotations {
                hint: Some(hint),
                ..Default::default()
            };
            self.octet_string(out, &Value::OctetString(Bytes::from(bytes)), ann);
            return Step::Next(skip + len);
        }

        if implied {
            self.dump_oid_to_string(out, rest, '\'');
            return Step::Next(rest.len());
        }

        if let Some(low) = fixed {
            let Some(len) = usize::try_from(low).ok().filter(|&len| len <= rest.len()) else {
                return Step::Stop(0);
            };
            self.dump_oid_to_string(out, &rest[..len], '\'');
            return Step::Next(len);
        }

        let used = (rest[0] as usize).saturating_add(1);
        if used > rest.len() {
            return Step::Stop(0);
        }
        if used == 1 {
            let escape = if self.config.escape_quotes { "\\" } else { "" };
            let _ = write!(out, "{0}\"{0}\"", escape);
        } else {
            let addr_type = pos.checked_sub(1).map(|i| arcs[i]);
            let ids = &rest[1..used];
            if !self.inet_address(out, tp, addr_type, ids) {
                self.dump_oid_to_string(out, ids, '"');
            }
        }
        Step::Next(used)
    }

    fn objid_index(&self, out: &mut String, rest: &[u32], implied: bool) -> Step {
        let used = if implied {
            rest.len()
        } else {
            (rest[0] as usize).saturating_add(1)
        };
        if used > rest.len() {
            return Step::Stop(0);
        }
        if self.config.extended_index {
            let ids = if implied { &rest[..used] } else { &rest[1..used] };
            self.objid_tree(out, ids);
        } else {
            finish_printing(&rest[..used], out);
        }
        Step::Next(used)
    }

    /// Render an `InetAddress` index whose `InetAddressType` partner was
    /// decoded just before it. Returns false when the address is not one
    /// of the handled forms.
    fn inet_address(
        &self,
        out: &mut String,
        tp: NodeId,
        addr_type: Option<u32>,
        ids: &[u32],
    ) -> bool {
        let tree = self.db.tree();
        let descriptor = |id: NodeId| {
            tree.node(id)
                .tc_index
                .and_then(|index| self.db.tc_descriptor(index))
        };

        let peers = tree.peers(tp);
        let partner = peers
            .iter()
            .position(|&id| id == tp)
            .and_then(|at| at.checked_sub(1))
            .map(|at| peers[at]);
        let Some(partner) = partner else {
            return false;
        };
        if descriptor(tp) != Some("InetAddress") || descriptor(partner) != Some("InetAddressType") {
            return false;
        }
        let Some(addr_type) = addr_type else {
            return false;
        };
        if ids.iter().any(|&id| id > 255) {
            return false;
        }

        let mut text = String::from("\"");
        match (addr_type, ids.len()) {
            (INET_IPV4, 4) => write_dotted_quad(&mut text, ids),
            (INET_IPV4Z, 8) => {
                write_dotted_quad(&mut text, ids);
                let _ = write!(text, "%{}", zone(&ids[4..8]));
            }
            (INET_IPV6, 16) | (INET_IPV6Z, 20) => {
                for (i, id) in ids[..16].iter().enumerate() {
                    if i > 0 {
                        text.push(':');
                    }
                    let _ = write!(text, "{:02x}", id);
                }
                if addr_type == INET_IPV6Z {
                    let _ = write!(text, "%{}", zone(&ids[16..20]));
                }
            }
            _ => return false,
        }
        text.push('"');
        out.push_str(&text);
        true
    }

    /// Quote sub-identifiers as characters; anything unprintable or above
    /// 254 becomes `.`.
    fn dump_oid_to_string(&self, out: &mut String, ids: &[u32], quote: char) {
        if ids.is_empty() {
            return;
        }
        let escape = self.config.escape_quotes;
        if escape {
            out.push('\\');
        }
        out.push(quote);
        for &id in ids {
            match u8::try_from(id) {
                Ok(b) if b != 255 && is_print(b) => out.push(char::from(b)),
                _ => out.push('.'),
            }
        }
        if escape {
            out.push('\\');
        }
        out.push(quote);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DisplayConfig, MibOptions};
    use crate::mib::MibDatabase;

    fn name(arcs: &[u32], format: OidOutputFormat) -> String {
        let db = MibDatabase::new(MibOptions::default());
        let config = DisplayConfig {
            oid_output_format: format,
            ..Default::default()
        };
        let mut out = String::new();
        Printer::new(&db, &config).objid_tree(&mut out, arcs);
        out
    }

    #[test]
    fn test_output_formats_on_bare_tree() {
        let arcs = [1, 3, 6, 1, 2, 1, 1, 3, 0];
        assert_eq!(name(&arcs, OidOutputFormat::Full), ".iso.3.6.1.2.1.1.3.0");
        assert_eq!(name(&arcs, OidOutputFormat::Numeric), ".1.3.6.1.2.1.1.3.0");
        assert_eq!(name(&arcs, OidOutputFormat::Module), "iso.3.6.1.2.1.1.3.0");
        assert_eq!(name(&arcs, OidOutputFormat::Suffix), "iso.3.6.1.2.1.1.3.0");
        assert_eq!(name(&arcs, OidOutputFormat::None), "");
    }

    #[test]
    fn test_ucd_prefix_strip() {
        assert_eq!(
            name(&[1, 3, 6, 1, 2, 1, 1, 3, 0], OidOutputFormat::Ucd),
            ".iso.3.6.1.2.1.1.3.0"
        );
    }

    #[test]
    fn test_unknown_root() {
        assert_eq!(name(&[5, 1], OidOutputFormat::Module), ".5.1");
        assert_eq!(name(&[], OidOutputFormat::Full), "");
    }

    #[test]
    fn test_finish_printing() {
        let mut out = String::from(".iso.");
        finish_printing(&[3, 6], &mut out);
        assert_eq!(out, ".iso.3.6");

        let mut out = String::from(".iso");
        finish_printing(&[], &mut out);
        assert_eq!(out, ".iso");
    }

    #[test]
    fn test_dump_oid_to_string() {
        let db = MibDatabase::new(MibOptions::default());
        let mut config = DisplayConfig::default();
        let mut out = String::new();
        Printer::new(&db, &config).dump_oid_to_string(&mut out, &[104, 105, 1, 300], '"');
        assert_eq!(out, "\"hi..\"");

        config.escape_quotes = true;
        let mut out = String::new();
        Printer::new(&db, &config).dump_oid_to_string(&mut out, &[97], '\'');
        assert_eq!(out, "\\'a\\'");
    }

    #[test]
    fn test_zone() {
        assert_eq!(zone(&[0, 0, 1, 2]), 258);
    }
}
