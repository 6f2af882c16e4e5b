//! Hex output: compact encoding for logs and the `Hex-STRING` dump.

use std::fmt::{self, Write};

use super::is_print_or_space;

/// Encode bytes as a lowercase hex string.
///
/// # Examples
///
/// ```
/// use snmp_trapd::format::hex::encode;
///
/// assert_eq!(encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
/// assert_eq!(encode(&[0x00, 0xff]), "00ff");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Lazy hex formatter for log fields.
///
/// ```
/// use snmp_trapd::format::hex::Bytes;
///
/// assert_eq!(format!("{}", Bytes(&[0x30, 0x81])), "3081");
/// ```
pub struct Bytes<'a>(pub &'a [u8]);

impl fmt::Debug for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Display for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One dump line: `XX ` per byte, optionally followed by `  [text]`.
fn write_line(out: &mut String, line: &[u8], with_text: bool) {
    for b in line {
        let _ = write!(out, "{:02X} ", b);
    }
    if with_text {
        out.push_str("  [");
        out.extend(
            line.iter()
                .map(|&b| if is_print_or_space(b) { b as char } else { '.' }),
        );
        out.push(']');
    }
}

/// Append the uppercase hex dump of `data`, `line_len` bytes per line.
///
/// A `line_len` of 0 puts everything on one line.
pub fn write_hexstring(out: &mut String, data: &[u8], line_len: usize, with_text: bool) {
    let line_len = if line_len == 0 { data.len().max(1) } else { line_len };
    let mut rest = data;
    while rest.len() > line_len {
        let (line, tail) = rest.split_at(line_len);
        write_line(out, line, with_text);
        out.push('\n');
        rest = tail;
    }
    write_line(out, rest, with_text);
}
