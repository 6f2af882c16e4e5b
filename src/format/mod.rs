//! Human-readable rendering of OIDs and values.
//!
//! A [`Printer`] pairs a loaded [`MibDatabase`] with a [`DisplayConfig`]
//! and appends text to a caller-owned `String`. Nothing here mutates the
//! database, so any number of printers may share one.
//!
//! ```
//! use snmp_trapd::config::{DisplayConfig, MibOptions};
//! use snmp_trapd::format::{Annotations, Printer};
//! use snmp_trapd::mib::MibDatabase;
//! use snmp_trapd::Value;
//!
//! let db = MibDatabase::new(MibOptions::default());
//! let config = DisplayConfig::default();
//! let printer = Printer::new(&db, &config);
//!
//! let mut out = String::new();
//! printer.timeticks(&mut out, &Value::TimeTicks(8_640_123), Annotations::default());
//! assert_eq!(out, "Timeticks: (8640123) 1 day, 0:00:01.23");
//! ```

pub mod display_hint;
pub mod hex;
mod render;
mod symbol;

pub use render::uptime_string;

use crate::config::DisplayConfig;
use crate::mib::{EnumValue, MibDatabase};

/// Node-supplied extras for rendering one value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Annotations<'a> {
    pub enums: &'a [EnumValue],
    pub hint: Option<&'a str>,
    pub units: Option<&'a str>,
}

/// Renders OIDs and values against a MIB database.
#[derive(Debug, Clone, Copy)]
pub struct Printer<'a> {
    db: &'a MibDatabase,
    config: &'a DisplayConfig,
}

impl<'a> Printer<'a> {
    pub fn new(db: &'a MibDatabase, config: &'a DisplayConfig) -> Self {
        Self { db, config }
    }

    pub fn db(&self) -> &'a MibDatabase {
        self.db
    }

    pub fn config(&self) -> &'a DisplayConfig {
        self.config
    }
}

/// C `isprint`: the visible ASCII characters and space.
pub(crate) fn is_print(b: u8) -> bool {
    (0x20..=0x7e).contains(&b)
}

/// C `isprint(b) || isspace(b)`.
pub(crate) fn is_print_or_space(b: u8) -> bool {
    is_print(b) || matches!(b, b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Append `data` as text: quotes and backslashes are escaped, bytes that
/// are neither printable nor whitespace become `.`.
pub(crate) fn write_ascii(out: &mut String, data: &[u8]) {
    for &b in data {
        if is_print_or_space(b) {
            if b == b'\\' || b == b'"' {
                out.push('\\');
            }
            out.push(char::from(b));
        } else {
            out.push('.');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_ascii_escapes() {
        let mut out = String::new();
        write_ascii(&mut out, b"say \"hi\"\\\x01\tok");
        assert_eq!(out, "say \\\"hi\\\"\\\\.\tok");
    }

    #[test]
    fn test_character_classes() {
        assert!(is_print(b' '));
        assert!(is_print(b'~'));
        assert!(!is_print(0x7f));
        assert!(!is_print(b'\n'));
        assert!(is_print_or_space(b'\n'));
        assert!(is_print_or_space(0x0b));
        assert!(!is_print_or_space(0x00));
        assert!(!is_print_or_space(0xe9));
    }
}
