//! Value renderers.
//!
//! Each typed renderer checks the value's tag first and falls back to
//! [`Printer::by_type`] on a mismatch.

use std::fmt::Write;

use super::display_hint::{self, BadHint};
use super::hex::write_hexstring;
use super::{Annotations, Printer, is_print_or_space, write_ascii};
use crate::config::{DisplayConfig, StringOutputFormat};
use crate::mib::Renderer;
use crate::value::Value;

/// TimeTicks as `[N day(s), ]h:mm:ss.cc`, or the raw count when
/// `numeric_timeticks` is set.
///
/// ```
/// use snmp_trapd::config::DisplayConfig;
/// use snmp_trapd::format::uptime_string;
///
/// let config = DisplayConfig::default();
/// assert_eq!(uptime_string(123_456, &config), "0:20:34.56");
/// assert_eq!(uptime_string(17_280_000, &config), "2 days, 0:00:00.00");
/// ```
pub fn uptime_string(ticks: u32, config: &DisplayConfig) -> String {
    if config.numeric_timeticks {
        return ticks.to_string();
    }
    let centisecs = ticks % 100;
    let mut secs = ticks / 100;
    let days = secs / 86_400;
    secs %= 86_400;
    let hours = secs / 3600;
    secs %= 3600;
    let minutes = secs / 60;
    let seconds = secs % 60;

    if config.quick_print {
        format!("{}:{}:{:02}:{:02}.{:02}", days, hours, minutes, seconds, centisecs)
    } else {
        match days {
            0 => format!("{}:{:02}:{:02}.{:02}", hours, minutes, seconds, centisecs),
            1 => format!("1 day, {}:{:02}:{:02}.{:02}", hours, minutes, seconds, centisecs),
            _ => format!(
                "{} days, {}:{:02}:{:02}.{:02}",
                days, hours, minutes, seconds, centisecs
            ),
        }
    }
}

fn push_units(out: &mut String, units: Option<&str>) {
    if let Some(units) = units {
        out.push(' ');
        out.push_str(units);
    }
}

impl Printer<'_> {
    /// Render with the renderer a tree node selected.
    pub fn render(&self, out: &mut String, renderer: Renderer, value: &Value, ann: Annotations<'_>) {
        match renderer {
            Renderer::Integer => self.integer(out, value, ann),
            Renderer::OctetString => self.octet_string(out, value, ann),
            Renderer::ObjectIdentifier => self.object_identifier(out, value, ann),
            Renderer::Timeticks => self.timeticks(out, value, ann),
            Renderer::ByType => self.by_type(out, value, ann),
        }
    }

    fn wrong_type(&self, out: &mut String, expected: &str, value: &Value) {
        if !self.config.quicke_print {
            let _ = write!(out, "Wrong Type (should be {}): ", expected);
        }
        self.by_type(out, value, Annotations::default());
    }

    /// INTEGER, with enum labels and integer display hints.
    pub fn integer(&self, out: &mut String, value: &Value, ann: Annotations<'_>) {
        let Value::Integer(v) = *value else {
            return self.wrong_type(out, "INTEGER", value);
        };
        let label = ann.enums.iter().find(|e| e.value == v).map(|e| e.label.as_str());

        if !self.config.quick_print {
            out.push_str("INTEGER: ");
        }
        match label {
            Some(label) if !self.config.print_numeric_enum => {
                if self.config.quick_print {
                    out.push_str(label);
                } else {
                    let _ = write!(out, "{}({})", label, v);
                }
            }
            _ => match ann.hint {
                Some(hint) => display_hint::apply_integer(out, v, hint),
                None => {
                    let _ = write!(out, "{}", v);
                }
            },
        }
        push_units(out, ann.units);
    }

    /// OCTET STRING, through its display hint or as text or hex.
    pub fn octet_string(&self, out: &mut String, value: &Value, ann: Annotations<'_>) {
        let Value::OctetString(data) = value else {
            return self.wrong_type(out, "OCTET STRING", value);
        };

        if let Some(hint) = ann.hint {
            let start = out.len();
            if !self.config.quick_print {
                out.push_str("STRING: ");
            }
            match display_hint::apply_octets(out, hint, data, self.config.two_digit_hex_output) {
                Ok(()) => push_units(out, ann.units),
                Err(BadHint) => {
                    out.truncate(start);
                    let _ = write!(out, "(Bad hint ignored: {}) ", hint);
                    self.octet_string(out, value, Annotations::default());
                }
            }
            return;
        }

        let hex = match self.config.string_output_format {
            StringOutputFormat::Guess => data.iter().any(|&b| !is_print_or_space(b)),
            StringOutputFormat::Ascii => false,
            StringOutputFormat::Hex => true,
        };

        if data.is_empty() {
            out.push_str("\"\"");
            return;
        }

        if hex {
            out.push_str(if self.config.quick_print { "\"" } else { "Hex-STRING: " });
            write_hexstring(
                out,
                data,
                self.config.hex_output_length,
                self.config.print_hex_text,
            );
            if self.config.quick_print {
                out.push('"');
            }
        } else {
            if !self.config.quick_print {
                out.push_str("STRING: ");
            }
            out.push('"');
            write_ascii(out, data);
            out.push('"');
        }
        push_units(out, ann.units);
    }

    /// OBJECT IDENTIFIER values, resolved through the tree.
    pub fn object_identifier(&self, out: &mut String, value: &Value, ann: Annotations<'_>) {
        let Value::ObjectIdentifier(oid) = value else {
            return self.wrong_type(out, "OBJECT IDENTIFIER", value);
        };
        if !self.config.quick_print {
            out.push_str("OID: ");
        }
        self.objid_tree(out, oid.arcs());
        push_units(out, ann.units);
    }

    pub fn timeticks(&self, out: &mut String, value: &Value, ann: Annotations<'_>) {
        let Value::TimeTicks(ticks) = *value else {
            return self.wrong_type(out, "Timeticks", value);
        };
        if self.config.numeric_timeticks {
            let _ = write!(out, "{}", ticks);
            return;
        }
        if !self.config.quick_print {
            let _ = write!(out, "Timeticks: ({}) ", ticks);
        }
        out.push_str(&uptime_string(ticks, self.config));
        push_units(out, ann.units);
    }

    /// Render by the value's own type.
    pub fn by_type(&self, out: &mut String, value: &Value, ann: Annotations<'_>) {
        let quick = self.config.quick_print;
        match value {
            Value::Integer(_) => self.integer(out, value, ann),
            Value::OctetString(_) => self.octet_string(out, value, ann),
            Value::ObjectIdentifier(_) => self.object_identifier(out, value, ann),
            Value::TimeTicks(_) => self.timeticks(out, value, ann),
            Value::Counter32(v) => {
                if !quick {
                    out.push_str("Counter32: ");
                }
                let _ = write!(out, "{}", v);
                push_units(out, ann.units);
            }
            Value::Gauge32(v) => {
                if !quick {
                    out.push_str("Gauge32: ");
                }
                match ann.hint {
                    Some(hint) => display_hint::apply_integer(out, i64::from(*v), hint),
                    None => {
                        let _ = write!(out, "{}", v);
                    }
                }
                push_units(out, ann.units);
            }
            Value::IpAddress([a, b, c, d]) => {
                if !quick {
                    out.push_str("IpAddress: ");
                }
                let _ = write!(out, "{}.{}.{}.{}", a, b, c, d);
            }
            Value::Counter64(v) => {
                if !quick {
                    out.push_str("Counter64: ");
                }
                let _ = write!(out, "{}", v);
                push_units(out, ann.units);
            }
            Value::Null => out.push_str("NULL"),
            Value::BitString(data) => self.bits(out, data, ann),
            Value::Opaque(data) => {
                if !quick {
                    out.push_str("OPAQUE: ");
                }
                write_hexstring(
                    out,
                    data,
                    self.config.hex_output_length,
                    self.config.print_hex_text,
                );
            }
            Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView => {
                out.push_str("Variable has bad type");
            }
        }
    }

    /// BITS: the hex bytes, then each set bit by number or enum label.
    fn bits(&self, out: &mut String, data: &[u8], ann: Annotations<'_>) {
        if !self.config.quick_print {
            out.push_str("BITS: ");
        }
        write_hexstring(
            out,
            data,
            self.config.hex_output_length,
            self.config.print_hex_text,
        );
        for (byte_idx, &byte) in data.iter().enumerate() {
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let number = byte_idx * 8 + bit;
                let label = ann
                    .enums
                    .iter()
                    .find(|e| usize::try_from(e.value) == Ok(number))
                    .map(|e| e.label.as_str());
                match label {
                    Some(label) if !self.config.print_numeric_enum => {
                        let _ = write!(out, "{}({}) ", label, number);
                    }
                    _ => {
                        let _ = write!(out, "{} ", number);
                    }
                }
            }
        }
        push_units(out, ann.units);
    }
}
