//! DISPLAY-HINT interpretation (RFC 2579 section 3.1).
//!
//! Integer hints are a single format letter, optionally with a decimal
//! point shift (`d-2`). Octet string hints are a sequence of
//! `[*]<width><code>[separator][terminator]` groups; the last group
//! repeats until the data is used up.
//!
//! ```
//! use snmp_trapd::format::display_hint;
//!
//! let mut out = String::new();
//! display_hint::apply_octets(&mut out, "1x:", &[0x00, 0x1a, 0x2b], false).unwrap();
//! assert_eq!(out, "0:1a:2b");
//!
//! let mut out = String::new();
//! display_hint::apply_integer(&mut out, 1234, "d-2");
//! assert_eq!(out, "12.34");
//! ```

use std::fmt::{self, Write};

use super::write_ascii;

/// The hint used a format code other than `x`, `d`, `o`, `a` or `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadHint;

impl fmt::Display for BadHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bad display hint")
    }
}

impl std::error::Error for BadHint {}

/// Leading decimal digits of `s`, or 0.
fn leading_number(s: &[u8]) -> usize {
    s.iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0usize, |acc, &b| {
            acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
        })
}

/// Append `value` formatted by an INTEGER display hint.
///
/// `d-N` moves the decimal point N digits left, padding with zeros when
/// the number is shorter than N. `b` prints the low 32 bits.
pub fn apply_integer(out: &mut String, value: i64, hint: &str) {
    let hint = hint.as_bytes();
    match hint.first() {
        Some(b'd') => {
            let shift = if hint.get(1) == Some(&b'-') {
                leading_number(&hint[2..])
            } else {
                0
            };
            let digits = value.unsigned_abs().to_string();
            if value < 0 {
                out.push('-');
            }
            if shift == 0 {
                out.push_str(&digits);
            } else if shift <= digits.len() {
                let (whole, fraction) = digits.split_at(digits.len() - shift);
                out.push_str(whole);
                out.push('.');
                out.push_str(fraction);
            } else {
                out.push('.');
                out.extend(std::iter::repeat_n('0', shift - digits.len()));
                out.push_str(&digits);
            }
        }
        Some(b'b') => {
            for bit in (0..32).rev() {
                out.push(if value & (1 << bit) != 0 { '1' } else { '0' });
            }
        }
        Some(b'x') => {
            let _ = write!(out, "{:x}", value);
        }
        Some(b'o') => {
            let _ = write!(out, "{:o}", value);
        }
        _ => {
            let _ = write!(out, "{}", value);
        }
    }
}

/// Separator or terminator character at `pos`, if the hint has one there.
fn take_delimiter(hint: &[u8], pos: &mut usize, width: usize) -> Option<u8> {
    let ch = *hint.get(*pos)?;
    if ch == b'*' || ch.is_ascii_digit() {
        return None;
    }
    // with no width, a format letter starts the next group
    if width == 0 && matches!(ch, b'x' | b'd' | b'o') {
        return None;
    }
    *pos += 1;
    Some(ch)
}

/// Append `data` formatted by an OCTET STRING display hint.
///
/// On [`BadHint`] the output is left partly written; callers restore it.
/// Single-byte `x` groups below 16 get two digits when `two_digit_hex` is
/// set, or when there is no separator and the hint is used up.
pub fn apply_octets(
    out: &mut String,
    hint: &str,
    data: &[u8],
    two_digit_hex: bool,
) -> Result<(), BadHint> {
    let hint = hint.as_bytes();
    let mut pos = 0;
    let mut cp = 0;
    let mut width = 1usize;
    let mut code = b'd';
    let mut separator = None;
    let mut terminator = None;

    while cp < data.len() {
        let mut repeat = 1usize;
        if pos < hint.len() {
            if hint[pos] == b'*' {
                repeat = usize::from(data[cp]);
                cp += 1;
                pos += 1;
            }
            width = 0;
            while let Some(d) = hint.get(pos).filter(|b| b.is_ascii_digit()) {
                width = width.saturating_mul(10).saturating_add(usize::from(d - b'0'));
                pos += 1;
            }
            code = hint.get(pos).copied().unwrap_or(0);
            pos += 1;
            separator = take_delimiter(hint, &mut pos, width);
            terminator = take_delimiter(hint, &mut pos, width);
            if width == 0 {
                width = 1;
            }
        }

        while repeat > 0 && cp < data.len() {
            match code {
                b'x' | b'd' | b'o' => {
                    let end = cp.saturating_add(width).min(data.len());
                    let value = data[cp..end]
                        .iter()
                        .fold(0i64, |acc, &b| acc.wrapping_mul(256).wrapping_add(i64::from(b)));
                    cp = end;
                    match code {
                        b'x' => {
                            let pad = value < 16
                                && width == 1
                                && (two_digit_hex || (separator.is_none() && pos >= hint.len()));
                            if pad {
                                out.push('0');
                            }
                            let _ = write!(out, "{:x}", value);
                        }
                        b'd' => {
                            let _ = write!(out, "{}", value);
                        }
                        _ => {
                            let _ = write!(out, "{:o}", value);
                        }
                    }
                }
                b'a' | b't' => {
                    let end = cp.saturating_add(width).min(data.len());
                    let chunk = &data[cp..end];
                    if chunk.contains(&0) {
                        write_ascii(out, chunk);
                    } else {
                        out.push_str(&String::from_utf8_lossy(chunk));
                    }
                    cp = end;
                }
                _ => return Err(BadHint),
            }

            if cp < data.len() {
                if let Some(sep) = separator {
                    out.push(char::from(sep));
                }
            }
            repeat -= 1;
        }

        if cp < data.len() {
            if let Some(term) = terminator {
                out.push(char::from(term));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octets(hint: &str, data: &[u8]) -> Result<String, BadHint> {
        let mut out = String::new();
        apply_octets(&mut out, hint, data, false).map(|()| out)
    }

    fn integer(value: i64, hint: &str) -> String {
        let mut out = String::new();
        apply_integer(&mut out, value, hint);
        out
    }

    #[test]
    fn test_decimal_shift() {
        assert_eq!(integer(1234, "d-2"), "12.34");
        assert_eq!(integer(5, "d-2"), ".05");
        assert_eq!(integer(12, "d-2"), ".12");
        assert_eq!(integer(-1234, "d-2"), "-12.34");
        assert_eq!(integer(-5, "d-3"), "-.005");
        assert_eq!(integer(42, "d"), "42");
    }

    #[test]
    fn test_integer_radix_hints() {
        assert_eq!(integer(255, "x"), "ff");
        assert_eq!(integer(8, "o"), "10");
        assert_eq!(integer(5, "b"), "00000000000000000000000000000101");
        assert_eq!(integer(7, "?"), "7");
    }

    #[test]
    fn test_ip_address_hint() {
        assert_eq!(octets("1d.1d.1d.1d", &[192, 168, 1, 1]).unwrap(), "192.168.1.1");
    }

    #[test]
    fn test_mac_address_hint() {
        assert_eq!(
            octets("1x:", &[0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]).unwrap(),
            "0:1a:2b:3c:4d:5e"
        );
        let mut out = String::new();
        apply_octets(&mut out, "1x:", &[0x00, 0x1a, 0x05], true).unwrap();
        assert_eq!(out, "00:1a:05");
    }

    #[test]
    fn test_hex_without_separator_pads() {
        assert_eq!(octets("1x", &[0xaa, 0x01, 0xbb]).unwrap(), "aa01bb");
    }

    #[test]
    fn test_date_and_time() {
        let data = [0x07, 0xE6, 8, 15, 8, 1, 15, 0];
        assert_eq!(
            octets("2d-1d-1d,1d:1d:1d.1d", &data).unwrap(),
            "2022-8-15,8:1:15.0"
        );
    }

    #[test]
    fn test_repeat_and_terminator() {
        assert_eq!(octets("*1d./1d", &[3, 10, 20, 30, 40]).unwrap(), "10.20.30./40");
    }

    #[test]
    fn test_ascii_hint() {
        assert_eq!(octets("255a", b"router-1").unwrap(), "router-1");
        assert_eq!(octets("255a", b"a\0b").unwrap(), "a.b");
    }

    #[test]
    fn test_bad_hint() {
        assert_eq!(octets("1q", &[1, 2]), Err(BadHint));
        // empty data never reaches the code
        assert_eq!(octets("1q", &[]).unwrap(), "");
    }
}
