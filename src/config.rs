//! Receiver, MIB-parser and display configuration.
//!
//! Display settings are a plain value passed by reference into every render
//! call, so concurrent decodes may use different settings against the same
//! MIB database.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Default UDP port the daemon listens on.
pub const DEFAULT_PORT: u16 = 515;

/// Size of the datagram receive buffer.
pub const RECV_BUFFER_SIZE: usize = 100 * 1024;

/// How object identifiers are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OidOutputFormat {
    /// `MODULE::label.index`
    #[default]
    Module,
    /// `label.index`, starting at the last named component
    Suffix,
    /// `.iso.org.dod...` from the root
    Full,
    /// `.1.3.6...`
    Numeric,
    /// Full path with the common UCD prefixes removed
    Ucd,
    /// Print nothing
    None,
}

/// How OCTET STRING values without a display hint are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringOutputFormat {
    /// Hex if any byte is neither printable nor whitespace, else ASCII.
    #[default]
    Guess,
    Ascii,
    Hex,
}

/// Options that control value and OID rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub oid_output_format: OidOutputFormat,
    pub string_output_format: StringOutputFormat,
    /// Drop type prefixes such as `INTEGER: ` and print enum labels bare.
    pub quick_print: bool,
    /// Drop the `Wrong Type` annotation.
    pub quicke_print: bool,
    /// Print TimeTicks as the raw count.
    pub numeric_timeticks: bool,
    /// Print enumerated integers as numbers.
    pub print_numeric_enum: bool,
    /// Render table indexes as `[...]` using each index's type.
    pub extended_index: bool,
    /// Backslash-escape quotes in quoted index strings.
    pub escape_quotes: bool,
    /// Append a bracketed ASCII gloss to hex dumps.
    pub print_hex_text: bool,
    /// Always print single-byte `x` hint groups with two digits.
    pub two_digit_hex_output: bool,
    /// Leave OID instance parts numeric.
    pub dont_breakdown_oids: bool,
    pub dont_print_units: bool,
    pub no_display_hint: bool,
    /// Bytes per hex dump line; 0 prints everything on one line.
    pub hex_output_length: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            oid_output_format: OidOutputFormat::default(),
            string_output_format: StringOutputFormat::default(),
            quick_print: false,
            quicke_print: false,
            numeric_timeticks: false,
            print_numeric_enum: false,
            extended_index: false,
            escape_quotes: false,
            print_hex_text: false,
            two_digit_hex_output: false,
            dont_breakdown_oids: false,
            dont_print_units: false,
            no_display_hint: false,
            hex_output_length: 0,
        }
    }
}

/// Where a `--` comment ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentTerm {
    /// A comment ends at the next `--` or at end of line.
    #[default]
    DashPair,
    /// A comment always runs to end of line.
    EndOfLine,
}

/// Options for the MIB lexer, parser and tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MibOptions {
    /// Keep DESCRIPTION text on nodes.
    pub save_descriptions: bool,
    pub comment_term: CommentTerm,
    /// Allow `_` in labels.
    pub parse_label_underscore: bool,
    /// Let a later definition of an existing node replace its data.
    pub replace: bool,
    /// 0 is quiet, 1 reports problems, 2 also reports informational notes.
    pub warnings: u8,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    pub address: IpAddr,
    pub port: u16,
    /// Stop the daemon on the first socket error instead of logging it.
    pub exit_on_socket_error: bool,
    pub mib_dir: Option<PathBuf>,
    /// File that receives a copy of every rendered trap.
    pub tap_file: Option<PathBuf>,
    pub recv_buffer_size: usize,
}

impl ReceiverConfig {
    /// The socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            exit_on_socket_error: true,
            mib_dir: None,
            tap_file: None,
            recv_buffer_size: RECV_BUFFER_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_defaults() {
        let config = ReceiverConfig::default();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:515");
        assert!(config.exit_on_socket_error);
        assert_eq!(config.recv_buffer_size, 102400);
    }

    #[test]
    fn test_display_defaults() {
        let config = DisplayConfig::default();
        assert_eq!(config.oid_output_format, OidOutputFormat::Module);
        assert_eq!(config.string_output_format, StringOutputFormat::Guess);
        assert!(!config.quick_print);
        assert_eq!(config.hex_output_length, 0);
    }
}
