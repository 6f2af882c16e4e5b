//! Command-line argument structures for the snmp-trapd tools.
//!
//! The listener and the offline decoder share the display, MIB and logging
//! groups; each binary flattens the groups it needs.

use clap::{ArgAction, Parser, ValueEnum};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::config::{
    CommentTerm, DEFAULT_PORT, DisplayConfig, MibOptions, OidOutputFormat, RECV_BUFFER_SIZE,
    ReceiverConfig, StringOutputFormat,
};

/// OID output format for CLI argument parsing.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OidFormat {
    /// MODULE::label.index (default)
    #[default]
    Module,
    /// label.index
    Suffix,
    /// .iso.org.dod...
    Full,
    /// .1.3.6...
    Numeric,
    /// Full names without the common prefixes
    Ucd,
    /// No OID at all
    None,
}

impl From<OidFormat> for OidOutputFormat {
    fn from(f: OidFormat) -> Self {
        match f {
            OidFormat::Module => OidOutputFormat::Module,
            OidFormat::Suffix => OidOutputFormat::Suffix,
            OidFormat::Full => OidOutputFormat::Full,
            OidFormat::Numeric => OidOutputFormat::Numeric,
            OidFormat::Ucd => OidOutputFormat::Ucd,
            OidFormat::None => OidOutputFormat::None,
        }
    }
}

/// String output format for CLI argument parsing.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StringFormat {
    /// Hex when the string has unprintable bytes (default)
    #[default]
    Guess,
    Ascii,
    Hex,
}

impl From<StringFormat> for StringOutputFormat {
    fn from(f: StringFormat) -> Self {
        match f {
            StringFormat::Guess => StringOutputFormat::Guess,
            StringFormat::Ascii => StringOutputFormat::Ascii,
            StringFormat::Hex => StringOutputFormat::Hex,
        }
    }
}

/// Listener arguments.
#[derive(Debug, Parser)]
pub struct ReceiverArgs {
    /// UDP port to listen on.
    #[arg(short = 'p', long = "port", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind.
    #[arg(short = 'a', long = "address", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub address: IpAddr,

    /// Stop on the first socket error.
    #[arg(long = "exit-on-socket-error", default_value_t = true, action = ArgAction::Set)]
    pub exit_on_socket_error: bool,

    /// Append every rendered trap to this file.
    #[arg(short = 'f', long = "tap-file", value_name = "FILE")]
    pub tap_file: Option<PathBuf>,
}

impl ReceiverArgs {
    /// Build the listener configuration; `mib_dir` comes from [`MibArgs`].
    pub fn receiver_config(&self, mib_dir: Option<PathBuf>) -> ReceiverConfig {
        ReceiverConfig {
            address: self.address,
            port: self.port,
            exit_on_socket_error: self.exit_on_socket_error,
            mib_dir,
            tap_file: self.tap_file.clone(),
            recv_buffer_size: RECV_BUFFER_SIZE,
        }
    }
}

/// MIB loading arguments.
#[derive(Debug, Parser)]
pub struct MibArgs {
    /// Directory of MIB module files.
    #[arg(short = 'M', long = "mib-dir", value_name = "DIR")]
    pub mib_dir: Option<PathBuf>,

    /// Keep DESCRIPTION clauses.
    #[arg(long = "mib-descriptions")]
    pub save_descriptions: bool,

    /// End `--` comments only at end of line.
    #[arg(long = "mib-comment-eol")]
    pub comment_eol: bool,

    /// Allow underscores in MIB labels.
    #[arg(long = "mib-allow-underscore")]
    pub allow_underscore: bool,

    /// Let later definitions replace earlier ones.
    #[arg(long = "mib-replace")]
    pub replace: bool,

    /// MIB parser warning level (0, 1 or 2).
    #[arg(short = 'w', long = "mib-warnings", default_value = "0")]
    pub warnings: u8,
}

impl MibArgs {
    pub fn mib_options(&self) -> MibOptions {
        MibOptions {
            save_descriptions: self.save_descriptions,
            comment_term: if self.comment_eol {
                CommentTerm::EndOfLine
            } else {
                CommentTerm::DashPair
            },
            parse_label_underscore: self.allow_underscore,
            replace: self.replace,
            warnings: self.warnings,
        }
    }
}

/// Output rendering arguments.
#[derive(Debug, Parser)]
pub struct DisplayArgs {
    /// OID output format.
    #[arg(short = 'O', long = "oid-format", default_value = "module")]
    pub oid_format: OidFormat,

    /// OCTET STRING output format.
    #[arg(short = 's', long = "strings", default_value = "guess")]
    pub strings: StringFormat,

    /// Drop type prefixes.
    #[arg(short = 'q', long = "quick")]
    pub quick: bool,

    /// Drop the wrong-type annotation.
    #[arg(long = "quicke")]
    pub quicke: bool,

    /// Print TimeTicks as a raw count.
    #[arg(short = 't', long = "numeric-timeticks")]
    pub numeric_timeticks: bool,

    /// Print enumerations as numbers.
    #[arg(short = 'e', long = "numeric-enum")]
    pub numeric_enum: bool,

    /// Print table indexes as [index] by type.
    #[arg(short = 'X', long = "extended-index")]
    pub extended_index: bool,

    /// Escape quotes in quoted indexes.
    #[arg(short = 'E', long = "escape-quotes")]
    pub escape_quotes: bool,

    /// Add an ASCII gloss to hex dumps.
    #[arg(short = 'T', long = "hex-text")]
    pub hex_text: bool,

    /// Two digits for single-byte hex display hints.
    #[arg(long = "two-digit-hex")]
    pub two_digit_hex: bool,

    /// Leave OID instance parts numeric.
    #[arg(short = 'b', long = "dont-breakdown-oids")]
    pub dont_breakdown_oids: bool,

    /// Omit UNITS.
    #[arg(short = 'U', long = "no-units")]
    pub no_units: bool,

    /// Ignore DISPLAY-HINTs.
    #[arg(long = "no-display-hint")]
    pub no_display_hint: bool,

    /// Bytes per hex dump line (0 for a single line).
    #[arg(long = "hex-line-length", default_value = "0")]
    pub hex_line_length: usize,
}

impl DisplayArgs {
    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            oid_output_format: self.oid_format.into(),
            string_output_format: self.strings.into(),
            quick_print: self.quick,
            quicke_print: self.quicke,
            numeric_timeticks: self.numeric_timeticks,
            print_numeric_enum: self.numeric_enum,
            extended_index: self.extended_index,
            escape_quotes: self.escape_quotes,
            print_hex_text: self.hex_text,
            two_digit_hex_output: self.two_digit_hex,
            dont_breakdown_oids: self.dont_breakdown_oids,
            dont_print_units: self.no_units,
            no_display_hint: self.no_display_hint,
            hex_output_length: self.hex_line_length,
        }
    }
}

/// Logging arguments.
#[derive(Debug, Parser)]
pub struct LogArgs {
    /// Enable debug logging (snmp_trapd=debug).
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Enable trace logging (snmp_trapd=trace).
    #[arg(short = 'D', long = "trace")]
    pub trace: bool,
}

impl LogArgs {
    /// Install a stderr subscriber at the selected level.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let filter = if self.trace {
            "snmp_trapd=trace"
        } else if self.debug {
            "snmp_trapd=debug"
        } else {
            "snmp_trapd=warn"
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Parse a hex dump (separators allowed) into bytes.
pub fn parse_hex_string(s: &str) -> Result<Vec<u8>, String> {
    let clean: String = s.chars().filter(|c| c.is_ascii_hexdigit()).collect();
    if let Some(bad) = s
        .chars()
        .find(|c| !c.is_ascii_hexdigit() && !c.is_whitespace() && !matches!(c, ':' | '-'))
    {
        return Err(format!("invalid hex character '{}'", bad));
    }

    if !clean.len().is_multiple_of(2) {
        return Err("hex string must have even number of digits".into());
    }

    (0..clean.len())
        .step_by(2)
        .map(|i| {
            let pair = &clean[i..i + 2];
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex: {}", pair))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Parser)]
    struct DaemonArgs {
        #[command(flatten)]
        receiver: ReceiverArgs,
        #[command(flatten)]
        mib: MibArgs,
        #[command(flatten)]
        display: DisplayArgs,
        #[command(flatten)]
        log: LogArgs,
    }

    #[test]
    fn test_defaults() {
        let args = DaemonArgs::parse_from(["snmp-trapd"]);
        let config = args.receiver.receiver_config(args.mib.mib_dir.clone());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:515");
        assert!(config.exit_on_socket_error);
        assert!(config.tap_file.is_none());
        assert_eq!(args.display.display_config(), DisplayConfig::default());
        assert_eq!(args.mib.mib_options(), MibOptions::default());
    }

    #[test]
    fn test_receiver_flags() {
        let args = DaemonArgs::parse_from([
            "snmp-trapd",
            "-p",
            "1162",
            "-a",
            "127.0.0.1",
            "--exit-on-socket-error",
            "false",
            "-f",
            "tap.txt",
            "-M",
            "mibs",
        ]);
        let config = args.receiver.receiver_config(args.mib.mib_dir.clone());
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:1162");
        assert!(!config.exit_on_socket_error);
        assert_eq!(config.tap_file, Some(PathBuf::from("tap.txt")));
        assert_eq!(config.mib_dir, Some(PathBuf::from("mibs")));
    }

    #[test]
    fn test_display_flags() {
        let args = DaemonArgs::parse_from([
            "snmp-trapd",
            "-O",
            "numeric",
            "-s",
            "hex",
            "-q",
            "-X",
            "--hex-line-length",
            "8",
        ]);
        let config = args.display.display_config();
        assert_eq!(config.oid_output_format, OidOutputFormat::Numeric);
        assert_eq!(config.string_output_format, StringOutputFormat::Hex);
        assert!(config.quick_print);
        assert!(config.extended_index);
        assert_eq!(config.hex_output_length, 8);
    }

    #[test]
    fn test_mib_flags() {
        let args = DaemonArgs::parse_from(["snmp-trapd", "--mib-comment-eol", "-w", "2"]);
        let options = args.mib.mib_options();
        assert_eq!(options.comment_term, CommentTerm::EndOfLine);
        assert_eq!(options.warnings, 2);
    }

    #[test]
    fn test_parse_hex_string() {
        assert_eq!(parse_hex_string("30 81 91").unwrap(), vec![0x30, 0x81, 0x91]);
        assert_eq!(parse_hex_string("de:ad-BE\nef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(parse_hex_string("abc").is_err());
        assert!(parse_hex_string("zz").is_err());
        assert_eq!(parse_hex_string("").unwrap(), Vec::<u8>::new());
    }
}
