//! snmp-trapdecode: decode one captured trap datagram.
//!
//! The datagram is given as hex on the command line or on stdin.

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use snmp_trapd::cli::args::{DisplayArgs, LogArgs, MibArgs, parse_hex_string};
use snmp_trapd::format::Printer;
use snmp_trapd::message::decode_trap;
use snmp_trapd::mib::MibDatabase;
use snmp_trapd::notification::{check_trap_oid, format_plain_trap};

/// Decode a hex-encoded SNMPv2c trap and print it.
#[derive(Debug, Parser)]
#[command(name = "snmp-trapdecode", version, about)]
struct Args {
    #[command(flatten)]
    mib: MibArgs,

    #[command(flatten)]
    display: DisplayArgs,

    #[command(flatten)]
    log: LogArgs,

    /// Print the loaded MIB tree instead of decoding.
    #[arg(long = "dump-tree")]
    dump_tree: bool,

    /// Datagram as hex; read from stdin when omitted.
    #[arg(value_name = "HEX")]
    hex: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    args.log.init_tracing();

    let options = args.mib.mib_options();
    let db = match &args.mib.mib_dir {
        Some(dir) => MibDatabase::init_mib(dir, options),
        None => MibDatabase::new(options),
    };

    if args.dump_tree {
        print!("{}", db.dump_tree());
        return ExitCode::SUCCESS;
    }

    let input = match &args.hex {
        Some(hex) => hex.clone(),
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("Error: cannot read stdin: {}", e);
                return ExitCode::FAILURE;
            }
            buf
        }
    };

    let data = match parse_hex_string(&input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let message = match decode_trap(&data) {
        Ok(message) => message,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let display = args.display.display_config();
    println!(
        "version {} community \"{}\" {} request-id {}",
        message.version,
        message.community_str(),
        message.pdu.pdu_type,
        message.pdu.request_id
    );
    check_trap_oid(&message.pdu);
    print!("{}", format_plain_trap(&Printer::new(&db, &display), &message.pdu));

    ExitCode::SUCCESS
}
