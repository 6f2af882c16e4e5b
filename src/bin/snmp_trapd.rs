//! snmp-trapd: receive SNMPv2c traps and print them.
//!
//! Each trap is printed to stdout and, with `--tap-file`, appended to the
//! tap file as `<source ip> <text>`.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use snmp_trapd::cli::args::{DisplayArgs, LogArgs, MibArgs, ReceiverArgs};
use snmp_trapd::mib::MibDatabase;
use snmp_trapd::notification::TrapReceiver;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Listen for SNMPv2c traps and print them using the loaded MIBs.
#[derive(Debug, Parser)]
#[command(name = "snmp-trapd", version, about)]
struct Args {
    #[command(flatten)]
    receiver: ReceiverArgs,

    #[command(flatten)]
    mib: MibArgs,

    #[command(flatten)]
    display: DisplayArgs,

    #[command(flatten)]
    log: LogArgs,
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

async fn tap_message(tap: &mut File, ip: &str, text: &str) -> std::io::Result<()> {
    tap.write_all(format!("{} {}\n", ip, text).as_bytes()).await?;
    tap.flush().await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    args.log.init_tracing();

    let config = args.receiver.receiver_config(args.mib.mib_dir.clone());
    let options = args.mib.mib_options();
    let db = match &config.mib_dir {
        Some(dir) => MibDatabase::init_mib(dir, options),
        None => MibDatabase::new(options),
    };

    let mut tap = match &config.tap_file {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path).await {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("Error: could not open tap file {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let receiver = match TrapReceiver::bind(&config, Arc::new(db), args.display.display_config()).await
    {
        Ok(receiver) => receiver,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutdown signal received");
                break;
            }
            result = receiver.recv() => match result {
                Ok((text, source)) => {
                    println!("{}", text);
                    if let Some(file) = tap.as_mut() {
                        let ip = source.ip().to_string();
                        if let Err(e) = tap_message(file, &ip, &text).await {
                            tracing::error!(error = %e, "tap file write failed");
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "socket error");
                    if config.exit_on_socket_error {
                        return ExitCode::FAILURE;
                    }
                }
            }
        }
    }

    ExitCode::SUCCESS
}
