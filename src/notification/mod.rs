//! SNMPv2c trap reception and rendering.
//!
//! [`TrapReceiver`] owns a UDP socket and turns each received TRAP2
//! datagram into the plain-text report produced by [`format_plain_trap`].
//! Datagrams that fail to decode are logged and dropped; the receiver keeps
//! listening.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use snmp_trapd::config::{DisplayConfig, MibOptions, ReceiverConfig};
//! use snmp_trapd::mib::MibDatabase;
//! use snmp_trapd::notification::TrapReceiver;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), snmp_trapd::Error> {
//!     let db = Arc::new(MibDatabase::init_mib("/usr/share/snmp/mibs", MibOptions::default()));
//!     let config = ReceiverConfig {
//!         port: 1162,
//!         ..Default::default()
//!     };
//!     let receiver = TrapReceiver::bind(&config, db, DisplayConfig::default()).await?;
//!
//!     loop {
//!         let (text, source) = receiver.recv().await?;
//!         println!("{} {}", source.ip(), text);
//!     }
//! }
//! ```

mod format;
mod varbind;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tracing::instrument;

use crate::config::{DisplayConfig, ReceiverConfig};
use crate::error::{Error, Result};
use crate::format::Printer;
use crate::format::hex::Bytes;
use crate::message::decode_trap;
use crate::mib::MibDatabase;
use crate::util::bind_udp_socket;

pub use format::{format_plain_trap, sprint_variable};
pub use varbind::{check_trap_oid, find_trap_oid, oids};

/// Decode one datagram and render it as text.
///
/// A missing snmpTrapOID.0 is logged but does not stop rendering.
pub fn decode_and_format(db: &MibDatabase, config: &DisplayConfig, data: &[u8]) -> Result<String> {
    let message = decode_trap(data)?;
    check_trap_oid(&message.pdu);
    Ok(format_plain_trap(&Printer::new(db, config), &message.pdu))
}

/// UDP listener for SNMPv2c traps.
///
/// Cloning is cheap; clones share the socket and the MIB database.
#[derive(Clone)]
pub struct TrapReceiver {
    inner: Arc<ReceiverInner>,
}

struct ReceiverInner {
    socket: UdpSocket,
    local_addr: SocketAddr,
    db: Arc<MibDatabase>,
    display: DisplayConfig,
    recv_buffer_size: usize,
}

impl TrapReceiver {
    /// Bind to the configured address and port.
    pub async fn bind(
        config: &ReceiverConfig,
        db: Arc<MibDatabase>,
        display: DisplayConfig,
    ) -> Result<Self> {
        if config.recv_buffer_size == 0 {
            return Err(Error::Config("receive buffer size must be non-zero".into()));
        }
        let bind_addr = config.bind_addr();

        let socket = bind_udp_socket(bind_addr).await.map_err(|e| Error::Io {
            target: Some(bind_addr),
            source: e,
        })?;

        let local_addr = socket.local_addr().map_err(|e| Error::Io {
            target: Some(bind_addr),
            source: e,
        })?;

        tracing::info!(target: "snmp_trapd::notification", { snmp.local_addr = %local_addr }, "listening for traps");

        Ok(Self {
            inner: Arc::new(ReceiverInner {
                socket,
                local_addr,
                db,
                display,
                recv_buffer_size: config.recv_buffer_size,
            }),
        })
    }

    /// Get the local address this receiver is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.inner.local_addr
    }

    pub fn mib(&self) -> &MibDatabase {
        &self.inner.db
    }

    /// Receive the next trap that decodes, as rendered text.
    ///
    /// Only socket errors are returned; undecodable datagrams are skipped.
    #[instrument(skip(self), err, fields(snmp.local_addr = %self.local_addr()))]
    pub async fn recv(&self) -> Result<(String, SocketAddr)> {
        let mut buf = vec![0u8; self.inner.recv_buffer_size];

        loop {
            let (len, source) =
                self.inner
                    .socket
                    .recv_from(&mut buf)
                    .await
                    .map_err(|e| Error::Io {
                        target: None,
                        source: e,
                    })?;

            let data = &buf[..len];
            tracing::trace!(target: "snmp_trapd::notification", { snmp.source = %source, snmp.bytes = len, data = %Bytes(data) }, "received datagram");

            match decode_and_format(&self.inner.db, &self.inner.display, data) {
                Ok(text) => return Ok((text, source)),
                Err(e) => {
                    tracing::warn!(target: "snmp_trapd::notification", { snmp.source = %source, error = %e }, "dropping undecodable datagram");
                    continue;
                }
            }
        }
    }
}
