//! Shared test infrastructure for snmp-trapd.
//!
//! Provides the captured BGP trap datagram and the fixture MIB databases.

// Not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;

pub use fixtures::{
    SAMPLE_TRAP_HEX, fixture_db, fixture_dir, hex_bytes, index_db, sample_trap, trap_pdu,
};
