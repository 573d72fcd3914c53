//! End-to-end test suite for OpenLap
//!
//! This crate exercises the session pipeline across crate boundaries:
//! - Wire packets decoded into samples and fed through the lap engine
//! - Session recording and deterministic replay
//! - Lap history persistence, import, and restore
//! - Configuration files driving engine behavior

#![deny(rust_2018_idioms)]
#![deny(warnings)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::print_stdout)]

pub mod fixtures;

use anyhow::Result;
use tracing::info;

/// Installs a test-writer subscriber. Safe to call from every test.
pub fn init_test_environment() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("openlap=debug,openlap_engine=debug,openlap_replay=debug")
        .with_test_writer()
        .try_init()
        .ok(); // A sibling test may have installed a subscriber already.

    info!("Test environment ready");
    Ok(())
}
