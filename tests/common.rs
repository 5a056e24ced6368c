// tests/common.rs
//! Shared test utilities: test-friendly logging setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging that plays well with `cargo test` output capture.
/// Respects RUST_LOG; idempotent, so every test may call it.
#[allow(dead_code)]
pub fn setup() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

/// Force debug-level logging even if RUST_LOG is not set
#[allow(dead_code)]
pub fn setup_debug() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::new("encrypted_profile_vault=debug"))
        .try_init()
        .ok();
}
