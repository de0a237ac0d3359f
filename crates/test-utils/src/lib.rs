// crates/test-utils/src/lib.rs

//! Shared helpers for ppsched tests: tracing setup, builders and fake
//! collaborators.

pub mod builders;
pub mod fakes;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialise tracing for a test. Subsequent calls are no-ops, so every
/// test can call this without coordination. Level comes from `RUST_LOG`,
/// defaulting to `debug`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
