//! Tracing setup for the bot binary.
//!
//! `RUST_LOG` still has the last word, but an unset environment defaults to
//! `info` so the scripted demo narrates itself out of the box:
//!
//! ```bash
//! cargo run                # info: orders, tandas, courier stops
//! RUST_LOG=debug cargo run # plus full events and wire payloads
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Call once, first thing in main.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false) // Don't show module paths - entity_type carries that
        .compact()
        .init();
}
