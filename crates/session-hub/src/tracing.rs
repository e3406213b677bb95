//! # Observability & Tracing
//!
//! Structured logging setup for hub-based systems.
//!
//! Every hub logs with an `entity_type` field (the session type's short name)
//! plus the session key, so one subscriber can interleave several hubs and
//! still stay filterable. Client wrappers add `#[instrument]` spans on top,
//! which the compact format renders inline (e.g. `deliver: Sending request`).
//!
//! ## Configuration
//!
//! The filter comes from the standard `RUST_LOG` environment variable:
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle events, opened sessions, deliveries
//! RUST_LOG=debug cargo run     # full event payloads on top
//! ```

/// Initializes the global tracing subscriber. Call once, first thing in main.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - entity_type carries that
        .compact() // Compact format shows spans inline
        .init();
}
