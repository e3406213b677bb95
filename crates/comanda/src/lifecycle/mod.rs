//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the bot's actors. The actors themselves
//! are simple; the coordination lives here.
//!
//! ## The pattern
//!
//! 1. Create both actors and their clients, with no dependencies yet.
//! 2. Spawn the dispatcher first, then the session hub with its context
//!    (catalog + a clone of the dispatch client) injected at `run()`.
//!    Dependencies arrive at runtime, not construction time, so there are
//!    no circular references to untangle.
//! 3. To shut down, drop the clients and await the task handles. Each
//!    actor sees its channel close, drains what is queued and exits. The
//!    session hub finishes first; only then does the dispatcher lose its
//!    last sender (the clone inside the session context) and stop too.
//!
//! [`BotSystem`] packages all of that behind `new` / `shutdown`.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber for the binary. Logs carry
//! structured fields (`entity_type`, session keys, tanda ids) rather than
//! module paths; `RUST_LOG=debug` adds full event payloads.

pub mod bot_system;
pub mod tracing;

pub use bot_system::BotSystem;
pub use self::tracing::setup_tracing;
