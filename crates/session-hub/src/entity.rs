//! # SessionEntity Trait
//!
//! The `SessionEntity` trait defines the contract that every long-lived,
//! keyed conversation state (a chat session, a device link, a game table, …)
//! must implement to be managed by the generic `SessionHub`. It specifies
//! associated types for the key, the bootstrap seed, the event/reply pair and
//! the injected context, plus the single `on_event` hook that advances the
//! entity.
//!
//! # Architecture Note
//! Why a trait? By defining one contract that all our session types satisfy,
//! the `SessionHub` loop is written *once* and reused for any keyed state.
//! Associated types keep things safe: a hub of chat sessions only accepts chat
//! events, and the compiler rejects anything else.
//!
//! Unlike a CRUD store, a session hub never says "not found" on delivery:
//! the first event *is* the creation. That is why [`SessionEntity::fresh`] is
//! infallible and takes a [`SessionEntity::Seed`] with whatever extra data the
//! transport happened to carry (a profile name, a locale, nothing at all).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any keyed session state must implement to be managed by SessionHub.
///
/// # Async & Context
/// This trait is `#[async_trait]` so `on_event` can call other actors.
/// The `Context` type is injected into the hook on every event, which allows
/// "Late Binding" of dependencies (passing clients to `run()` instead of
/// `new()`).
#[async_trait]
pub trait SessionEntity: Clone + Send + Sync + 'static {
    /// The external identity a session is keyed by (e.g. a phone number).
    /// Keys arrive from outside the system, so unlike a generated id there is
    /// no `From<u32>` requirement.
    type Key: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Bootstrap data delivered alongside the very first event (e.g. the
    /// sender's profile name). Use `()` if first contact carries nothing.
    ///
    /// Every delivery carries a seed, but only the one that actually creates
    /// the session is looked at; later seeds are dropped unused.
    type Seed: Send + Sync + Debug;

    /// One inbound occurrence for this session (a message, a tick, a signal).
    type Event: Send + Sync + Debug;

    /// What the session hands back after absorbing an event.
    type Reply: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the hub.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    /// Must implement std::error::Error for proper error propagation.
    ///
    /// One error enum covers the whole session rather than one per event
    /// kind; the loss of per-event precision is worth the reduction in
    /// boilerplate.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the session state for a key seen for the first time.
    ///
    /// This is deliberately infallible: by the time an event reaches the hub
    /// the sender already exists out in the world, so there is nothing
    /// meaningful to reject yet. Validation belongs in `on_event`.
    fn fresh(key: Self::Key, seed: Self::Seed) -> Self;

    /// Apply one event to the session and produce a reply.
    ///
    /// The hub guarantees events for one key arrive here strictly in order,
    /// one at a time. On `Err` the session keeps whatever state this method
    /// left behind; the hub does not roll back.
    async fn on_event(
        &mut self,
        event: Self::Event,
        ctx: &Self::Context,
    ) -> Result<Self::Reply, Self::Error>;
}
