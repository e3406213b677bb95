//! # Session Hub
//!
//! This crate provides the building blocks for type-safe, keyed session
//! actors in Rust: one hub task per session *type*, owning every live session
//! of that type and feeding each one its events strictly in order.
//!
//! ## Why a Hub?
//!
//! Webhook-style systems (chat bots, device gateways, game lobbies) share a
//! shape: many independent conversations, each identified by an external key,
//! each holding mutable state that two near-simultaneous deliveries must never
//! corrupt. The classic fix is a lock per conversation; the actor-model fix is
//! to give all conversations of one type to a single task:
//!
//! - **Isolated state** – the hub owns the session map; nothing else touches it
//! - **Message-passing concurrency** – producers only hold a cheap [`HubClient`]
//! - **Sequential processing** – events for a key can never interleave, so the
//!   read-modify-write races simply cannot happen
//!
//! ## The Get-or-Create Twist
//!
//! Unlike a CRUD resource, a session is never created explicitly: the first
//! event from an unknown key *is* the creation. [`SessionEntity::fresh`]
//! builds the initial state (from the key and a transport-provided seed) and
//! the event is applied to it in the same breath. Clients therefore have
//! exactly two verbs: [`HubClient::deliver`] and [`HubClient::peek`].
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`SessionEntity`]) - your conversation logic
//! 2. **Runtime Layer** ([`SessionHub`]) - message processing and concurrency
//! 3. **Interface Layer** ([`HubClient`]) - type-safe communication
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at
//! construction time; this "late binding" lets a session entity call other
//! actors through clients that did not exist yet when the hub was built.
//!
//! ## Quick Start
//!
//! ```rust
//! use session_hub::{SessionEntity, SessionHub};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Greeter {
//!     name: String,
//!     greetings: u32,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("greeter error")]
//! struct GreeterError;
//!
//! #[async_trait]
//! impl SessionEntity for Greeter {
//!     type Key = String;          // who is talking (e.g. a phone number)
//!     type Seed = Option<String>; // profile name on first contact, if any
//!     type Event = String;        // inbound text
//!     type Reply = String;        // outbound text
//!     type Context = ();
//!     type Error = GreeterError;
//!
//!     fn fresh(key: String, seed: Option<String>) -> Self {
//!         Self { name: seed.unwrap_or(key), greetings: 0 }
//!     }
//!
//!     async fn on_event(&mut self, _event: String, _ctx: &()) -> Result<String, GreeterError> {
//!         self.greetings += 1;
//!         Ok(format!("Hello {} (x{})", self.name, self.greetings))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (hub, client) = SessionHub::<Greeter>::new(10);
//!     tokio::spawn(hub.run(()));
//!
//!     let reply = client
//!         .deliver("555".to_string(), Some("Ada".to_string()), "hi".to_string())
//!         .await
//!         .unwrap();
//!     assert_eq!(reply, "Hello Ada (x1)");
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module ships a `MockClient` that speaks the same API as
//! [`HubClient`] but answers from an expectation queue, so client-wrapper
//! logic can be tested without spawning any hub.

pub mod client;
pub mod entity;
pub mod error;
pub mod hub;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use client::HubClient;
pub use entity::SessionEntity;
pub use error::HubError;
pub use hub::SessionHub;
pub use message::{HubRequest, Response};
