//! # Session Actor
//!
//! One [`Session`] per phone number, living inside a
//! [`session_hub::SessionHub`]. The hub guarantees each conversation is
//! processed one message at a time, so the flow can mutate the cart and
//! state without locks; the catalog and the dispatch client come in
//! through [`SessionContext`] when the hub starts running.

mod entity;
mod error;
mod flow;
mod replies;

pub use entity::{ChatState, Session, SessionContext};
pub use error::SessionError;

use session_hub::{HubClient, SessionHub};

/// Creates the conversation hub and its raw client, not yet running.
/// Wrap the client in [`crate::clients::SessionClient`] for the domain
/// API.
pub fn new(buffer: usize) -> (SessionHub<Session>, HubClient<Session>) {
    SessionHub::new(buffer)
}
