//! # Hub Messages
//!
//! This module defines the message types exchanged between a `HubClient`
//! and its `SessionHub`.

use crate::entity::SessionEntity;
use crate::error::HubError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the hub.
pub type Response<T> = oneshot::Sender<Result<T, HubError>>;

/// Internal message type sent to the hub.
///
/// # Delivery-Oriented Design
/// A session hub is not a CRUD store, so the message set is deliberately
/// small. Almost everything is a [`HubRequest::Deliver`]: route one event to
/// the session owning `key`, creating the session on the way if this is the
/// key's first contact. [`HubRequest::Peek`] exists for observers (tests,
/// consoles, health checks) that want a snapshot without disturbing the flow.
///
/// Both variants use the associated types of [`SessionEntity`], so a hub of
/// one session type can never be handed another type's events.
#[derive(Debug)]
pub enum HubRequest<T: SessionEntity> {
    Deliver {
        key: T::Key,
        seed: T::Seed,
        event: T::Event,
        respond_to: Response<T::Reply>,
    },
    Peek {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
}
