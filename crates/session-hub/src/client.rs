//! # Generic Client
//!
//! This module defines the generic client for communicating with a hub.

use crate::entity::SessionEntity;
use crate::error::HubError;
use crate::message::HubRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `SessionHub`.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive; hand a
///   clone to every producer (webhook handler, scheduler, test).
/// * **Async API** – all methods resolve to `Result<…, HubError>`.
/// * **Generic** – works with any type that implements `SessionEntity`.
#[derive(Clone)]
pub struct HubClient<T: SessionEntity> {
    sender: mpsc::Sender<HubRequest<T>>,
}

impl<T: SessionEntity> HubClient<T> {
    pub fn new(sender: mpsc::Sender<HubRequest<T>>) -> Self {
        Self { sender }
    }

    /// Routes one event to the session owning `key`, creating the session
    /// first if this key has never been seen. Resolves to the session's reply.
    pub async fn deliver(
        &self,
        key: T::Key,
        seed: T::Seed,
        event: T::Event,
    ) -> Result<T::Reply, HubError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HubRequest::Deliver {
                key,
                seed,
                event,
                respond_to,
            })
            .await
            .map_err(|_| HubError::ActorClosed)?;
        response.await.map_err(|_| HubError::ActorDropped)?
    }

    /// Returns a snapshot of the session for `key`, or `None` if that key has
    /// never delivered anything. Never creates a session.
    pub async fn peek(&self, key: T::Key) -> Result<Option<T>, HubError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HubRequest::Peek { key, respond_to })
            .await
            .map_err(|_| HubError::ActorClosed)?;
        response.await.map_err(|_| HubError::ActorDropped)?
    }
}
