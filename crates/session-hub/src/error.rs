//! # Hub Errors
//!
//! This module defines the common error types used throughout the session hub.
//! Centralizing them keeps error handling consistent across every hub and client.

/// Errors that can occur within the hub itself.
///
/// Entity-level failures (whatever `SessionEntity::Error` the entity defines)
/// cross the hub boundary boxed inside [`HubError::EntityError`]; channel
/// failures get their own variants so callers can tell "the hub is gone" apart
/// from "the entity rejected the event".
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("Hub closed")]
    ActorClosed,
    #[error("Hub dropped response channel")]
    ActorDropped,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
