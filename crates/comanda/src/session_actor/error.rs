use thiserror::Error;

/// Errors surfaced by the session layer.
///
/// Conversation mistakes (a bad quantity, an unknown option) are not
/// errors; the flow answers them in Spanish and the session carries on.
/// This type only covers plumbing failures.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
