use crate::model::CourierId;
use thiserror::Error;

/// Errors the dispatcher hands back to callers.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The dispatcher's inbox is gone; the task has shut down.
    #[error("Dispatcher closed")]
    ActorClosed,

    /// The dispatcher dropped the response channel without answering.
    #[error("Dispatcher dropped response channel")]
    ActorDropped,

    /// An order with no cart lines cannot be dispatched.
    #[error("El carrito está vacío.")]
    EmptyCart,

    #[error("Unknown courier: {0}")]
    UnknownCourier(CourierId),

    /// The courier exists but has no tanda in hand.
    #[error("Courier {0} has nothing to deliver")]
    NothingToDeliver(CourierId),

    /// The code is not the current stop's code. Stops are confirmed in
    /// route order, so even a valid later code of the same tanda lands here.
    #[error("Verification code {got} does not match the current stop")]
    CodeMismatch { got: String },
}
