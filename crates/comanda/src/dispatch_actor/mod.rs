//! # Dispatch Actor
//!
//! The single owner of delivery state: zone queues, tandas and the courier
//! fleet. It runs as one task and talks over channels, so none of that
//! state needs a lock.
//!
//! ## Life of an order
//!
//! 1. A session confirms a cart and sends [`DispatchRequest::PlaceOrder`].
//! 2. The order gets a distance, an ETA, a compass zone and a 6-character
//!    verification code, then joins its zone queue.
//! 3. The queue is cut into a [`Tanda`] when it reaches the batch size, or
//!    when the periodic sweep finds its oldest order has waited too long.
//! 4. At cut time the tanda's route is planned as a [`RouteTree`] and the
//!    whole batch goes to the first idle courier, or parks until one frees
//!    up.
//! 5. The courier confirms each stop by its verification code, in route
//!    order. The last confirmation settles the courier's stats.

mod actor;
mod error;
mod messages;
mod route;
mod tanda;

pub use actor::DispatchActor;
pub use error::DispatchError;
pub use messages::{DispatchRequest, Response, StopOutcome, ZoneStatus};
pub use route::{RouteStop, RouteTree};
pub use tanda::{CutReason, Tanda};

use crate::clients::DispatchClient;
use crate::config::DispatchConfig;
use crate::geo::GeoPoint;

/// Creates a dispatcher and a client for it. Spawn [`DispatchActor::run`]
/// to bring it to life.
pub fn new(restaurant: GeoPoint, config: &DispatchConfig) -> (DispatchActor, DispatchClient) {
    DispatchActor::new(restaurant, config)
}
