use super::error::DispatchError;
use crate::geo::Zone;
use crate::model::{Courier, CourierId, OrderCode, OrderDraft, OrderReceipt};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by every request.
pub type Response<T> = oneshot::Sender<Result<T, DispatchError>>;

/// Requests the dispatcher understands.
#[derive(Debug)]
pub enum DispatchRequest {
    /// Turn a confirmed cart into a queued order and answer with the receipt.
    PlaceOrder {
        draft: OrderDraft,
        respond_to: Response<OrderReceipt>,
    },
    /// Add a courier to the fleet. Newly idle hands pick up pending tandas.
    RegisterCourier {
        name: String,
        respond_to: Response<CourierId>,
    },
    /// A courier read the customer's verification code at the door.
    ConfirmStop {
        courier: CourierId,
        code: String,
        respond_to: Response<StopOutcome>,
    },
    /// Queue and tanda counts per zone.
    ZoneReport {
        respond_to: Response<Vec<ZoneStatus>>,
    },
    /// Snapshot of the fleet with per-courier stats.
    Couriers {
        respond_to: Response<Vec<Courier>>,
    },
}

/// What a courier learns from confirming a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopOutcome {
    /// Code of the order just delivered.
    pub code: OrderCode,
    /// Stops still ahead on this tanda.
    pub remaining: usize,
    /// True when that was the last stop and the tanda is settled.
    pub completed: bool,
}

/// Queue and tanda counts for one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneStatus {
    pub zone: Zone,
    /// Orders waiting in the zone queue, not yet cut into a tanda.
    pub queued: usize,
    /// Tandas cut but waiting for an idle courier.
    pub pending_tandas: usize,
    /// Tandas currently out with a courier.
    pub active_tandas: usize,
}
