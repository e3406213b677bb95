//! # Dispatch Client
//!
//! Type-safe, cheap-to-clone handle for the dispatch actor. Requests go
//! over an mpsc channel and come back on oneshot channels; every session
//! actor holds a clone.

use crate::dispatch_actor::{DispatchError, DispatchRequest, StopOutcome, ZoneStatus};
use crate::model::{Courier, CourierId, OrderDraft, OrderReceipt};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct DispatchClient {
    sender: mpsc::Sender<DispatchRequest>,
}

impl DispatchClient {
    pub fn new(sender: mpsc::Sender<DispatchRequest>) -> Self {
        Self { sender }
    }

    /// Queues a confirmed cart for delivery and returns the receipt.
    #[instrument(skip(self, draft))]
    pub async fn place_order(&self, draft: OrderDraft) -> Result<OrderReceipt, DispatchError> {
        debug!(customer = %draft.customer, "Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(DispatchRequest::PlaceOrder { draft, respond_to })
            .await
            .map_err(|_| DispatchError::ActorClosed)?;
        response.await.map_err(|_| DispatchError::ActorDropped)?
    }

    /// Adds a courier to the fleet.
    #[instrument(skip(self))]
    pub async fn register_courier(&self, name: String) -> Result<CourierId, DispatchError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(DispatchRequest::RegisterCourier { name, respond_to })
            .await
            .map_err(|_| DispatchError::ActorClosed)?;
        response.await.map_err(|_| DispatchError::ActorDropped)?
    }

    /// Confirms the courier's current stop by its verification code.
    #[instrument(skip(self))]
    pub async fn confirm_stop(
        &self,
        courier: CourierId,
        code: String,
    ) -> Result<StopOutcome, DispatchError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(DispatchRequest::ConfirmStop {
                courier,
                code,
                respond_to,
            })
            .await
            .map_err(|_| DispatchError::ActorClosed)?;
        response.await.map_err(|_| DispatchError::ActorDropped)?
    }

    /// Queue and tanda counts per zone.
    #[instrument(skip(self))]
    pub async fn zone_report(&self) -> Result<Vec<ZoneStatus>, DispatchError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(DispatchRequest::ZoneReport { respond_to })
            .await
            .map_err(|_| DispatchError::ActorClosed)?;
        response.await.map_err(|_| DispatchError::ActorDropped)?
    }

    /// Fleet snapshot with per-courier stats.
    #[instrument(skip(self))]
    pub async fn couriers(&self) -> Result<Vec<Courier>, DispatchError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(DispatchRequest::Couriers { respond_to })
            .await
            .map_err(|_| DispatchError::ActorClosed)?;
        response.await.map_err(|_| DispatchError::ActorDropped)?
    }
}
