use super::error::SessionError;
use super::flow;
use crate::catalog::{Catalog, CatalogView};
use crate::clients::DispatchClient;
use crate::model::Cart;
use crate::whatsapp::{Inbound, Outbound};
use async_trait::async_trait;
use session_hub::SessionEntity;
use std::sync::Arc;

/// Where a conversation stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatState {
    /// Nothing ordered yet, or the session was reset.
    Start,
    /// Looking at the catalog list.
    Browsing,
    /// Asked to name a category to filter by.
    ChoosingCategory,
    /// Picked a product, asked how many.
    AwaitingQuantity { product_id: u32 },
    /// Gave a quantity, asked for a note.
    AwaitingNote { product_id: u32, quantity: u32 },
    /// Looking at the cart summary and its numbered options.
    ManagingCart,
    /// Asked which cart line to remove.
    AwaitingRemoval,
    /// Cart confirmed, waiting for a location pin.
    AwaitingLocation,
    /// Order placed; a greeting starts the next one.
    OrderPlaced,
    /// Said goodbye.
    Ended,
}

/// One customer's conversation, keyed by phone number.
#[derive(Debug, Clone)]
pub struct Session {
    pub phone: String,
    pub name: String,
    pub state: ChatState,
    pub cart: Cart,
    pub view: CatalogView,
}

/// Shared services handed to the hub at spawn time.
pub struct SessionContext {
    pub catalog: Arc<Catalog>,
    pub dispatch: DispatchClient,
}

#[async_trait]
impl SessionEntity for Session {
    type Key = String;
    type Seed = Option<String>;
    type Event = Inbound;
    type Reply = Vec<Outbound>;
    type Context = SessionContext;
    type Error = SessionError;

    fn fresh(key: String, seed: Option<String>) -> Self {
        let name = seed.unwrap_or_else(|| default_name(&key));
        Self {
            phone: key,
            name,
            state: ChatState::Start,
            cart: Cart::default(),
            view: CatalogView::default(),
        }
    }

    async fn on_event(
        &mut self,
        event: Inbound,
        ctx: &SessionContext,
    ) -> Result<Vec<Outbound>, SessionError> {
        Ok(flow::drive(self, event, ctx).await)
    }
}

/// "Cliente_" plus the last four characters of the phone number, for
/// customers whose profile carries no name.
fn default_name(phone: &str) -> String {
    let skip = phone.chars().count().saturating_sub(4);
    let tail: String = phone.chars().skip(skip).collect();
    format!("Cliente_{tail}")
}
