//! # Generic Session Hub
//!
//! This module defines the `SessionHub`, the core component that owns every
//! live session of one type and processes their events. It implements the
//! "Server" side of the Actor Model: messages are handled sequentially, so
//! the session store is accessed exclusively and never needs a lock.

use crate::client::HubClient;
use crate::entity::SessionEntity;
use crate::error::HubError;
use crate::message::HubRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a keyed collection of sessions.
///
/// # Architecture Note
/// This struct is the "Server" half of the hub. It owns the state (`store`)
/// and the receiver end of the channel.
///
/// **Concurrency Model**:
/// All sessions of one type live inside a single hub task, and that task
/// processes one message at a time. Two webhook deliveries for the same key
/// can therefore never interleave: whichever reaches the channel first is
/// fully applied before the second one is even looked at. That ordering
/// guarantee is the whole point of the hub. No `Mutex`, no `RwLock`.
///
/// **Get-or-Create**:
/// There is no explicit "create session" request. The first
/// [`HubRequest::Deliver`] for an unknown key constructs the session via
/// [`SessionEntity::fresh`] and then applies the event to it, so a brand-new
/// sender and a returning one travel the same code path.
///
/// # Usage Pattern
///
/// 1. **Create**: call `SessionHub::new()` to get the hub (server) and its
///    [`HubClient`] (interface).
/// 2. **Wire**: pass dependencies (other clients) into `hub.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use session_hub::{SessionEntity, SessionHub};
/// use async_trait::async_trait;
///
/// // Minimal session definition
/// #[derive(Clone, Debug)] struct Tally { count: u32 }
/// #[derive(Debug, thiserror::Error)] #[error("tally error")] struct TallyError;
///
/// #[async_trait]
/// impl SessionEntity for Tally {
///     type Key = String;
///     type Seed = ();
///     type Event = u32;
///     type Reply = u32;
///     type Context = ();
///     type Error = TallyError;
///
///     fn fresh(_key: String, _seed: ()) -> Self { Self { count: 0 } }
///
///     async fn on_event(&mut self, event: u32, _: &()) -> Result<u32, TallyError> {
///         self.count += event;
///         Ok(self.count)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     // 1. Create
///     let (hub, client) = SessionHub::<Tally>::new(10);
///
///     // 2. Wire & Run
///     tokio::spawn(hub.run(()));
///
///     // 3. Use: first contact creates the session, then counts
///     let total = client.deliver("alice".to_string(), (), 2).await.unwrap();
///     assert_eq!(total, 2);
///     let total = client.deliver("alice".to_string(), (), 3).await.unwrap();
///     assert_eq!(total, 5);
/// }
/// ```
pub struct SessionHub<T: SessionEntity> {
    receiver: mpsc::Receiver<HubRequest<T>>,
    store: HashMap<T::Key, T>,
}

impl<T: SessionEntity> SessionHub<T> {
    /// Creates a new `SessionHub` and its associated `HubClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is
    ///   full, calls to the client will wait until there is space.
    ///
    /// # Returns
    ///
    /// A tuple containing:
    /// 1. The `SessionHub` instance (the server), which must be run via `.run()`.
    /// 2. The `HubClient` instance, which can be cloned and shared to send requests.
    pub fn new(buffer_size: usize) -> (Self, HubClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let hub = Self {
            receiver,
            store: HashMap::new(),
        };
        let client = HubClient::new(sender);
        (hub, client)
    }

    /// Runs the hub's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every `on_event` call. This
    /// allows sessions to reach external dependencies (like other actors'
    /// clients) that were created *after* the hub was instantiated but
    /// *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Session" instead of "comanda::session_actor::Session")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Hub started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                HubRequest::Deliver {
                    key,
                    seed,
                    event,
                    respond_to,
                } => {
                    debug!(entity_type, %key, ?event, "Deliver");
                    if !self.store.contains_key(&key) {
                        let session = T::fresh(key.clone(), seed);
                        self.store.insert(key.clone(), session);
                        info!(entity_type, %key, size = self.store.len(), "Session opened");
                    }
                    // Present for sure: inserted just above if missing.
                    if let Some(session) = self.store.get_mut(&key) {
                        // Await the async hook
                        let result = session
                            .on_event(event, &context)
                            .await
                            .map_err(|e| HubError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %key, "Delivered"),
                            Err(e) => warn!(entity_type, %key, error = %e, "Event failed"),
                        }
                        let _ = respond_to.send(result);
                    }
                }
                HubRequest::Peek { key, respond_to } => {
                    let session = self.store.get(&key).cloned();
                    let found = session.is_some();
                    debug!(entity_type, %key, found, "Peek");
                    let _ = respond_to.send(Ok(session));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
