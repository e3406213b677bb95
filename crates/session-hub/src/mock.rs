//! # Mock Client & Testing Guide
//!
//! The `MockClient<T>` type speaks the same `HubClient<T>` API as the
//! production client but operates entirely in-memory. It lets you queue
//! expectations and canned responses for unit tests, so code built around a
//! `HubClient` can be exercised without spawning any hub.
//!
//! ## When to use Mocks vs a Real Hub
//!
//! | Feature | MockClient | Real Hub |
//! |---------|------------|----------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real session store |
//! | **Use Case** | Unit testing logic *around* the client | Testing the entity or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Fluent Expectations
//!
//! ```rust
//! use session_hub::mock::MockClient;
//! use session_hub::SessionEntity;
//! use async_trait::async_trait;
//!
//! # #[derive(Clone, Debug, PartialEq)]
//! # struct Tally { count: u32 }
//! # #[derive(Debug, thiserror::Error)]
//! # #[error("tally error")]
//! # struct TallyError;
//! # #[async_trait]
//! # impl SessionEntity for Tally {
//! #     type Key = String; type Seed = (); type Event = u32; type Reply = u32;
//! #     type Context = (); type Error = TallyError;
//! #     fn fresh(_: String, _: ()) -> Self { Self { count: 0 } }
//! #     async fn on_event(&mut self, event: u32, _: &()) -> Result<u32, TallyError> {
//! #         self.count += event;
//! #         Ok(self.count)
//! #     }
//! # }
//! #[tokio::main]
//! async fn main() {
//!     // 1. Queue expectations
//!     let mut mock = MockClient::<Tally>::new();
//!     mock.expect_deliver().return_ok(7);
//!     mock.expect_peek("alice".to_string())
//!         .return_ok(Some(Tally { count: 7 }));
//!
//!     // 2. Drive the client as if a real hub answered
//!     let client = mock.client();
//!     assert_eq!(client.deliver("alice".to_string(), (), 7).await.unwrap(), 7);
//!     assert!(client.peek("alice".to_string()).await.unwrap().is_some());
//!
//!     // 3. Ensure everything queued was consumed
//!     mock.verify();
//! }
//! ```
//!
//! ## Testing Failure Scenarios
//!
//! The biggest advantage of `MockClient` is simulating failures that are hard
//! to reproduce with a real hub (closed channels, entity rejections):
//!
//! ```rust,ignore
//! mock.expect_deliver().return_err(HubError::ActorClosed);
//! let result = client.deliver(key, seed, event).await;
//! assert!(matches!(result, Err(HubError::ActorClosed)));
//! ```
//!
//! ## Raw Channel Utilities
//!
//! Use [`create_mock_client`] when a test wants to inspect the request itself
//! (which key? which event?) before answering: it yields a client plus the
//! receiving end of its channel, and the [`expect_deliver`] / [`expect_peek`]
//! helpers destructure the next request.

use crate::client::HubClient;
use crate::entity::SessionEntity;
use crate::error::HubError;
use crate::message::HubRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<T: SessionEntity> {
    Deliver {
        response: Result<T::Reply, HubError>,
    },
    Peek {
        key: T::Key,
        response: Result<Option<T>, HubError>,
    },
}

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Session>::new();
/// mock.expect_deliver().return_ok(reply);
/// mock.expect_peek("598...".to_string()).return_ok(Some(session));
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: SessionEntity> {
    client: HubClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: SessionEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SessionEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<HubRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut exps = expectations_clone.lock().unwrap();
                let expectation = exps.pop_front();
                drop(exps); // Release lock before touching channels

                match (request, expectation) {
                    (
                        HubRequest::Deliver { respond_to, .. },
                        Some(Expectation::Deliver { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        HubRequest::Peek { key: _, respond_to },
                        Some(Expectation::Peek { key: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: HubClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> HubClient<T> {
        self.client.clone()
    }

    /// Expects a `deliver` operation.
    pub fn expect_deliver(&mut self) -> DeliverExpectationBuilder<T> {
        DeliverExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `peek` operation.
    pub fn expect_peek(&mut self, key: T::Key) -> PeekExpectationBuilder<T> {
        PeekExpectationBuilder {
            key,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `deliver` expectations.
pub struct DeliverExpectationBuilder<T: SessionEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: SessionEntity> DeliverExpectationBuilder<T> {
    /// Sets the expectation to return a successful reply.
    pub fn return_ok(self, reply: T::Reply) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Deliver {
            response: Ok(reply),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: HubError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Deliver {
            response: Err(error),
        });
    }
}

/// Builder for `peek` expectations.
pub struct PeekExpectationBuilder<T: SessionEntity> {
    key: T::Key,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: SessionEntity> PeekExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Peek {
            key: self.key,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: HubError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Peek {
            key: self.key,
            response: Err(error),
        });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// In unit tests we often don't want to spin up a full `SessionHub` just to
/// test the logic wrapped *around* a client. This helper hands back a client
/// whose requests land on a channel the test controls, so the test can
/// inspect each request and answer it deterministically.
///
/// **Note**: Consider using [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: SessionEntity>(
    buffer_size: usize,
) -> (HubClient<T>, mpsc::Receiver<HubRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (HubClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Deliver request
pub async fn expect_deliver<T: SessionEntity>(
    receiver: &mut mpsc::Receiver<HubRequest<T>>,
) -> Option<(
    T::Key,
    T::Seed,
    T::Event,
    tokio::sync::oneshot::Sender<Result<T::Reply, HubError>>,
)> {
    match receiver.recv().await {
        Some(HubRequest::Deliver {
            key,
            seed,
            event,
            respond_to,
        }) => Some((key, seed, event, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Peek request
pub async fn expect_peek<T: SessionEntity>(
    receiver: &mut mpsc::Receiver<HubRequest<T>>,
) -> Option<(
    T::Key,
    tokio::sync::oneshot::Sender<Result<Option<T>, HubError>>,
)> {
    match receiver.recv().await {
        Some(HubRequest::Peek { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SessionEntity;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Visitor {
        name: String,
        visits: u32,
    }

    #[derive(Debug)]
    enum VisitorEvent {
        Visit,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Visitor error")]
    struct VisitorError;

    #[async_trait]
    impl SessionEntity for Visitor {
        type Key = String;
        type Seed = String;
        type Event = VisitorEvent;
        type Reply = u32;
        type Context = ();
        type Error = VisitorError;

        fn fresh(_key: String, seed: String) -> Self {
            Self {
                name: seed,
                visits: 0,
            }
        }

        async fn on_event(
            &mut self,
            event: VisitorEvent,
            _ctx: &Self::Context,
        ) -> Result<u32, Self::Error> {
            match event {
                VisitorEvent::Visit => {
                    self.visits += 1;
                    Ok(self.visits)
                }
            }
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Visitor>(10);

        // Test Deliver
        let deliver_task = tokio::spawn(async move {
            client
                .deliver("ada".to_string(), "Ada".to_string(), VisitorEvent::Visit)
                .await
        });

        let (key, seed, _event, responder) = expect_deliver(&mut receiver)
            .await
            .expect("Expected Deliver request");
        assert_eq!(key, "ada");
        assert_eq!(seed, "Ada");
        responder.send(Ok(1)).unwrap();

        let result = deliver_task.await.unwrap();
        assert!(matches!(result, Ok(1)));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        // Create mock with fluent expectation API
        let mut mock = MockClient::<Visitor>::new();

        // Set up expectations
        mock.expect_deliver().return_ok(3);
        mock.expect_peek("ada".to_string()).return_ok(Some(Visitor {
            name: "Ada".to_string(),
            visits: 3,
        }));

        let client = mock.client();

        // Execute operations
        let visits = client
            .deliver("ada".to_string(), "Ada".to_string(), VisitorEvent::Visit)
            .await
            .unwrap();
        assert_eq!(visits, 3);

        let peeked = client.peek("ada".to_string()).await.unwrap();
        assert_eq!(peeked.map(|v| v.visits), Some(3));

        // Verify all expectations were met
        mock.verify();
    }
}
