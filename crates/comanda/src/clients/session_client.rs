//! # Session Client
//!
//! Domain-facing wrapper around the raw `HubClient<Session>`: webhook
//! glue only needs "deliver this message from this phone" and gets the
//! bot's replies back, with hub failures folded into [`SessionError`].

use crate::session_actor::{Session, SessionError};
use crate::whatsapp::{Inbound, Outbound};
use session_hub::HubClient;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SessionClient {
    inner: HubClient<Session>,
}

impl SessionClient {
    pub fn new(inner: HubClient<Session>) -> Self {
        Self { inner }
    }

    /// Hands one inbound message to the customer's session and returns
    /// the replies to send. `profile_name` seeds the session on first
    /// contact and is ignored afterwards.
    #[instrument(skip(self, event))]
    pub async fn deliver(
        &self,
        phone: String,
        profile_name: Option<String>,
        event: Inbound,
    ) -> Result<Vec<Outbound>, SessionError> {
        debug!("Sending request");
        self.inner
            .deliver(phone, profile_name, event)
            .await
            .map_err(|e| SessionError::ActorCommunicationError(e.to_string()))
    }

    /// Snapshot of one session, if the phone has talked to the bot.
    #[instrument(skip(self))]
    pub async fn peek(&self, phone: String) -> Result<Option<Session>, SessionError> {
        debug!("Sending request");
        self.inner
            .peek(phone)
            .await
            .map_err(|e| SessionError::ActorCommunicationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_hub::mock::{create_mock_client, expect_deliver};

    #[tokio::test]
    async fn deliver_passes_key_seed_and_event_through() {
        let (hub_client, mut receiver) = create_mock_client::<Session>(8);
        let client = SessionClient::new(hub_client);

        let task = tokio::spawn(async move {
            let (key, seed, event, respond_to) = expect_deliver(&mut receiver).await.unwrap();
            assert_eq!(key, "59899111222");
            assert_eq!(seed, Some("Lucía".to_string()));
            assert_eq!(event, Inbound::Text("Hola".to_string()));
            respond_to
                .send(Ok(vec![Outbound::text("Bienvenido")]))
                .unwrap();
        });

        let replies = client
            .deliver(
                "59899111222".to_string(),
                Some("Lucía".to_string()),
                Inbound::Text("Hola".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(replies, vec![Outbound::text("Bienvenido")]);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn hub_failures_map_to_session_errors() {
        let (hub_client, receiver) = create_mock_client::<Session>(8);
        let client = SessionClient::new(hub_client);
        drop(receiver);

        let result = client.peek("59899111222".to_string()).await;
        assert!(matches!(
            result,
            Err(SessionError::ActorCommunicationError(_))
        ));
    }
}
