//! # WhatsApp Message Types
//!
//! The Cloud API vocabulary the bot speaks: inbound message objects as Meta
//! delivers them to a webhook, and outbound payloads ready to POST to the
//! `/messages` endpoint. Transport is out of scope on purpose; both
//! directions stop at `serde_json::Value` so any HTTP stack (or a test) can
//! pick them up.
//!
//! Inbound wire shapes collapse into the small [`Inbound`] enum the session
//! state machine consumes: typed text, a tapped button or list row (both
//! carry their reply id), a location pin, or `Unsupported` for everything
//! the bot has no use for. Malformed or exotic messages never escalate past
//! `Unsupported`.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// One message object out of a webhook delivery
/// (`entry[].changes[].value.messages[]` in the envelope Meta posts).
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    /// Sender's phone number.
    pub from: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<TextContent>,
    #[serde(default)]
    pub interactive: Option<InteractiveReply>,
    #[serde(default)]
    pub location: Option<LocationContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub body: String,
}

/// The reply half of an interactive message: exactly one of `button_reply`
/// or `list_reply` is present, both shaped `{id, title}`.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractiveReply {
    #[serde(default)]
    pub button_reply: Option<PickedReply>,
    #[serde(default)]
    pub list_reply: Option<PickedReply>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PickedReply {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationContent {
    pub latitude: f64,
    pub longitude: f64,
}

/// What the conversation actually consumes, shorn of wire detail.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Typed text.
    Text(String),
    /// The id of a tapped button or list row.
    Selection(String),
    /// A shared location pin.
    Location(GeoPoint),
    /// Stickers, audio, reactions: acknowledged, never acted on.
    Unsupported,
}

impl IncomingMessage {
    /// Collapses the wire shape into a session event. Decided by which
    /// content block is present, so a message with a surprising `type` tag
    /// but a well-formed body still gets through.
    pub fn into_inbound(self) -> Inbound {
        if let Some(text) = self.text {
            return Inbound::Text(text.body);
        }
        if let Some(interactive) = self.interactive {
            if let Some(reply) = interactive.button_reply.or(interactive.list_reply) {
                return Inbound::Selection(reply.id);
            }
        }
        if let Some(location) = self.location {
            return Inbound::Location(GeoPoint::new(location.latitude, location.longitude));
        }
        Inbound::Unsupported
    }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// A reply button on an interactive "buttons" message (max three per
/// message, per the Cloud API).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyButton {
    pub id: String,
    pub title: String,
}

impl ReplyButton {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A row of an interactive list message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ListRow {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: Some(description.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSection {
    pub title: String,
    pub rows: Vec<ListRow>,
}

/// Everything the bot can say.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Text {
        body: String,
    },
    Buttons {
        body: String,
        buttons: Vec<ReplyButton>,
    },
    List {
        header: String,
        body: String,
        /// Label of the button that opens the list.
        button: String,
        sections: Vec<ListSection>,
    },
}

impl Outbound {
    pub fn text(body: impl Into<String>) -> Self {
        Outbound::Text { body: body.into() }
    }

    /// Renders the ready-to-post `/messages` payload for recipient `to`.
    pub fn to_payload(&self, to: &str) -> Value {
        match self {
            Outbound::Text { body } => json!({
                "messaging_product": "whatsapp",
                "recipient_type": "individual",
                "to": to,
                "type": "text",
                "text": { "body": body },
            }),
            Outbound::Buttons { body, buttons } => {
                let buttons: Vec<Value> = buttons
                    .iter()
                    .map(|b| json!({ "type": "reply", "reply": b }))
                    .collect();
                json!({
                    "messaging_product": "whatsapp",
                    "recipient_type": "individual",
                    "to": to,
                    "type": "interactive",
                    "interactive": {
                        "type": "button",
                        "body": { "text": body },
                        "action": { "buttons": buttons },
                    },
                })
            }
            Outbound::List {
                header,
                body,
                button,
                sections,
            } => json!({
                "messaging_product": "whatsapp",
                "recipient_type": "individual",
                "to": to,
                "type": "interactive",
                "interactive": {
                    "type": "list",
                    "header": { "type": "text", "text": header },
                    "body": { "text": body },
                    "action": { "button": button, "sections": sections },
                },
            }),
        }
    }
}
