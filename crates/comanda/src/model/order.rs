use crate::geo::{GeoPoint, Zone};
use crate::model::cart::CartLine;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Instant;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LEN: usize = 6;

/// The verification code a courier reads back at the door: six characters
/// drawn from `A-Z0-9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderCode(pub String);

impl OrderCode {
    /// Draws a fresh code from the caller's RNG. Uniqueness among live
    /// orders is the dispatcher's job, not this function's.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let code = (0..CODE_LEN)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe identifier for tandas (delivery batches).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TandaId(pub u32);

impl From<u32> for TandaId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for TandaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tanda_{}", self.0)
    }
}

/// What a session submits when the customer confirms: the cart snapshot plus
/// where it goes. Distance, zone, ETA and the code are the dispatcher's to
/// compute.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// Phone number of the ordering customer.
    pub customer: String,
    pub lines: Vec<CartLine>,
    pub location: GeoPoint,
}

/// A confirmed order as the dispatcher carries it through queue, tanda and
/// delivery.
#[derive(Debug, Clone)]
pub struct Order {
    pub code: OrderCode,
    pub customer: String,
    pub lines: Vec<CartLine>,
    pub total: f64,
    pub location: GeoPoint,
    pub zone: Zone,
    pub distance_km: f64,
    pub eta_minutes: u32,
    /// Wall-clock placement time, for tickets and reports.
    pub placed_at: DateTime<Utc>,
    /// Monotonic enqueue instant, for the queue-age batching rule.
    pub queued_at: Instant,
}

/// What the customer is told once the order is in the system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub code: OrderCode,
    pub zone: Zone,
    pub distance_km: f64,
    pub eta_minutes: u32,
}
