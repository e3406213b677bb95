use crate::model::order::TandaId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for couriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourierId(pub u32);

impl From<u32> for CourierId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CourierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "courier_{}", self.0)
    }
}

/// Lifetime totals for one courier, updated only when a tanda completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CourierStats {
    pub orders_delivered: u32,
    pub distance_km: f64,
    pub fuel_litres: f64,
}

/// A delivery courier.
///
/// Couriers are zone-agnostic: whoever is free takes the next tanda,
/// whatever its zone. `assignment` is the tanda currently on their bike, or
/// `None` when idle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Courier {
    pub id: CourierId,
    pub name: String,
    pub assignment: Option<TandaId>,
    pub stats: CourierStats,
}

impl Courier {
    pub fn new(id: CourierId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            assignment: None,
            stats: CourierStats::default(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.assignment.is_none()
    }
}
