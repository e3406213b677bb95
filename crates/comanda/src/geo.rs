//! # Geography
//!
//! Distance, delivery-time and zone math, all relative to the restaurant's
//! fixed coordinate. Everything here is a pure function: same inputs, same
//! outputs, no clocks and no state, which is what makes the zone batching
//! downstream deterministic.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Mean Earth radius in kilometers, as used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed courier speed for delivery-time estimates.
const COURIER_SPEED_KMH: f64 = 30.0;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Compass quadrant of a delivery point relative to the restaurant.
///
/// The four letters follow the Spanish compass names used on tickets:
/// NE (noreste), NO (noroeste), SE (sureste), SO (suroeste).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    NE,
    NO,
    SE,
    SO,
}

impl Zone {
    /// All zones, in stable order. Index with [`Zone::index`].
    pub const ALL: [Zone; 4] = [Zone::NE, Zone::NO, Zone::SE, Zone::SO];

    /// Classifies `point` into the quadrant it occupies around `restaurant`.
    ///
    /// Strictly-greater comparisons on both axes: a point exactly on the
    /// restaurant's latitude counts as south, exactly on its longitude as
    /// west. Depends on nothing but the two coordinates.
    pub fn classify(restaurant: GeoPoint, point: GeoPoint) -> Zone {
        let north = point.lat > restaurant.lat;
        let east = point.lon > restaurant.lon;
        match (north, east) {
            (true, true) => Zone::NE,
            (true, false) => Zone::NO,
            (false, true) => Zone::SE,
            (false, false) => Zone::SO,
        }
    }

    /// Stable position of this zone in [`Zone::ALL`], for per-zone arrays.
    pub fn index(self) -> usize {
        match self {
            Zone::NE => 0,
            Zone::NO => 1,
            Zone::SE => 2,
            Zone::SO => 3,
        }
    }
}

impl Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Zone::NE => "NE",
            Zone::NO => "NO",
            Zone::SE => "SE",
            Zone::SO => "SO",
        };
        write!(f, "{code}")
    }
}

/// Great-circle distance between two points in kilometers, rounded to two
/// decimals (tickets and courier stats never need more).
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round2(EARTH_RADIUS_KM * c)
}

/// Estimated delivery time in whole minutes for a trip of `distance_km`,
/// assuming [`COURIER_SPEED_KMH`]. Never less than one minute.
pub fn estimate_minutes(distance_km: f64) -> u32 {
    if distance_km <= 0.0 {
        return 1;
    }
    ((distance_km / COURIER_SPEED_KMH) * 60.0).round() as u32
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
