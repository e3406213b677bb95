//! # Configuration
//!
//! Environment-driven settings with sensible defaults. Parsing never fails
//! the process: a malformed value logs a warning and the default stands,
//! because a bot that refuses to boot over a typo helps nobody.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `COMANDA_RESTAURANT_LAT` | `-34.9011` | Restaurant latitude |
//! | `COMANDA_RESTAURANT_LON` | `-56.1645` | Restaurant longitude |
//! | `COMANDA_TANDA_SIZE` | `7` | Orders per tanda |
//! | `COMANDA_MAX_WAIT_MIN` | `45` | Minutes a queued order may wait before its zone is cut anyway |
//! | `COMANDA_SWEEP_SECS` | `60` | How often the age sweep runs |
//! | `COMANDA_RNG_SEED` | unset | Fixed seed for verification codes (demos, tests) |

use crate::geo::GeoPoint;
use std::time::Duration;
use tracing::warn;

/// Default restaurant coordinate (Montevideo).
const DEFAULT_RESTAURANT: GeoPoint = GeoPoint {
    lat: -34.9011,
    lon: -56.1645,
};

const DEFAULT_TANDA_SIZE: usize = 7;
const DEFAULT_MAX_WAIT_MIN: u64 = 45;
const DEFAULT_SWEEP_SECS: u64 = 60;
const DEFAULT_BUFFER: usize = 32;

/// Settings for the dispatch actor.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Orders per tanda; a zone queue reaching this size is cut immediately.
    pub tanda_size: usize,
    /// Maximum age of the oldest queued order before its zone is cut short.
    pub max_queue_wait: Duration,
    /// Sweep cadence for the age rule.
    pub sweep_every: Duration,
    /// Seed for the verification-code RNG; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    /// Inbox capacity.
    pub buffer: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            tanda_size: DEFAULT_TANDA_SIZE,
            max_queue_wait: Duration::from_secs(DEFAULT_MAX_WAIT_MIN * 60),
            sweep_every: Duration::from_secs(DEFAULT_SWEEP_SECS),
            rng_seed: None,
            buffer: DEFAULT_BUFFER,
        }
    }
}

/// Settings for the whole bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Where distances, ETAs and zones are measured from.
    pub restaurant: GeoPoint,
    /// Session hub inbox capacity.
    pub session_buffer: usize,
    pub dispatch: DispatchConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            restaurant: DEFAULT_RESTAURANT,
            session_buffer: DEFAULT_BUFFER,
            dispatch: DispatchConfig::default(),
        }
    }
}

impl BotConfig {
    /// Builds the config from the environment, falling back field by field.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(lat) = read_parsed::<f64>("COMANDA_RESTAURANT_LAT") {
            config.restaurant.lat = lat;
        }
        if let Some(lon) = read_parsed::<f64>("COMANDA_RESTAURANT_LON") {
            config.restaurant.lon = lon;
        }
        if let Some(size) = read_parsed::<usize>("COMANDA_TANDA_SIZE") {
            if size > 0 {
                config.dispatch.tanda_size = size;
            } else {
                warn!("COMANDA_TANDA_SIZE must be positive, keeping default");
            }
        }
        if let Some(minutes) = read_parsed::<u64>("COMANDA_MAX_WAIT_MIN") {
            config.dispatch.max_queue_wait = Duration::from_secs(minutes * 60);
        }
        if let Some(secs) = read_parsed::<u64>("COMANDA_SWEEP_SECS") {
            config.dispatch.sweep_every = Duration::from_secs(secs);
        }
        config.dispatch.rng_seed = read_parsed::<u64>("COMANDA_RNG_SEED");

        config
    }
}

/// Reads and parses one variable; unset is silent, unparsable warns.
fn read_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(name, raw, "Ignoring unparsable environment variable");
            None
        }
    }
}
