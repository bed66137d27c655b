//! TTL caches for emergency fund deltas.
//!
//! Two keyed stores replace the process-wide cache of the legacy
//! system: one holds the previous figures (1 hour), one holds the last
//! reported direction (3 hours, display continuity only). Both tolerate
//! staleness; nothing here participates in budget accounting.

use std::time::Duration;

use moka::sync::Cache;

use super::types::{EmergencyFundFigures, Trend};

/// Default time-to-live for previous figures (1 hour).
const DEFAULT_FIGURES_TTL_SECS: u64 = 3600;

/// Default time-to-live for the last-direction flag (3 hours).
const DEFAULT_DIRECTION_TTL_SECS: u64 = 10800;

/// Default cache capacity (number of companies).
const DEFAULT_CAPACITY: u64 = 1000;

/// Keyed TTL store for emergency fund trend state.
///
/// Keys are company-scoped strings. Thread-safe and suitable for
/// concurrent access from request handlers.
#[derive(Clone)]
pub struct TrendCache {
    figures: Cache<String, EmergencyFundFigures>,
    direction: Cache<String, Trend>,
}

impl TrendCache {
    /// Creates a trend cache with default TTLs (1h figures, 3h direction).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_FIGURES_TTL_SECS, DEFAULT_DIRECTION_TTL_SECS)
    }

    /// Creates a trend cache with custom TTLs.
    #[must_use]
    pub fn with_config(figures_ttl_secs: u64, direction_ttl_secs: u64) -> Self {
        let figures = Cache::builder()
            .max_capacity(DEFAULT_CAPACITY)
            .time_to_live(Duration::from_secs(figures_ttl_secs))
            .build();
        let direction = Cache::builder()
            .max_capacity(DEFAULT_CAPACITY)
            .time_to_live(Duration::from_secs(direction_ttl_secs))
            .build();

        Self { figures, direction }
    }

    /// Returns the previously computed figures for a key, if still live.
    #[must_use]
    pub fn previous_figures(&self, key: &str) -> Option<EmergencyFundFigures> {
        self.figures.get(key)
    }

    /// Stores the current figures for the next comparison.
    pub fn store_figures(&self, key: &str, figures: EmergencyFundFigures) {
        self.figures.insert(key.to_string(), figures);
    }

    /// Returns the last reported direction for a key, if still live.
    #[must_use]
    pub fn last_direction(&self, key: &str) -> Option<Trend> {
        self.direction.get(key)
    }

    /// Stores the direction reported by the latest computation.
    pub fn store_direction(&self, key: &str, trend: Trend) {
        self.direction.insert(key.to_string(), trend);
    }

    /// Drops all cached state.
    pub fn invalidate_all(&self) {
        self.figures.invalidate_all();
        self.direction.invalidate_all();
    }
}

impl Default for TrendCache {
    fn default() -> Self {
        Self::new()
    }
}
