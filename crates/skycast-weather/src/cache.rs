//! In-memory cache of weather/forecast pairs keyed by normalized city name.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::types::{CurrentWeather, Forecast};

/// Default freshness window: one hour
pub const FRESHNESS_WINDOW: Duration = Duration::from_millis(3_600_000);

/// Source of "now" for freshness decisions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Normalize a free-text query into a cache key
pub fn cache_key(query: &str) -> String {
    query.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheRecord {
    pub city_key: String,
    pub current: CurrentWeather,
    pub forecast: Forecast,
    pub fetched_at: DateTime<Utc>,
}

impl CacheRecord {
    fn age_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.fetched_at).num_milliseconds()
    }
}

/// Stale records are never evicted; they just stop being served.
#[derive(Debug)]
pub struct WeatherCache {
    records: HashMap<String, CacheRecord>,
    window: Duration,
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new(FRESHNESS_WINDOW)
    }
}

impl WeatherCache {
    pub fn new(window: Duration) -> Self {
        Self {
            records: HashMap::new(),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record for `key` if it is younger than the freshness window at `now`
    pub fn get_fresh(&self, key: &str, now: DateTime<Utc>) -> Option<&CacheRecord> {
        let window_ms = i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX);
        let record = self.records.get(key)?;
        let age = record.age_ms(now);

        if age < window_ms {
            tracing::debug!("Cache hit for '{}' ({} ms old)", key, age);
            Some(record)
        } else {
            tracing::debug!("Cache entry for '{}' is stale ({} ms old)", key, age);
            None
        }
    }

    /// Insert or overwrite the record for its key
    pub fn insert(&mut self, record: CacheRecord) {
        self.records.insert(record.city_key.clone(), record);
    }

    /// Number of records held, fresh or stale
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
