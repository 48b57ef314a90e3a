//! Weather service for SkyCast
//!
//! City search against OpenWeatherMap with an in-memory freshness cache, a
//! condensed daily outlook, and persisted favorite cities.

pub mod cache;
pub mod favorites;
pub mod forecast;
pub mod notify;
pub mod provider;
pub mod store;
pub mod types;

pub use cache::{cache_key, CacheRecord, Clock, SystemClock, WeatherCache, FRESHNESS_WINDOW};
pub use favorites::FavoritesStore;
pub use forecast::daily_forecast;
pub use notify::{ChannelNotifier, LogNotifier, Notifier};
pub use provider::{weather_icon_url, WeatherProvider};
pub use store::{SearchOutcome, WeatherState, WeatherStore};
pub use types::*;
