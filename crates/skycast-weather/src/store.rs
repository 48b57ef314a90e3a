//! Weather search orchestration: cache-or-fetch, shared state, derived outlook.
//!
//! State is published through a `watch` channel so every mutation is visible
//! to subscribers together with the daily outlook derived from it. Searches are
//! not cancelled or sequenced: when two overlap, each step writes as it
//! completes and the last response to arrive wins.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use skycast_core::{WeatherConfig, WeatherError};
use tokio::sync::watch;

use crate::cache::{cache_key, CacheRecord, Clock, SystemClock, WeatherCache};
use crate::forecast::daily_forecast;
use crate::notify::Notifier;
use crate::provider::WeatherProvider;
use crate::types::{CurrentWeather, DailyForecast, Forecast, WeatherScene};

pub const CACHE_HIT_MESSAGE: &str = "Weather data loaded from cache";
pub const FORECAST_FAILED_MESSAGE: &str = "Failed to fetch forecast data. Please try again.";

/// Everything a view needs, consistent with the latest completed mutation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherState {
    pub current: Option<CurrentWeather>,
    pub forecast: Option<Forecast>,
    /// Derived from `forecast`; never set on its own
    pub daily: Vec<DailyForecast>,
    pub loading: bool,
}

impl WeatherState {
    fn set_forecast(&mut self, forecast: Forecast) {
        self.daily = daily_forecast(&forecast.entries, &chrono::Local);
        self.forecast = Some(forecast);
    }

    pub fn scene(&self) -> WeatherScene {
        WeatherScene::for_weather(self.current.as_ref())
    }
}

/// How a search ended. Users are told through the notifier either way.
#[derive(Debug)]
pub enum SearchOutcome {
    EmptyQuery,
    Cached,
    Fetched,
    WeatherFailed(WeatherError),
    /// Current weather was updated but the forecast was not
    ForecastFailed(WeatherError),
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Cached | SearchOutcome::Fetched)
    }
}

pub struct WeatherStore {
    provider: WeatherProvider,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    cache: Mutex<WeatherCache>,
    state: watch::Sender<WeatherState>,
}

impl WeatherStore {
    pub fn new(provider: WeatherProvider, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(WeatherState::default());
        Self {
            provider,
            notifier,
            clock: Arc::new(SystemClock),
            cache: Mutex::new(WeatherCache::default()),
            state,
        }
    }

    /// Build the provider and store from configuration
    pub fn from_config(
        config: &WeatherConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, WeatherError> {
        let provider = WeatherProvider::new(config)?;
        Ok(Self::new(provider, notifier).with_cache_window(config.cache_window()))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_cache_window(self, window: Duration) -> Self {
        *self.cache.lock() = WeatherCache::new(window);
        self
    }

    pub fn provider(&self) -> &WeatherProvider {
        &self.provider
    }

    /// Search for a city, serving a fresh cache entry when one exists.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let city = query.trim();
        if city.is_empty() {
            self.notifier.notify(WeatherError::EmptyQuery.user_message());
            return SearchOutcome::EmptyQuery;
        }

        let key = cache_key(city);
        let cached = self.cache.lock().get_fresh(&key, self.clock.now()).cloned();

        if let Some(record) = cached {
            self.state.send_modify(|s| {
                s.current = Some(record.current);
                s.set_forecast(record.forecast);
            });
            self.notifier.notify(CACHE_HIT_MESSAGE);
            return SearchOutcome::Cached;
        }

        self.state.send_modify(|s| s.loading = true);

        let current = match self.provider.fetch_current(city).await {
            Ok(current) => current,
            Err(e) => {
                tracing::warn!("Weather fetch for '{}' failed: {}", city, e);
                self.notifier.notify(e.user_message());
                self.state.send_modify(|s| s.loading = false);
                return SearchOutcome::WeatherFailed(e);
            }
        };

        tracing::info!("Fetched current weather for {}", current.display_name());
        self.state
            .send_modify(|s| s.current = Some(current.clone()));

        match self.provider.fetch_forecast(city).await {
            Ok(forecast) => {
                self.state.send_modify(|s| {
                    s.set_forecast(forecast.clone());
                    s.loading = false;
                });
                self.cache.lock().insert(CacheRecord {
                    city_key: key,
                    current,
                    forecast,
                    fetched_at: self.clock.now(),
                });
                SearchOutcome::Fetched
            }
            Err(e) => {
                tracing::warn!("Forecast fetch for '{}' failed: {}", city, e);
                self.notifier.notify(FORECAST_FAILED_MESSAGE);
                self.state.send_modify(|s| s.loading = false);
                SearchOutcome::ForecastFailed(e)
            }
        }
    }

    /// Latest state
    pub fn snapshot(&self) -> WeatherState {
        self.state.borrow().clone()
    }

    /// Receiver woken after each state mutation
    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.state.subscribe()
    }

    pub fn current_weather(&self) -> Option<CurrentWeather> {
        self.state.borrow().current.clone()
    }

    pub fn forecast(&self) -> Option<Forecast> {
        self.state.borrow().forecast.clone()
    }

    pub fn daily_forecast(&self) -> Vec<DailyForecast> {
        self.state.borrow().daily.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn weather_icon_url(&self, icon_code: &str) -> String {
        self.provider.icon_url(icon_code)
    }

    /// Cached records, fresh or stale
    pub fn cached_cities(&self) -> usize {
        self.cache.lock().len()
    }
}
