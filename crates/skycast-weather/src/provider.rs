//! OpenWeatherMap 2.5 client: current conditions and the 5-day/3-hour forecast.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use skycast_core::{ReqwestErrorExt, WeatherConfig, WeatherError};

use crate::types::{CurrentWeather, Forecast, ForecastEntry};

const USER_AGENT: &str = concat!("SkyCast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmCondition {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmSys {
    country: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmCurrentResponse {
    name: String,
    main: OwmMain,
    weather: Vec<OwmCondition>,
    wind: OwmWind,
    sys: OwmSys,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmCity {
    name: String,
    country: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
    city: OwmCity,
}

fn humidity_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Only the first condition is shown; a missing array leaves the fields empty.
fn first_condition(conditions: Vec<OwmCondition>) -> OwmCondition {
    conditions.into_iter().next().unwrap_or_default()
}

impl From<OwmCurrentResponse> for CurrentWeather {
    fn from(r: OwmCurrentResponse) -> Self {
        let condition = first_condition(r.weather);
        Self {
            city_name: r.name,
            country_code: r.sys.country,
            temperature: r.main.temp,
            feels_like: r.main.feels_like,
            temp_min: r.main.temp_min,
            temp_max: r.main.temp_max,
            humidity: humidity_percent(r.main.humidity),
            pressure: r.main.pressure,
            wind_speed: r.wind.speed,
            condition_main: condition.main,
            condition_description: condition.description,
            icon_code: condition.icon,
        }
    }
}

impl From<OwmForecastItem> for ForecastEntry {
    fn from(item: OwmForecastItem) -> Self {
        let condition = first_condition(item.weather);
        Self {
            timestamp: DateTime::<Utc>::from_timestamp(item.dt, 0).unwrap_or_default(),
            temperature: item.main.temp,
            temp_min: item.main.temp_min,
            temp_max: item.main.temp_max,
            humidity: humidity_percent(item.main.humidity),
            pressure: item.main.pressure,
            condition_main: condition.main,
            condition_description: condition.description,
            icon_code: condition.icon,
        }
    }
}

impl From<OwmForecastResponse> for Forecast {
    fn from(r: OwmForecastResponse) -> Self {
        Self {
            city_name: r.city.name,
            country_code: r.city.country,
            entries: r.list.into_iter().map(ForecastEntry::from).collect(),
        }
    }
}

/// HTTP client for the weather provider.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    units: String,
    icon_base_url: String,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.effective_api_key(),
            units: config.units.clone(),
            icon_base_url: config.icon_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Provider pointed at `base_url` with default settings otherwise
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, WeatherError> {
        let config = WeatherConfig {
            api_base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            request_timeout_secs: 5,
            ..WeatherConfig::default()
        };
        let mut provider = Self::new(&config)?;
        // Explicit key wins over the environment here
        provider.api_key = api_key.to_string();
        Ok(provider)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the 2x PNG for a condition icon code; the code is not validated.
    pub fn icon_url(&self, icon_code: &str) -> String {
        format!("{}/{}@2x.png", self.icon_base_url, icon_code)
    }

    /// Current conditions for `city`
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let raw: OwmCurrentResponse = self.get("weather", city).await?;
        Ok(raw.into())
    }

    /// 5-day / 3-hour forecast for `city`
    pub async fn fetch_forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let raw: OwmForecastResponse = self.get("forecast", city).await?;
        Ok(raw.into())
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, city: &str) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("units", self.units.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        if !status.is_success() {
            tracing::debug!("GET /{} for '{}' returned {}", endpoint, city, status);
            return Err(WeatherError::from_status(status.as_u16(), city, body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Unexpected /{} payload for '{}': {}", endpoint, city, e);
            WeatherError::Parse(e.to_string())
        })
    }
}

/// Icon URL on the public OpenWeatherMap host
pub fn weather_icon_url(icon_code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", icon_code)
}
