use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Round half up to a whole degree, matching how temperatures are displayed
/// (`-2.5` becomes `-2`, `2.5` becomes `3`).
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Backdrop category picked from the current condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherScene {
    #[default]
    Clear,
    Cloudy,
    Rainy,
    Snowy,
}

impl WeatherScene {
    /// Classify a provider condition group such as "Rain" or "Clouds"
    pub fn from_condition(main: &str) -> Self {
        let main = main.to_lowercase();

        if main.contains("rain") || main.contains("drizzle") {
            Self::Rainy
        } else if main.contains("snow") {
            Self::Snowy
        } else if main.contains("cloud") {
            Self::Cloudy
        } else if main.contains("clear") {
            Self::Clear
        } else if main.contains("thunder") {
            Self::Rainy
        } else {
            Self::Clear
        }
    }

    pub fn for_weather(weather: Option<&CurrentWeather>) -> Self {
        weather
            .map(|w| Self::from_condition(&w.condition_main))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
        }
    }
}

/// Current conditions for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city_name: String,
    pub country_code: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_code: String,
}

impl CurrentWeather {
    /// "London, GB"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.city_name, self.country_code)
    }

    pub fn rounded_temperature(&self) -> i64 {
        round_half_up(self.temperature)
    }

    pub fn rounded_feels_like(&self) -> i64 {
        round_half_up(self.feels_like)
    }

    pub fn rounded_min(&self) -> i64 {
        round_half_up(self.temp_min)
    }

    pub fn rounded_max(&self) -> i64 {
        round_half_up(self.temp_max)
    }

    pub fn scene(&self) -> WeatherScene {
        WeatherScene::from_condition(&self.condition_main)
    }
}

/// One 3-hour forecast slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: f64,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_code: String,
}

/// 5-day / 3-hour forecast for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city_name: String,
    pub country_code: String,
    pub entries: Vec<ForecastEntry>,
}

/// Daily forecast entry folded from the 3-hour slots of one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_code: String,
}

impl DailyForecast {
    /// Short weekday name, e.g. "Mon"
    pub fn day_name(&self) -> String {
        self.date.format("%a").to_string()
    }
}

/// A bookmarked city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCity {
    pub name: String,
    pub country: String,
}

impl FavoriteCity {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }

    /// Name compared case-insensitively, country exactly
    pub fn matches(&self, name: &str, country: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase() && self.country == country
    }
}

/// A favorite enriched with a live weather snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteWeather {
    pub name: String,
    pub country: String,
    pub temp: i64,
    pub temp_min: i64,
    pub temp_max: i64,
    pub description: String,
    pub icon: String,
    pub main: String,
}

impl From<&CurrentWeather> for FavoriteWeather {
    fn from(weather: &CurrentWeather) -> Self {
        Self {
            name: weather.city_name.clone(),
            country: weather.country_code.clone(),
            temp: weather.rounded_temperature(),
            temp_min: weather.rounded_min(),
            temp_max: weather.rounded_max(),
            description: weather.condition_description.clone(),
            icon: weather.icon_code.clone(),
            main: weather.condition_main.clone(),
        }
    }
}
