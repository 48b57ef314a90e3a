//! Centralized error types for SkyCast.
//!
//! Every error knows the short message shown to the user through
//! `user_message()`, while `Display` keeps the technical detail for logs.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Local persistence errors (favorites file).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Read { .. } | StorageError::Parse { .. } => {
                "Saved favorites could not be loaded."
            }
            StorageError::Write { .. } => "Favorites could not be saved.",
        }
    }
}

/// Weather provider errors.
///
/// The user messages are the exact notifications the search flow emits.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Empty city query")]
    EmptyQuery,

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Weather API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// Map a non-success HTTP status from the provider.
    pub fn from_status(status: u16, city: &str, body: String) -> Self {
        match status {
            404 => WeatherError::CityNotFound(city.to_string()),
            401 => WeatherError::InvalidApiKey,
            _ => WeatherError::Api {
                status,
                message: body,
            },
        }
    }

    /// HTTP status behind this error, if the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::CityNotFound(_) => Some(404),
            WeatherError::InvalidApiKey => Some(401),
            WeatherError::Api { status, .. } => Some(*status),
            WeatherError::Network(NetworkError::ServerError { status, .. }) => Some(*status),
            _ => None,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::EmptyQuery => "Please enter a city name",
            WeatherError::CityNotFound(_) => "City not found. Please try another city.",
            WeatherError::InvalidApiKey => "Invalid API key. Please check your configuration.",
            WeatherError::Api { .. } | WeatherError::Network(_) | WeatherError::Parse(_) => {
                "Failed to fetch weather data. Please try again."
            }
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            WeatherError::from_status(404, "Atlantis", String::new()),
            WeatherError::CityNotFound(c) if c == "Atlantis"
        ));
        assert!(matches!(
            WeatherError::from_status(401, "London", String::new()),
            WeatherError::InvalidApiKey
        ));
        assert!(matches!(
            WeatherError::from_status(503, "London", "down".into()),
            WeatherError::Api { status: 503, .. }
        ));
    }

    #[test]
    fn test_weather_user_messages() {
        assert_eq!(WeatherError::EmptyQuery.user_message(), "Please enter a city name");
        assert_eq!(
            WeatherError::CityNotFound("x".into()).user_message(),
            "City not found. Please try another city."
        );
        assert_eq!(
            WeatherError::InvalidApiKey.user_message(),
            "Invalid API key. Please check your configuration."
        );
        assert_eq!(
            WeatherError::Network(NetworkError::Timeout).user_message(),
            "Failed to fetch weather data. Please try again."
        );
        assert_eq!(
            WeatherError::Api { status: 500, message: String::new() }.user_message(),
            "Failed to fetch weather data. Please try again."
        );
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(WeatherError::InvalidApiKey.status(), Some(401));
        assert_eq!(WeatherError::Parse("bad".into()).status(), None);
    }

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = WeatherError::InvalidApiKey.into();
        assert!(matches!(app_err, AppError::Weather(WeatherError::InvalidApiKey)));
        assert_eq!(
            app_err.user_message(),
            "Invalid API key. Please check your configuration."
        );
    }

    #[test]
    fn test_config_error_through_anyhow_context() {
        let err = anyhow::Error::new(ConfigError::ParseError("expected `=`".into()))
            .context("Failed to parse config file");
        let config_err = err.downcast::<ConfigError>().unwrap();
        let app_err = AppError::from(config_err);
        assert_eq!(
            app_err.user_message(),
            "Configuration file is malformed. Check your settings."
        );
    }

    #[test]
    fn test_server_error_messages_by_class() {
        let server = NetworkError::ServerError { status: 502, message: String::new() };
        let client = NetworkError::ServerError { status: 418, message: String::new() };
        assert!(server.user_message().contains("try again later"));
        assert_eq!(client.user_message(), "The request failed. Please try again.");
    }
}
