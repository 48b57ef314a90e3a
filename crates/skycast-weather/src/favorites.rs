//! Bookmarked cities persisted as a JSON list, plus live snapshots for each.

use std::fs;
use std::path::{Path, PathBuf};

use skycast_core::StorageError;
use tokio::task::JoinSet;

use crate::provider::WeatherProvider;
use crate::types::{CurrentWeather, FavoriteCity, FavoriteWeather};

/// Favorites list with its enriched counterpart.
///
/// Every mutation rewrites the whole file. Load and save failures are logged
/// and never surface to the caller.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    favorites: Vec<FavoriteCity>,
    with_weather: Vec<FavoriteWeather>,
}

impl FavoritesStore {
    /// Open the store at `path`, starting empty if the file is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let favorites = match Self::read(&path) {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::error!("Error loading favorites: {}", e);
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} favorites from {}", favorites.len(), path.display());
        Self {
            path,
            favorites,
            with_weather: Vec::new(),
        }
    }

    fn read(path: &Path) -> Result<Vec<FavoriteCity>, StorageError> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(path).map_err(|e| StorageError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&json).map_err(|e| StorageError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn write(&self) -> Result<(), StorageError> {
        let to_write_error = |message: String| StorageError::Write {
            path: self.path.display().to_string(),
            message,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| to_write_error(e.to_string()))?;
        }

        let json =
            serde_json::to_string(&self.favorites).map_err(|e| to_write_error(e.to_string()))?;

        fs::write(&self.path, json).map_err(|e| to_write_error(e.to_string()))
    }

    fn save(&self) {
        if let Err(e) = self.write() {
            tracing::error!("Error saving favorites: {}", e);
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn favorites(&self) -> &[FavoriteCity] {
        &self.favorites
    }

    pub fn favorites_with_weather(&self) -> &[FavoriteWeather] {
        &self.with_weather
    }

    /// Name compared case-insensitively, country exactly
    pub fn is_favorite(&self, name: &str, country: &str) -> bool {
        self.favorites.iter().any(|f| f.matches(name, country))
    }

    /// Bookmark a city; `current` is the weather on screen, reused as its snapshot.
    ///
    /// Returns false when the city was already a favorite.
    pub fn add(&mut self, name: &str, country: &str, current: Option<&CurrentWeather>) -> bool {
        if self.is_favorite(name, country) {
            return false;
        }

        self.favorites.push(FavoriteCity::new(name, country));
        if let Some(weather) = current {
            self.with_weather.push(FavoriteWeather::from(weather));
        }
        self.save();

        tracing::info!("Added favorite {}, {}", name, country);
        true
    }

    /// Remove a city; removing one that isn't there changes nothing.
    pub fn remove(&mut self, name: &str, country: &str) {
        self.favorites.retain(|f| !f.matches(name, country));
        self.with_weather
            .retain(|w| !(w.name.to_lowercase() == name.to_lowercase() && w.country == country));
        self.save();
    }

    /// Add or remove the city shown in `current`. Returns whether it is now a favorite.
    pub fn toggle(&mut self, current: &CurrentWeather) -> bool {
        if self.is_favorite(&current.city_name, &current.country_code) {
            self.remove(&current.city_name, &current.country_code);
            false
        } else {
            self.add(&current.city_name, &current.country_code, Some(current))
        }
    }

    /// Re-fetch a live snapshot for every favorite concurrently.
    ///
    /// Cities whose fetch fails are left out; the rest keep favorites order.
    pub async fn refresh_weather(&mut self, provider: &WeatherProvider) -> &[FavoriteWeather] {
        let mut tasks = JoinSet::new();
        for (index, favorite) in self.favorites.iter().enumerate() {
            let provider = provider.clone();
            let name = favorite.name.clone();
            tasks.spawn(async move {
                let result = provider.fetch_current(&name).await;
                (index, name, result)
            });
        }

        let mut fetched: Vec<(usize, FavoriteWeather)> = Vec::with_capacity(self.favorites.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, _, Ok(weather))) => fetched.push((index, FavoriteWeather::from(&weather))),
                Ok((_, name, Err(e))) => {
                    tracing::warn!("Skipping favorite '{}': {}", name, e);
                }
                Err(e) => tracing::error!("Favorite refresh task failed: {}", e),
            }
        }

        fetched.sort_by_key(|(index, _)| *index);
        self.with_weather = fetched.into_iter().map(|(_, weather)| weather).collect();
        &self.with_weather
    }
}
