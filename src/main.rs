mod render;

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skycast_core::{AppError, Config, ConfigError};
use skycast_weather::{ChannelNotifier, FavoritesStore, WeatherStore};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Terminal weather dashboard
#[derive(Parser)]
#[command(name = "skycast", version, about = "Current weather and 5-day outlook by city")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show current conditions and the 5-day outlook for a city
    Search {
        /// City name, e.g. "London" or "New York"
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },
    /// Interactive session; searches within the session share one cache
    Shell,
    /// Manage favorite cities
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites with live weather
    List,
    /// Look a city up and bookmark it
    Add {
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },
    /// Remove a favorite by name and country code
    Remove { name: String, country: String },
}

/// Everything the commands work with, built once from configuration
struct Dashboard {
    weather: WeatherStore,
    favorites: FavoritesStore,
    notifications: Receiver<String>,
}

impl Dashboard {
    fn new(config: &Config) -> Result<Self> {
        let (tx, notifications) = std::sync::mpsc::channel();
        let weather = WeatherStore::from_config(&config.weather, Arc::new(ChannelNotifier::new(tx)))
            .context("Failed to create weather client")?;
        let favorites = FavoritesStore::open(config.favorites_path());

        Ok(Self {
            weather,
            favorites,
            notifications,
        })
    }

    fn flush_notifications(&self) {
        for message in self.notifications.try_iter() {
            eprintln!("» {}", message);
        }
    }

    async fn search(&self, city: &str) -> bool {
        let outcome = self.weather.search(city).await;
        self.flush_notifications();

        let state = self.weather.snapshot();
        print!(
            "{}",
            render::current_card(&state, |code| self.weather.weather_icon_url(code))
        );
        if let Some(current) = state.current.as_ref() {
            if self.favorites.is_favorite(&current.city_name, &current.country_code) {
                println!("  ★ favorite");
            }
        }
        print!("{}", render::outlook(&state.daily));
        outcome.is_success()
    }

    async fn list_favorites(&mut self) {
        if self.favorites.favorites().is_empty() {
            println!("No favorite cities yet.");
            return;
        }
        let enriched = self.favorites.refresh_weather(self.weather.provider()).await;
        print!("{}", render::favorites(enriched));
    }

    fn toggle_current_favorite(&mut self) {
        match self.weather.current_weather() {
            Some(current) => {
                let now_favorite = self.favorites.toggle(&current);
                println!(
                    "{} {}",
                    current.display_name(),
                    if now_favorite { "added to favorites" } else { "removed from favorites" }
                );
            }
            None => println!("Search for a city first."),
        }
    }

    async fn shell(&mut self) -> Result<()> {
        println!("Type a city name, :fav to toggle favorite, :favs to list favorites, :quit to exit.");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            match line.trim() {
                ":quit" | ":q" => break,
                ":fav" => self.toggle_current_favorite(),
                ":favs" => self.list_favorites().await,
                query => {
                    self.search(query).await;
                }
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;
    let cli = Cli::parse();

    let config = match Config::load_validated() {
        Ok((config, _)) => config,
        Err(e) => {
            tracing::error!("{:#}", e);
            if let Some(config_err) = e.downcast_ref::<ConfigError>() {
                eprintln!("{}", AppError::from(config_err.clone()).user_message());
                std::process::exit(2);
            }
            return Err(e);
        }
    };
    let mut dashboard = Dashboard::new(&config)?;
    tracing::debug!("Favorites file: {}", config.favorites_path().display());

    match cli.command {
        Command::Search { city } => {
            if !dashboard.search(&city.join(" ")).await {
                std::process::exit(1);
            }
        }
        Command::Shell => dashboard.shell().await?,
        Command::Favorites { action } => match action {
            FavoritesAction::List => dashboard.list_favorites().await,
            FavoritesAction::Add { city } => {
                if dashboard.search(&city.join(" ")).await {
                    if let Some(current) = dashboard.weather.current_weather() {
                        if dashboard.favorites.add(
                            &current.city_name,
                            &current.country_code,
                            Some(&current),
                        ) {
                            println!("{} added to favorites", current.display_name());
                        } else {
                            println!("{} is already a favorite", current.display_name());
                        }
                    }
                }
            }
            FavoritesAction::Remove { name, country } => {
                dashboard.favorites.remove(&name, &country);
                println!("{}, {} removed from favorites", name, country);
            }
        },
    }

    Ok(())
}
