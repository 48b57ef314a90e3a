//! Integration tests for FavoritesStore live snapshots using wiremock.

use skycast_weather::{FavoritesStore, WeatherProvider};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn weather_json(name: &str, country: &str, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "main": { "temp": temp, "temp_min": temp - 3.0, "temp_max": temp + 3.0 },
        "weather": [{ "description": "few clouds", "main": "Clouds", "icon": "02d" }],
        "sys": { "country": country }
    })
}

async fn mount_weather(server: &MockServer, city: &str, country: &str, temp: f64) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_json(city, country, temp)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_refresh_fetches_each_favorite_in_order() {
    let server = MockServer::start().await;
    mount_weather(&server, "London", "GB", 11.6).await;
    mount_weather(&server, "Paris", "FR", 15.2).await;
    mount_weather(&server, "Tokyo", "JP", 22.5).await;

    let dir = TempDir::new().unwrap();
    let mut store = FavoritesStore::open(dir.path().join("favorite_cities.json"));
    store.add("London", "GB", None);
    store.add("Paris", "FR", None);
    store.add("Tokyo", "JP", None);

    let provider = WeatherProvider::with_base_url(&server.uri(), "k").unwrap();
    let enriched = store.refresh_weather(&provider).await;

    let names: Vec<&str> = enriched.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["London", "Paris", "Tokyo"]);
    assert_eq!(enriched[0].temp, 12);
    assert_eq!(enriched[0].temp_min, 9);
    assert_eq!(enriched[1].country, "FR");
    assert_eq!(enriched[2].temp, 23);
    assert_eq!(enriched[2].main, "Clouds");
}

#[tokio::test]
async fn test_refresh_omits_failed_cities() {
    let server = MockServer::start().await;
    mount_weather(&server, "London", "GB", 10.0).await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = FavoritesStore::open(dir.path().join("favorite_cities.json"));
    store.add("Atlantis", "XX", None);
    store.add("London", "GB", None);

    let provider = WeatherProvider::with_base_url(&server.uri(), "k").unwrap();
    let enriched = store.refresh_weather(&provider).await;

    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].name, "London");
    // The favorite itself is kept
    assert_eq!(store.favorites().len(), 2);
}

#[tokio::test]
async fn test_refresh_with_no_favorites() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut store = FavoritesStore::open(dir.path().join("favorite_cities.json"));

    let provider = WeatherProvider::with_base_url(&server.uri(), "k").unwrap();
    assert!(store.refresh_weather(&provider).await.is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
