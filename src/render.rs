//! Plain-text rendering of weather state for the terminal.

use std::fmt::Write;

use skycast_weather::{DailyForecast, FavoriteWeather, WeatherState};

pub fn current_card(state: &WeatherState, icon_url: impl Fn(&str) -> String) -> String {
    let mut out = String::new();
    let Some(current) = state.current.as_ref() else {
        return out;
    };

    let _ = writeln!(out, "{}  [{}]", current.display_name(), state.scene().as_str());
    let _ = writeln!(
        out,
        "  {}°  feels like {}°  ({}° / {}°)",
        current.rounded_temperature(),
        current.rounded_feels_like(),
        current.rounded_min(),
        current.rounded_max()
    );
    let _ = writeln!(
        out,
        "  {}  humidity {}%  wind {} m/s",
        current.condition_description, current.humidity, current.wind_speed
    );
    if !current.icon_code.is_empty() {
        let _ = writeln!(out, "  icon {}", icon_url(&current.icon_code));
    }
    out
}

pub fn outlook(days: &[DailyForecast]) -> String {
    let mut out = String::new();
    if days.is_empty() {
        return out;
    }

    let _ = writeln!(out, "Next {} days:", days.len());
    for day in days {
        let _ = writeln!(
            out,
            "  {} {}  {:>4}° / {:>4}°  {}",
            day.day_name(),
            day.date.format("%d %b"),
            skycast_weather::round_half_up(day.temp_min),
            skycast_weather::round_half_up(day.temp_max),
            day.condition_description
        );
    }
    out
}

pub fn favorites(list: &[FavoriteWeather]) -> String {
    let mut out = String::new();
    for fav in list {
        let _ = writeln!(
            out,
            "  ★ {}, {}  {}°  ({}° / {}°)  {}",
            fav.name, fav.country, fav.temp, fav.temp_min, fav.temp_max, fav.description
        );
    }
    out
}
