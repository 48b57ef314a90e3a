//! Condensed daily outlook from the 3-hour forecast feed.

use chrono::{NaiveDate, TimeZone};

use crate::types::{DailyForecast, ForecastEntry};

/// Days returned after dropping today
pub const OUTLOOK_DAYS: usize = 5;

/// Group slots by calendar date in `tz`, fold min/max per date, drop the first
/// date and keep at most the next five.
///
/// The first slot of a date provides its condition and icon; later slots only
/// widen the temperature range. Dates keep first-seen order.
pub fn daily_forecast<Tz: TimeZone>(entries: &[ForecastEntry], tz: &Tz) -> Vec<DailyForecast> {
    let mut days: Vec<DailyForecast> = Vec::new();

    for entry in entries {
        let date: NaiveDate = entry.timestamp.with_timezone(tz).date_naive();

        match days.iter_mut().find(|d| d.date == date) {
            Some(day) => {
                day.temp_min = day.temp_min.min(entry.temp_min);
                day.temp_max = day.temp_max.max(entry.temp_max);
            }
            None => days.push(DailyForecast {
                date,
                temp_min: entry.temp_min,
                temp_max: entry.temp_max,
                condition_main: entry.condition_main.clone(),
                condition_description: entry.condition_description.clone(),
                icon_code: entry.icon_code.clone(),
            }),
        }
    }

    days.into_iter().skip(1).take(OUTLOOK_DAYS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};

    fn slot(ts: &str, min: f64, max: f64, main: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp: DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc),
            temperature: (min + max) / 2.0,
            temp_min: min,
            temp_max: max,
            humidity: 60,
            pressure: 1010.0,
            condition_main: main.to_string(),
            condition_description: main.to_lowercase(),
            icon_code: format!("{}-icon", main),
        }
    }

    #[test]
    fn test_empty_feed() {
        assert!(daily_forecast(&[], &Utc).is_empty());
    }

    #[test]
    fn test_single_date_is_dropped() {
        let entries = vec![slot("2021-01-01T00:00:00Z", 18.0, 22.0, "Clear")];
        assert!(daily_forecast(&entries, &Utc).is_empty());
    }

    #[test]
    fn test_folds_min_max_within_date() {
        let entries = vec![
            slot("2021-01-01T00:00:00Z", 10.0, 11.0, "Clear"),
            slot("2021-01-02T06:00:00Z", 18.0, 22.0, "Clouds"),
            slot("2021-01-02T09:00:00Z", 16.0, 24.0, "Rain"),
        ];
        let days = daily_forecast(&entries, &Utc);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2021, 1, 2).unwrap());
        assert_eq!(days[0].temp_min, 16.0);
        assert_eq!(days[0].temp_max, 24.0);
        // First slot of the day decides the condition
        assert_eq!(days[0].condition_main, "Clouds");
        assert_eq!(days[0].icon_code, "Clouds-icon");
    }

    #[test]
    fn test_six_dates_yield_five_after_today() {
        let entries: Vec<_> = (1..=6)
            .flat_map(|d| {
                vec![
                    slot(&format!("2021-03-0{}T03:00:00Z", d), d as f64, 10.0 + d as f64, "Clear"),
                    slot(&format!("2021-03-0{}T15:00:00Z", d), d as f64 - 1.0, 12.0 + d as f64, "Rain"),
                ]
            })
            .collect();
        let days = daily_forecast(&entries, &Utc);

        assert_eq!(days.len(), 5);
        let dates: Vec<u32> = days.iter().map(|d| chrono::Datelike::day(&d.date)).collect();
        assert_eq!(dates, vec![2, 3, 4, 5, 6]);
        assert_eq!(days[0].temp_min, 1.0);
        assert_eq!(days[0].temp_max, 14.0);
    }

    #[test]
    fn test_caps_at_five_days() {
        let entries: Vec<_> = (1..=8)
            .map(|d| slot(&format!("2021-03-0{}T12:00:00Z", d), 0.0, 1.0, "Clear"))
            .collect();
        let days = daily_forecast(&entries, &Utc);

        assert_eq!(days.len(), 5);
        assert_eq!(days[4].date, NaiveDate::from_ymd_opt(2021, 3, 6).unwrap());
    }

    #[test]
    fn test_grouping_follows_time_zone() {
        // 23:00 UTC on the 1st is already the 2nd at UTC+2
        let entries = vec![
            slot("2021-01-01T12:00:00Z", 5.0, 6.0, "Clear"),
            slot("2021-01-01T23:00:00Z", 1.0, 9.0, "Snow"),
            slot("2021-01-02T03:00:00Z", 0.0, 4.0, "Clouds"),
        ];

        let utc_days = daily_forecast(&entries, &Utc);
        assert_eq!(utc_days.len(), 1);
        assert_eq!(utc_days[0].condition_main, "Clouds");

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local_days = daily_forecast(&entries, &plus_two);
        assert_eq!(local_days.len(), 1);
        assert_eq!(local_days[0].condition_main, "Snow");
        assert_eq!(local_days[0].temp_min, 0.0);
        assert_eq!(local_days[0].temp_max, 9.0);
    }
}
