//! End-to-end scenarios over the public forecast API (no network).

use chrono::{NaiveDate, NaiveDateTime};
use zipweather_core::{
    DailySummary, Forecast, ForecastError, HourlySample, Location, conditions,
    summary::condition_summary,
};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn denver() -> Location {
    Location::new(39.74, -104.99, "Denver", "CO", "Colorado", "America/Denver")
}

fn daily(d: &str, code: u8, high: f64, low: f64) -> DailySummary {
    DailySummary {
        date: date(d),
        high_temp_c: high,
        low_temp_c: low,
        weather_code: code,
        precipitation_sum_mm: 0.0,
        sunrise: None,
        sunset: None,
    }
}

#[test]
fn precipitation_threshold_scenario() {
    let hourly = [0.0, 0.05, 0.2, 1.0]
        .into_iter()
        .enumerate()
        .map(|(i, mm)| {
            HourlySample::new(at(&format!("2025-03-01T{:02}:00", i + 12)), 4.0, 61)
                .with_precipitation(mm)
        })
        .collect();
    let forecast = Forecast::new(denver(), hourly, vec![daily("2025-03-01", 61, 6.0, -1.0)]);

    let day = forecast.day_forecast(Some(date("2025-03-01"))).unwrap();
    assert_eq!(day.precipitation_hours, 2);
    assert_eq!(day.parts_of_day.afternoon.unwrap().weather_code, 61);
}

#[test]
fn daily_only_forecast_uses_summary_extremes() {
    let forecast = Forecast::new(denver(), vec![], vec![daily("2025-03-01", 71, 2.0, -8.0)]);

    let day = forecast.day_forecast(Some(date("2025-03-01"))).unwrap();
    assert_eq!(day.high.temp_c, 2.0);
    assert_eq!(day.low.temp_c, -8.0);
    assert!(day.high.time.is_none());
    assert!(day.low.time.is_none());
    assert_eq!(day.description, "snow");
    assert_eq!(day.emoji, "🌨️");
}

#[test]
fn missing_summary_is_not_found() {
    let forecast = Forecast::new(denver(), vec![], vec![daily("2025-03-01", 0, 10.0, 0.0)]);
    let err = forecast.day_forecast(Some(date("2025-03-02"))).unwrap_err();
    assert_eq!(err, ForecastError::NoDataForDate(date("2025-03-02")));
}

#[test]
fn week_keeps_going_past_a_bad_day() {
    let hourly = vec![
        HourlySample::new(at("2025-03-01T09:00"), 3.0, 0),
        HourlySample::new(at("2025-03-02T09:00"), 5.0, 3),
        HourlySample::new(at("2025-03-03T09:00"), 7.0, 95),
    ];
    let forecast = Forecast::new(
        denver(),
        hourly,
        vec![daily("2025-03-01", 0, 8.0, -2.0), daily("2025-03-03", 95, 12.0, 1.0)],
    );

    let results: Vec<_> = forecast
        .days()
        .into_iter()
        .map(|(d, r)| (d.to_string(), r.is_ok()))
        .collect();
    assert_eq!(
        results,
        [
            ("2025-03-01".to_string(), true),
            ("2025-03-02".to_string(), false),
            ("2025-03-03".to_string(), true),
        ]
    );
}

#[test]
fn hourly_labels_feed_the_summary() {
    let labels: Vec<_> = (0u8..24)
        .map(|h| conditions::label(if h < 20 { 0 } else { 3 }))
        .collect();
    assert_eq!(condition_summary(&labels).unwrap(), "Consistently clear sky");
}
