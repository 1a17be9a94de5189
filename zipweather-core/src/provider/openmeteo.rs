//! HTTP client for the Open-Meteo forecast API (<https://open-meteo.com>).
//!
//! No API key is needed. Responses are parsed into typed records; a missing
//! or inconsistent section is reported as [`ProviderError::MalformedResponse`].

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    Forecast,
    config::ProviderSettings,
    model::{DailySummary, HourlySample, Location},
};

use super::{ProviderError, WeatherProvider, request::ForecastRequest};

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Send `request` and decode the raw response body.
    #[instrument(skip(self, request))]
    pub async fn fetch(&self, request: &ForecastRequest) -> Result<ApiResponse, ProviderError> {
        let url = format!("{}/forecast", self.base_url);
        let query = request.to_query()?;
        debug!(%url, ?query, "requesting Open-Meteo forecast");

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("failed to read body: {e}")))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if status.is_server_error() {
            return Err(ProviderError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(&body) {
                return Err(ProviderError::Api(api_err.reason));
            }
            return Err(ProviderError::RequestFailed(format!(
                "HTTP {status}: {}",
                truncate_body(&body)
            )));
        }

        if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(&body) {
            if api_err.error {
                return Err(ProviderError::Api(api_err.reason));
            }
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self, location), fields(location = %location))]
    async fn fetch_forecast(&self, location: &Location, days: u8) -> Result<Forecast, ProviderError> {
        let request = ForecastRequest::for_location(location, days)?;
        let response = self.fetch(&request).await?;
        parse_forecast(location, response)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: bool,
    reason: String,
}

/// Raw `/forecast` response. Only the sections this crate reads are modelled.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub hourly: Option<HourlyBlock>,
    #[serde(default)]
    pub daily: Option<DailyBlock>,
}

/// Parallel hourly arrays. Values may be `null` past a model's horizon.
#[derive(Debug, Default, Deserialize)]
pub struct HourlyBlock {
    pub time: Option<Vec<String>>,
    pub temperature_2m: Option<Vec<Option<f64>>>,
    pub weather_code: Option<Vec<Option<u8>>>,
    #[serde(default)]
    pub precipitation: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub relative_humidity_2m: Option<Vec<Option<u8>>>,
    #[serde(default)]
    pub wind_speed_10m: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DailyBlock {
    pub time: Option<Vec<String>>,
    pub weather_code: Option<Vec<Option<u8>>>,
    pub temperature_2m_max: Option<Vec<Option<f64>>>,
    pub temperature_2m_min: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub precipitation_sum: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub sunrise: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub sunset: Option<Vec<Option<String>>>,
}

/// Turn a raw response into a [`Forecast`].
///
/// The daily section is required. A missing or broken hourly section is
/// logged and treated as empty so days fall back to their daily figures.
pub fn parse_forecast(location: &Location, response: ApiResponse) -> Result<Forecast, ProviderError> {
    if let Some(tz) = &response.timezone {
        if tz != &location.timezone {
            warn!(requested = %location.timezone, returned = %tz, "provider used a different timezone");
        }
    }

    let daily = response
        .daily
        .ok_or_else(|| ProviderError::MalformedResponse("daily section missing".to_string()))?;
    let daily = parse_daily(&daily)?;

    let hourly = match response.hourly {
        Some(block) => parse_hourly(&block).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring hourly section");
            Vec::new()
        }),
        None => {
            warn!("response has no hourly section");
            Vec::new()
        }
    };

    debug!(hours = hourly.len(), days = daily.len(), "parsed forecast");
    Ok(Forecast::new(location.clone(), hourly, daily))
}

fn parse_hourly(block: &HourlyBlock) -> Result<Vec<HourlySample>, ProviderError> {
    let time = required("hourly.time", &block.time)?;
    let temps = required("hourly.temperature_2m", &block.temperature_2m)?;
    let codes = required("hourly.weather_code", &block.weather_code)?;

    check_len("hourly.temperature_2m", temps.len(), time.len())?;
    check_len("hourly.weather_code", codes.len(), time.len())?;
    let precipitation = optional("hourly.precipitation", &block.precipitation, time.len())?;
    let humidity = optional("hourly.relative_humidity_2m", &block.relative_humidity_2m, time.len())?;
    let wind = optional("hourly.wind_speed_10m", &block.wind_speed_10m, time.len())?;

    let mut samples = Vec::with_capacity(time.len());
    for (i, raw) in time.iter().enumerate() {
        let Some(ts) = parse_timestamp(raw) else {
            warn!(index = i, value = %raw, "skipping hour with unparseable timestamp");
            continue;
        };
        let (Some(temperature_c), Some(weather_code)) = (temps[i], codes[i]) else {
            debug!(time = %raw, "skipping hour without temperature or weather code");
            continue;
        };

        samples.push(HourlySample {
            time: ts,
            temperature_c,
            weather_code,
            precipitation_mm: precipitation.and_then(|v| v[i]),
            humidity_pct: humidity.and_then(|v| v[i]),
            wind_speed_kmh: wind.and_then(|v| v[i]),
        });
    }

    Ok(samples)
}

fn parse_daily(block: &DailyBlock) -> Result<Vec<DailySummary>, ProviderError> {
    let time = required("daily.time", &block.time)?;
    let codes = required("daily.weather_code", &block.weather_code)?;
    let highs = required("daily.temperature_2m_max", &block.temperature_2m_max)?;
    let lows = required("daily.temperature_2m_min", &block.temperature_2m_min)?;

    check_len("daily.weather_code", codes.len(), time.len())?;
    check_len("daily.temperature_2m_max", highs.len(), time.len())?;
    check_len("daily.temperature_2m_min", lows.len(), time.len())?;
    let precipitation = optional("daily.precipitation_sum", &block.precipitation_sum, time.len())?;
    let sunrise = optional("daily.sunrise", &block.sunrise, time.len())?;
    let sunset = optional("daily.sunset", &block.sunset, time.len())?;

    let mut days = Vec::with_capacity(time.len());
    for (i, raw) in time.iter().enumerate() {
        let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
            warn!(index = i, value = %raw, "skipping day with unparseable date");
            continue;
        };
        let (Some(weather_code), Some(high_temp_c), Some(low_temp_c)) = (codes[i], highs[i], lows[i])
        else {
            warn!(%date, "skipping day with missing figures");
            continue;
        };

        days.push(DailySummary {
            date,
            high_temp_c,
            low_temp_c,
            weather_code,
            precipitation_sum_mm: precipitation.and_then(|v| v[i]).unwrap_or(0.0),
            sunrise: sunrise.and_then(|v| v[i].as_deref()).and_then(parse_timestamp),
            sunset: sunset.and_then(|v| v[i].as_deref()).and_then(parse_timestamp),
        });
    }

    Ok(days)
}

fn required<'a, T>(field: &str, values: &'a Option<Vec<T>>) -> Result<&'a [T], ProviderError> {
    values
        .as_deref()
        .ok_or_else(|| ProviderError::MalformedResponse(format!("{field} missing")))
}

fn optional<'a, T>(
    field: &str,
    values: &'a Option<Vec<T>>,
    expected: usize,
) -> Result<Option<&'a [T]>, ProviderError> {
    match values.as_deref() {
        Some(v) => {
            check_len(field, v.len(), expected)?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}

fn check_len(field: &str, actual: usize, expected: usize) -> Result<(), ProviderError> {
    if actual == expected {
        Ok(())
    } else {
        Err(ProviderError::MalformedResponse(format!(
            "{field} has {actual} values, expected {expected}"
        )))
    }
}

/// Local timestamps as Open-Meteo writes them: `2025-06-01T14:00`, with
/// seconds tolerated.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location() -> Location {
        Location::new(40.7506, -73.9972, "New York", "NY", "New York", "America/New_York")
    }

    fn response(value: serde_json::Value) -> ApiResponse {
        serde_json::from_value(value).unwrap()
    }

    fn daily_json() -> serde_json::Value {
        json!({
            "time": ["2025-06-01", "2025-06-02"],
            "weather_code": [3, 61],
            "temperature_2m_max": [24.0, 19.5],
            "temperature_2m_min": [15.0, 13.0],
            "precipitation_sum": [0.0, 6.4],
            "sunrise": ["2025-06-01T05:26", "2025-06-02T05:25"],
            "sunset": ["2025-06-01T20:23", "2025-06-02T20:24"]
        })
    }

    #[test]
    fn parses_hourly_and_daily() {
        let resp = response(json!({
            "latitude": 40.75,
            "longitude": -74.0,
            "timezone": "America/New_York",
            "hourly": {
                "time": ["2025-06-01T00:00", "2025-06-01T01:00", "2025-06-02T00:00"],
                "temperature_2m": [16.0, 15.5, 14.0],
                "weather_code": [3, 3, 61],
                "precipitation": [0.0, null, 1.2]
            },
            "daily": daily_json()
        }));

        let forecast = parse_forecast(&location(), resp).unwrap();
        assert_eq!(forecast.hourly().len(), 3);
        assert_eq!(forecast.hourly()[1].precipitation_mm, None);
        assert_eq!(forecast.hourly()[2].precipitation_mm, Some(1.2));
        assert_eq!(forecast.daily().len(), 2);

        let day = forecast.daily()[1];
        assert_eq!(day.weather_code, 61);
        assert_eq!(day.precipitation_sum_mm, 6.4);
        assert_eq!(day.sunrise, parse_timestamp("2025-06-02T05:25"));
    }

    #[test]
    fn missing_daily_is_malformed() {
        let resp = response(json!({ "latitude": 1.0, "longitude": 2.0 }));
        let err = parse_forecast(&location(), resp).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(ref m) if m.contains("daily")));
    }

    #[test]
    fn missing_daily_field_is_named() {
        let resp = response(json!({
            "latitude": 1.0,
            "longitude": 2.0,
            "daily": {
                "time": ["2025-06-01"],
                "weather_code": [0],
                "temperature_2m_max": [20.0]
            }
        }));
        let err = parse_forecast(&location(), resp).unwrap_err();
        assert!(err.to_string().contains("daily.temperature_2m_min missing"));
    }

    #[test]
    fn mismatched_daily_lengths_are_malformed() {
        let resp = response(json!({
            "latitude": 1.0,
            "longitude": 2.0,
            "daily": {
                "time": ["2025-06-01", "2025-06-02"],
                "weather_code": [0, 1],
                "temperature_2m_max": [20.0],
                "temperature_2m_min": [10.0, 11.0]
            }
        }));
        let err = parse_forecast(&location(), resp).unwrap_err();
        assert!(err.to_string().contains("daily.temperature_2m_max has 1 values, expected 2"));
    }

    #[test]
    fn broken_hourly_section_falls_back_to_empty() {
        let resp = response(json!({
            "latitude": 1.0,
            "longitude": 2.0,
            "hourly": { "time": ["2025-06-01T00:00"], "temperature_2m": [12.0] },
            "daily": daily_json()
        }));
        let forecast = parse_forecast(&location(), resp).unwrap();
        assert!(forecast.hourly().is_empty());

        let day = forecast.day_forecast(None).unwrap();
        assert_eq!(day.high.temp_c, 24.0);
        assert_eq!(day.high.time, None);
    }

    #[test]
    fn bad_entries_are_skipped_individually() {
        let resp = response(json!({
            "latitude": 1.0,
            "longitude": 2.0,
            "hourly": {
                "time": ["2025-06-01T00:00", "yesterday", "2025-06-01T02:00", "2025-06-01T03:00"],
                "temperature_2m": [12.0, 11.0, null, 10.0],
                "weather_code": [0, 0, 0, 1]
            },
            "daily": daily_json()
        }));
        let forecast = parse_forecast(&location(), resp).unwrap();
        let hours: Vec<_> = forecast.hourly().iter().map(|h| h.time).collect();
        assert_eq!(
            hours,
            [
                parse_timestamp("2025-06-01T00:00").unwrap(),
                parse_timestamp("2025-06-01T03:00").unwrap()
            ]
        );
    }

    #[test]
    fn timestamps_with_and_without_seconds() {
        assert!(parse_timestamp("2025-06-01T14:00").is_some());
        assert!(parse_timestamp("2025-06-01T14:00:00").is_some());
        assert!(parse_timestamp("2025-06-01").is_none());
    }

    #[test]
    fn truncates_long_bodies() {
        let long = "x".repeat(300);
        let out = truncate_body(&long);
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }
}
