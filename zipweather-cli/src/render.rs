//! Plain-text rendering of forecasts.
//!
//! Every function returns a `String` so output can be tested without a terminal.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use zipweather_core::{
    DayForecast, Forecast, HourlySample,
    units::{average, celsius_to_fahrenheit, millimeters_to_inches, temperature_opinion},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TempScale {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TempScale {
    pub fn format(self, celsius: f64) -> String {
        match self {
            TempScale::Fahrenheit => format!("{:.1}°F", celsius_to_fahrenheit(celsius)),
            TempScale::Celsius => format!("{celsius:.1}°C"),
        }
    }

    /// Imperial output pairs with inches, metric with millimeters.
    pub fn precipitation(self, mm: f64) -> String {
        match self {
            TempScale::Fahrenheit => format!("{:.2} in", millimeters_to_inches(mm)),
            TempScale::Celsius => format!("{mm:.1} mm"),
        }
    }
}

fn day_header(date: NaiveDate) -> String {
    format!("{}, {}/{}", date.format("%A"), date.month(), date.day())
}

fn clock(time: NaiveDateTime) -> String {
    time.format("%I:%M %p").to_string()
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Packing advice for one day. Thresholds are in °F.
pub fn tip(day: &DayForecast<'_>) -> Option<String> {
    let labels: Vec<String> = day.hourly.iter().map(|h| h.label().to_lowercase()).collect();
    let high_f = celsius_to_fahrenheit(day.high.temp_c);
    let range_f = celsius_to_fahrenheit(day.high.temp_c) - celsius_to_fahrenheit(day.low.temp_c);

    if labels.iter().any(|l| l.contains("rain") || l.contains("drizzle")) {
        Some("Don't forget your umbrella!".to_string())
    } else if labels.iter().any(|l| l.contains("snow")) {
        Some("Plan for slower travel and dress warmly".to_string())
    } else if high_f > 80.0 {
        Some("Stay hydrated and consider sun protection".to_string())
    } else if range_f > 20.0 {
        Some(format!("Dress in layers (temperature swing of {range_f:.1}°F)"))
    } else {
        None
    }
}

fn hourly_lines(out: &mut String, hours: &[HourlySample], indent: &str, scale: TempScale) {
    for hour in hours {
        let _ = writeln!(
            out,
            "{indent}{} {} {}",
            clock(hour.time),
            hour.label(),
            scale.format(hour.temperature_c)
        );
    }
}

fn opinion(out: &mut String, hours: &[HourlySample]) {
    let temps_f: Vec<f64> = hours.iter().map(|h| celsius_to_fahrenheit(h.temperature_c)).collect();
    if let Some(avg) = average(&temps_f) {
        let _ = writeln!(out, "\nAverage: {avg:.1}°F");
        let _ = writeln!(out, "{}", temperature_opinion(avg));
    }
}

/// Full description of a single day.
pub fn day_detail(day: &DayForecast<'_>, scale: TempScale) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}:", day_header(day.date));
    let _ = writeln!(out, "Conditions: {} {}", day.emoji, day.description);
    if let Some(summary) = &day.conditions {
        let _ = writeln!(out, "Outlook: {summary}");
    }

    let at = |time: Option<NaiveDateTime>| {
        time.map(|t| format!(" at {}", clock(t))).unwrap_or_default()
    };
    let _ = writeln!(
        out,
        "Low of {}{}, High of {}{}",
        scale.format(day.low.temp_c),
        at(day.low.time),
        scale.format(day.high.temp_c),
        at(day.high.time),
    );
    let _ = writeln!(
        out,
        "Precipitation: {} ({} wet hours)",
        scale.precipitation(day.summary.precipitation_sum_mm),
        day.precipitation_hours
    );

    for (part, condition) in day.parts_of_day.iter() {
        if let Some(condition) = condition {
            let _ = writeln!(out, "  {part:<9} {} {}", condition.emoji(), condition.label());
        }
    }

    if let (Some(sunrise), Some(sunset)) = (day.summary.sunrise, day.summary.sunset) {
        let _ = writeln!(out, "Sunrise {}, sunset {}", clock(sunrise), clock(sunset));
    }
    out
}

/// One day, defaulting to the first forecast day.
pub fn daily(forecast: &Forecast, date: Option<NaiveDate>, scale: TempScale) -> String {
    let mut out = String::from("Today's forecast:\n");
    match forecast.day_forecast(date) {
        Ok(d) => out.push_str(&day_detail(&d, scale)),
        Err(e) => {
            let _ = writeln!(out, "No forecast available: {e}");
        }
    }
    out
}

/// Seven days with summaries, tips and hourly detail.
pub fn weekly(forecast: &Forecast, scale: TempScale) -> String {
    let mut out = String::from("7-day forecast:\n");

    for (date, result) in forecast.days() {
        let d = match result {
            Ok(d) => d,
            Err(e) => {
                let _ = writeln!(out, "\n{}: skipped ({e})", day_header(date));
                continue;
            }
        };

        let _ = writeln!(out, "\n{}:", day_header(date));
        let _ = writeln!(
            out,
            "  Summary: High {}, Low {}",
            scale.format(d.high.temp_c),
            scale.format(d.low.temp_c)
        );
        let conditions = d.conditions.as_deref().unwrap_or(d.description);
        let _ = writeln!(out, "  Conditions: {} {conditions}", d.emoji);
        if let Some(tip) = tip(&d) {
            let _ = writeln!(out, "  Tip: {tip}");
        }

        if !d.hourly.is_empty() {
            let _ = writeln!(out, "\n  Hourly Forecast:");
            hourly_lines(&mut out, &d.hourly, "  ", scale);
        }
    }

    opinion(&mut out, forecast.hourly());
    out
}

/// Fourteen days of hourly data, grouped by day.
pub fn extended(forecast: &Forecast, scale: TempScale) -> String {
    let mut out = String::from("14-day forecast:\n");

    for (date, hours) in forecast.hourly_by_day() {
        let _ = writeln!(out, "\n{} the {}:", date.format("%A"), ordinal(date.day()));
        hourly_lines(&mut out, &hours, "", scale);
    }

    opinion(&mut out, forecast.hourly());
    out
}
