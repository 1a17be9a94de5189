use chrono::{NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::conditions;

/// A resolved place to forecast for.
///
/// Built once from a zipcode lookup and passed by reference to every
/// forecast call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    /// Two-letter state id, e.g. "CA".
    pub state: String,
    pub state_name: String,
    /// "City, ST"
    pub display_name: String,
    /// IANA timezone identifier, e.g. "America/Los_Angeles".
    pub timezone: String,
}

impl Location {
    pub fn new(
        latitude: f64,
        longitude: f64,
        city: impl Into<String>,
        state: impl Into<String>,
        state_name: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        let city = city.into();
        let state = state.into();
        let display_name = format!("{city}, {state}");

        Self {
            latitude,
            longitude,
            city,
            state,
            state_name: state_name.into(),
            display_name,
            timezone: timezone.into(),
        }
    }

    /// Parsed timezone, if the identifier is a valid IANA name.
    pub fn tz(&self) -> Option<Tz> {
        self.timezone.parse().ok()
    }

    /// Current calendar date at the location. Falls back to UTC when the
    /// timezone cannot be parsed.
    pub fn today(&self) -> NaiveDate {
        let now = Utc::now();
        match self.tz() {
            Some(tz) => now.with_timezone(&tz).date_naive(),
            None => now.date_naive(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// One hour of forecast data. Timestamps are local wall-clock time at the
/// forecast location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub weather_code: u8,
    pub precipitation_mm: Option<f64>,
    pub humidity_pct: Option<u8>,
    pub wind_speed_kmh: Option<f64>,
}

impl HourlySample {
    pub fn new(time: NaiveDateTime, temperature_c: f64, weather_code: u8) -> Self {
        Self {
            time,
            temperature_c,
            weather_code,
            precipitation_mm: None,
            humidity_pct: None,
            wind_speed_kmh: None,
        }
    }

    pub fn with_precipitation(mut self, mm: f64) -> Self {
        self.precipitation_mm = Some(mm);
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn label(&self) -> &'static str {
        conditions::label(self.weather_code)
    }
}

/// Pre-aggregated figures for one calendar day, as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub high_temp_c: f64,
    pub low_temp_c: f64,
    pub weather_code: u8,
    pub precipitation_sum_mm: f64,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
}

impl DailySummary {
    pub fn description(&self) -> &'static str {
        conditions::describe(self.weather_code).description
    }

    pub fn emoji(&self) -> &'static str {
        conditions::describe(self.weather_code).emoji
    }
}

/// A temperature extreme and, when derived from hourly data, when it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TempReading {
    pub temp_c: f64,
    pub time: Option<NaiveDateTime>,
}

/// Fixed local-time windows used to describe how a day unfolds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl PartOfDay {
    pub const ALL: [PartOfDay; 3] = [PartOfDay::Morning, PartOfDay::Afternoon, PartOfDay::Evening];

    /// Half-open hour range `[start, end)`. Hours 22:00-06:00 belong to no part.
    pub const fn hours(self) -> (u32, u32) {
        match self {
            PartOfDay::Morning => (6, 12),
            PartOfDay::Afternoon => (12, 18),
            PartOfDay::Evening => (18, 22),
        }
    }

    pub fn of_hour(hour: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|part| {
            let (start, end) = part.hours();
            (start..end).contains(&hour)
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfDay::Morning => "morning",
            PartOfDay::Afternoon => "afternoon",
            PartOfDay::Evening => "evening",
        }
    }
}

impl std::fmt::Display for PartOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The most frequent weather code within a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DominantCondition {
    pub weather_code: u8,
    /// Number of samples in the window carrying this code.
    pub hours: usize,
    /// First sample in the window carrying this code.
    pub first_seen: NaiveDateTime,
}

impl DominantCondition {
    pub fn label(&self) -> &'static str {
        conditions::label(self.weather_code)
    }

    pub fn description(&self) -> &'static str {
        conditions::describe(self.weather_code).description
    }

    pub fn emoji(&self) -> &'static str {
        conditions::describe(self.weather_code).emoji
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PartsOfDay {
    pub morning: Option<DominantCondition>,
    pub afternoon: Option<DominantCondition>,
    pub evening: Option<DominantCondition>,
}

impl PartsOfDay {
    pub fn get(&self, part: PartOfDay) -> Option<&DominantCondition> {
        match part {
            PartOfDay::Morning => self.morning.as_ref(),
            PartOfDay::Afternoon => self.afternoon.as_ref(),
            PartOfDay::Evening => self.evening.as_ref(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PartOfDay, Option<&DominantCondition>)> + '_ {
        PartOfDay::ALL.into_iter().map(|part| (part, self.get(part)))
    }
}

/// Everything known about one day at one location. Recomputed per query.
#[derive(Debug, Clone, Serialize)]
pub struct DayForecast<'a> {
    pub date: NaiveDate,
    pub location: &'a Location,
    pub summary: DailySummary,
    pub high: TempReading,
    pub low: TempReading,
    /// Hours with more than the precipitation threshold.
    pub precipitation_hours: usize,
    pub parts_of_day: PartsOfDay,
    /// That day's hourly samples, in chronological order.
    pub hourly: Vec<HourlySample>,
    pub description: &'static str,
    pub emoji: &'static str,
    /// Natural-language blurb built from the hourly conditions, when there are any.
    pub conditions: Option<String>,
}

impl DayForecast<'_> {
    pub fn temperature_range_c(&self) -> f64 {
        self.high.temp_c - self.low.temp_c
    }
}
