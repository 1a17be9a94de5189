//! Query parameters for the Open-Meteo `/forecast` endpoint.

use chrono::NaiveDate;

use crate::model::Location;

use super::ProviderError;

/// Hourly variables requested by default.
pub const DEFAULT_HOURLY: [&str; 5] = [
    "temperature_2m",
    "weather_code",
    "precipitation",
    "relative_humidity_2m",
    "wind_speed_10m",
];

/// Daily variables requested by default.
pub const DEFAULT_DAILY: [&str; 6] = [
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "sunrise",
    "sunset",
];

pub const MAX_FORECAST_DAYS: u8 = 16;
pub const MAX_PAST_DAYS: u8 = 92;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindSpeedUnit {
    #[default]
    Kmh,
    Ms,
    Mph,
    Knots,
}

impl WindSpeedUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindSpeedUnit::Kmh => "kmh",
            WindSpeedUnit::Ms => "ms",
            WindSpeedUnit::Mph => "mph",
            WindSpeedUnit::Knots => "kn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrecipitationUnit {
    #[default]
    Millimeters,
    Inches,
}

impl PrecipitationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrecipitationUnit::Millimeters => "mm",
            PrecipitationUnit::Inches => "inch",
        }
    }
}

/// Which grid cell the provider picks for a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellSelection {
    #[default]
    Land,
    Sea,
    Nearest,
}

impl CellSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellSelection::Land => "land",
            CellSelection::Sea => "sea",
            CellSelection::Nearest => "nearest",
        }
    }
}

/// Builder for a forecast request.
///
/// Parsing assumes ISO-8601 timestamps, so `timeformat` is always `iso8601`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    latitude: f64,
    longitude: f64,
    hourly: Vec<String>,
    daily: Vec<String>,
    current: Vec<String>,
    temperature_unit: TemperatureUnit,
    wind_speed_unit: WindSpeedUnit,
    precipitation_unit: PrecipitationUnit,
    timezone: Option<String>,
    past_days: Option<u8>,
    forecast_days: u8,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    models: Vec<String>,
    cell_selection: CellSelection,
}

impl ForecastRequest {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ProviderError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ProviderError::InvalidRequest(format!(
                "coordinates out of range: {latitude}, {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
            hourly: Vec::new(),
            daily: Vec::new(),
            current: Vec::new(),
            temperature_unit: TemperatureUnit::default(),
            wind_speed_unit: WindSpeedUnit::default(),
            precipitation_unit: PrecipitationUnit::default(),
            timezone: None,
            past_days: None,
            forecast_days: 7,
            start_date: None,
            end_date: None,
            models: Vec::new(),
            cell_selection: CellSelection::default(),
        })
    }

    /// Request with the variables the forecast views need, in the location's
    /// own timezone so hourly timestamps come back as local time.
    pub fn for_location(location: &Location, days: u8) -> Result<Self, ProviderError> {
        Ok(Self::new(location.latitude, location.longitude)?
            .hourly(DEFAULT_HOURLY)
            .daily(DEFAULT_DAILY)
            .timezone(location.timezone.clone())
            .forecast_days(days))
    }

    pub fn hourly<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hourly = vars.into_iter().map(Into::into).collect();
        self
    }

    pub fn daily<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.daily = vars.into_iter().map(Into::into).collect();
        self
    }

    pub fn current<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.current = vars.into_iter().map(Into::into).collect();
        self
    }

    pub fn models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn temperature_unit(mut self, unit: TemperatureUnit) -> Self {
        self.temperature_unit = unit;
        self
    }

    pub fn wind_speed_unit(mut self, unit: WindSpeedUnit) -> Self {
        self.wind_speed_unit = unit;
        self
    }

    pub fn precipitation_unit(mut self, unit: PrecipitationUnit) -> Self {
        self.precipitation_unit = unit;
        self
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Clamped to the provider's 1..=16 range.
    pub fn forecast_days(mut self, days: u8) -> Self {
        self.forecast_days = days.clamp(1, MAX_FORECAST_DAYS);
        self
    }

    pub fn past_days(mut self, days: u8) -> Self {
        self.past_days = Some(days.min(MAX_PAST_DAYS));
        self
    }

    /// Explicit date range. Replaces `forecast_days` in the query.
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn cell_selection(mut self, cell: CellSelection) -> Self {
        self.cell_selection = cell;
        self
    }

    /// Query pairs in a stable order. Lists are comma-joined and unset
    /// options are left out.
    pub fn to_query(&self) -> Result<Vec<(&'static str, String)>, ProviderError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ProviderError::InvalidRequest(format!(
                    "start date {start} is after end date {end}"
                )));
            }
        }

        let mut query = vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
        ];

        let lists = [
            ("hourly", &self.hourly),
            ("daily", &self.daily),
            ("current", &self.current),
        ];
        for (key, vars) in lists {
            if !vars.is_empty() {
                query.push((key, vars.join(",")));
            }
        }

        query.push(("temperature_unit", self.temperature_unit.as_str().to_string()));
        query.push(("wind_speed_unit", self.wind_speed_unit.as_str().to_string()));
        query.push(("precipitation_unit", self.precipitation_unit.as_str().to_string()));
        query.push(("timeformat", "iso8601".to_string()));

        if let Some(tz) = &self.timezone {
            query.push(("timezone", tz.clone()));
        }
        if let Some(past) = self.past_days {
            query.push(("past_days", past.to_string()));
        }

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                query.push(("start_date", start.format("%Y-%m-%d").to_string()));
                query.push(("end_date", end.format("%Y-%m-%d").to_string()));
            }
            _ => query.push(("forecast_days", self.forecast_days.to_string())),
        }

        if !self.models.is_empty() {
            query.push(("models", self.models.join(",")));
        }
        query.push(("cell_selection", self.cell_selection.as_str().to_string()));

        Ok(query)
    }
}
