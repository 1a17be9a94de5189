use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced while assembling forecasts from already-fetched data.
///
/// These are always local to one date or one request; callers iterating
/// several days report them and keep going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("No forecast data for {0}")]
    NoDataForDate(NaiveDate),

    #[error("No condition labels to summarize")]
    EmptyConditions,

    #[error("Forecast contains no days")]
    EmptyForecast,
}
