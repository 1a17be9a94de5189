//! Core library for the `zipweather` CLI.
//!
//! This crate defines:
//! - Zipcode to location lookup from a local CSV
//! - The Open-Meteo request builder and client
//! - Forecast summarization: grouping hours into days, dominant conditions,
//!   high/low, precipitation hours and short condition blurbs
//! - Configuration handling
//!
//! It is used by `zipweather-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod conditions;
pub mod config;
pub mod error;
pub mod forecast;
pub mod grouping;
pub mod mode;
pub mod model;
pub mod provider;
pub mod summary;
pub mod units;
pub mod zipcode;

pub use config::{Config, ProviderSettings};
pub use error::ForecastError;
pub use forecast::Forecast;
pub use mode::ForecastMode;
pub use model::{
    DailySummary, DayForecast, DominantCondition, HourlySample, Location, PartOfDay, PartsOfDay,
    TempReading,
};
pub use provider::{ProviderError, WeatherProvider, provider_from_config};
pub use zipcode::{ZipcodeDb, ZipcodeError, validate_zipcode};
