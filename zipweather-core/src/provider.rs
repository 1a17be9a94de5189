use crate::{Config, Forecast, Location, provider::openmeteo::OpenMeteoClient};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openmeteo;
pub mod request;

/// Errors talking to a weather provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The provider answered with an error document.
    #[error("Provider returned an error: {0}")]
    Api(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch `days` days of hourly and daily data for `location`.
    async fn fetch_forecast(&self, location: &Location, days: u8) -> Result<Forecast, ProviderError>;
}

/// Construct the provider described by `config`, honouring the base URL
/// environment override.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let settings = config.effective_provider();
    let client = OpenMeteoClient::new(&settings).map_err(|e| {
        anyhow::anyhow!(
            "Could not set up the Open-Meteo client for {}: {e}",
            settings.base_url
        )
    })?;

    Ok(Box::new(client))
}
