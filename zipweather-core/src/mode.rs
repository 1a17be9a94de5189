use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// How much forecast to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMode {
    /// Today (or one requested date).
    Daily,
    /// Seven days with summaries, tips and an hourly listing.
    #[default]
    Weekly,
    /// Fourteen days of hourly data.
    Extended,
}

impl ForecastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMode::Daily => "daily",
            ForecastMode::Weekly => "weekly",
            ForecastMode::Extended => "extended",
        }
    }

    pub const fn all() -> &'static [ForecastMode] {
        &[ForecastMode::Daily, ForecastMode::Weekly, ForecastMode::Extended]
    }

    /// Days of data to request from the provider.
    pub const fn forecast_days(&self) -> u8 {
        match self {
            ForecastMode::Daily => 1,
            ForecastMode::Weekly => 7,
            ForecastMode::Extended => 14,
        }
    }
}

impl std::fmt::Display for ForecastMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ForecastMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "daily" => Ok(ForecastMode::Daily),
            "weekly" | "" => Ok(ForecastMode::Weekly),
            "extended" => Ok(ForecastMode::Extended),
            _ => Err(anyhow::anyhow!(
                "Unknown forecast mode '{value}'. Supported modes: daily, weekly, extended."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_as_str_roundtrip() {
        for mode in ForecastMode::all() {
            let parsed = ForecastMode::try_from(mode.as_str()).expect("roundtrip should succeed");
            assert_eq!(*mode, parsed);
        }
    }

    #[test]
    fn blank_input_means_weekly() {
        assert_eq!(ForecastMode::try_from("  ").unwrap(), ForecastMode::Weekly);
        assert_eq!(ForecastMode::try_from("EXTENDED").unwrap(), ForecastMode::Extended);
    }

    #[test]
    fn unknown_mode_error() {
        let err = ForecastMode::try_from("hourly").unwrap_err();
        assert!(err.to_string().contains("Unknown forecast mode"));
    }

    #[test]
    fn days_per_mode() {
        assert_eq!(ForecastMode::Daily.forecast_days(), 1);
        assert_eq!(ForecastMode::Weekly.forecast_days(), 7);
        assert_eq!(ForecastMode::Extended.forecast_days(), 14);
    }
}
