use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use zipweather_core::{
    Config, ForecastMode, ZipcodeDb, provider::request::MAX_FORECAST_DAYS, provider_from_config,
    validate_zipcode,
};

use crate::{
    prompt,
    render::{self, TempScale},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "zipweather", version, about = "Weather forecasts by US zipcode")]
pub struct Cli {
    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default zipcode, zipcode database and forecast mode.
    Configure,

    /// Show the forecast for a zipcode.
    Show {
        /// 5-digit zipcode; falls back to the configured default, then a prompt.
        zipcode: Option<String>,

        /// daily, weekly or extended.
        #[arg(long, value_parser = parse_mode)]
        mode: Option<ForecastMode>,

        /// Day to describe (YYYY-MM-DD); implies daily mode.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Zipcode CSV to use instead of the configured one.
        #[arg(long)]
        zipcodes: Option<PathBuf>,

        /// Show temperatures in °C and precipitation in mm.
        #[arg(long)]
        celsius: bool,
    },
}

fn parse_mode(s: &str) -> Result<ForecastMode, String> {
    ForecastMode::try_from(s).map_err(|e| e.to_string())
}

/// Days of data needed so that `date` is included, counting `today` as day one.
fn days_through(today: NaiveDate, date: NaiveDate) -> anyhow::Result<u8> {
    if date < today {
        bail!("{date} is in the past; only upcoming days can be forecast");
    }
    let days = (date - today).num_days() + 1;
    match u8::try_from(days) {
        Ok(days) if days <= MAX_FORECAST_DAYS => Ok(days),
        _ => bail!("{date} is more than {MAX_FORECAST_DAYS} days ahead"),
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => {
                let mut config = Config::load()?;
                prompt::configure(&mut config)?;
                let path = config.save()?;
                println!("Configuration saved to {}", path.display());
            }
            Command::Show {
                zipcode,
                mode,
                date,
                zipcodes,
                celsius,
            } => {
                let config = Config::load()?;

                let mut prompted = false;
                let zip = match zipcode.or_else(|| config.default_zipcode.clone()) {
                    Some(zip) => validate_zipcode(&zip)?,
                    None => match prompt::zipcode()? {
                        Some(zip) => {
                            prompted = true;
                            zip
                        }
                        None => {
                            println!("No zipcode given, exiting.");
                            return Ok(());
                        }
                    },
                };

                let db_path = match zipcodes {
                    Some(path) => path,
                    None => config.zipcode_db_path()?,
                };
                let db = ZipcodeDb::from_path(&db_path).with_context(|| {
                    format!("Could not load zipcode database {}", db_path.display())
                })?;
                let location = db.lookup(&zip)?;
                println!("Location: {location}");
                println!("Coordinates: {}, {}", location.latitude, location.longitude);

                let mode = match (mode, date) {
                    (Some(mode), _) => mode,
                    (None, Some(_)) => ForecastMode::Daily,
                    (None, None) if prompted => prompt::mode(config.mode())?,
                    (None, None) => config.mode(),
                };
                let days = match date {
                    Some(date) => days_through(location.today(), date)?.max(mode.forecast_days()),
                    None => mode.forecast_days(),
                };
                debug!(%zip, %mode, days, "fetching forecast");

                let provider = provider_from_config(&config)?;
                let forecast = provider
                    .fetch_forecast(location, days)
                    .await
                    .with_context(|| format!("Failed to fetch forecast for {location}"))?;

                let scale = if celsius {
                    TempScale::Celsius
                } else {
                    TempScale::Fahrenheit
                };
                let output = match mode {
                    ForecastMode::Daily => render::daily(&forecast, date, scale),
                    ForecastMode::Weekly => render::weekly(&forecast, scale),
                    ForecastMode::Extended => render::extended(&forecast, scale),
                };
                print!("{output}");
            }
        }

        Ok(())
    }
}
