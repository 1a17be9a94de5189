//! Zipcode to location lookup backed by a CSV file.
//!
//! Expected headers: `zip,lat,lng,city,state_id,state_name,timezone`. Extra
//! columns are ignored.

use std::{collections::HashMap, fs::File, io::Read, path::Path};

use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::model::Location;

const REQUIRED_COLUMNS: [&str; 7] = ["zip", "lat", "lng", "city", "state_id", "state_name", "timezone"];

#[derive(Debug, Error)]
pub enum ZipcodeError {
    #[error("Invalid zipcode '{0}': expected 5 digits")]
    InvalidFormat(String),

    #[error("Zipcode {0} not found in database")]
    NotFound(String),

    #[error("Zipcode database is missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("Failed to read zipcode database: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse zipcode database: {0}")]
    Csv(#[from] csv::Error),
}

/// Check that `input` is a 5-digit zipcode and return it trimmed.
pub fn validate_zipcode(input: &str) -> Result<String, ZipcodeError> {
    let zip = input.trim();
    if zip.len() == 5 && zip.chars().all(|c| c.is_ascii_digit()) {
        Ok(zip.to_string())
    } else {
        Err(ZipcodeError::InvalidFormat(input.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ZipRow {
    zip: String,
    lat: f64,
    lng: f64,
    city: String,
    state_id: String,
    state_name: String,
    timezone: String,
}

#[derive(Debug, Default)]
pub struct ZipcodeDb {
    entries: HashMap<String, Location>,
    skipped: usize,
}

impl ZipcodeDb {
    pub fn from_path(path: &Path) -> Result<Self, ZipcodeError> {
        let file = File::open(path)?;
        let db = Self::from_reader(file)?;
        info!(path = %path.display(), locations = db.len(), "loaded zipcode database");
        Ok(db)
    }

    /// Load from any CSV source. Rows that fail to parse or carry an unknown
    /// timezone are skipped and counted in [`ZipcodeDb::skipped`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ZipcodeError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = rdr.headers()?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .into_iter()
            .find(|col| !headers.iter().any(|h| h == *col))
        {
            return Err(ZipcodeError::MissingColumn(missing));
        }

        let mut db = Self::default();
        for (idx, row) in rdr.deserialize::<ZipRow>().enumerate() {
            // +2: one for the header, one for 1-based lines.
            let line = idx + 2;
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!(line, error = %e, "skipping malformed zipcode row");
                    db.skipped += 1;
                    continue;
                }
            };

            if row.timezone.parse::<Tz>().is_err() {
                warn!(line, timezone = %row.timezone, "skipping zipcode row with unknown timezone");
                db.skipped += 1;
                continue;
            }

            let zip = format!("{:0>5}", row.zip);
            let location = Location::new(
                row.lat,
                row.lng,
                row.city,
                row.state_id,
                row.state_name,
                row.timezone,
            );
            db.entries.insert(zip, location);
        }

        Ok(db)
    }

    pub fn lookup(&self, zipcode: &str) -> Result<&Location, ZipcodeError> {
        let zip = validate_zipcode(zipcode)?;
        self.entries.get(&zip).ok_or(ZipcodeError::NotFound(zip))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows dropped while loading.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
