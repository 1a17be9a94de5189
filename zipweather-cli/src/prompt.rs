//! Interactive prompts backed by `inquire`.

use anyhow::Result;
use inquire::{Confirm, CustomUserError, Select, Text, validator::Validation};
use std::path::PathBuf;
use zipweather_core::{Config, ForecastMode, validate_zipcode};

fn zipcode_validator(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        return Ok(Validation::Valid);
    }
    Ok(match validate_zipcode(input) {
        Ok(_) => Validation::Valid,
        Err(e) => Validation::Invalid(e.to_string().into()),
    })
}

/// Ask for a zipcode until a valid one is entered or the user gives up.
pub fn zipcode() -> Result<Option<String>> {
    loop {
        let input = Text::new("Enter a 5-digit zipcode:").prompt()?;
        match validate_zipcode(&input) {
            Ok(zip) => return Ok(Some(zip)),
            Err(e) => {
                eprintln!("{e}");
                let retry = Confirm::new("Would you like to retry?")
                    .with_default(true)
                    .prompt()?;
                if !retry {
                    return Ok(None);
                }
            }
        }
    }
}

pub fn mode(current: ForecastMode) -> Result<ForecastMode> {
    let options = ForecastMode::all().to_vec();
    let cursor = options.iter().position(|m| *m == current).unwrap_or(0);
    let mode = Select::new("Which forecast?", options)
        .with_starting_cursor(cursor)
        .prompt()?;
    Ok(mode)
}

/// Walk through every configurable setting, starting from the current values.
pub fn configure(config: &mut Config) -> Result<()> {
    let current_zip = config.default_zipcode.clone().unwrap_or_default();
    let zip = Text::new("Default zipcode (leave empty for none):")
        .with_default(&current_zip)
        .with_validator(zipcode_validator)
        .prompt()?;
    if zip.trim().is_empty() {
        config.default_zipcode = None;
    } else {
        config.set_default_zipcode(&zip)?;
    }

    let current_db = config.zipcode_db_path()?.display().to_string();
    let db = Text::new("Path to zipcode CSV:")
        .with_default(&current_db)
        .prompt()?;
    let db = db.trim();
    if !db.is_empty() && db != current_db {
        config.zipcode_db = Some(PathBuf::from(db));
    }

    config.default_mode = Some(mode(config.mode())?);
    Ok(())
}
