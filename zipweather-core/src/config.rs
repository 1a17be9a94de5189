use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{mode::ForecastMode, zipcode::validate_zipcode};

/// Environment variable that overrides the configured provider base URL.
pub const BASE_URL_ENV: &str = "ZIPWEATHER_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Connection settings for the Open-Meteo API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_zipcode = "94103"
/// zipcode_db = "/home/me/zipcodes.csv"
/// default_mode = "weekly"
///
/// [provider]
/// base_url = "https://api.open-meteo.com/v1"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub default_zipcode: Option<String>,

    /// Path to the zipcode CSV. Defaults to `zipcodes.csv` in the data directory.
    pub zipcode_db: Option<PathBuf>,

    pub default_mode: Option<ForecastMode>,

    #[serde(default)]
    pub provider: ProviderSettings,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "zipweather", "zipweather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Configured zipcode CSV, or `zipcodes.csv` in the platform data directory.
    pub fn zipcode_db_path(&self) -> Result<PathBuf> {
        match &self.zipcode_db {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::project_dirs()?.data_dir().join("zipcodes.csv")),
        }
    }

    /// Validate and store the default zipcode.
    pub fn set_default_zipcode(&mut self, zipcode: &str) -> Result<()> {
        let zip = validate_zipcode(zipcode)?;
        self.default_zipcode = Some(zip);
        Ok(())
    }

    pub fn mode(&self) -> ForecastMode {
        self.default_mode.unwrap_or_default()
    }

    /// Provider settings with the environment override applied.
    pub fn effective_provider(&self) -> ProviderSettings {
        let mut settings = self.provider.clone();
        if let Ok(url) = env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                settings.base_url = url.trim().to_string();
            }
        }
        settings
    }
}
