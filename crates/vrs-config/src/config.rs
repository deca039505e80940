use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use vrs_core::Location;

/// Operator configuration (resched.toml).
///
/// Immutable for the lifetime of the process; loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Portal base URL, trailing slash included.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Candidate locations, in priority order. The first location that
    /// offers an earlier day wins.
    pub locations: Vec<Location>,

    /// The currently booked appointment date. Only days strictly
    /// earlier than this are considered improvements.
    pub current_appointment_date: NaiveDate,

    #[serde(default)]
    pub delays: DelayConfig,
}

/// Bounds for the randomized pacing delay between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayConfig {
    #[serde(default = "default_min_delay_ms")]
    pub min_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            min_ms: default_min_delay_ms(),
            max_ms: default_max_delay_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://ais.usvisa-info.com/en-ca/niv/".to_string()
}

fn default_min_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    1500
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }
}

/// Portal credentials, supplied via environment rather than the config
/// file so the file can be checked in without secrets.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        let email = std::env::var("VISA_EMAIL")
            .context("VISA_EMAIL environment variable is not set")?;
        let password = std::env::var("VISA_PASSWORD")
            .context("VISA_PASSWORD environment variable is not set")?;
        Ok(Self { email, password })
    }
}

/// Validate a loaded configuration.
/// Returns Ok(()) if valid, or Err with descriptive messages.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.locations.is_empty() {
        bail!("locations cannot be empty; list at least one consulate");
    }
    for (i, loc) in config.locations.iter().enumerate() {
        if config.locations[..i].contains(loc) {
            bail!("locations contains '{}' more than once", loc);
        }
    }
    if !config.base_url.starts_with("https://") {
        bail!("base_url must be an https:// URL (got '{}')", config.base_url);
    }
    if !config.base_url.ends_with('/') {
        bail!("base_url must end with a trailing slash (got '{}')", config.base_url);
    }
    if config.delays.min_ms > config.delays.max_ms {
        bail!(
            "delays.min_ms ({}) must be <= delays.max_ms ({})",
            config.delays.min_ms,
            config.delays.max_ms
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
