//! Server configuration from the environment

use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MIN_DELAY_MS: u64 = 1000;
const DEFAULT_MAX_DELAY_MS: u64 = 3000;
const DEFAULT_SWEEP_SECS: u64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("FINANCEBOT_MIN_DELAY_MS ({min}) exceeds FINANCEBOT_MAX_DELAY_MS ({max})")]
    InvertedDelay { min: u64, max: u64 },
    #[error("FINANCEBOT_SWEEP_SECS must be greater than zero")]
    ZeroSweepInterval,
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// How often empty, idle sessions are evicted
    pub sweep_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            min_delay: Duration::from_millis(DEFAULT_MIN_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset variables take defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or(&lookup, "FINANCEBOT_PORT", DEFAULT_PORT)?;
        let min_ms = parse_or(&lookup, "FINANCEBOT_MIN_DELAY_MS", DEFAULT_MIN_DELAY_MS)?;
        let max_ms = parse_or(&lookup, "FINANCEBOT_MAX_DELAY_MS", DEFAULT_MAX_DELAY_MS)?;
        let sweep_secs = parse_or(&lookup, "FINANCEBOT_SWEEP_SECS", DEFAULT_SWEEP_SECS)?;
        if sweep_secs == 0 {
            return Err(ConfigError::ZeroSweepInterval);
        }

        if min_ms > max_ms {
            return Err(ConfigError::InvertedDelay {
                min: min_ms,
                max: max_ms,
            });
        }

        Ok(Self {
            port,
            min_delay: Duration::from_millis(min_ms),
            max_delay: Duration::from_millis(max_ms),
            sweep_interval: Duration::from_secs(sweep_secs),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}
