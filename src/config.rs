//! Configuration for the session replay binary.

use std::path::PathBuf;

use clap::{Args, Parser};
use decimal_percentage::Percentage;
use thiserror::Error;

/// Errors raised while parsing configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Storefront cart session replay configuration
#[derive(Debug, Parser)]
#[command(
    name = "storefront-cart",
    about = "Replay a scripted shopping session through the cart",
    long_about = None
)]
pub struct CartConfig {
    /// Catalog YAML file
    #[arg(short, long, env = "CART_CATALOG")]
    pub catalog: PathBuf,

    /// Session YAML file
    #[arg(short, long, env = "CART_SESSION")]
    pub session: PathBuf,

    /// Tax rate charged at checkout ("10%" or "0.1")
    #[arg(long, env = "CART_TAX_RATE", default_value = "10%", value_parser = parse_percentage)]
    pub tax_rate: Percentage,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl CartConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, ConfigError> {
    let trimmed = s.trim();

    let (number, scale) = match trimmed.strip_suffix('%') {
        Some(percent_str) => (percent_str.trim(), 100.0),
        None => (trimmed, 1.0),
    };

    let value = number
        .parse::<f64>()
        .map_err(|_err| ConfigError::InvalidPercentage(s.to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(value / scale))
}
