//! Environment-driven configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Get the deployment environment name (`ENVIRONMENT`, defaults to `sandbox`).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Which upstream provider feeds the quote cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Tabular HTML page, first row is the current day.
    Mfd,
    /// Dated XML records, one per metal per day.
    Cbr,
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mfd" | "html" => Ok(SourceKind::Mfd),
            "cbr" | "xml" => Ok(SourceKind::Cbr),
            other => Err(ConfigError::UnknownSource(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub port: u16,
    pub source: SourceKind,
    /// Overrides the provider's default URL when set.
    pub source_url: Option<String>,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
    pub lookback_days: u32,
    pub analysis: AnalysisConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: DEFAULT_PORT,
            source: SourceKind::Mfd,
            source_url: None,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let source = match lookup("BULLION_SOURCE") {
            Some(raw) => raw.parse()?,
            None => defaults.source,
        };

        let source_url = lookup("BULLION_SOURCE_URL")
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            source,
            source_url,
            refresh_interval: Duration::from_secs(parse_var(
                &lookup,
                "BULLION_REFRESH_INTERVAL_SECS",
                DEFAULT_REFRESH_INTERVAL_SECS,
            )?),
            request_timeout: Duration::from_secs(parse_var(
                &lookup,
                "BULLION_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            lookback_days: parse_var(&lookup, "BULLION_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS)?,
            analysis: AnalysisConfig::default(),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Indicator and signal thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub rsi_window: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub ema_short: usize,
    pub ema_long: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rsi_window: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            ema_short: 7,
            ema_long: 21,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl AnalysisConfig {
    /// Minimum series length for a full analysis (RSI needs `window + 1`).
    pub fn min_points(&self) -> usize {
        self.rsi_window + 1
    }
}
