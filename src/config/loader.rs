//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::strategy::params::{
    AnalysisConfig, AppliedPrice, CrossPoint, DistanceMode, MovingAverageConfig, MovingAverageKind,
};

/// Environment variable overriding `alerts.webhook_url`
pub const WEBHOOK_URL_ENV: &str = "MA_EXCURSION_WEBHOOK_URL";

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub moving_average: MovingAverageSection,
    pub analysis: AnalysisSection,
    pub instrument: InstrumentSection,
    #[serde(default)]
    pub alerts: AlertsSection,
}

/// Moving average configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct MovingAverageSection {
    /// MA period in bars
    pub period: usize,
    /// "simple", "exponential", "smoothed" or "weighted"
    pub kind: MovingAverageKind,
    /// Bar field the MA is computed from
    #[serde(default)]
    pub applied_price: AppliedPrice,
}

impl Default for MovingAverageSection {
    fn default() -> Self {
        let ma = MovingAverageConfig::default();
        Self {
            period: ma.period,
            kind: ma.kind,
            applied_price: ma.applied_price,
        }
    }
}

/// Excursion analysis configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSection {
    /// "absolute" or "relative"
    pub distance_mode: DistanceMode,
    /// "ma_value" or "price"
    pub cross_point: CrossPoint,
    /// Trailing bars to scan (0 = all)
    #[serde(default = "default_max_bars")]
    pub max_bars: usize,
    /// Recent excursions used for statistics (0 = all)
    #[serde(default = "default_stats_count")]
    pub stats_count: usize,
}

fn default_max_bars() -> usize {
    AnalysisConfig::default().max_bars
}

fn default_stats_count() -> usize {
    AnalysisConfig::default().stats_count
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            distance_mode: DistanceMode::default(),
            cross_point: CrossPoint::default(),
            max_bars: default_max_bars(),
            stats_count: default_stats_count(),
        }
    }
}

/// Instrument configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentSection {
    /// Symbol name (for alerts and logging)
    pub symbol: String,
    /// Bar timeframe label, e.g. "H1"
    #[serde(default)]
    pub timeframe: String,
    /// Minimum quoted price increment (pip/point size)
    pub unit_size: f64,
}

impl Default for InstrumentSection {
    fn default() -> Self {
        Self {
            symbol: "UNKNOWN".to_string(),
            timeframe: String::new(),
            unit_size: AnalysisConfig::default().unit_size,
        }
    }
}

/// Alerts configuration section (optional)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AlertsSection {
    /// Evaluate alerts for fresh crosses
    #[serde(default)]
    pub enabled: bool,
    /// Chat webhook URL; alerts are only logged when empty
    #[serde(default)]
    pub webhook_url: String,
}

impl AlertsSection {
    /// Get webhook URL with environment variable fallback
    /// Checks MA_EXCURSION_WEBHOOK_URL if the config value is empty
    pub fn get_webhook_url(&self) -> Option<String> {
        if !self.webhook_url.is_empty() {
            return Some(self.webhook_url.clone());
        }
        std::env::var(WEBHOOK_URL_ENV).ok().filter(|u| !u.is_empty())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.moving_average.period == 0 {
            return Err(ConfigError::ValidationError(format!(
                "moving_average.period must be > 0, got {}",
                self.moving_average.period
            )));
        }

        if !self.instrument.unit_size.is_finite() || self.instrument.unit_size <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "instrument.unit_size must be > 0, got {}",
                self.instrument.unit_size
            )));
        }

        if self.instrument.symbol.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "instrument.symbol cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// Conversion from Config to AnalysisConfig
impl From<&Config> for AnalysisConfig {
    fn from(config: &Config) -> Self {
        AnalysisConfig {
            moving_average: MovingAverageConfig {
                period: config.moving_average.period,
                kind: config.moving_average.kind,
                applied_price: config.moving_average.applied_price,
            },
            distance_mode: config.analysis.distance_mode,
            cross_point: config.analysis.cross_point,
            max_bars: config.analysis.max_bars,
            stats_count: config.analysis.stats_count,
            unit_size: config.instrument.unit_size,
            alerts_enabled: config.alerts.enabled,
        }
    }
}
