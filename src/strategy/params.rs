//! Analysis Parameters
//!
//! Configuration structs for the excursion analysis.
//! Defaults match the classic indicator settings (SMA 20, absolute mode,
//! MA value at cross, 1000 bars, 20 recent excursions).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the excursion distance is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMode {
    /// Interval price extreme against a single reference value
    #[default]
    Absolute,
    /// Largest per-bar distance between extreme and reference
    Relative,
}

/// Which value marks the cross point and serves as reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrossPoint {
    /// Moving average value at the cross bar
    #[default]
    MaValue,
    /// Applied price at the cross bar
    Price,
}

/// Moving average calculation types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MovingAverageKind {
    #[default]
    Simple,
    Exponential,
    Smoothed,
    Weighted,
}

/// Bar field the MA and the cross test are computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppliedPrice {
    #[default]
    Close,
    Open,
    High,
    Low,
    Median,
    Typical,
    Weighted,
}

/// Moving average settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageConfig {
    pub period: usize,
    pub kind: MovingAverageKind,
    pub applied_price: AppliedPrice,
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self {
            period: 20,
            kind: MovingAverageKind::Simple,
            applied_price: AppliedPrice::Close,
        }
    }
}

/// Main analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub moving_average: MovingAverageConfig,
    pub distance_mode: DistanceMode,
    pub cross_point: CrossPoint,
    /// Trailing window of bars to scan (0 = all)
    pub max_bars: usize,
    /// Recent excursions used for statistics (0 = all)
    pub stats_count: usize,
    /// Minimum quoted price increment; magnitudes are reported in this unit
    pub unit_size: f64,
    /// Evaluate the alert gate on every pass
    pub alerts_enabled: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            moving_average: MovingAverageConfig::default(),
            distance_mode: DistanceMode::Absolute,
            cross_point: CrossPoint::MaValue,
            max_bars: 1000,
            stats_count: 20,
            unit_size: 0.0001,
            alerts_enabled: false,
        }
    }
}

impl AnalysisConfig {
    pub fn with_distance_mode(mut self, mode: DistanceMode) -> Self {
        self.distance_mode = mode;
        self
    }

    pub fn with_cross_point(mut self, cross_point: CrossPoint) -> Self {
        self.cross_point = cross_point;
        self
    }

    pub fn with_period(mut self, period: usize) -> Self {
        self.moving_average.period = period;
        self
    }

    pub fn with_max_bars(mut self, max_bars: usize) -> Self {
        self.max_bars = max_bars;
        self
    }

    pub fn with_stats_count(mut self, count: usize) -> Self {
        self.stats_count = count;
        self
    }

    pub fn with_unit_size(mut self, unit_size: f64) -> Self {
        self.unit_size = unit_size;
        self
    }

    pub fn with_alerts(mut self, enabled: bool) -> Self {
        self.alerts_enabled = enabled;
        self
    }

    /// Bars the MA needs before its values can be compared
    pub fn warmup_bars(&self) -> usize {
        self.moving_average.period
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.moving_average.period == 0 {
            return Err(ConfigError::InvalidPeriod(self.moving_average.period));
        }
        if !self.unit_size.is_finite() || self.unit_size <= 0.0 {
            return Err(ConfigError::InvalidUnitSize(self.unit_size));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid MA period: {0} (minimum 1)")]
    InvalidPeriod(usize),
    #[error("Invalid unit size: {0} (must be finite and > 0)")]
    InvalidUnitSize(f64),
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

impl FromStr for DistanceMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "absolute" => Ok(Self::Absolute),
            "relative" => Ok(Self::Relative),
            _ => Err(ConfigError::UnknownVariant { kind: "distance mode", value: s.to_string() }),
        }
    }
}

impl FromStr for CrossPoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "ma_value" | "ma" => Ok(Self::MaValue),
            "price" | "close_price" => Ok(Self::Price),
            _ => Err(ConfigError::UnknownVariant { kind: "cross point", value: s.to_string() }),
        }
    }
}

impl FromStr for MovingAverageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "simple" | "sma" => Ok(Self::Simple),
            "exponential" | "ema" => Ok(Self::Exponential),
            "smoothed" | "smma" | "wilder" => Ok(Self::Smoothed),
            "weighted" | "wma" => Ok(Self::Weighted),
            _ => Err(ConfigError::UnknownVariant { kind: "MA kind", value: s.to_string() }),
        }
    }
}

impl fmt::Display for DistanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMode::Absolute => write!(f, "absolute"),
            DistanceMode::Relative => write!(f, "relative"),
        }
    }
}

impl fmt::Display for CrossPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossPoint::MaValue => write!(f, "ma-value"),
            CrossPoint::Price => write!(f, "price"),
        }
    }
}
