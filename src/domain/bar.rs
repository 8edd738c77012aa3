//! Bar - one OHLC period of the instrument's history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLC bar, indexed by position in the history (0 = oldest)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Bar {
    pub fn new(open_time: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { open_time, open, high, low, close, volume: 0.0 }
    }

    /// Validate OHLC data integrity
    pub fn is_valid(&self) -> bool {
        self.high >= self.low
            && self.close >= self.low
            && self.close <= self.high
            && self.open >= self.low
            && self.open <= self.high
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.open.is_finite()
    }

    /// (high + low) / 2
    pub fn median_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// (high + low + 2 * close) / 4
    pub fn weighted_close(&self) -> f64 {
        (self.high + self.low + 2.0 * self.close) / 4.0
    }
}
