//! Crossing and excursion records
//!
//! A `CrossingEvent` opens an interval; the interval's point of maximum
//! divergence becomes an `ExcursionRecord` once it is measured.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// Price/MA cross detected at a bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingEvent {
    /// Bar index of the cross
    pub index: usize,
    /// Side the price moved to
    pub direction: Direction,
    /// MA value or price at `index`, depending on the cross point policy
    pub reference_value: f64,
}

/// Inclusive bar range between two consecutive crosses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Bar of maximum divergence inside an interval, in raw price units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremePoint {
    /// Bar index of the extreme
    pub index: usize,
    /// High (up) or low (down) of the extreme bar
    pub price: f64,
    /// Divergence from the reference, price units
    pub distance: f64,
}

/// Measured excursion of one interval, in reporting units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExcursionRecord {
    /// Open time of the bar that opened the interval
    pub cross_time: DateTime<Utc>,
    /// Divergence divided by the instrument unit size (always > 0)
    pub magnitude: f64,
    /// Direction of the opening cross
    pub direction: Direction,
    /// Open time of the extreme bar
    pub extreme_time: DateTime<Utc>,
    pub cross_index: usize,
    pub extreme_index: usize,
}
