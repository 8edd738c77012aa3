use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::Bar;

/// Read-only view over the aligned price / MA / high / low / time series.
///
/// All accessors take a bar index in `0..len()`; index 0 is the oldest bar.
pub trait SeriesAccess {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applied price the MA is computed from
    fn price(&self, index: usize) -> f64;

    /// Moving average value (NaN during warm-up)
    fn ma(&self, index: usize) -> f64;

    fn high(&self, index: usize) -> f64;

    fn low(&self, index: usize) -> f64;

    fn open_time(&self, index: usize) -> DateTime<Utc>;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Series length mismatch: {name} has {actual} values, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Owned, equal-length series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedSeries {
    open_time: Vec<DateTime<Utc>>,
    price: Vec<f64>,
    ma: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
}

impl AlignedSeries {
    pub fn new(
        open_time: Vec<DateTime<Utc>>,
        price: Vec<f64>,
        ma: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        let expected = open_time.len();
        for (name, actual) in [
            ("price", price.len()),
            ("ma", ma.len()),
            ("high", high.len()),
            ("low", low.len()),
        ] {
            if actual != expected {
                return Err(SeriesError::LengthMismatch { name, expected, actual });
            }
        }
        Ok(Self { open_time, price, ma, high, low })
    }

    /// Build from bars plus an already computed price and MA series
    pub fn from_bars(bars: &[Bar], price: Vec<f64>, ma: Vec<f64>) -> Result<Self, SeriesError> {
        Self::new(
            bars.iter().map(|b| b.open_time).collect(),
            price,
            ma,
            bars.iter().map(|b| b.high).collect(),
            bars.iter().map(|b| b.low).collect(),
        )
    }
}

impl SeriesAccess for AlignedSeries {
    fn len(&self) -> usize {
        self.open_time.len()
    }

    fn price(&self, index: usize) -> f64 {
        self.price[index]
    }

    fn ma(&self, index: usize) -> f64 {
        self.ma[index]
    }

    fn high(&self, index: usize) -> f64 {
        self.high[index]
    }

    fn low(&self, index: usize) -> f64 {
        self.low[index]
    }

    fn open_time(&self, index: usize) -> DateTime<Utc> {
        self.open_time[index]
    }
}
