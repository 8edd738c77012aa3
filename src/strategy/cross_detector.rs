//! Cross Detector
//!
//! Scans the aligned series for price/MA crosses, comparing each bar with
//! the previous one:
//! - Up:   price[i-1] <= ma[i-1] and price[i] > ma[i]
//! - Down: price[i-1] >= ma[i-1] and price[i] < ma[i]
//!
//! Touching the MA without moving to the other side is not a cross. The
//! newest bar is never scanned; it only closes the tail interval.

use super::params::CrossPoint;
use crate::domain::{CrossingEvent, Direction};
use crate::ports::SeriesAccess;

/// Detects crossings between price and moving average
#[derive(Debug, Clone, Copy)]
pub struct CrossDetector {
    cross_point: CrossPoint,
}

impl CrossDetector {
    pub fn new(cross_point: CrossPoint) -> Self {
        Self { cross_point }
    }

    /// Crossing events ordered by index, scanning `start..len - 1`.
    ///
    /// `start` is clamped to 1 since every test looks one bar back.
    pub fn detect<S: SeriesAccess + ?Sized>(&self, series: &S, start: usize) -> Vec<CrossingEvent> {
        let len = series.len();
        let mut events = Vec::new();
        if len < 2 {
            return events;
        }

        for i in start.max(1)..len - 1 {
            if let Some(direction) = Self::cross_at(series, i) {
                let reference_value = match self.cross_point {
                    CrossPoint::MaValue => series.ma(i),
                    CrossPoint::Price => series.price(i),
                };
                tracing::debug!(index = i, %direction, reference_value, "Cross detected");
                events.push(CrossingEvent { index: i, direction, reference_value });
            }
        }

        events
    }

    /// Direction of the cross completed at bar `i`, if any
    pub fn cross_at<S: SeriesAccess + ?Sized>(series: &S, i: usize) -> Option<Direction> {
        let (price_prev, ma_prev) = (series.price(i - 1), series.ma(i - 1));
        let (price_cur, ma_cur) = (series.price(i), series.ma(i));

        if price_prev <= ma_prev && price_cur > ma_cur {
            Some(Direction::Up)
        } else if price_prev >= ma_prev && price_cur < ma_cur {
            Some(Direction::Down)
        } else {
            None
        }
    }
}
