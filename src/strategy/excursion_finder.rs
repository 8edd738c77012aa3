//! Excursion Finder
//!
//! Locates the point of maximum divergence between two consecutive crosses.
//! Two settings multiply into four formulas:
//!
//! | Mode     | Reference | Up                               | Down                             |
//! |----------|-----------|----------------------------------|----------------------------------|
//! | Absolute | MA value  | max(high) - min(ma)              | max(ma) - min(low)               |
//! | Absolute | Price     | max(high) - cross value          | cross value - min(low)           |
//! | Relative | MA value  | max over k of high[k] - ma[k]    | max over k of ma[k] - low[k]     |
//! | Relative | Price     | max over k of high[k] - cross    | max over k of cross - low[k]     |
//!
//! Absolute mode picks the interval's price extreme first and measures it
//! against one reference; relative mode picks the bar that maximizes the
//! per-bar distance, so the two can disagree on the extreme bar.

use super::params::{ConfigError, CrossPoint, DistanceMode};
use crate::domain::{
    AnalysisFrame, CrossingEvent, Direction, ExcursionRecord, ExtremePoint, Interval, LabelRequest,
};
use crate::ports::SeriesAccess;

/// Find the extreme-divergence bar of `interval`.
///
/// `direction` is the direction of the cross opening the interval and
/// `cross_value` its reference value. Returns `None` when no bar diverges
/// by a strictly positive distance.
pub fn find_extreme<S: SeriesAccess + ?Sized>(
    series: &S,
    interval: Interval,
    direction: Direction,
    cross_value: f64,
    mode: DistanceMode,
    cross_point: CrossPoint,
) -> Option<ExtremePoint> {
    if interval.start > interval.end || interval.end >= series.len() {
        return None;
    }

    let extreme = match mode {
        DistanceMode::Absolute => absolute_extreme(series, interval, direction, cross_value, cross_point),
        DistanceMode::Relative => relative_extreme(series, interval, direction, cross_value, cross_point),
    }?;

    (extreme.distance > 0.0 && extreme.distance.is_finite()).then_some(extreme)
}

fn absolute_extreme<S: SeriesAccess + ?Sized>(
    series: &S,
    interval: Interval,
    direction: Direction,
    cross_value: f64,
    cross_point: CrossPoint,
) -> Option<ExtremePoint> {
    let mut extreme: Option<(usize, f64)> = None;

    match direction {
        Direction::Up => {
            let mut lowest_ma = f64::INFINITY;
            for k in interval.indices() {
                let high = series.high(k);
                if extreme.map_or(high.is_finite(), |(_, best)| high > best) {
                    extreme = Some((k, high));
                }
                let ma = series.ma(k);
                if ma < lowest_ma {
                    lowest_ma = ma;
                }
            }
            let reference = match cross_point {
                CrossPoint::MaValue => lowest_ma,
                CrossPoint::Price => cross_value,
            };
            extreme.map(|(index, price)| ExtremePoint { index, price, distance: price - reference })
        }
        Direction::Down => {
            let mut highest_ma = f64::NEG_INFINITY;
            for k in interval.indices() {
                let low = series.low(k);
                if extreme.map_or(low.is_finite(), |(_, best)| low < best) {
                    extreme = Some((k, low));
                }
                let ma = series.ma(k);
                if ma > highest_ma {
                    highest_ma = ma;
                }
            }
            let reference = match cross_point {
                CrossPoint::MaValue => highest_ma,
                CrossPoint::Price => cross_value,
            };
            extreme.map(|(index, price)| ExtremePoint { index, price, distance: reference - price })
        }
    }
}

fn relative_extreme<S: SeriesAccess + ?Sized>(
    series: &S,
    interval: Interval,
    direction: Direction,
    cross_value: f64,
    cross_point: CrossPoint,
) -> Option<ExtremePoint> {
    let mut best: Option<ExtremePoint> = None;

    for k in interval.indices() {
        let reference = match cross_point {
            CrossPoint::MaValue => series.ma(k),
            CrossPoint::Price => cross_value,
        };
        let (price, distance) = match direction {
            Direction::Up => {
                let high = series.high(k);
                (high, high - reference)
            }
            Direction::Down => {
                let low = series.low(k);
                (low, reference - low)
            }
        };

        let threshold = best.map_or(0.0, |b| b.distance);
        if distance > threshold {
            best = Some(ExtremePoint { index: k, price, distance });
        }
    }

    best
}

/// Measures intervals and marks their extremes on the pass frame
#[derive(Debug, Clone, Copy)]
pub struct ExcursionFinder {
    mode: DistanceMode,
    cross_point: CrossPoint,
    unit_size: f64,
}

impl ExcursionFinder {
    /// Rejects a zero, negative or non-finite `unit_size`
    pub fn new(mode: DistanceMode, cross_point: CrossPoint, unit_size: f64) -> Result<Self, ConfigError> {
        if !unit_size.is_finite() || unit_size <= 0.0 {
            return Err(ConfigError::InvalidUnitSize(unit_size));
        }
        Ok(Self { mode, cross_point, unit_size })
    }

    /// Measure the interval opened by `opening` and closed at bar `end`.
    ///
    /// On success the extreme is marked on the zigzag overlay (unless it is
    /// the opening bar), its magnitude goes to the directional overlay and a
    /// label request is queued.
    pub fn measure<S: SeriesAccess + ?Sized>(
        &self,
        series: &S,
        opening: &CrossingEvent,
        end: usize,
        frame: &mut AnalysisFrame,
    ) -> Option<ExcursionRecord> {
        let interval = Interval::new(opening.index, end);
        let extreme = find_extreme(
            series,
            interval,
            opening.direction,
            opening.reference_value,
            self.mode,
            self.cross_point,
        )?;

        let magnitude = extreme.distance / self.unit_size;
        let extreme_time = series.open_time(extreme.index);

        if extreme.index != opening.index {
            frame.overlay.mark_zigzag(extreme.index, extreme.price);
        }
        frame.overlay.mark_excursion(opening.direction, extreme.index, magnitude);
        frame.labels.push(LabelRequest {
            index: extreme.index,
            time: extreme_time,
            price: extreme.price,
            text: format!("{:.1}", magnitude),
            direction: opening.direction,
        });

        tracing::debug!(
            cross = opening.index,
            end,
            extreme = extreme.index,
            direction = %opening.direction,
            magnitude,
            "Excursion measured"
        );

        Some(ExcursionRecord {
            cross_time: series.open_time(opening.index),
            magnitude,
            direction: opening.direction,
            extreme_time,
            cross_index: opening.index,
            extreme_index: extreme.index,
        })
    }
}
