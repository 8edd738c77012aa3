//! Moving Average
//!
//! Host-side MA calculation feeding the analysis pass. Output is aligned
//! with the input; indices before the first complete window are NaN.
//!
//! - Simple: arithmetic mean of the last `period` values
//! - Exponential: alpha = 2 / (period + 1), seeded with the first SMA
//! - Smoothed (Wilder): (prev * (period - 1) + x) / period, SMA-seeded
//! - Weighted: linear weights 1..=period, newest heaviest

use super::params::{AppliedPrice, MovingAverageConfig, MovingAverageKind};
use crate::domain::Bar;
use crate::ports::{AlignedSeries, SeriesError};

impl AppliedPrice {
    /// Extract this price field from a bar
    pub fn of(&self, bar: &Bar) -> f64 {
        match self {
            AppliedPrice::Close => bar.close,
            AppliedPrice::Open => bar.open,
            AppliedPrice::High => bar.high,
            AppliedPrice::Low => bar.low,
            AppliedPrice::Median => bar.median_price(),
            AppliedPrice::Typical => bar.typical_price(),
            AppliedPrice::Weighted => bar.weighted_close(),
        }
    }
}

/// Compute a moving average over `values`
pub fn moving_average(values: &[f64], period: usize, kind: MovingAverageKind) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let seed = values[..period].iter().sum::<f64>() / period as f64;

    match kind {
        MovingAverageKind::Simple => {
            let mut sum = seed * period as f64;
            out[period - 1] = seed;
            for i in period..values.len() {
                sum += values[i] - values[i - period];
                out[i] = sum / period as f64;
            }
        }
        MovingAverageKind::Exponential => {
            let alpha = 2.0 / (period as f64 + 1.0);
            let mut prev = seed;
            out[period - 1] = seed;
            for i in period..values.len() {
                prev = alpha * values[i] + (1.0 - alpha) * prev;
                out[i] = prev;
            }
        }
        MovingAverageKind::Smoothed => {
            let mut prev = seed;
            out[period - 1] = seed;
            for i in period..values.len() {
                prev = (prev * (period as f64 - 1.0) + values[i]) / period as f64;
                out[i] = prev;
            }
        }
        MovingAverageKind::Weighted => {
            let denom = (period * (period + 1)) as f64 / 2.0;
            for i in (period - 1)..values.len() {
                let window = &values[i + 1 - period..=i];
                let weighted: f64 = window
                    .iter()
                    .enumerate()
                    .map(|(w, v)| (w + 1) as f64 * v)
                    .sum();
                out[i] = weighted / denom;
            }
        }
    }

    out
}

/// Derive price and MA from bars and assemble the aligned series
pub fn build_series(bars: &[Bar], config: &MovingAverageConfig) -> Result<AlignedSeries, SeriesError> {
    let price: Vec<f64> = bars.iter().map(|b| config.applied_price.of(b)).collect();
    let ma = moving_average(&price, config.period, config.kind);
    AlignedSeries::from_bars(bars, price, ma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SeriesAccess;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_sma() {
        let ma = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3, MovingAverageKind::Simple);
        assert!(ma[0].is_nan());
        assert!(ma[1].is_nan());
        assert_relative_eq!(ma[2], 2.0);
        assert_relative_eq!(ma[3], 3.0);
        assert_relative_eq!(ma[4], 4.0);
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let ma = moving_average(&[1.0, 2.0, 3.0, 4.0], 3, MovingAverageKind::Exponential);
        assert_relative_eq!(ma[2], 2.0);
        // alpha = 0.5: 0.5 * 4 + 0.5 * 2
        assert_relative_eq!(ma[3], 3.0);
    }

    #[test]
    fn test_smoothed() {
        let ma = moving_average(&[1.0, 2.0, 3.0, 6.0], 3, MovingAverageKind::Smoothed);
        assert_relative_eq!(ma[2], 2.0);
        // (2 * 2 + 6) / 3
        assert_relative_eq!(ma[3], 10.0 / 3.0);
    }

    #[test]
    fn test_weighted() {
        let ma = moving_average(&[1.0, 2.0, 3.0, 4.0], 3, MovingAverageKind::Weighted);
        // (1*1 + 2*2 + 3*3) / 6
        assert_relative_eq!(ma[2], 14.0 / 6.0);
        // (1*2 + 2*3 + 3*4) / 6
        assert_relative_eq!(ma[3], 20.0 / 6.0);
    }

    #[test]
    fn test_short_input_is_all_nan() {
        let ma = moving_average(&[1.0, 2.0], 5, MovingAverageKind::Simple);
        assert!(ma.iter().all(|v| v.is_nan()));
        assert!(moving_average(&[], 3, MovingAverageKind::Simple).is_empty());
    }

    #[test]
    fn test_build_series_uses_applied_price() {
        let bars: Vec<Bar> = (0..4)
            .map(|i| {
                let base = 10.0 + i as f64;
                Bar::new(Utc.timestamp_opt(i * 60, 0).unwrap(), base, base + 2.0, base - 2.0, base + 1.0)
            })
            .collect();
        let config = MovingAverageConfig {
            period: 2,
            kind: MovingAverageKind::Simple,
            applied_price: AppliedPrice::Median,
        };
        let series = build_series(&bars, &config).unwrap();
        assert_eq!(series.len(), 4);
        assert_relative_eq!(series.price(0), 10.0);
        assert_relative_eq!(series.ma(1), 10.5);
        assert_relative_eq!(series.high(3), 15.0);
    }
}
