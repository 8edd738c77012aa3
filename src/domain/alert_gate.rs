//! Alert Gate
//!
//! Decides whether the tail excursion should produce a notification.
//! Only the interval opened on the last closed bar can alert, and each
//! cross alerts at most once, even across repeated passes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::excursion::ExcursionRecord;

/// Notification payload for a freshly opened excursion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExcursionAlert {
    pub direction: Direction,
    pub magnitude: f64,
    pub cross_time: DateTime<Utc>,
}

impl ExcursionAlert {
    /// Human-readable alert line
    pub fn message(&self, symbol: &str, timeframe: &str) -> String {
        format!(
            "MA Cross Excursion: {} {} | {} excursion: {:.1} points",
            symbol, timeframe, self.direction, self.magnitude
        )
    }
}

/// Deduplicates alerts by the time of the cross that opened the excursion
#[derive(Debug, Clone, Default)]
pub struct AlertGate {
    last_alerted_cross: Option<DateTime<Utc>>,
}

impl AlertGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the tail interval's record.
    ///
    /// `opened_on_last_closed_bar` must be true only when the interval's
    /// opening cross sits on the second-to-last bar of the series.
    pub fn evaluate(
        &mut self,
        record: &ExcursionRecord,
        opened_on_last_closed_bar: bool,
    ) -> Option<ExcursionAlert> {
        if !opened_on_last_closed_bar {
            return None;
        }
        if self.last_alerted_cross == Some(record.cross_time) {
            tracing::debug!(cross_time = %record.cross_time, "Alert suppressed: cross already notified");
            return None;
        }

        self.last_alerted_cross = Some(record.cross_time);
        Some(ExcursionAlert {
            direction: record.direction,
            magnitude: record.magnitude,
            cross_time: record.cross_time,
        })
    }

    pub fn last_alerted_cross(&self) -> Option<DateTime<Utc>> {
        self.last_alerted_cross
    }

    pub fn reset(&mut self) {
        self.last_alerted_cross = None;
    }
}
