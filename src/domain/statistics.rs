//! Excursion Statistics
//!
//! Mean and median over the most recent excursions. The combined window
//! caps the directional windows: `count_up = min(count_all, up.len())`.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use super::store::{ExcursionStore, Sequence};

/// Average and median of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub average: f64,
    pub median: f64,
}

/// Summary of one window, with the number of entries it covered
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub count: usize,
    pub average: f64,
    pub median: f64,
}

impl StatisticsSnapshot {
    fn of(values: &[f64]) -> Self {
        let summary = summarize(values);
        Self {
            count: values.len(),
            average: summary.average,
            median: summary.median,
        }
    }
}

/// Statistics for the all/up/down histories
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatisticsReport {
    /// Configured window (0 = all excursions)
    pub requested: usize,
    /// Excursions stored in the pass
    pub total: usize,
    pub all: StatisticsSnapshot,
    pub up: StatisticsSnapshot,
    pub down: StatisticsSnapshot,
}

impl StatisticsReport {
    /// Compute windowed statistics over the store
    pub fn compute(store: &ExcursionStore, requested: usize) -> Self {
        let total = store.len(Sequence::All);
        let count_all = if requested > 0 && requested < total { requested } else { total };
        let count_up = count_all.min(store.len(Sequence::Up));
        let count_down = count_all.min(store.len(Sequence::Down));

        Self {
            requested,
            total,
            all: windowed(store, Sequence::All, count_all),
            up: windowed(store, Sequence::Up, count_up),
            down: windowed(store, Sequence::Down, count_down),
        }
    }

    /// Panel subtitle, e.g. "(All 12 Excursions)" or "(20 Recent Excursions)"
    pub fn caption(&self) -> String {
        if self.requested == 0 {
            format!("(All {} Excursions)", self.total)
        } else {
            format!("({} Recent Excursions)", self.all.count)
        }
    }
}

fn windowed(store: &ExcursionStore, sequence: Sequence, count: usize) -> StatisticsSnapshot {
    if count == 0 {
        return StatisticsSnapshot::default();
    }
    StatisticsSnapshot::of(store.tail(sequence, count))
}

/// Arithmetic mean and textbook median; both 0 on empty input
pub fn summarize(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary::default();
    }
    Summary {
        average: values.mean(),
        median: median(values),
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
