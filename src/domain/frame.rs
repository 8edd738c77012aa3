//! Analysis Frame
//!
//! Everything one pass hands to the outside world: sparse overlays, label
//! requests, the statistics report and at most one alert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::alert_gate::ExcursionAlert;
use super::direction::Direction;
use super::excursion::{CrossingEvent, ExcursionRecord};
use super::statistics::StatisticsReport;

/// Sparse plotted series: bar index -> value
pub type SparseSeries = BTreeMap<usize, f64>;

/// Overlay buffers for an external chart renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    /// Cross points and excursion extremes
    pub zigzag: SparseSeries,
    /// Up excursion magnitudes (reporting units) at their extreme bar
    pub up: SparseSeries,
    /// Down excursion magnitudes (reporting units) at their extreme bar
    pub down: SparseSeries,
}

impl Overlay {
    pub fn mark_zigzag(&mut self, index: usize, value: f64) {
        self.zigzag.insert(index, value);
    }

    pub fn mark_excursion(&mut self, direction: Direction, index: usize, magnitude: f64) {
        match direction {
            Direction::Up => self.up.insert(index, magnitude),
            Direction::Down => self.down.insert(index, magnitude),
        };
    }

    pub fn is_empty(&self) -> bool {
        self.zigzag.is_empty() && self.up.is_empty() && self.down.is_empty()
    }
}

/// Request to draw a magnitude label next to an excursion extreme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRequest {
    pub index: usize,
    pub time: DateTime<Utc>,
    pub price: f64,
    /// Magnitude with one decimal, e.g. "12.3"
    pub text: String,
    pub direction: Direction,
}

impl LabelRequest {
    /// Stable chart object name, unique per extreme bar and side
    pub fn object_name(&self) -> String {
        format!(
            "MA_Excursion_{}_{}",
            self.time.timestamp_millis(),
            self.direction.suffix()
        )
    }
}

/// Output of a full analysis pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFrame {
    /// Bars in the analysed series
    pub bars: usize,
    pub crossings: Vec<CrossingEvent>,
    pub records: Vec<ExcursionRecord>,
    pub overlay: Overlay,
    pub labels: Vec<LabelRequest>,
    pub statistics: StatisticsReport,
    pub alert: Option<ExcursionAlert>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mark_excursion_routes_by_direction() {
        let mut overlay = Overlay::default();
        overlay.mark_excursion(Direction::Up, 3, 12.0);
        overlay.mark_excursion(Direction::Down, 7, 4.0);
        assert_eq!(overlay.up.get(&3), Some(&12.0));
        assert_eq!(overlay.down.get(&7), Some(&4.0));
        assert!(overlay.zigzag.is_empty());
    }

    #[test]
    fn test_label_object_name() {
        let label = LabelRequest {
            index: 5,
            time: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            price: 1.1,
            text: "12.3".to_string(),
            direction: Direction::Down,
        };
        assert_eq!(label.object_name(), "MA_Excursion_1700000000000_d");
    }
}
