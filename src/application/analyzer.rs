//! Excursion Analyzer
//!
//! Runs the full recompute pass: cross detection, interval measurement,
//! store rebuild, statistics and the tail alert. The store is cleared on
//! every pass; only the alert gate's dedup state survives between passes.

use thiserror::Error;

use crate::domain::{AlertGate, AnalysisFrame, CrossingEvent, ExcursionRecord, ExcursionStore, StatisticsReport};
use crate::ports::SeriesAccess;
use crate::strategy::{AnalysisConfig, ConfigError, CrossDetector, ExcursionFinder};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid unit size: {0} (must be finite and > 0)")]
    InvalidUnitSize(f64),
    #[error("Invalid analysis configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Owns the per-pass store and the cross-pass alert state
#[derive(Debug, Clone)]
pub struct ExcursionAnalyzer {
    config: AnalysisConfig,
    store: ExcursionStore,
    gate: AlertGate,
}

impl ExcursionAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        check_config(&config)?;
        Ok(Self {
            config,
            store: ExcursionStore::new(),
            gate: AlertGate::new(),
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Magnitude histories of the last pass
    pub fn store(&self) -> &ExcursionStore {
        &self.store
    }

    pub fn alert_gate(&self) -> &AlertGate {
        &self.gate
    }

    /// First bar index the cross scan may start from
    pub fn scan_start(&self, len: usize) -> usize {
        let max_bars = self.config.max_bars;
        let bars_to_process = if max_bars > 0 && max_bars < len { max_bars } else { len };
        (self.config.warmup_bars() + 1).max(len - bars_to_process)
    }

    /// Recompute everything from the visible bar history
    pub fn run_pass<S: SeriesAccess + ?Sized>(&mut self, series: &S) -> Result<AnalysisFrame, AnalysisError> {
        check_config(&self.config)?;
        self.store.clear();

        let len = series.len();
        let mut frame = AnalysisFrame {
            bars: len,
            ..AnalysisFrame::default()
        };

        let crossings = CrossDetector::new(self.config.cross_point).detect(series, self.scan_start(len));
        let finder = ExcursionFinder::new(
            self.config.distance_mode,
            self.config.cross_point,
            self.config.unit_size,
        )?;

        let mut opening: Option<CrossingEvent> = None;
        for event in &crossings {
            frame.overlay.mark_zigzag(event.index, event.reference_value);
            if let Some(prev) = opening {
                if let Some(record) = finder.measure(series, &prev, event.index, &mut frame) {
                    self.keep(record, &mut frame);
                }
            }
            opening = Some(*event);
        }

        // Tail interval: last cross up to the newest bar
        if let Some(last) = opening {
            if let Some(record) = finder.measure(series, &last, len - 1, &mut frame) {
                self.keep(record, &mut frame);
                if self.config.alerts_enabled {
                    frame.alert = self.gate.evaluate(&record, last.index + 2 == len);
                }
            }
        }

        frame.statistics = StatisticsReport::compute(&self.store, self.config.stats_count);
        frame.crossings = crossings;

        tracing::info!(
            bars = len,
            crossings = frame.crossings.len(),
            excursions = frame.records.len(),
            avg = frame.statistics.all.average,
            median = frame.statistics.all.median,
            alert = frame.alert.is_some(),
            "Analysis pass complete"
        );

        Ok(frame)
    }

    fn keep(&mut self, record: ExcursionRecord, frame: &mut AnalysisFrame) {
        self.store.append(record.direction, record.magnitude);
        frame.records.push(record);
    }
}

fn check_config(config: &AnalysisConfig) -> Result<(), AnalysisError> {
    if !config.unit_size.is_finite() || config.unit_size <= 0.0 {
        return Err(AnalysisError::InvalidUnitSize(config.unit_size));
    }
    config.validate()?;
    Ok(())
}
