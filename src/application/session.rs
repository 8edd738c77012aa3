//! Analysis Session
//!
//! Glue around the analyzer: run a pass, hand the frame to the renderer and
//! deliver the alert, if any. Rendering and delivery failures are logged;
//! they never affect analyzer state.

use crate::domain::AnalysisFrame;
use crate::ports::{Notifier, Renderer, SeriesAccess};

use super::analyzer::{AnalysisError, ExcursionAnalyzer};

pub const ALERT_SUBJECT: &str = "MA Cross Excursion Alert";

/// Instrument labels used in alert messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentLabel {
    pub symbol: String,
    pub timeframe: String,
}

pub struct AnalysisSession<R: Renderer, N: Notifier> {
    analyzer: ExcursionAnalyzer,
    renderer: R,
    notifier: N,
    instrument: InstrumentLabel,
    passes: u64,
}

impl<R: Renderer, N: Notifier> AnalysisSession<R, N> {
    pub fn new(analyzer: ExcursionAnalyzer, renderer: R, notifier: N, instrument: InstrumentLabel) -> Self {
        Self {
            analyzer,
            renderer,
            notifier,
            instrument,
            passes: 0,
        }
    }

    pub fn analyzer(&self) -> &ExcursionAnalyzer {
        &self.analyzer
    }

    /// Number of completed passes
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Run one full pass over `series`, render it and deliver its alert
    pub async fn process<S: SeriesAccess + ?Sized>(&mut self, series: &S) -> Result<AnalysisFrame, AnalysisError> {
        let frame = self.analyzer.run_pass(series)?;
        self.passes += 1;

        if let Err(e) = self.renderer.render(&frame) {
            tracing::warn!(error = %e, "Failed to render analysis frame");
        }

        if let Some(alert) = &frame.alert {
            let message = alert.message(&self.instrument.symbol, &self.instrument.timeframe);
            tracing::info!(%message, "Excursion alert");
            if let Err(e) = self.notifier.notify(ALERT_SUBJECT, &message).await {
                tracing::warn!(error = %e, "Failed to deliver excursion alert");
            }
        }

        Ok(frame)
    }
}
