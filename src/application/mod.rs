//! Application Layer
//!
//! Orchestrates the analysis pass and its outputs.

pub mod analyzer;
pub mod session;

pub use analyzer::{AnalysisError, ExcursionAnalyzer};
pub use session::{AnalysisSession, InstrumentLabel, ALERT_SUBJECT};
