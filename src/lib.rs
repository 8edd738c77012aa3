//! MA Excursion - maximum price excursion between moving-average crosses
//!
//! Scans a bar history for price/MA crosses, measures the largest divergence
//! from the average in each interval between crosses and keeps running
//! statistics of those excursions per direction.
//!
//! # Modules
//!
//! - `domain`: Core types (Bar, ExcursionRecord, ExcursionStore, StatisticsReport, AlertGate)
//! - `ports`: Trait abstractions (SeriesAccess, Renderer, Notifier)
//! - `strategy`: Moving averages, cross detection and excursion measurement
//! - `adapters`: External implementations (CSV loader, display, alerts, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Analysis pass and session

pub mod domain;
pub mod ports;
pub mod strategy;
pub mod adapters;
pub mod config;
pub mod application;
