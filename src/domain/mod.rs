//! Domain Layer - Core types for MA excursion analysis
//!
//! Pure data types and stateful guards with no I/O:
//! - `bar`: OHLC bar history entries
//! - `excursion`: crossing events, intervals and measured excursions
//! - `store`: append-only magnitude histories (all / up / down)
//! - `statistics`: windowed mean and median
//! - `alert_gate`: once-per-cross notification gating
//! - `frame`: per-pass outputs handed to renderers and notifiers

pub mod bar;
pub mod direction;
pub mod excursion;
pub mod store;
pub mod statistics;
pub mod alert_gate;
pub mod frame;

pub use bar::Bar;
pub use direction::Direction;
pub use excursion::{CrossingEvent, ExcursionRecord, ExtremePoint, Interval};
pub use store::{ExcursionStore, Sequence};
pub use statistics::{summarize, StatisticsReport, StatisticsSnapshot, Summary};
pub use alert_gate::{AlertGate, ExcursionAlert};
pub use frame::{AnalysisFrame, LabelRequest, Overlay, SparseSeries};
