//! Market Data Adapters
//!
//! Bar history sources for the analysis pass.

pub mod csv_bars;

pub use csv_bars::{load_bars, parse_time, read_bars, LoadError};
