//! Strategy Layer - Cross detection and excursion measurement
//!
//! - `params`: analysis settings (distance mode, cross point, windows, MA)
//! - `moving_average`: SMA / EMA / SMMA / WMA feeding the aligned series
//! - `cross_detector`: price/MA cross events
//! - `excursion_finder`: extreme-divergence search between crosses

pub mod params;
pub mod moving_average;
pub mod cross_detector;
pub mod excursion_finder;

pub use params::{
    AnalysisConfig, AppliedPrice, ConfigError, CrossPoint, DistanceMode, MovingAverageConfig,
    MovingAverageKind,
};
pub use moving_average::{build_series, moving_average};
pub use cross_detector::CrossDetector;
pub use excursion_finder::{find_extreme, ExcursionFinder};
