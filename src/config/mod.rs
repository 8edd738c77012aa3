//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    AlertsSection, Config, ConfigError, InstrumentSection, load_config, WEBHOOK_URL_ENV,
};
