//! Adapters Layer - External implementations of the ports
//!
//! - `cli`: clap command definitions
//! - `market_data`: CSV bar history loader
//! - `display`: text and JSON frame renderers
//! - `alerts`: log and webhook notifiers

pub mod cli;
pub mod market_data;
pub mod display;
pub mod alerts;
