//! Ports Layer - Trait definitions for external collaborators
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Bar/MA series access for the analysis pass
//! - Chart and statistics rendering
//! - Alert delivery

pub mod series;
pub mod renderer;
pub mod notifier;
#[cfg(test)]
pub mod mocks;

// Re-export main traits and types
pub use series::{AlignedSeries, SeriesAccess, SeriesError};
pub use renderer::{RenderError, Renderer};
pub use notifier::{Notifier, NotifyError};
