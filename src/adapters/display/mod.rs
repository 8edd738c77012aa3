//! Display Adapters
//!
//! `Renderer` implementations writing frames to a terminal or pipe.

mod json;
mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;
