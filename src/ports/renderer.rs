use thiserror::Error;

use crate::domain::AnalysisFrame;

/// Chart/display surface that draws a finished pass
#[cfg_attr(test, mockall::automock)]
pub trait Renderer {
    /// Replace whatever was drawn for the previous pass with this frame
    fn render(&mut self, frame: &AnalysisFrame) -> Result<(), RenderError>;
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, frame: &AnalysisFrame) -> Result<(), RenderError> {
        (**self).render(frame)
    }
}
