use std::sync::{Arc, Mutex};
use async_trait::async_trait;

use crate::domain::AnalysisFrame;
use super::notifier::{Notifier, NotifyError};
use super::renderer::{RenderError, Renderer};

/// Mock notifier that records every delivered alert
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to make every delivery fail after recording it
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Get all recorded (subject, message) pairs
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.calls
            .lock()
            .unwrap()
            .push((subject.to_string(), message.to_string()));
        if self.fail {
            return Err(NotifyError::NotConfigured("mock failure".to_string()));
        }
        Ok(())
    }
}

/// Mock renderer that keeps every frame it was given
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<AnalysisFrame>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<AnalysisFrame> {
        self.frames.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &AnalysisFrame) -> Result<(), RenderError> {
        self.frames.lock().unwrap().push(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_notifier() {
        let mock = RecordingNotifier::new();
        mock.notify("subject", "body").await.unwrap();
        assert_eq!(mock.get_calls(), vec![("subject".to_string(), "body".to_string())]);
    }

    #[tokio::test]
    async fn test_failing_notifier_still_records() {
        let mock = RecordingNotifier::new().failing();
        assert!(mock.notify("s", "m").await.is_err());
        assert_eq!(mock.get_calls().len(), 1);
    }

    #[test]
    fn test_recording_renderer() {
        let mut renderer = RecordingRenderer::new();
        renderer.render(&AnalysisFrame::default()).unwrap();
        assert_eq!(renderer.frames().len(), 1);
    }
}
