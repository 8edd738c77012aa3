use async_trait::async_trait;
use thiserror::Error;

/// Outbound alert transport
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one alert line
    async fn notify(&self, subject: &str, message: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook rejected alert with status {0}")]
    Rejected(u16),

    #[error("Notifier not configured: {0}")]
    NotConfigured(String),
}
