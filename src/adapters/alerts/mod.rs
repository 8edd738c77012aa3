//! Alert Adapters
//!
//! - `LogNotifier`: writes alerts to the tracing log
//! - `WebhookNotifier`: posts alerts to a chat webhook
//! - `AlertNotifier`: runtime choice between the two

mod webhook;

pub use webhook::WebhookNotifier;

use async_trait::async_trait;

use crate::ports::{Notifier, NotifyError};

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        tracing::warn!(subject, "{}", message);
        Ok(())
    }
}

/// Alert transport selected from configuration
#[derive(Debug, Clone)]
pub enum AlertNotifier {
    Log(LogNotifier),
    Webhook(WebhookNotifier),
}

impl AlertNotifier {
    /// Webhook when a URL is configured, log-only otherwise
    pub fn from_url(url: Option<String>) -> Result<Self, NotifyError> {
        match url.filter(|u| !u.trim().is_empty()) {
            Some(url) => Ok(Self::Webhook(WebhookNotifier::new(url)?)),
            None => Ok(Self::Log(LogNotifier)),
        }
    }
}

#[async_trait]
impl Notifier for AlertNotifier {
    async fn notify(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        match self {
            AlertNotifier::Log(n) => n.notify(subject, message).await,
            AlertNotifier::Webhook(n) => {
                // Keep a local trace even when the webhook is down
                LogNotifier.notify(subject, message).await?;
                n.notify(subject, message).await
            }
        }
    }
}
