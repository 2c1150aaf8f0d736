use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::json;
use watch_core::Notification;
use watch_logging::{watch_debug, watch_info, watch_warn};

use crate::NotifyError;

/// Outbound notification channel.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message. Best effort: callers log failures and move on.
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;

    /// Channel name for log lines.
    fn name(&self) -> &str;
}

/// Used when no webhook is configured; `deliver` already logs every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Posts `{"text": message}` to an incoming-webhook URL (Slack shape).
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| NotifyError::ClientSetup(err.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let payload = json!({ "text": message });
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .send()
            .await
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::HttpStatus(status.as_u16()));
        }
        watch_debug!("webhook accepted notification with {}", status);
        Ok(())
    }

    fn name(&self) -> &str {
        "webhook"
    }
}

/// Log a notification locally, then hand it to the channel.
///
/// Delivery errors are logged and swallowed. Returns whether the channel accepted it.
pub async fn deliver(notifier: &dyn Notifier, notification: &Notification) -> bool {
    let message = notification.to_string();
    watch_info!("{}", message);
    match notifier.notify(&message).await {
        Ok(()) => true,
        Err(err) => {
            watch_warn!("Failed to send notification via {}: {}", notifier.name(), err);
            false
        }
    }
}
