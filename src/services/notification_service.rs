use webhook::{Message, WebhookClient, WebhookError, WebhookResponse};

use crate::config::{validate_webhook_url, Config};
use crate::domain::{Digest, FilteredEntry};
use crate::errors::{DigestError, DigestResult};

/// Transport used to post a message to a webhook URL
#[cfg_attr(test, mockall::automock)]
pub trait WebhookSender {
    fn post(&self, url: &str, message: &Message) -> Result<WebhookResponse, WebhookError>;
}

impl WebhookSender for WebhookClient {
    fn post(&self, url: &str, message: &Message) -> Result<WebhookResponse, WebhookError> {
        WebhookClient::post(self, url, message)
    }
}

/// How a delivery attempt ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Nothing to send, no request was made
    Skipped,
    /// Webhook answered 2xx with `ok`
    Confirmed { status: u16 },
    /// Webhook answered 2xx with some other body
    Unconfirmed { status: u16, body: String },
}

pub struct NotificationService<W: WebhookSender> {
    sender: W,
    webhook_url: Option<String>,
    header: String,
    category: String,
}

impl NotificationService<WebhookClient> {
    pub fn from_config(config: &Config) -> DigestResult<Self> {
        let client = WebhookClient::new(config.webhook_timeout)?;
        Ok(Self::new(
            client,
            config.webhook_url.clone(),
            &config.header,
            &config.category,
        ))
    }
}

impl<W: WebhookSender> NotificationService<W> {
    pub fn new(sender: W, webhook_url: Option<String>, header: &str, category: &str) -> Self {
        Self {
            sender,
            webhook_url,
            header: header.to_string(),
            category: category.to_string(),
        }
    }

    pub fn message(&self, entries: &[FilteredEntry]) -> Message {
        Digest::new(&self.header, &self.category, entries).to_message()
    }

    /// Post the digest for `entries` to the configured webhook
    pub fn send(&self, entries: &[FilteredEntry]) -> DigestResult<DeliveryOutcome> {
        let url = self
            .webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| DigestError::Config("SLACK_WEBHOOK_URL is not configured".to_string()))?;

        if entries.is_empty() {
            return Ok(DeliveryOutcome::Skipped);
        }

        validate_webhook_url(url)?;

        let message = self.message(entries);
        let response = self.sender.post(url, &message)?;

        if response.is_acknowledged() {
            Ok(DeliveryOutcome::Confirmed {
                status: response.status,
            })
        } else {
            Ok(DeliveryOutcome::Unconfirmed {
                status: response.status,
                body: response.body,
            })
        }
    }
}
