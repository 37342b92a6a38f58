//! Slack incoming-webhook bindings for Rust
//! Provides the Block Kit message types and a blocking client that posts them to a webhook URL

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body Slack returns when a webhook message was accepted
pub const OK_BODY: &str = "ok";

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Webhook rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Text object used inside header and section blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub emoji: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    PlainText,
    Mrkdwn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Header,
    Divider,
    Section,
}

/// A single layout block. Dividers carry no text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Text>,
}

impl Block {
    pub fn header(text: &str) -> Self {
        Self {
            kind: BlockKind::Header,
            text: Some(Text {
                kind: TextKind::PlainText,
                text: text.to_string(),
                emoji: true,
            }),
        }
    }

    pub fn divider() -> Self {
        Self {
            kind: BlockKind::Divider,
            text: None,
        }
    }

    pub fn section(markdown: &str) -> Self {
        Self {
            kind: BlockKind::Section,
            text: Some(Text {
                kind: TextKind::Mrkdwn,
                text: markdown.to_string(),
                emoji: false,
            }),
        }
    }
}

/// Block Kit message; `text` is the fallback shown by clients that cannot render blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub blocks: Vec<Block>,
    pub text: String,
}

/// Successful (2xx) webhook response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    /// True when Slack acknowledged the message with its literal `ok` body
    pub fn is_acknowledged(&self) -> bool {
        self.body.trim() == OK_BODY
    }
}

pub struct WebhookClient {
    client: Client,
}

impl WebhookClient {
    pub fn new(timeout: Duration) -> Result<Self, WebhookError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Post a message to the webhook URL.
    ///
    /// Any status of 300 or above is returned as [`WebhookError::Rejected`] with the
    /// response body attached.
    pub fn post(&self, url: &str, message: &Message) -> Result<WebhookResponse, WebhookError> {
        let payload = serde_json::to_vec(message)?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(payload)
            .send()?;

        let status = response.status().as_u16();
        // Body is diagnostic only, a failed read must not mask the status
        let body = response.text().unwrap_or_default();

        if status >= 300 {
            return Err(WebhookError::Rejected { status, body });
        }

        Ok(WebhookResponse { status, body })
    }
}
