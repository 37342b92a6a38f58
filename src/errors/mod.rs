use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // Feed errors
    #[error("Feed fetch failed: {0}")]
    Fetch(String),

    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    // Notification errors
    #[error("Webhook delivery failed with status {status}: {body}")]
    Delivery { status: u16, body: String },

    #[error("Webhook request failed: {0}")]
    Webhook(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<webhook::WebhookError> for DigestError {
    fn from(err: webhook::WebhookError) -> Self {
        match err {
            webhook::WebhookError::Rejected { status, body } => {
                DigestError::Delivery { status, body }
            }
            other => DigestError::Webhook(other.to_string()),
        }
    }
}

pub type DigestResult<T> = Result<T, DigestError>;
