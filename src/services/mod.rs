pub mod fetch_service;
pub mod notification_service;
pub mod digest_service;

pub use fetch_service::{FetchResult, FetchService};
pub use notification_service::{DeliveryOutcome, NotificationService, WebhookSender};
pub use digest_service::{DigestService, RunReport};
