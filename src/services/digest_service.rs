use webhook::Message;

use crate::errors::DigestResult;
use crate::services::fetch_service::FetchService;
use crate::services::notification_service::{DeliveryOutcome, NotificationService, WebhookSender};
use crate::sources::FeedSource;

/// What a run did, for the caller to report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// No items matched, the webhook was not contacted
    NothingToSend { total_items: usize },
    /// Dry run: the message that would have been posted
    DryRun { entries: usize, message: Message },
    Delivered {
        entries: usize,
        outcome: DeliveryOutcome,
    },
}

/// Fetch, filter, then notify
pub struct DigestService<S: FeedSource, W: WebhookSender> {
    fetch_service: FetchService<S>,
    notification_service: NotificationService<W>,
}

impl<S: FeedSource, W: WebhookSender> DigestService<S, W> {
    pub fn new(fetch_service: FetchService<S>, notification_service: NotificationService<W>) -> Self {
        Self {
            fetch_service,
            notification_service,
        }
    }

    pub fn run(&self, dry_run: bool) -> DigestResult<RunReport> {
        tracing::info!(url = %self.fetch_service.feed_url(), "Fetching RSS feed");

        let result = self.fetch_service.fetch_entries()?;

        tracing::info!(
            items = result.total_items,
            matched = result.entries.len(),
            category = %self.fetch_service.category(),
            "Feed fetched"
        );
        for entry in &result.entries {
            tracing::debug!(title = %entry.title, link = %entry.link, "Matched entry");
        }

        if result.entries.is_empty() {
            return Ok(RunReport::NothingToSend {
                total_items: result.total_items,
            });
        }

        if dry_run {
            return Ok(RunReport::DryRun {
                entries: result.entries.len(),
                message: self.notification_service.message(&result.entries),
            });
        }

        tracing::info!(entries = result.entries.len(), "Sending digest to Slack");
        let outcome = self.notification_service.send(&result.entries)?;

        Ok(RunReport::Delivered {
            entries: result.entries.len(),
            outcome,
        })
    }
}
