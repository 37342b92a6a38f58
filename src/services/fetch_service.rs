use crate::domain::{filter_entries, FilteredEntry};
use crate::errors::DigestResult;
use crate::sources::FeedSource;

/// Result of one fetch: how many items the feed held and which were selected
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub total_items: usize,
    pub entries: Vec<FilteredEntry>,
}

pub struct FetchService<S: FeedSource> {
    source: S,
    feed_url: String,
    category: String,
}

impl<S: FeedSource> FetchService<S> {
    pub fn new(source: S, feed_url: &str, category: &str) -> Self {
        Self {
            source,
            feed_url: feed_url.to_string(),
            category: category.to_string(),
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Fetch the feed and keep the items tagged with the configured category
    pub fn fetch_entries(&self) -> DigestResult<FetchResult> {
        let feed = self.source.fetch_feed(&self.feed_url)?;
        let entries = filter_entries(&feed, &self.category);

        Ok(FetchResult {
            total_items: feed.items().len(),
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Channel, Feed, Item};
    use crate::errors::DigestError;
    use crate::sources::traits::MockFeedSource;
    use mockall::predicate::eq;

    #[test]
    fn test_fetch_entries_filters_by_category() {
        let mut source = MockFeedSource::new();
        source
            .expect_fetch_feed()
            .with(eq("https://example.com/feed"))
            .times(1)
            .returning(|_| {
                Ok(Feed {
                    channel: Channel {
                        items: vec![
                            Item::new("A", "http://x/a", &["dns"]),
                            Item::new("B", "http://x/b", &["other"]),
                            Item::new("C", "", &["dns"]),
                        ],
                    },
                })
            });

        let service = FetchService::new(source, "https://example.com/feed", "dns");
        let result = service.fetch_entries().unwrap();

        assert_eq!(result.total_items, 3);
        assert_eq!(result.entries, vec![FilteredEntry::new("A", "http://x/a")]);
    }

    #[test]
    fn test_fetch_error_produces_no_entries() {
        let mut source = MockFeedSource::new();
        source
            .expect_fetch_feed()
            .returning(|url| Err(DigestError::Fetch(format!("HTTP 503 when fetching {}", url))));

        let service = FetchService::new(source, "https://example.com/feed", "dns");
        let err = service.fetch_entries().unwrap_err();

        assert!(matches!(err, DigestError::Fetch(ref msg) if msg.contains("503")));
    }
}
