use crate::domain::Feed;
use crate::errors::DigestResult;

#[cfg_attr(test, mockall::automock)]
pub trait FeedSource {
    /// Download and parse the feed at `url`
    fn fetch_feed(&self, url: &str) -> DigestResult<Feed>;
}
