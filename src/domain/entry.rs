use serde::{Deserialize, Serialize};

use super::{Feed, Item};

/// Title used when a matching item has a blank title
pub const UNTITLED: &str = "Untitled Article";

/// Projection of a feed item selected for the digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredEntry {
    pub title: String,
    pub link: String,
}

impl FilteredEntry {
    pub fn new(title: &str, link: &str) -> Self {
        Self {
            title: title.to_string(),
            link: link.to_string(),
        }
    }

    /// Project an item, returning `None` when it has no link.
    /// Blank titles are replaced with [`UNTITLED`].
    pub fn from_item(item: &Item) -> Option<Self> {
        let link = item.link.trim();
        if link.is_empty() {
            return None;
        }

        let title = match item.title.trim() {
            "" => UNTITLED,
            title => title,
        };

        Some(Self::new(title, link))
    }

    /// Slack mrkdwn hyperlink: `<link|title>`
    pub fn markdown_link(&self) -> String {
        format!("<{}|{}>", self.link, self.title)
    }
}

/// Select items tagged with `tag` and project them, preserving feed order
pub fn filter_entries(feed: &Feed, tag: &str) -> Vec<FilteredEntry> {
    feed.items()
        .iter()
        .filter(|item| item.has_category(tag))
        .filter_map(FilteredEntry::from_item)
        .collect()
}
