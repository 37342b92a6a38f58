//! RSS 2.0 document model, `rss > channel > item*`.
//!
//! Filled by [`crate::sources::parse_feed`]. Only the un-prefixed `title`, `link`
//! and `category` children of an item are read; extension elements such as
//! `atom:link` or `itunes:title` are skipped.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    pub channel: Channel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Channel {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub link: String,
    pub categories: Vec<Category>,
}

/// Text content of a `<category>` element, CDATA already unwrapped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub term: String,
}

impl Category {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_string(),
        }
    }

    /// Exact, case-sensitive comparison after trimming surrounding whitespace
    pub fn matches(&self, tag: &str) -> bool {
        self.term.trim() == tag
    }
}

impl Item {
    pub fn new(title: &str, link: &str, categories: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            link: link.to_string(),
            categories: categories.iter().map(|c| Category::new(c)).collect(),
        }
    }

    pub fn has_category(&self, tag: &str) -> bool {
        self.categories.iter().any(|c| c.matches(tag))
    }
}

impl Feed {
    pub fn items(&self) -> &[Item] {
        &self.channel.items
    }
}
