use webhook::{Block, Message};

use super::FilteredEntry;

/// Digest of filtered entries, rendered as a Slack Block Kit message
#[derive(Debug, Clone)]
pub struct Digest<'a> {
    pub header: &'a str,
    /// Category the entries were selected by, used in the fallback text
    pub category: &'a str,
    pub entries: &'a [FilteredEntry],
}

impl<'a> Digest<'a> {
    pub fn new(header: &'a str, category: &'a str, entries: &'a [FilteredEntry]) -> Self {
        Self {
            header,
            category,
            entries,
        }
    }

    /// Header, divider, then one `• <link|title>` section per entry
    pub fn blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(self.entries.len() + 2);
        blocks.push(Block::header(self.header));
        blocks.push(Block::divider());

        for entry in self.entries {
            blocks.push(Block::section(&format!("• {}", entry.markdown_link())));
        }

        blocks
    }

    /// Format: "{count} new {category} articles. First: <link|title>"
    pub fn fallback_text(&self) -> String {
        match self.entries.first() {
            Some(first) => format!(
                "{} new {} articles. First: {}",
                self.entries.len(),
                self.category,
                first.markdown_link()
            ),
            None => format!("No new {} articles.", self.category),
        }
    }

    pub fn to_message(&self) -> Message {
        Message {
            blocks: self.blocks(),
            text: self.fallback_text(),
        }
    }
}
