use std::time::Duration;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use reqwest::blocking::Client;

use crate::domain::{Category, Channel, Feed, Item};
use crate::errors::{DigestError, DigestResult};
use crate::sources::traits::FeedSource;

pub struct RssSource {
    client: Client,
}

impl RssSource {
    pub fn new(timeout: Duration) -> DigestResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DigestError::Fetch(e.to_string()))?;

        Ok(Self { client })
    }

    fn fetch_bytes(&self, url: &str) -> DigestResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| DigestError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DigestError::Fetch(format!(
                "HTTP {} when fetching {}",
                status, url
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| DigestError::Fetch(format!("reading body of {}: {}", url, e)))?;

        Ok(bytes.to_vec())
    }
}

impl FeedSource for RssSource {
    fn fetch_feed(&self, url: &str) -> DigestResult<Feed> {
        let bytes = self.fetch_bytes(url)?;
        parse_feed(&bytes)
    }
}

/// Parse an RSS document.
///
/// Elements are matched on their qualified name, so `atom:link` never fills an
/// item's `link`. When an item repeats `title` or `link`, the first non-empty
/// value wins. Text and CDATA content are concatenated as-is.
pub fn parse_feed(xml: &[u8]) -> DigestResult<Feed> {
    let mut reader = Reader::from_reader(xml);
    let mut builder = FeedBuilder::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => builder.open(&e)?,
            Ok(Event::Empty(e)) => {
                builder.open(&e)?;
                builder.close();
            }
            Ok(Event::End(_)) => builder.close(),
            Ok(Event::Text(e)) => {
                if builder.capturing() {
                    let text = e.unescape().map_err(parse_error)?;
                    builder.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if builder.capturing() {
                    let text = std::str::from_utf8(&e)
                        .map_err(|e| DigestError::FeedParse(format!("CDATA is not valid UTF-8: {}", e)))?;
                    builder.text.push_str(text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(e)),
            _ => {}
        }
        buf.clear();
    }

    builder.finish()
}

fn parse_error(e: impl std::fmt::Display) -> DigestError {
    DigestError::FeedParse(format!("XML parse error: {}", e))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Category,
}

// Paths: [rss] > [rss, channel] > [rss, channel, item] > [.., field]
#[derive(Default)]
struct FeedBuilder {
    path: Vec<String>,
    root_seen: bool,
    items: Vec<Item>,
    item: Option<Item>,
    field: Option<Field>,
    text: String,
}

impl FeedBuilder {
    fn capturing(&self) -> bool {
        self.field.is_some() && self.path.len() == 4
    }

    fn open(&mut self, e: &BytesStart) -> DigestResult<()> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        match self.path.len() {
            0 if self.root_seen => {
                return Err(DigestError::FeedParse(format!(
                    "unexpected second root element <{}>",
                    name
                )));
            }
            0 if name != "rss" => {
                return Err(DigestError::FeedParse(format!(
                    "expected <rss> root element, found <{}>",
                    name
                )));
            }
            0 => self.root_seen = true,
            2 if self.path[1] == "channel" && name == "item" => {
                self.item = Some(Item::default());
            }
            3 if self.item.is_some() => {
                self.field = match name.as_str() {
                    "title" => Some(Field::Title),
                    "link" => Some(Field::Link),
                    "category" => Some(Field::Category),
                    _ => None,
                };
                self.text.clear();
            }
            _ => {}
        }

        self.path.push(name);
        Ok(())
    }

    fn close(&mut self) {
        let name = self.path.pop();

        match self.path.len() {
            3 => {
                if let (Some(field), Some(item)) = (self.field.take(), self.item.as_mut()) {
                    let text = std::mem::take(&mut self.text);
                    match field {
                        Field::Title if item.title.trim().is_empty() => item.title = text,
                        Field::Link if item.link.trim().is_empty() => item.link = text,
                        Field::Category => item.categories.push(Category { term: text }),
                        _ => {}
                    }
                }
            }
            2 if name.as_deref() == Some("item") => {
                if let Some(item) = self.item.take() {
                    self.items.push(item);
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> DigestResult<Feed> {
        if !self.root_seen {
            return Err(DigestError::FeedParse(
                "document has no <rss> root element".to_string(),
            ));
        }
        if let Some(open) = self.path.last() {
            return Err(DigestError::FeedParse(format!(
                "unexpected end of document inside <{}>",
                open
            )));
        }

        Ok(Feed {
            channel: Channel { items: self.items },
        })
    }
}
