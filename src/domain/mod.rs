pub mod feed;
pub mod entry;
pub mod notification;

pub use feed::{Category, Channel, Feed, Item};
pub use entry::{filter_entries, FilteredEntry, UNTITLED};
pub use notification::Digest;
