//! The normalised record handed to the UI.
//!
//! `NewsItem` is what the rest of the application sees of a feed: four
//! display strings per entry.  Every field may be empty; the UI decides how
//! to render a missing value.
//!
//! ## For contributors
//!
//! Items stay in the order the feed supplied them, one per source entry.
//! There is no [`Ord`] impl; do not sort them.

use super::RawEntry;

/// A single news entry, normalised from a parsed feed.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct NewsItem {
    /// Headline text.
    pub title: String,

    /// URL of the full article.
    pub link: String,

    /// Publication timestamp as supplied by the feed.
    ///
    /// Taken from the entry's "published" value, or its "updated" value when
    /// the feed gives no publication date.
    pub published: String,

    /// Summary or description text.
    pub summary: String,
}

impl NewsItem {
    /// Extract display fields from a raw entry.
    pub fn from_entry(entry: &RawEntry) -> Self {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();

        Self {
            title: text(&entry.title),
            link: text(&entry.link),
            published: entry
                .published
                .clone()
                .or_else(|| entry.updated.clone())
                .unwrap_or_default(),
            summary: text(&entry.summary),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
