//! The feed-parsing capability.
//!
//! [`parse_feed`] turns a raw response body into a [`ParsedFeed`].  It never
//! fails: a payload that cannot be read comes back as an empty feed with the
//! malformed flag set, and the caller decides what that means.
//!
//! RSS 2.0 is read with the [`rss`] crate, which is what Google News serves.
//! Anything else (Atom, RSS 1.0, JSON Feed) is handed to [`feed_rs`].

use rss::validation::Validate;

use super::ParseError;

/// One entry as the parser saw it, before normalisation.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
    pub summary: Option<String>,
}

/// A best-effort parse of a feed document.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ParsedFeed {
    /// Channel / feed title, if the document had one.
    pub title: Option<String>,
    /// Entries in document order.
    pub entries: Vec<RawEntry>,
    /// Set when the document was not a valid feed.  Entries that could be
    /// recovered are still present.
    pub malformed: Option<ParseError>,
}

impl ParsedFeed {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a raw payload as RSS, falling back to the other feed formats.
pub fn parse_feed(body: &[u8]) -> ParsedFeed {
    match rss::Channel::read_from(body) {
        Ok(channel) => from_channel(&channel),
        Err(rss_err) => match feed_rs::parser::parse(body) {
            Ok(feed) => from_feed_rs(feed),
            Err(err) => {
                tracing::debug!(rss = %rss_err, other = %err, "payload is not a feed");
                ParsedFeed {
                    title: None,
                    entries: Vec::new(),
                    malformed: Some(ParseError::new(err.to_string())),
                }
            }
        },
    }
}

/// Convert an already-read [`rss::Channel`].
///
/// This is a pure function (no I/O) so that tests can exercise extraction
/// without hitting the network.
pub fn from_channel(channel: &rss::Channel) -> ParsedFeed {
    let entries = channel
        .items()
        .iter()
        .map(|item| RawEntry {
            title: item.title().map(String::from),
            link: item.link().map(String::from),
            published: item.pub_date().map(String::from),
            // <dc:date> is the only "last modified" an RSS item can carry.
            updated: item
                .dublin_core_ext()
                .and_then(|dc| dc.dates().first().cloned()),
            summary: item.description().map(String::from),
        })
        .collect();

    // A channel that reads but does not validate (bad dates, bad URLs) is
    // still usable; flag it instead of discarding it.
    let malformed = channel
        .validate()
        .err()
        .map(|err| ParseError::new(err.to_string()));

    let title = channel.title();
    ParsedFeed {
        title: (!title.is_empty()).then(|| title.to_string()),
        entries,
        malformed,
    }
}

fn from_feed_rs(feed: feed_rs::model::Feed) -> ParsedFeed {
    let entries = feed
        .entries
        .into_iter()
        .map(|entry| {
            let link = entry
                .links
                .iter()
                .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
                .or_else(|| entry.links.first())
                .map(|l| l.href.clone());

            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body));

            RawEntry {
                title: entry.title.map(|t| t.content),
                link,
                published: entry.published.map(|d| d.to_rfc3339()),
                updated: entry.updated.map(|d| d.to_rfc3339()),
                summary,
            }
        })
        .collect();

    ParsedFeed {
        title: feed.title.map(|t| t.content),
        entries,
        malformed: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
