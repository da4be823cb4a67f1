//! Feed acquisition.
//!
//! This module fetches one news feed and turns it into [`NewsItem`]s.  The
//! pipeline runs strictly downward:
//!
//! ```text
//! FeedAcquirer::acquire ──► RawParseResult ──► normalize ──► Vec<NewsItem>
//!   primary ─┐                                     │
//!   fallback ┘ (cache per stage + URL)             └─► AcquisitionError
//! ```
//!
//! * [`http`]: the [`Transport`] seam and its reqwest implementation.
//! * [`parse`]: bytes to [`ParsedFeed`], never failing.
//! * [`cache`]: the TTL memo the acquirer owns.
//! * [`acquire`]: primary / fallback stages and the policy between them.
//! * [`normalize`]: the only place a failure becomes user-visible.
//!
//! ## For contributors
//!
//! Network and parse errors are values here, not early returns.  If you add
//! a stage, capture its errors into [`RawParseResult::Failed`] and let
//! [`normalize`] decide what to surface.

mod acquire;
mod cache;
mod error;
mod http;
mod news_item;
mod normalize;
mod parse;

// Re-export the public API of this module so callers can write
// `use crate::source::{FeedAcquirer, FeedRequest, normalize};`
pub use acquire::{
    Acquisition, CacheKey, FeedAcquirer, FeedRequest, RawParseResult, Stage, StageOutcome,
    StageReport, DEFAULT_CACHE_TTL, DEFAULT_EDITION, DEFAULT_LANGUAGE, DEFAULT_QUERY,
    DEFAULT_REGION, DEFAULT_TIMEOUT,
};
pub use cache::TtlCache;
pub use error::{AcquisitionError, FetchError, ParseError};
pub use http::{HttpGet, HttpResponse, HttpTransport, Transport, BROWSER_USER_AGENT};
pub use news_item::NewsItem;
pub use normalize::normalize;
pub use parse::{parse_feed, ParsedFeed, RawEntry};

#[cfg(test)]
pub(crate) use acquire::tests as testing;
