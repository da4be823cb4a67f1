//! One refresh cycle.
//!
//! Replaces the old background poller: a refresh runs on the UI thread when
//! the user asks for one (and once at startup).  It blocks for at most two
//! sequential network calls, both bounded by the request timeout, and far
//! less when the acquirer's cache still holds the answer.

use chrono::{DateTime, Local};

use crate::source::{normalize, AcquisitionError, FeedAcquirer, FeedRequest, NewsItem, StageReport};

/// Everything the UI needs from one refresh.
#[derive(Debug, Clone)]
pub struct Refresh {
    pub items: Result<Vec<NewsItem>, AcquisitionError>,
    /// Stages that ran, in order.
    pub trail: Vec<StageReport>,
    /// Channel title of the feed that was used, if it had one.
    pub feed_title: Option<String>,
    pub at: DateTime<Local>,
}

/// Acquire the feed and normalise it.
pub fn run(acquirer: &FeedAcquirer, request: &FeedRequest) -> Refresh {
    acquirer.cache().purge_expired();

    let acquisition = acquirer.acquire(request);
    let items = normalize(&acquisition.result);

    if let Err(err) = &items {
        tracing::error!(url = %request.url, kind = err.kind(), error = %err, "refresh failed");
    }

    Refresh {
        items,
        feed_title: acquisition.result.feed_title().map(String::from),
        trail: acquisition.trail,
        at: Local::now(),
    }
}
