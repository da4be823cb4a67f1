//! Feed acquisition with a fallback transport.
//!
//! [`FeedAcquirer::acquire`] runs a small state machine:
//!
//! ```text
//! Primary ──(≥1 entry)──────────────────────────► Done
//!    │
//!    └──(error or no entries)──► Fallback ──────► Done
//! ```
//!
//! The primary stage is a plain GET with no identification header.  Some
//! endpoints block or redirect such requests (hosting-provider IP ranges,
//! missing `User-Agent`), so when it fails or comes back empty the fallback
//! stage retries once with a desktop-browser `User-Agent` and a strict status
//! check.  Whatever the last stage produced is the final result, error or
//! not; deciding whether that is fatal is left to
//! [`normalize`](super::normalize).
//!
//! Each stage's result is memoised per `(stage, url)` for the request's
//! cache window, so a refresh inside that window issues no network calls.

use std::fmt;
use std::time::Duration;

use super::{
    parse_feed, FetchError, HttpGet, ParseError, ParsedFeed, Transport, TtlCache,
    BROWSER_USER_AGENT,
};

/// Default Google News search: the 2025 Bihar Legislative Assembly
/// election, Indian English edition.
pub const DEFAULT_QUERY: &str = "Bihar Election 2025";
pub const DEFAULT_LANGUAGE: &str = "en-IN";
pub const DEFAULT_REGION: &str = "IN";
pub const DEFAULT_EDITION: &str = "IN:en";

const GOOGLE_NEWS_SEARCH: &str = "https://news.google.com/rss/search";

/// Network bound for each stage.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// How long a stage result is served from cache.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Request / result types
// ---------------------------------------------------------------------------

/// What to fetch and how patiently.  Built once per refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

impl FeedRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Google News search feed for `query` in the given language / region.
    ///
    /// `hl` is the interface language (`en-IN`), `gl` the country (`IN`)
    /// and `ceid` the edition (`IN:en`).
    pub fn google_news(query: &str, hl: &str, gl: &str, ceid: &str) -> Result<Self, FetchError> {
        let url = reqwest::Url::parse_with_params(
            GOOGLE_NEWS_SEARCH,
            &[("q", query), ("hl", hl), ("gl", gl), ("ceid", ceid)],
        )
        .map_err(|e| FetchError::Request(format!("invalid feed URL: {e}")))?;
        Ok(Self::new(url))
    }

    /// The dashboard's default feed.
    pub fn default_feed() -> Result<Self, FetchError> {
        Self::google_news(DEFAULT_QUERY, DEFAULT_LANGUAGE, DEFAULT_REGION, DEFAULT_EDITION)
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

/// Outcome of one stage: a parsed feed (possibly empty or malformed) or a
/// captured failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawParseResult {
    Feed(ParsedFeed),
    Failed(FetchError),
}

impl RawParseResult {
    /// Number of entries, zero for a failure.
    pub fn entry_count(&self) -> usize {
        match self {
            RawParseResult::Feed(feed) => feed.entries.len(),
            RawParseResult::Failed(_) => 0,
        }
    }

    pub fn has_entries(&self) -> bool {
        self.entry_count() > 0
    }

    /// Channel title of a parsed feed.
    pub fn feed_title(&self) -> Option<&str> {
        match self {
            RawParseResult::Feed(feed) => feed.title.as_deref(),
            RawParseResult::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Primary,
    Fallback,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Primary => f.write_str("primary"),
            Stage::Fallback => f.write_str("fallback"),
        }
    }
}

/// Cache slot identity: the same URL is cached separately per stage since
/// the two stages send different requests.
pub type CacheKey = (Stage, String);

/// Diagnostic summary of a stage that ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    /// Served from cache without a network call.
    pub cached: bool,
    pub outcome: StageOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Entries {
        count: usize,
        malformed: Option<ParseError>,
    },
    Empty {
        malformed: Option<ParseError>,
    },
    Failed(FetchError),
}

impl StageReport {
    fn new(stage: Stage, cached: bool, result: &RawParseResult) -> Self {
        let outcome = match result {
            RawParseResult::Failed(err) => StageOutcome::Failed(err.clone()),
            RawParseResult::Feed(feed) if feed.is_empty() => StageOutcome::Empty {
                malformed: feed.malformed.clone(),
            },
            RawParseResult::Feed(feed) => StageOutcome::Entries {
                count: feed.entries.len(),
                malformed: feed.malformed.clone(),
            },
        };
        Self {
            stage,
            cached,
            outcome,
        }
    }
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stage)?;
        if self.cached {
            f.write_str(" (cached)")?;
        }
        match &self.outcome {
            StageOutcome::Entries { count, malformed } => {
                write!(f, ": {count} entries")?;
                if let Some(err) = malformed {
                    write!(f, ", {err}")?;
                }
                Ok(())
            }
            StageOutcome::Empty { malformed: None } => f.write_str(": no entries"),
            StageOutcome::Empty {
                malformed: Some(err),
            } => write!(f, ": no entries, {err}"),
            StageOutcome::Failed(err) => write!(f, ": {} error: {err}", err.kind()),
        }
    }
}

/// Final result of [`FeedAcquirer::acquire`] plus the stages that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquisition {
    pub result: RawParseResult,
    pub trail: Vec<StageReport>,
}

impl Acquisition {
    pub fn used_fallback(&self) -> bool {
        self.trail.iter().any(|r| r.stage == Stage::Fallback)
    }
}

// ---------------------------------------------------------------------------
// Acquirer
// ---------------------------------------------------------------------------

enum State {
    Primary,
    Fallback,
    Done(RawParseResult),
}

/// Fetches a feed through a primary and a fallback stage, memoising each.
pub struct FeedAcquirer {
    transport: Box<dyn Transport>,
    cache: TtlCache<CacheKey, RawParseResult>,
}

impl FeedAcquirer {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self::with_cache(transport, TtlCache::new())
    }

    pub fn with_cache(
        transport: Box<dyn Transport>,
        cache: TtlCache<CacheKey, RawParseResult>,
    ) -> Self {
        Self { transport, cache }
    }

    pub fn cache(&self) -> &TtlCache<CacheKey, RawParseResult> {
        &self.cache
    }

    /// Run primary, then fallback if needed, and return the last result.
    pub fn acquire(&self, request: &FeedRequest) -> Acquisition {
        let mut trail = Vec::with_capacity(2);
        let mut state = State::Primary;

        loop {
            state = match state {
                State::Primary => {
                    let (result, cached) = self.run_stage(Stage::Primary, request);
                    trail.push(StageReport::new(Stage::Primary, cached, &result));

                    if result.has_entries() {
                        State::Done(result)
                    } else {
                        match &result {
                            RawParseResult::Failed(err) => {
                                tracing::warn!(url = %request.url, error = %err, "primary fetch failed, trying fallback")
                            }
                            RawParseResult::Feed(_) => {
                                tracing::warn!(url = %request.url, "primary fetch returned no entries, trying fallback")
                            }
                        }
                        State::Fallback
                    }
                }
                State::Fallback => {
                    let (result, cached) = self.run_stage(Stage::Fallback, request);
                    trail.push(StageReport::new(Stage::Fallback, cached, &result));
                    State::Done(result)
                }
                State::Done(result) => {
                    tracing::info!(
                        url = %request.url,
                        entries = result.entry_count(),
                        stages = trail.len(),
                        "acquisition finished"
                    );
                    return Acquisition { result, trail };
                }
            };
        }
    }

    /// Plain GET with no identification header.
    ///
    /// The HTTP status is not checked: whatever body came back is offered
    /// to the parser, and a malformed parse is returned as-is.
    pub fn primary(&self, request: &FeedRequest) -> RawParseResult {
        self.run_stage(Stage::Primary, request).0
    }

    /// Browser-identified GET; any non-2xx status is a failure.
    pub fn fallback(&self, request: &FeedRequest) -> RawParseResult {
        self.run_stage(Stage::Fallback, request).0
    }

    /// Serve `stage` from cache or fetch it.  The flag is true on a hit.
    fn run_stage(&self, stage: Stage, request: &FeedRequest) -> (RawParseResult, bool) {
        let key = (stage, request.url.clone());
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(%stage, url = %request.url, "served from cache");
            return (hit, true);
        }

        tracing::info!(%stage, url = %request.url, "fetching feed");
        let result = match stage {
            Stage::Primary => self.fetch_primary(request),
            Stage::Fallback => self.fetch_fallback(request),
        };

        self.cache.insert(key, result.clone(), request.cache_ttl);
        (result, false)
    }

    fn fetch_primary(&self, request: &FeedRequest) -> RawParseResult {
        let get = HttpGet {
            url: request.url.clone(),
            user_agent: None,
            timeout: request.timeout,
        };
        match self.transport.get(&get) {
            Ok(response) => {
                if !response.is_success() {
                    tracing::debug!(status = response.status, "primary got error status, parsing body anyway");
                }
                RawParseResult::Feed(parse_feed(&response.body))
            }
            Err(err) => RawParseResult::Failed(err),
        }
    }

    fn fetch_fallback(&self, request: &FeedRequest) -> RawParseResult {
        let get = HttpGet {
            url: request.url.clone(),
            user_agent: Some(BROWSER_USER_AGENT.to_string()),
            timeout: request.timeout,
        };
        match self.transport.get(&get) {
            Ok(response) if response.is_success() => {
                RawParseResult::Feed(parse_feed(&response.body))
            }
            Ok(response) => RawParseResult::Failed(FetchError::Status {
                code: response.status,
            }),
            Err(err) => RawParseResult::Failed(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
