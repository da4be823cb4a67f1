//! Turn a stage result into display records.

use super::{AcquisitionError, NewsItem, RawParseResult};

/// Convert the final [`RawParseResult`] into [`NewsItem`]s.
///
/// * A captured failure becomes an [`AcquisitionError`] so the UI can show
///   diagnostics instead of silently rendering nothing.
/// * A feed with no entries is `Ok(vec![])`: "no news right now" is not an
///   error.
/// * Otherwise there is exactly one item per entry, in feed order.
///
/// Pure; calling it twice on the same input yields the same sequence.
pub fn normalize(result: &RawParseResult) -> Result<Vec<NewsItem>, AcquisitionError> {
    match result {
        RawParseResult::Failed(err) => Err(AcquisitionError {
            source: err.clone(),
        }),
        RawParseResult::Feed(feed) => Ok(feed.entries.iter().map(NewsItem::from_entry).collect()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::{acquirer, ok, ScriptedTransport, TWO_ITEMS};
    use crate::source::{FeedRequest, FetchError, ParsedFeed, RawEntry};

    fn titled(title: &str) -> RawEntry {
        RawEntry {
            title: Some(title.into()),
            ..RawEntry::default()
        }
    }

    fn feed(entries: Vec<RawEntry>) -> RawParseResult {
        RawParseResult::Feed(ParsedFeed {
            entries,
            ..ParsedFeed::default()
        })
    }

    #[test]
    fn preserves_entry_order() {
        let items = normalize(&feed(vec![titled("A"), titled("B"), titled("C")])).unwrap();

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[test]
    fn empty_feed_is_empty_sequence() {
        assert!(normalize(&feed(vec![])).unwrap().is_empty());
    }

    #[test]
    fn empty_entries_are_kept_as_blank_items() {
        let items = normalize(&feed(vec![titled("A"), RawEntry::default(), titled("C")])).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[1], NewsItem::default());
        assert_eq!(items[2].title, "C");
    }

    #[test]
    fn updated_fills_missing_published() {
        let entry = RawEntry {
            updated: Some("2025-10-06T10:30:00+00:00".into()),
            ..RawEntry::default()
        };
        let items = normalize(&feed(vec![entry])).unwrap();

        assert_eq!(items[0].published, "2025-10-06T10:30:00+00:00");
    }

    #[test]
    fn failure_surfaces_kind_and_message() {
        let err = normalize(&RawParseResult::Failed(FetchError::Status { code: 429 })).unwrap_err();

        assert_eq!(err.kind(), "status");
        assert_eq!(err.message(), "server returned HTTP 429");
    }

    #[test]
    fn malformed_feed_with_entries_still_normalises() {
        let result = RawParseResult::Feed(ParsedFeed {
            entries: vec![titled("Partial")],
            malformed: Some(crate::source::ParseError::new("bad date")),
            ..ParsedFeed::default()
        });

        assert_eq!(normalize(&result).unwrap()[0].title, "Partial");
    }

    #[test]
    fn is_restartable() {
        let result = feed(vec![titled("A"), titled("B")]);
        assert_eq!(normalize(&result), normalize(&result));
    }

    // -- end to end through the acquirer -------------------------------------

    #[test]
    fn live_feed_titles_come_through_verbatim() {
        let transport = ScriptedTransport::new(ok(TWO_ITEMS), ok(TWO_ITEMS));
        let acq = acquirer(&transport);

        let acquisition = acq.acquire(&FeedRequest::new("https://news.example.com/rss"));
        let items = normalize(&acquisition.result).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Bihar polls: Phase 1");
        assert_eq!(items[0].link, "https://example.com/phase-1");
        assert_eq!(items[0].published, "Thu, 06 Nov 2025 05:00:00 GMT");
        assert_eq!(items[0].summary, "Voting begins");
        assert_eq!(items[1].title, "EC announces schedule");
        assert_eq!(items[1].summary, "");
    }

    #[test]
    fn reset_then_timeout_fails_with_timeout_message() {
        let transport = ScriptedTransport::new(
            Err(FetchError::Connect("connection reset by peer".into())),
            Err(FetchError::Timeout("operation timed out after 15s".into())),
        );
        let acq = acquirer(&transport);

        let acquisition = acq.acquire(&FeedRequest::new("https://news.example.com/rss"));
        let err = normalize(&acquisition.result).unwrap_err();

        assert_eq!(transport.fallback_calls(), 1);
        assert_eq!(err.kind(), "timeout");
        assert!(err.message().contains("operation timed out after 15s"));
    }
}
