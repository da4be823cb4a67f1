use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::widgets::ListState;

use crate::refresh::Refresh;
use crate::source::{AcquisitionError, NewsItem, StageReport};

pub struct App {
    /// Items from the last successful refresh, in feed order.
    pub items: Vec<NewsItem>,
    /// Set when the last refresh could not obtain a feed.
    pub error: Option<AcquisitionError>,
    /// Stages run by the last refresh.
    pub trail: Vec<StageReport>,
    pub last_refresh: Option<DateTime<Local>>,
    /// Feed being shown, for the diagnostics panel.
    pub feed_url: String,
    /// Channel title reported by the last refresh.
    pub feed_title: Option<String>,
    pub cache_ttl: Duration,
    /// Where tracing output goes, if logging could be set up.
    pub log_path: Option<PathBuf>,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Set by input; the main loop runs a refresh and clears it.
    pub refresh_requested: bool,
    /// Last refresh status message.
    pub status: String,
}

impl App {
    pub fn new(feed_url: impl Into<String>, cache_ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            error: None,
            trail: Vec::new(),
            last_refresh: None,
            feed_url: feed_url.into(),
            feed_title: None,
            cache_ttl,
            log_path: None,
            list_state: ListState::default(),
            quit: false,
            refresh_requested: true,
            status: "Starting…".into(),
        }
    }

    pub fn with_log_path(mut self, path: Option<PathBuf>) -> Self {
        self.log_path = path;
        self
    }

    /// Replace the displayed news with the outcome of a refresh.
    ///
    /// Items are taken as-is; their order is the feed's.
    pub fn apply(&mut self, refresh: Refresh) {
        self.trail = refresh.trail;
        self.feed_title = refresh.feed_title;
        self.last_refresh = Some(refresh.at);

        match refresh.items {
            Ok(items) => {
                self.status = if items.is_empty() {
                    "No news items available right now".into()
                } else {
                    format!("Fetched {} items", items.len())
                };
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                self.status = format!("Error: {err}");
                self.items.clear();
                self.error = Some(err);
            }
        }

        self.list_state
            .select(if self.items.is_empty() { None } else { Some(0) });
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// The item under the cursor.
    pub fn selected_item(&self) -> Option<&NewsItem> {
        self.list_state.selected().and_then(|i| self.items.get(i))
    }

    /// True when the diagnostics panel should explain why there is no news.
    pub fn needs_diagnostics(&self) -> bool {
        self.last_refresh.is_some() && (self.error.is_some() || self.items.is_empty())
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(self.items.len() - 1));
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::source::{FetchError, Stage, StageOutcome};

    pub fn item(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            link: format!("https://example.com/{}", title.to_lowercase()),
            published: "Mon, 06 Oct 2025 10:30:00 GMT".to_string(),
            summary: format!("About {title}"),
        }
    }

    pub fn refresh(items: Result<Vec<NewsItem>, AcquisitionError>) -> Refresh {
        Refresh {
            items,
            trail: vec![StageReport {
                stage: Stage::Primary,
                cached: false,
                outcome: StageOutcome::Empty { malformed: None },
            }],
            feed_title: None,
            at: Local::now(),
        }
    }

    pub fn sample_items() -> Vec<NewsItem> {
        vec![item("Old"), item("Mid"), item("New")]
    }

    pub fn new_app() -> App {
        App::new("https://news.example.com/rss", Duration::from_secs(60))
    }

    pub fn loaded_app() -> App {
        let mut app = new_app();
        app.apply(refresh(Ok(sample_items())));
        app
    }

    fn timeout() -> AcquisitionError {
        AcquisitionError {
            source: FetchError::Timeout("operation timed out".into()),
        }
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_empty_and_wants_a_refresh() {
        let app = new_app();
        assert!(app.items.is_empty());
        assert!(!app.quit);
        assert!(app.refresh_requested);
        assert!(app.list_state.selected().is_none());
        assert!(!app.needs_diagnostics(), "nothing to diagnose before the first refresh");
    }

    // -- apply ---------------------------------------------------------------

    #[test]
    fn apply_keeps_feed_order() {
        let app = loaded_app();

        let titles: Vec<&str> = app.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Old", "Mid", "New"]);
        assert_eq!(app.status, "Fetched 3 items");
        assert_eq!(app.list_state.selected(), Some(0));
        assert!(app.last_refresh.is_some());
        assert_eq!(app.trail.len(), 1);
    }

    #[test]
    fn apply_takes_feed_title_from_refresh() {
        let mut app = new_app();
        app.apply(Refresh {
            feed_title: Some("Election Desk".into()),
            ..refresh(Ok(sample_items()))
        });
        assert_eq!(app.feed_title.as_deref(), Some("Election Desk"));

        app.apply(refresh(Err(timeout())));
        assert!(app.feed_title.is_none());
    }

    #[test]
    fn apply_replaces_rather_than_merges() {
        let mut app = loaded_app();
        app.apply(refresh(Ok(vec![item("Only")])));

        assert_eq!(app.items.len(), 1);
        assert_eq!(app.items[0].title, "Only");
    }

    #[test]
    fn apply_empty_feed_is_not_an_error() {
        let mut app = new_app();
        app.apply(refresh(Ok(vec![])));

        assert!(app.error.is_none());
        assert!(app.needs_diagnostics());
        assert_eq!(app.status, "No news items available right now");
        assert!(app.list_state.selected().is_none());
    }

    #[test]
    fn apply_error_clears_items_and_keeps_error() {
        let mut app = loaded_app();
        app.apply(refresh(Err(timeout())));

        assert!(app.items.is_empty());
        assert_eq!(app.error.as_ref().map(|e| e.kind()), Some("timeout"));
        assert!(app.status.starts_with("Error: "));
        assert!(app.needs_diagnostics());
    }

    #[test]
    fn success_after_error_clears_error() {
        let mut app = new_app();
        app.apply(refresh(Err(timeout())));
        app.apply(refresh(Ok(sample_items())));

        assert!(app.error.is_none());
        assert!(!app.needs_diagnostics());
    }

    #[test]
    fn selected_item_follows_cursor() {
        let mut app = loaded_app();
        assert_eq!(app.selected_item().map(|i| i.title.as_str()), Some("Old"));

        app.select_next();
        assert_eq!(app.selected_item().map(|i| i.title.as_str()), Some("Mid"));
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn navigation_on_empty_is_noop() {
        let mut app = new_app();
        app.select_next();
        app.select_previous();
        app.select_first();
        app.select_last();
        assert!(app.list_state.selected().is_none());
    }

    #[test]
    fn select_next_advances_and_clamps() {
        let mut app = loaded_app();

        app.select_next();
        assert_eq!(app.list_state.selected(), Some(1));

        app.select_next();
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[test]
    fn select_next_from_nothing_starts_at_zero() {
        let mut app = loaded_app();
        app.list_state.select(None);

        app.select_next();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn select_previous_moves_up_and_clamps() {
        let mut app = loaded_app();

        app.select_last();
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(1));

        app.select_first();
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn select_first_and_last_jump() {
        let mut app = loaded_app();

        app.select_last();
        assert_eq!(app.list_state.selected(), Some(2));

        app.select_first();
        assert_eq!(app.list_state.selected(), Some(0));
    }
}
