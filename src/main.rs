//! newsdesk — a terminal dashboard for live election news.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌────────────┐ Refresh ┌──────────┐  draw()  ┌──────────┐
//! │ refresh.rs │ ──────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (blocking) │         │ (state)  │          │ (render) │
//! └────────────┘         └──────────┘          └──────────┘
//!       │                     ▲
//!       ▼                     │ handle_key_event()
//! ┌────────────┐         ┌──────────┐
//! │  source/   │         │ input.rs │
//! └────────────┘         └──────────┘
//! ```
//!
//! * **`source/`** — feed acquisition: primary fetch, fallback fetch with a
//!   browser `User-Agent`, a TTL cache, and normalisation into `NewsItem`s.
//! * **`refresh`** — runs one acquisition on demand (startup and `r`).
//! * **`app`** — owns all application state (items, diagnostics, scroll).
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`sample`** — static demo dataset shown alongside the news.
//! * **`main`** — wires everything together: parse args, set up logging and
//!   the terminal, and run the event loop.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{fmt, EnvFilter};

use newsdesk::app::App;
use newsdesk::source::{FeedAcquirer, FeedRequest, HttpTransport};
use newsdesk::{input, refresh, ui};

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Send tracing output to a file; the terminal belongs to the UI.
///
/// Filter comes from `RUST_LOG`, defaulting to `info`.  If the log file
/// cannot be opened the app runs without logging.  Returns the log path so
/// the diagnostics panel can point at it.
fn init_logging() -> Option<PathBuf> {
    let path = std::env::temp_dir().join("newsdesk.log");
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(log = %path.display(), "logging started");
    Some(path)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let log_path = init_logging();
    install_panic_hook();

    // -- parse arguments -----------------------------------------------------
    // An explicit feed URL overrides the default Google News search.
    let request = match std::env::args().nth(1) {
        Some(url) => FeedRequest::new(url),
        None => FeedRequest::default_feed().context("failed to build default feed URL")?,
    };

    // -- configure acquisition -----------------------------------------------
    let transport = HttpTransport::new().context("failed to build HTTP client")?;
    let acquirer = FeedAcquirer::new(Box::new(transport));

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(&request.url, request.cache_ttl).with_log_path(log_path);

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Run a refresh if one was requested (blocks until done).
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Refresh
        if app.refresh_requested {
            app.refresh_requested = false;
            app.status = "Refreshing…".into();
            guard.terminal.draw(|f| ui::draw(&mut app, f))?;
            app.apply(refresh::run(&acquirer, &request));
        }

        // 2. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
