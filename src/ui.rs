//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## Layout
//!
//! ```text
//! ┌ News ──────────────────────────┐┌ Diagnostics ──┐
//! │ list of headlines              ││ cache window  │
//! ├ Selected ──────────────────────┤│ stage trail   │
//! │ title / link / date / summary  ││ error, hints  │
//! └────────────────────────────────┘└───────────────┘
//! ┌ Sample constituency data ──┐┌ Vote comparison ──┐
//! └────────────────────────────┘└───────────────────┘
//!  status bar
//! ```

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Cell, List, ListItem, Paragraph, Row, Table,
        Wrap,
    },
    Frame,
};

use crate::app::App;
use crate::sample::{leader, party_color, SAMPLE_RESULTS};

/// Shown when the feed produced nothing.
const NO_NEWS_REASONS: [&str; 3] = [
    "Temporary feed unavailability",
    "Network egress blocked from the host",
    "Remote endpoint changed or rate limited",
];

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [top_area, sample_area, status_area] = Layout::vertical([
        Constraint::Min(8),
        Constraint::Length(10),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [news_area, diag_area] =
        Layout::horizontal([Constraint::Percentage(68), Constraint::Percentage(32)])
            .areas(top_area);

    let [list_area, detail_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(7)]).areas(news_area);

    draw_news_list(app, frame, list_area);
    draw_detail(app, frame, detail_area);
    draw_diagnostics(app, frame, diag_area);
    draw_sample(frame, sample_area);
    draw_status_bar(app, frame, status_area);
}

/// Headlines, one per line, in feed order.
fn draw_news_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default().title(" News ").borders(Borders::ALL);

    if app.items.is_empty() {
        let text = if app.last_refresh.is_none() {
            "Fetching news…"
        } else {
            "No news items available right now."
        };
        let placeholder = Paragraph::new(Line::styled(text, Style::default().fg(Color::DarkGray)))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let list_items: Vec<ListItem> = app
        .items
        .iter()
        .map(|item| {
            let title = if item.title.is_empty() {
                "(untitled)"
            } else {
                item.title.as_str()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<31}", truncate(&item.published, 31)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(title, Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Title, link, timestamp and summary of the selected item.
fn draw_detail(app: &App, frame: &mut Frame, area: Rect) {
    let mut lines = Vec::new();

    if let Some(item) = app.selected_item() {
        lines.push(Line::styled(
            item.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        if !item.link.is_empty() {
            lines.push(Line::styled(item.link.clone(), Style::default().fg(Color::Cyan)));
        }
        if !item.published.is_empty() {
            lines.push(Line::styled(
                format!("Published: {}", item.published),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        }
        if !item.summary.is_empty() {
            lines.push(Line::raw(item.summary.clone()));
        }
    }

    let detail = Paragraph::new(lines)
        .block(Block::default().title(" Selected ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(detail, area);
}

/// Feed URL, cache window, stage trail and, when there is no news, the reason why.
fn draw_diagnostics(app: &App, frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();
    if let Some(title) = &app.feed_title {
        lines.push(Line::styled(
            format!("Feed: {title}"),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    lines.extend([
        Line::styled(app.feed_url.clone(), dim),
        Line::styled(format!("Cached for {}s", app.cache_ttl.as_secs()), dim),
        Line::styled(
            match app.last_refresh {
                Some(at) => format!("Refreshed {}", at.format("%H:%M:%S")),
                None => "Not refreshed yet".to_string(),
            },
            dim,
        ),
    ]);

    for report in &app.trail {
        lines.push(Line::raw(format!("• {report}")));
    }

    if let Some(err) = &app.error {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("Error ({})", err.kind()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::styled(err.message(), Style::default().fg(Color::Red)));
    }

    if app.needs_diagnostics() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Possible reasons:",
            Style::default().fg(Color::Yellow),
        ));
        for reason in NO_NEWS_REASONS {
            lines.push(Line::raw(format!("- {reason}")));
        }
        if let Some(path) = &app.log_path {
            lines.push(Line::raw(format!("- Check the log: {}", path.display())));
        }
    }

    let diagnostics = Paragraph::new(lines)
        .block(Block::default().title(" Diagnostics ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(diagnostics, area);
}

/// Static demo table and bar chart.
fn draw_sample(frame: &mut Frame, area: Rect) {
    let [table_area, chart_area] =
        Layout::horizontal([Constraint::Length(40), Constraint::Min(20)]).areas(area);

    let rows = SAMPLE_RESULTS.iter().map(|r| {
        Row::new(vec![
            Cell::from(r.constituency),
            Cell::from(r.party).style(Style::default().fg(party_color(r.party))),
            Cell::from(r.votes.to_string()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(7),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["Constituency", "Party", "Votes"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .title(" Sample constituency data (demo) ")
            .borders(Borders::ALL),
    );
    frame.render_widget(table, table_area);

    let bars: Vec<Bar> = SAMPLE_RESULTS
        .iter()
        .map(|r| {
            Bar::default()
                .value(r.votes)
                .text_value(format!("{}k", r.votes / 1000))
                .label(Line::from(r.constituency))
                .style(Style::default().fg(party_color(r.party)))
        })
        .collect();
    let title = match leader(&SAMPLE_RESULTS) {
        Some(top) => format!(" Vote comparison (demo) · lead: {} ", top.constituency),
        None => " Vote comparison (demo) ".to_string(),
    };
    let chart = BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(11)
        .bar_gap(2);
    frame.render_widget(chart, chart_area);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!("{} items", app.items.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  q: quit  r: refresh  ↑/↓: scroll  Home/End: jump"),
    ]));
    frame.render_widget(status, area);
}

/// At most `max` characters of `s`.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
