// src/ui/widgets/tabs.rs

use crate::app::App;
use crate::core::locale::Locale;
use crate::core::models::ScannerKind;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs},
};
use strum::IntoEnumIterator;

/// Renders the scanner selector with the locale switch on its right edge.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(14)])
        .split(area);

    let titles: Vec<Line> = ScannerKind::iter()
        .map(|kind| Line::from(app.scanner_title(kind)))
        .collect();
    let selected = ScannerKind::iter().position(|kind| kind == app.scanner).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.t("cyber.threat.analysis")),
        )
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider("|");
    frame.render_widget(tabs, chunks[0]);

    // Active locale is highlighted, the other one dimmed.
    let badges: Vec<Span> = Locale::iter()
        .flat_map(|locale| {
            let style = if locale == app.locale {
                Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::new().fg(Color::DarkGray)
            };
            [Span::styled(locale.badge(), style), Span::raw(" ")]
        })
        .collect();
    let switch = Paragraph::new(Line::from(badges))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(app.t("language")));
    frame.render_widget(switch, chunks[1]);
}
