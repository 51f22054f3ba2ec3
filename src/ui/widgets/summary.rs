// src/ui/widgets/summary.rs

use crate::app::App;
use crate::core::models::{ScanDetails, VerdictStats};
use crate::core::presenter;
use crate::ui::tone_color;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

/// Renders the summary widget: status badge, safety gauge and the verdict
/// counters. Empty until a result is available.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title(app.t("safety.score"));
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Badge
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Counters
        ])
        .split(area);

    let Some(result) = &app.scan_result else {
        return;
    };

    // --- Badge ---
    let badge = match &result.report {
        ScanDetails::Ip(rep) => presenter::ip_banner(rep.abuse_confidence_score, &app.catalog, app.locale),
        _ => presenter::status_badge(result.status, &app.catalog, app.locale),
    };
    let badge_style = Style::default().fg(tone_color(badge.tone)).add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Line::from(format!("{} {}", badge.icon, badge.label)).style(badge_style))
            .alignment(Alignment::Center),
        summary_chunks[0],
    );

    // --- Gauge ---
    if let Some(score) = result.score {
        let gauge = Gauge::default()
            .percent(score.min(100) as u16)
            .label(format!("{score}%"))
            .gauge_style(Style::default().fg(
                if score >= 80 { Color::Green }
                else if score >= 50 { Color::Yellow }
                else { Color::Red }
            ));
        frame.render_widget(gauge, summary_chunks[1]);
    }

    // --- Counters ---
    let lines = match &result.report {
        ScanDetails::Url(report) => stats_lines(app, &report.stats),
        ScanDetails::File(report) => stats_lines(app, &report.stats),
        ScanDetails::Ip(rep) => vec![
            Line::from(vec![
                Span::raw(format!("{}: ", app.t("abuse.confidence"))),
                Span::styled(format!("{}%", rep.abuse_confidence_score), Style::default().fg(tone_color(badge.tone))),
            ]),
            Line::from(format!("{}: {}", app.t("reports"), presenter::display_value(rep.total_reports))),
            Line::from(format!(
                "{}: {}",
                app.t("country"),
                presenter::display_value(rep.country_code.as_deref())
            )),
        ],
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), summary_chunks[3]);
}

fn stats_lines(app: &App, stats: &VerdictStats) -> Vec<Line<'static>> {
    [
        ("harmless", stats.harmless, Color::Green),
        ("malicious", stats.malicious, Color::Red),
        ("suspicious", stats.suspicious, Color::Yellow),
        ("undetected", stats.undetected, Color::Gray),
    ]
    .into_iter()
    .map(|(key, count, color)| {
        Line::from(vec![
            Span::raw(format!("{}: ", app.t(key))),
            Span::styled(count.to_string(), Style::default().fg(color)),
        ])
    })
    .collect()
}
