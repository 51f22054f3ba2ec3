// src/ui/widgets/results.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use crate::core::presenter::{self, ResultView};
use crate::ui::{text_alignment, tone_color};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, Wrap},
};

pub fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} (↑ ↓)", app.t("threat.analysis.results")));

    let Some(result) = app.scan_result.as_ref() else {
        let content = match app.state {
            AppState::Scanning => {
                let spinner_char = SPINNER_CHARS[app.spinner_frame];
                Paragraph::new(Line::from(vec![
                    Span::styled(format!("{} ", spinner_char), Style::default().fg(Color::Cyan)),
                    Span::raw(app.t("scanning")),
                ]))
            }
            _ => Paragraph::new(app.t("results.placeholder")).style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(content.alignment(Alignment::Center).block(main_block), area);
        return;
    };

    let view = presenter::present(result, &app.catalog, app.locale);
    let lines = view_lines(&view);

    // Keep the offset within the report so scrolling back up is immediate.
    let max_offset = lines.len().saturating_sub(1);
    app.scroll_offset = app.scroll_offset.min(max_offset);
    app.report_scroll_state = app
        .report_scroll_state
        .content_length(lines.len())
        .position(app.scroll_offset);

    let report = Paragraph::new(lines)
        .block(main_block)
        .alignment(text_alignment(app))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset as u16, 0));
    frame.render_widget(report, area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin { vertical: 1, horizontal: 0 }),
        &mut app.report_scroll_state,
    );
}

/// Flattens the presented sections into styled lines.
fn view_lines(view: &ResultView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(details) = &view.details {
        lines.push(Line::from(details.clone()).italic());
        lines.push(Line::from(""));
    }

    for section in &view.sections {
        lines.push(Line::from(section.title.to_uppercase()).yellow().bold());
        for field in &section.fields {
            let value = Span::styled(field.value.clone(), Style::default().fg(tone_color(field.tone)));
            if field.label.is_empty() {
                lines.push(Line::from(vec![Span::raw("  • "), value]));
            } else {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {}: ", field.label), Style::default().fg(Color::DarkGray)),
                    value,
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    lines
}
