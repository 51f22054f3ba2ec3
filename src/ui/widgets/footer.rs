// src/ui/widgets/footer.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.state {
        AppState::Idle => app.t("footer.idle"),
        AppState::Scanning => app.t("footer.scanning"),
        AppState::Finished => app.t("footer.finished"),
    };

    let mut spans = vec![Span::styled(hints, Style::new().fg(Color::Yellow))];
    if app.notification.is_some() {
        spans.push(Span::raw("  |  "));
        spans.push(Span::raw(app.t("dismiss.hint")));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
