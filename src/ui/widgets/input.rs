// src/ui/widgets/input.rs
use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Renders the input box widget.
///
/// An empty input shows the scanner's placeholder in a dimmed style.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.state {
        AppState::Scanning => app.t("scanning"),
        _ => format!("{} [Enter: {}]", app.scanner_title(app.scanner), app.t("scan.now")),
    };
    let input_block = Block::default().borders(Borders::ALL).title(title);

    let input_paragraph = if app.input.is_empty() {
        Paragraph::new(app.placeholder()).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.input.as_str()).style(Style::default().fg(Color::Yellow))
    };
    frame.render_widget(input_paragraph.block(input_block), area);

    // The cursor is only shown while the user can type.
    if app.state != AppState::Scanning && app.notification.is_none() {
        let column = app.input.chars().count() as u16;
        frame.set_cursor_position((
            (area.x + column + 1).min(area.right().saturating_sub(2)),
            area.y + 1,
        ));
    }
}
