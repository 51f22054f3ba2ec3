// src/ui/widgets/notification_popup.rs

use crate::app::{App, NotificationLevel};
use crate::ui::layout::centered_rect;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Renders the current notification on top of the existing UI.
///
/// `Clear` blanks the popup area first so the background does not bleed
/// through.
pub fn render_notification_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notification) = &app.notification else {
        return;
    };

    let color = match notification.level {
        NotificationLevel::Info => Color::Green,
        NotificationLevel::Error => Color::Red,
    };

    let text = Text::from(vec![
        Line::from(""),
        Line::from(notification.message.clone()),
        Line::from(""),
        Line::from(app.t("dismiss.hint")).dark_gray(),
    ]);

    let block = Block::default()
        .title(Span::from(notification.title.clone()).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let popup_area = centered_rect(60, 30, area);
    let popup = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}
