// src/ui/mod.rs

use crate::app::App;
use crate::core::presenter::Tone;
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area());

    widgets::tabs::render_tabs(frame, app, layout.tabs);
    widgets::input::render_input(frame, app, layout.input);
    widgets::results::render_results(frame, app, layout.report);
    widgets::summary::render_summary(frame, app, layout.summary);
    widgets::footer::render_footer(frame, app, layout.footer);

    // Drawn last so it sits on top of everything else.
    if app.notification.is_some() {
        widgets::notification_popup::render_notification_popup(frame, app, frame.area());
    }
}

/// Terminal color for a presenter tone.
pub(crate) fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Danger => Color::Red,
        Tone::Info => Color::Cyan,
        Tone::Neutral => Color::White,
    }
}

/// Text alignment for the active locale.
pub(crate) fn text_alignment(app: &App) -> Alignment {
    if app.locale.is_rtl() { Alignment::Right } else { Alignment::Left }
}
