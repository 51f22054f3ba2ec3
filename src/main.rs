// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use scanwatch_rs::app::{App, ScanEvent};
use scanwatch_rs::config::Endpoints;
use scanwatch_rs::core::scanner::ScanClient;
use scanwatch_rs::{logging, ui};
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;
    install_panic_hook();

    let client = ScanClient::new(Endpoints::default())?;
    info!(endpoints = ?client.endpoints(), "Starting scanwatch-rs.");

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let outcome = run(&mut terminal, &client).await;

    // --- Restore Terminal ---
    restore_terminal()?;
    if let Err(e) = &outcome {
        error!(error = %e, "Event loop terminated with an error.");
    }
    outcome
}

async fn run(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, client: &ScanClient) -> Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel::<ScanEvent>(4);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key, client, &tx);
                }
            }
        }

        while let Ok(scan_event) = rx.try_recv() {
            app.apply_event(scan_event);
        }
        app.on_tick();
    }

    info!("Shutting down.");
    Ok(())
}

/// Single key dispatcher; the notification popup takes Esc before anything
/// else sees it.
fn handle_key(app: &mut App, key: KeyEvent, client: &ScanClient, tx: &mpsc::Sender<ScanEvent>) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.quit(),
            KeyCode::Char('n') => app.reset(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.dismiss_notification(),
        KeyCode::Tab => app.next_scanner(),
        KeyCode::F(2) => app.toggle_locale(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        _ if app.is_scanning() => {}
        KeyCode::Enter => {
            app.dismiss_notification();
            app.begin_scan(client, tx);
        }
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        _ => {}
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Puts the terminal back before the color-eyre panic report is printed.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}
