// src/app.rs

use crate::core::error::{ScanError, ValidationError};
use crate::core::locale::{Catalog, Locale};
use crate::core::models::{ScanResult, ScannerKind};
use crate::core::scanner::{ScanClient, ScanRequest};
use crate::core::validation::{prepare_file_input, prepare_ip_input, prepare_url_input};
use ratatui::widgets::ScrollbarState;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Scanning,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A dismissable message shown on top of the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into(), level: NotificationLevel::Info }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into(), level: NotificationLevel::Error }
    }
}

impl From<&ValidationError> for Notification {
    fn from(e: &ValidationError) -> Self {
        Notification::error(e.title(), e.to_string())
    }
}

/// Outcome of a scan task, tagged with the generation that started it.
#[derive(Debug)]
pub struct ScanEvent {
    pub generation: u64,
    pub kind: ScannerKind,
    pub subject: String,
    pub outcome: Result<ScanResult, ScanError>,
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub scanner: ScannerKind,
    pub input: String,
    pub scan_result: Option<ScanResult>,
    pub notification: Option<Notification>,
    pub locale: Locale,
    pub catalog: Catalog,
    pub scroll_offset: usize,
    pub report_scroll_state: ScrollbarState,
    pub spinner_frame: usize,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            scanner: ScannerKind::default(),
            input: String::new(),
            scan_result: None,
            notification: None,
            locale: Locale::default(),
            catalog: Catalog::new(),
            scroll_offset: 0,
            report_scroll_state: ScrollbarState::default(),
            spinner_frame: 0,
            generation: 0,
            in_flight: None,
        }
    }

    /// Shorthand for a catalog lookup in the current locale.
    pub fn t(&self, key: &str) -> String {
        self.catalog.t(self.locale, key)
    }

    pub fn scanner_title(&self, kind: ScannerKind) -> String {
        match kind {
            ScannerKind::Url => self.t("url.scanner"),
            ScannerKind::Ip => self.t("ip.scanner"),
            ScannerKind::File => self.t("file.scanner"),
        }
    }

    pub fn placeholder(&self) -> String {
        match self.scanner {
            ScannerKind::Url => self.t("enter.url"),
            ScannerKind::Ip => self.t("enter.ip"),
            ScannerKind::File => self.t("enter.file"),
        }
    }

    pub fn on_tick(&mut self) {
        if self.state == AppState::Scanning {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    pub fn quit(&mut self) {
        self.cancel_in_flight();
        self.should_quit = true;
    }

    pub fn toggle_locale(&mut self) {
        self.locale = self.locale.toggle();
        info!(locale = self.locale.code(), "Locale switched.");
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn is_scanning(&self) -> bool {
        self.state == AppState::Scanning
    }

    /// Aborts the task of the current scan, if any. Dropping the task drops
    /// the pending HTTP request with it.
    pub fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                info!(generation = self.generation, "Cancelling in-flight scan.");
            }
            handle.abort();
        }
        // Anything still queued from the old task is now stale.
        self.generation += 1;
    }

    /// Clears input and result so a new scan can be typed.
    pub fn reset(&mut self) {
        self.cancel_in_flight();
        self.state = AppState::Idle;
        self.input.clear();
        self.scan_result = None;
        self.notification = None;
        self.scroll_offset = 0;
        self.report_scroll_state = ScrollbarState::default();
        self.spinner_frame = 0;
    }

    pub fn switch_scanner(&mut self, kind: ScannerKind) {
        debug!(from = %self.scanner, to = %kind, "Switching scanner.");
        self.reset();
        self.scanner = kind;
    }

    pub fn next_scanner(&mut self) {
        self.switch_scanner(self.scanner.next());
    }

    /// Validates the current input for the active scanner.
    pub fn prepare_request(&self) -> Result<ScanRequest, ValidationError> {
        match self.scanner {
            ScannerKind::Url => prepare_url_input(&self.input).map(ScanRequest::Url),
            ScannerKind::Ip => prepare_ip_input(&self.input).map(ScanRequest::Ip),
            ScannerKind::File => prepare_file_input(&self.input).map(ScanRequest::File),
        }
    }

    /// Validates the input and, if it passes, dispatches the scan on a
    /// background task. Any earlier scan is cancelled first.
    pub fn begin_scan(&mut self, client: &ScanClient, tx: &mpsc::Sender<ScanEvent>) {
        let request = match self.prepare_request() {
            Ok(request) => request,
            Err(e) => {
                warn!(scanner = %self.scanner, error = %e, "Input rejected.");
                self.notification = Some(Notification::from(&e));
                return;
            }
        };

        self.cancel_in_flight();
        self.scan_result = None;
        self.notification = None;
        self.scroll_offset = 0;
        self.report_scroll_state = ScrollbarState::default();
        self.state = AppState::Scanning;

        let generation = self.generation;
        let kind = request.kind();
        let subject = match &request {
            ScanRequest::Url(input) | ScanRequest::Ip(input) => input.clone(),
            ScanRequest::File(file) => file.name.clone(),
        };
        info!(generation, scanner = %kind, subject = %subject, "Scan dispatched.");

        let client = client.clone();
        let tx = tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = client.run(request).await;
            let _ = tx.send(ScanEvent { generation, kind, subject, outcome }).await;
        }));
    }

    /// Applies the outcome of a scan. Events from superseded scans are
    /// dropped; returns whether the event was applied.
    pub fn apply_event(&mut self, event: ScanEvent) -> bool {
        if event.generation != self.generation
            || event.kind != self.scanner
            || self.state != AppState::Scanning
        {
            debug!(generation = event.generation, current = self.generation, "Dropping stale scan event.");
            return false;
        }

        self.in_flight = None;
        match event.outcome {
            Ok(result) => {
                let kind = result.kind();
                let title = self.scanner_title(kind);
                self.notification = Some(Notification::info(
                    "Scan Complete",
                    match kind {
                        ScannerKind::File => format!("\"{}\" has been analyzed", event.subject),
                        _ => format!("{title} scan finished"),
                    },
                ));
                self.scan_result = Some(result);
                self.state = AppState::Finished;
            }
            Err(e) => {
                warn!(scanner = %event.kind, error = %e, "Scan failed.");
                self.notification = Some(Notification::error("Scan Failed", e.user_message(event.kind)));
                self.state = AppState::Idle;
            }
        }
        true
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
