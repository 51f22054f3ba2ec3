// src/core/mod.rs

// The `mod.rs` file acts as the root of the `core` module: everything that
// does not touch the terminal lives here.

/// Data structures shared by the scanners, the presenter and the UI,
/// such as `ScanResult`, `ScanStatus` and the per-scanner reports.
pub mod models;

/// Validation and sanitization failures, plus the errors a scan can end with.
pub mod error;

/// Input sanitization and per-scanner validation rules.
pub mod validation;

/// HTTP dispatch to the threat-intelligence webhooks and the mapping of
/// their responses into `ScanResult`s.
pub mod scanner;

/// Turns a `ScanResult` into labelled sections ready to be rendered.
pub mod presenter;

/// English / Arabic string catalog.
pub mod locale;
