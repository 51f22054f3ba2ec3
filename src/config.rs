// src/config.rs

//! Static configuration: webhook endpoints, timeouts and size limits.
//!
//! Endpoints are fixed at compile time. `Endpoints::with_base` only exists so
//! tests can point the client at a local mock server.

use crate::core::models::ScannerKind;
use std::time::Duration;

pub const USER_AGENT: &str = concat!("ScanwatchRS/", env!("CARGO_PKG_VERSION"));

/// Bound on a URL or IP lookup, request and body included.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Bound on a file upload, request and body included.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Largest file accepted by the file scanner, in megabytes.
pub const MAX_UPLOAD_MB: u64 = 100;

/// Longest input kept by the sanitizer, in characters.
pub const MAX_INPUT_CHARS: usize = 2048;

const WEBHOOK_HOST: &str = "https://n8n-main.2wcwas.easypanel.host";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub url_check: String,
    pub ip_check: String,
    pub file_check: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            url_check: format!("{WEBHOOK_HOST}/webhook/check-url"),
            ip_check: format!("{WEBHOOK_HOST}/webhook/check-ip"),
            file_check: format!("{WEBHOOK_HOST}/webhook-test/check-file"),
        }
    }
}

impl Endpoints {
    /// Same paths as the production webhooks, rooted at `base`.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            url_check: format!("{base}/webhook/check-url"),
            ip_check: format!("{base}/webhook/check-ip"),
            file_check: format!("{base}/webhook-test/check-file"),
        }
    }

    pub fn for_kind(&self, kind: ScannerKind) -> &str {
        match kind {
            ScannerKind::Url => &self.url_check,
            ScannerKind::Ip => &self.ip_check,
            ScannerKind::File => &self.file_check,
        }
    }
}
