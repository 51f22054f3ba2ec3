// src/core/scanner/mod.rs

// This file acts as the public interface for the `scanner` module.
// It owns the HTTP dispatch shared by the three scanners; each sub-module
// maps its endpoint's JSON shape into a `ScanResult`.
pub mod file_scanner;
pub mod ip_scanner;
pub mod url_scanner;

use crate::config::{self, Endpoints};
use crate::core::error::{ScanError, ScanOutcome};
use crate::core::models::{ScanResult, ScannerKind, VerdictStats};
use crate::core::validation::FileCandidate;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// One validated scan action, ready to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRequest {
    Url(String),
    Ip(String),
    File(FileCandidate),
}

impl ScanRequest {
    pub fn kind(&self) -> ScannerKind {
        match self {
            ScanRequest::Url(_) => ScannerKind::Url,
            ScanRequest::Ip(_) => ScannerKind::Ip,
            ScanRequest::File(_) => ScannerKind::File,
        }
    }
}

/// Client for the three threat-intelligence webhooks.
///
/// Every scan issues exactly one POST bounded by a timeout that covers both
/// the request and the body. There is no retry: any failure is reported to
/// the caller as a `ScanError`.
#[derive(Debug, Clone)]
pub struct ScanClient {
    client: reqwest::Client,
    endpoints: Endpoints,
    lookup_timeout: Duration,
    upload_timeout: Duration,
}

impl ScanClient {
    pub fn new(endpoints: Endpoints) -> ScanOutcome<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config::USER_AGENT)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client.");
                ScanError::Client(e.to_string())
            })?;

        Ok(Self {
            client,
            endpoints,
            lookup_timeout: config::LOOKUP_TIMEOUT,
            upload_timeout: config::UPLOAD_TIMEOUT,
        })
    }

    /// Overrides the default 30s lookup / 60s upload bounds.
    pub fn with_timeouts(mut self, lookup: Duration, upload: Duration) -> Self {
        self.lookup_timeout = lookup;
        self.upload_timeout = upload;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn timeout_for(&self, kind: ScannerKind) -> Duration {
        match kind {
            ScannerKind::File => self.upload_timeout,
            ScannerKind::Url | ScannerKind::Ip => self.lookup_timeout,
        }
    }

    /// Dispatches a request to the endpoint matching its kind.
    pub async fn run(&self, request: ScanRequest) -> ScanOutcome<ScanResult> {
        match request {
            ScanRequest::Url(input) => self.scan_url(&input).await,
            ScanRequest::Ip(input) => self.scan_ip(&input).await,
            ScanRequest::File(file) => {
                let bytes = match &file.path {
                    Some(path) => tokio::fs::read(path).await?,
                    None => Vec::new(),
                };
                self.scan_file(&file, bytes).await
            }
        }
    }

    pub async fn scan_url(&self, input: &str) -> ScanOutcome<ScanResult> {
        info!(input, "Starting URL scan.");
        let payload = self.post_json(ScannerKind::Url, input).await?;
        let result = url_scanner::map_url_response(payload)?;
        info!(status = %result.status, threats = result.threats.len(), "URL scan finished.");
        Ok(result)
    }

    pub async fn scan_ip(&self, input: &str) -> ScanOutcome<ScanResult> {
        info!(input, "Starting IP scan.");
        let payload = self.post_json(ScannerKind::Ip, input).await?;
        let result = ip_scanner::map_ip_response(payload, input)?;
        info!(status = %result.status, "IP scan finished.");
        Ok(result)
    }

    pub async fn scan_file(&self, file: &FileCandidate, bytes: Vec<u8>) -> ScanOutcome<ScanResult> {
        info!(file = %file.name, size = file.size, "Starting file scan.");
        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| ScanError::Client(e.to_string()))?;
        let form = Form::new().part("file", part);

        let builder = self.client.post(self.endpoints.for_kind(ScannerKind::File)).multipart(form);
        let payload = self.execute(ScannerKind::File, builder).await?;
        let result = file_scanner::map_file_response(payload, file)?;
        info!(status = %result.status, "File scan finished.");
        Ok(result)
    }

    async fn post_json(&self, kind: ScannerKind, input: &str) -> ScanOutcome<Value> {
        let builder = self
            .client
            .post(self.endpoints.for_kind(kind))
            .json(&json!({ "input": input }));
        self.execute(kind, builder).await
    }

    async fn execute(&self, kind: ScannerKind, builder: RequestBuilder) -> ScanOutcome<Value> {
        let bound = self.timeout_for(kind);
        debug!(scanner = %kind, timeout = ?bound, "Dispatching scan request.");

        let exchange = async {
            let response = builder.send().await?;
            read_response(response).await
        };

        match tokio::time::timeout(bound, exchange).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(scanner = %kind, timeout = ?bound, "Scan request timed out.");
                Err(ScanError::Timeout { duration: bound })
            }
        }
    }
}

async fn read_response(response: Response) -> ScanOutcome<Value> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = error_message(status, &body);
        warn!(status = %status, message = %message, "Webhook answered with an error status.");
        return Err(ScanError::Http { status: status.as_u16(), message });
    }

    serde_json::from_str(&body).map_err(|e| {
        error!(error = %e, "Webhook response is not JSON.");
        ScanError::invalid_response(e.to_string())
    })
}

/// Builds the user-facing text for a non-2xx answer.
///
/// A JSON body contributes its `message` and appends its `hint`; any other
/// non-empty body is used verbatim; otherwise the status line is reported.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let status_line = format!(
        "Scan failed: {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    )
    .trim_end()
    .to_string();

    match serde_json::from_str::<Value>(body) {
        Ok(parsed) => {
            let mut message = parsed
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(status_line);
            if let Some(hint) = parsed.get("hint").and_then(Value::as_str) {
                message = format!("{message} - {hint}");
            }
            message
        }
        Err(_) if body.trim().is_empty() => status_line,
        Err(_) => body.to_string(),
    }
}

// --- Helpers condivisi dai mapper ---
// Helpers shared by the mappers

/// Providers sometimes wrap their payload in a single-element list.
pub(crate) fn unwrap_list(value: Value) -> Value {
    match value {
        Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
        other => other,
    }
}

/// Rejects anything that is not a JSON object.
pub(crate) fn require_object(value: Value) -> ScanOutcome<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(ScanError::invalid_response("empty payload")),
        other => Err(ScanError::invalid_response(format!("expected an object, got {}", json_type(&other)))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Counts arrive as numbers, numeric strings or nulls; anything unusable is 0.
pub(crate) fn de_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value).unwrap_or(0))
}

pub(crate) fn de_opt_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

/// Display-only fields: a value of the wrong type reads as absent instead of
/// failing the whole record.
pub(crate) fn de_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// The four verdict counters as they appear on the wire.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct WireStats {
    #[serde(default, deserialize_with = "de_count")]
    pub harmless: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub malicious: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub suspicious: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub undetected: u64,
}

impl From<WireStats> for VerdictStats {
    fn from(wire: WireStats) -> Self {
        VerdictStats {
            harmless: wire.harmless,
            malicious: wire.malicious,
            suspicious: wire.suspicious,
            undetected: wire.undetected,
        }
    }
}

/// Renders an arbitrary JSON value as display text.
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_uses_message_and_hint() {
        let body = r#"{"message":"The requested webhook is not registered.","hint":"Click the 'Execute workflow' button"}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "The requested webhook is not registered. - Click the 'Execute workflow' button"
        );
    }

    #[test]
    fn error_message_hint_without_message_extends_status_line() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, r#"{"hint":"retry later"}"#),
            "Scan failed: 502 Bad Gateway - retry later"
        );
    }

    #[test]
    fn error_message_falls_back_to_raw_text_then_status() {
        assert_eq!(error_message(StatusCode::INTERNAL_SERVER_ERROR, "boom"), "boom");
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Scan failed: 500 Internal Server Error"
        );
    }

    #[test]
    fn unwrap_list_takes_first_element() {
        assert_eq!(unwrap_list(json!([{"a": 1}, {"b": 2}])), json!({"a": 1}));
        assert_eq!(unwrap_list(json!([])), Value::Null);
        assert_eq!(unwrap_list(json!({"a": 1})), json!({"a": 1}));
    }

    #[test]
    fn require_object_rejects_scalars() {
        assert!(require_object(json!({})).is_ok());
        assert!(matches!(require_object(Value::Null), Err(ScanError::InvalidResponse(_))));
        assert!(matches!(require_object(json!("ok")), Err(ScanError::InvalidResponse(_))));
    }

    #[test]
    fn wire_stats_are_lenient() {
        let wire: WireStats =
            serde_json::from_value(json!({"harmless": "12", "malicious": null, "suspicious": 2.0})).unwrap();
        let stats = VerdictStats::from(wire);
        assert_eq!(stats, VerdictStats { harmless: 12, malicious: 0, suspicious: 2, undetected: 0 });
    }

    #[test]
    fn uploads_get_the_longer_timeout() {
        let client = ScanClient::new(Endpoints::default()).unwrap();
        assert_eq!(client.timeout_for(ScannerKind::File), Duration::from_secs(60));
        assert_eq!(client.timeout_for(ScannerKind::Url), Duration::from_secs(30));

        let client = client.with_timeouts(Duration::from_millis(10), Duration::from_millis(20));
        assert_eq!(client.timeout_for(ScannerKind::Ip), Duration::from_millis(10));
    }

    #[test]
    fn lenient_fields_drop_mistyped_values() {
        #[derive(Deserialize)]
        struct Labelled {
            #[serde(default, deserialize_with = "de_lenient")]
            label: Option<String>,
        }
        let ok: Labelled = serde_json::from_value(json!({"label": "done"})).unwrap();
        assert_eq!(ok.label.as_deref(), Some("done"));
        let bad: Labelled = serde_json::from_value(json!({"label": 7})).unwrap();
        assert_eq!(bad.label, None);
        let missing: Labelled = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.label, None);
    }

    #[test]
    fn request_kind_matches_scanner() {
        assert_eq!(ScanRequest::Ip("8.8.8.8".into()).kind(), ScannerKind::Ip);
        let file = FileCandidate::new("a.pdf", "application/pdf", 1);
        assert_eq!(ScanRequest::File(file).kind(), ScannerKind::File);
    }
}
