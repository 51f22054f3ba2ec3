// src/core/scanner/ip_scanner.rs

use super::{de_opt_count, require_object, unwrap_list};
use crate::core::error::{ScanError, ScanOutcome};
use crate::core::models::{IpReputation, ScanDetails, ScanResult, ScanStatus};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

// Wire shape of an AbuseIPDB-style `check` record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbuseIpRecord {
    #[serde(default)]
    ip_address: Option<String>,
    #[serde(default)]
    is_public: Option<bool>,
    #[serde(default, deserialize_with = "de_opt_count")]
    ip_version: Option<u64>,
    #[serde(default)]
    is_whitelisted: Option<bool>,
    #[serde(default, deserialize_with = "de_opt_count")]
    abuse_confidence_score: Option<u64>,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    usage_type: Option<String>,
    #[serde(default)]
    isp: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    hostnames: Option<Vec<String>>,
    #[serde(default)]
    is_tor: Option<bool>,
    #[serde(default, deserialize_with = "de_opt_count")]
    total_reports: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_count")]
    num_distinct_users: Option<u64>,
    #[serde(default)]
    last_reported_at: Option<String>,
}

/// Maps an IP-check response into a `ScanResult`.
///
/// The record may be wrapped in a list and/or a `data` envelope. An empty
/// record means the webhook produced nothing and is reported as an invalid
/// response rather than a default-filled result. `submitted` is used when the
/// record does not echo the address back.
pub fn map_ip_response(payload: Value, submitted: &str) -> ScanOutcome<ScanResult> {
    let mut record = unwrap_list(payload);
    if let Some(data) = record.get_mut("data").filter(|d| !is_falsy(d)) {
        record = data.take();
    }

    let record = require_object(record)?;
    if record.is_empty() {
        warn!("IP scan webhook returned an empty record.");
        return Err(ScanError::invalid_response(
            "No data received from IP scan API. Please check if the webhook is active.",
        ));
    }

    let record: AbuseIpRecord = serde_json::from_value(Value::Object(record))
        .map_err(|e| ScanError::invalid_response(format!("IP record: {e}")))?;

    let abuse_score = record.abuse_confidence_score.unwrap_or(0).min(100) as u8;
    debug!(abuse_score, "Parsed IP reputation record.");

    let threats = if abuse_score > 0 {
        vec![format!("High abuse confidence score: {abuse_score}%")]
    } else {
        Vec::new()
    };

    let ip_address = record
        .ip_address
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| submitted.to_string());

    Ok(ScanResult {
        status: ScanStatus::from_abuse_score(abuse_score),
        score: Some(100 - abuse_score),
        details: Some(format!("IP Analysis Complete - Abuse Confidence: {abuse_score}%")),
        threats,
        report: ScanDetails::Ip(IpReputation {
            ip_address,
            is_public: record.is_public,
            ip_version: record.ip_version.and_then(|v| u8::try_from(v).ok()),
            is_whitelisted: record.is_whitelisted,
            abuse_confidence_score: abuse_score,
            country_code: record.country_code,
            usage_type: record.usage_type,
            isp: record.isp,
            domain: record.domain,
            hostnames: record.hostnames.unwrap_or_default(),
            is_tor: record.is_tor,
            total_reports: record.total_reports,
            num_distinct_users: record.num_distinct_users,
            last_reported_at: record.last_reported_at,
        }),
    })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
