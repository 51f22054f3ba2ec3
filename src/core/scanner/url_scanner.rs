// src/core/scanner/url_scanner.rs

use super::{WireStats, de_lenient, require_object, unwrap_list};
use crate::core::error::{ScanError, ScanOutcome};
use crate::core::models::{
    EngineCategory, EngineVerdict, ScanDetails, ScanResult, ScanStatus, UrlReport, VerdictStats,
};
use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

const UNKNOWN: &str = "unknown";

// --- Forma della risposta (VirusTotal) ---
// Wire shape of a VirusTotal-style URL analysis

#[derive(Debug, Deserialize, Default)]
struct UrlAnalysis {
    #[serde(default, deserialize_with = "de_lenient")]
    id: Option<String>,
    #[serde(default, deserialize_with = "de_lenient")]
    url: Option<String>,
    #[serde(default, deserialize_with = "de_lenient")]
    attributes: Option<UrlAttributes>,
}

#[derive(Debug, Deserialize, Default)]
struct UrlAttributes {
    #[serde(default, deserialize_with = "de_lenient")]
    stats: Option<WireStats>,
    #[serde(default, deserialize_with = "de_lenient")]
    results: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "de_lenient")]
    status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    date: Option<i64>,
}

/// Unix seconds as an integer, a float or a numeric string; anything else is
/// treated as absent.
fn de_opt_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[derive(Debug, Deserialize, Default)]
struct UrlMeta {
    #[serde(default, deserialize_with = "de_lenient")]
    url_info: Option<UrlInfo>,
}

#[derive(Debug, Deserialize, Default)]
struct UrlInfo {
    #[serde(default, deserialize_with = "de_lenient")]
    url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct WireEngineVerdict {
    #[serde(default, deserialize_with = "de_lenient")]
    category: Option<String>,
    #[serde(default, deserialize_with = "de_lenient")]
    result: Option<String>,
    #[serde(default, deserialize_with = "de_lenient")]
    method: Option<String>,
}

/// Flattens the engine name -> verdict mapping, keeping payload order.
/// Entries that are not objects still produce a verdict with unknown fields.
fn flatten_engines(results: Map<String, Value>) -> Vec<EngineVerdict> {
    results
        .into_iter()
        .map(|(engine, raw)| {
            let wire: WireEngineVerdict = serde_json::from_value(raw).unwrap_or_default();
            EngineVerdict {
                engine,
                category: wire
                    .category
                    .as_deref()
                    .map(EngineCategory::parse)
                    .unwrap_or(EngineCategory::Other),
                result: wire.result.unwrap_or_else(|| UNKNOWN.to_string()),
                method: wire.method.unwrap_or_else(|| UNKNOWN.to_string()),
            }
        })
        .collect()
}

fn to_iso(date: i64) -> Option<String> {
    DateTime::from_timestamp(date, 0).map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Maps a URL-check response into a `ScanResult`.
///
/// The analysis is read from `data` when the payload carries that envelope,
/// otherwise from the payload itself. Missing stats count as zero.
pub fn map_url_response(payload: Value) -> ScanOutcome<ScanResult> {
    let mut root = require_object(unwrap_list(payload))?;

    let meta: UrlMeta = match root.remove("meta") {
        Some(meta) => serde_json::from_value(meta).unwrap_or_default(),
        None => UrlMeta::default(),
    };

    let analysis_value = match root.remove("data") {
        Some(data @ Value::Object(_)) => data,
        _ => Value::Object(root),
    };
    let analysis: UrlAnalysis = serde_json::from_value(analysis_value)
        .map_err(|e| ScanError::invalid_response(format!("URL analysis: {e}")))?;

    let attributes = analysis.attributes.unwrap_or_default();
    let stats: VerdictStats = attributes.stats.unwrap_or_default().into();
    let engines = flatten_engines(attributes.results.unwrap_or_default());
    debug!(engines = engines.len(), total = stats.total(), "Parsed URL analysis.");

    let threats: Vec<String> = engines
        .iter()
        .filter(|e| e.category.is_threat())
        .map(|e| format!("{}: {}", e.engine, e.result))
        .collect();

    let details = format!(
        "Analysis {} - {} engines checked",
        attributes.status.as_deref().unwrap_or("completed"),
        engines.len()
    );

    let url = meta
        .url_info
        .and_then(|info| info.url)
        .or(analysis.url)
        .unwrap_or_default();

    Ok(ScanResult {
        status: ScanStatus::from_stats(&stats),
        score: Some(stats.safety_score()),
        details: Some(details),
        threats,
        report: ScanDetails::Url(UrlReport {
            url,
            analysis_id: analysis.id.unwrap_or_default(),
            analysis_date: attributes.date.unwrap_or(0),
            last_analysis: attributes.date.and_then(to_iso),
            stats,
            engines,
        }),
    })
}
