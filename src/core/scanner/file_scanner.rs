// src/core/scanner/file_scanner.rs

use super::{WireStats, de_count, require_object, unwrap_list, value_to_text};
use crate::core::error::{ScanError, ScanOutcome};
use crate::core::models::{FileReport, ScanDetails, ScanResult, ScanStatus, VerdictStats};
use crate::core::validation::FileCandidate;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

// The file webhook reports its counters at the top level, next to an
// optional status text and an optional list of threat names.
#[derive(Debug, Deserialize)]
struct FileVerdict {
    #[serde(default, deserialize_with = "de_count")]
    harmless: u64,
    #[serde(default, deserialize_with = "de_count")]
    malicious: u64,
    #[serde(default, deserialize_with = "de_count")]
    suspicious: u64,
    #[serde(default, deserialize_with = "de_count")]
    undetected: u64,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    threats: Option<Value>,
}

/// Maps a file-check response into a `ScanResult`.
///
/// Counters are read directly from the record; this path is independent of
/// the nested layout the URL endpoint uses.
pub fn map_file_response(payload: Value, file: &FileCandidate) -> ScanOutcome<ScanResult> {
    let record = require_object(unwrap_list(payload))?;
    let verdict: FileVerdict = serde_json::from_value(Value::Object(record))
        .map_err(|e| ScanError::invalid_response(format!("file verdict: {e}")))?;

    let stats: VerdictStats = WireStats {
        harmless: verdict.harmless,
        malicious: verdict.malicious,
        suspicious: verdict.suspicious,
        undetected: verdict.undetected,
    }
    .into();

    let threats = match verdict.threats {
        Some(Value::Array(items)) => items.iter().map(value_to_text).collect(),
        _ => Vec::new(),
    };

    let remote_status = verdict
        .status
        .filter(|s| !s.is_null())
        .map(|s| value_to_text(&s))
        .filter(|s| !s.is_empty());
    debug!(total = stats.total(), threats = threats.len(), "Parsed file verdict.");

    Ok(ScanResult {
        status: ScanStatus::from_stats(&stats),
        score: Some(stats.safety_score()),
        details: Some(format!(
            "File \"{}\" scanned successfully - {}",
            file.name,
            remote_status.as_deref().unwrap_or("Analysis completed")
        )),
        threats,
        report: ScanDetails::File(FileReport {
            file_name: file.name.clone(),
            size: file.size,
            remote_status,
            stats,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_file() -> FileCandidate {
        FileCandidate::new("invoice.pdf", "application/pdf", 2048)
    }

    #[test]
    fn counters_are_read_at_top_level() {
        let payload = json!([{
            "harmless": 60, "malicious": 2, "suspicious": 0, "undetected": 18,
            "status": "completed",
            "threats": ["Trojan.PDF.Agent", 7]
        }]);
        let result = map_file_response(payload, &sample_file()).unwrap();
        assert_eq!(result.status, ScanStatus::Danger);
        assert_eq!(result.score, Some(75));
        assert_eq!(result.threats, vec!["Trojan.PDF.Agent", "7"]);
        assert_eq!(
            result.details.as_deref(),
            Some("File \"invoice.pdf\" scanned successfully - completed")
        );
    }

    #[test]
    fn missing_counters_and_threats_default() {
        let result = map_file_response(json!({"status": null}), &sample_file()).unwrap();
        assert_eq!(result.status, ScanStatus::Safe);
        assert_eq!(result.score, Some(0));
        assert!(result.threats.is_empty());
        assert_eq!(
            result.details.as_deref(),
            Some("File \"invoice.pdf\" scanned successfully - Analysis completed")
        );
    }

    #[test]
    fn nested_stats_are_not_read() {
        let payload = json!({"attributes": {"stats": {"malicious": 5}}});
        let result = map_file_response(payload, &sample_file()).unwrap();
        assert_eq!(result.status, ScanStatus::Safe);
    }

    #[test]
    fn suspicious_file_is_warning() {
        let payload = json!({"harmless": 9, "suspicious": 1, "threats": "not a list"});
        let result = map_file_response(payload, &sample_file()).unwrap();
        assert_eq!(result.status, ScanStatus::Warning);
        assert_eq!(result.score, Some(90));
        assert!(result.threats.is_empty());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(matches!(
            map_file_response(json!("ok"), &sample_file()),
            Err(ScanError::InvalidResponse(_))
        ));
        assert!(matches!(
            map_file_response(Value::Null, &sample_file()),
            Err(ScanError::InvalidResponse(_))
        ));
    }
}
