// src/core/models.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

// --- Modelli Dati Core ---
// Core Data Models

// The overall verdict of a scan. Derived only from the counts/scores returned
// by the remote service, never from user input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScanStatus {
    Safe,
    Warning,
    Danger,
}

impl ScanStatus {
    /// Status shared by the URL and file mappers: any malicious verdict wins,
    /// then any suspicious verdict, otherwise the target is considered safe.
    pub fn from_stats(stats: &VerdictStats) -> Self {
        if stats.malicious > 0 {
            ScanStatus::Danger
        } else if stats.suspicious > 0 {
            ScanStatus::Warning
        } else {
            ScanStatus::Safe
        }
    }

    /// Status for the IP mapper, driven by the abuse confidence score.
    pub fn from_abuse_score(abuse_score: u8) -> Self {
        match abuse_score {
            0 => ScanStatus::Safe,
            1..=49 => ScanStatus::Warning,
            _ => ScanStatus::Danger,
        }
    }
}

// The three scanners the user can switch between.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Display, EnumIter)]
pub enum ScannerKind {
    #[default]
    #[strum(serialize = "url")]
    Url,
    #[strum(serialize = "ip")]
    Ip,
    #[strum(serialize = "file")]
    File,
}

impl ScannerKind {
    /// Cycles to the next scanner, wrapping around after the file scanner.
    pub fn next(self) -> Self {
        match self {
            ScannerKind::Url => ScannerKind::Ip,
            ScannerKind::Ip => ScannerKind::File,
            ScannerKind::File => ScannerKind::Url,
        }
    }
}

// --- Modelli Verdetti ---
// Verdict Models

// Aggregated verdict counts reported by the remote service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct VerdictStats {
    #[serde(default)]
    pub harmless: u64,
    #[serde(default)]
    pub malicious: u64,
    #[serde(default)]
    pub suspicious: u64,
    #[serde(default)]
    pub undetected: u64,
}

impl VerdictStats {
    /// Sum of the four counters, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.harmless
            .saturating_add(self.malicious)
            .saturating_add(self.suspicious)
            .saturating_add(self.undetected)
    }

    /// Safety score in 0..=100: the rounded share of harmless verdicts.
    /// An empty tally scores 0.
    pub fn safety_score(&self) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.harmless as f64 / total as f64) * 100.0).round().min(100.0) as u8
    }
}

// The category an engine assigned to the scanned target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EngineCategory {
    Harmless,
    Malicious,
    Suspicious,
    Undetected,
    Other,
}

impl EngineCategory {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "harmless" => EngineCategory::Harmless,
            "malicious" => EngineCategory::Malicious,
            "suspicious" => EngineCategory::Suspicious,
            "undetected" => EngineCategory::Undetected,
            _ => EngineCategory::Other,
        }
    }

    pub fn is_threat(self) -> bool {
        matches!(self, EngineCategory::Malicious | EngineCategory::Suspicious)
    }
}

// One anti-malware engine's verdict on a scanned URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineVerdict {
    pub engine: String,
    pub category: EngineCategory,
    pub result: String,
    pub method: String,
}

// --- Dettagli per tipo di scansione ---
// Scan-type specific details

// Metadata of a URL analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UrlReport {
    pub url: String,
    pub analysis_id: String,
    // Unix seconds, 0 when the service did not report a date.
    pub analysis_date: i64,
    pub last_analysis: Option<String>,
    pub stats: VerdictStats,
    pub engines: Vec<EngineVerdict>,
}

// Reputation data of an IP address, passed through from the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IpReputation {
    pub ip_address: String,
    pub is_public: Option<bool>,
    pub ip_version: Option<u8>,
    pub is_whitelisted: Option<bool>,
    pub abuse_confidence_score: u8,
    pub country_code: Option<String>,
    pub usage_type: Option<String>,
    pub isp: Option<String>,
    pub domain: Option<String>,
    pub hostnames: Vec<String>,
    pub is_tor: Option<bool>,
    pub total_reports: Option<u64>,
    pub num_distinct_users: Option<u64>,
    pub last_reported_at: Option<String>,
}

// Summary of an uploaded file analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FileReport {
    pub file_name: String,
    pub size: u64,
    pub remote_status: Option<String>,
    pub stats: VerdictStats,
}

// The scan-type specific part of a result, one variant per endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScanDetails {
    Url(UrlReport),
    Ip(IpReputation),
    File(FileReport),
}

// --- Risultato Principale ---
// Main Result

// The normalized outcome of a single scan action, whatever endpoint produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanResult {
    pub status: ScanStatus,
    pub score: Option<u8>,
    pub details: Option<String>,
    pub threats: Vec<String>,
    pub report: ScanDetails,
}

impl ScanResult {
    pub fn kind(&self) -> ScannerKind {
        match self.report {
            ScanDetails::Url(_) => ScannerKind::Url,
            ScanDetails::Ip(_) => ScannerKind::Ip,
            ScanDetails::File(_) => ScannerKind::File,
        }
    }
}
