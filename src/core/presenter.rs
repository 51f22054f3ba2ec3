// src/core/presenter.rs

//! Turns a `ScanResult` into a display structure.
//!
//! Everything here is a pure function of its inputs: no I/O, no state. The
//! terminal widgets only map `Tone` to colors and lay the sections out.

use crate::core::locale::{Catalog, Locale};
use crate::core::models::{
    EngineCategory, FileReport, IpReputation, ScanDetails, ScanResult, ScanStatus, UrlReport,
    VerdictStats,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt::Display;

pub const NOT_AVAILABLE: &str = "N/A";

/// How many threats are listed before the rest are summarized.
const VISIBLE_THREATS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Info,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: String,
    pub icon: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

impl Field {
    fn new(label: String, value: String) -> Self {
        Self { label, value, tone: Tone::Neutral }
    }

    fn toned(label: String, value: String, tone: Tone) -> Self {
        Self { label, value, tone }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    pub title: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub badge: StatusBadge,
    pub score: Option<u8>,
    pub details: Option<String>,
    pub sections: Vec<Section>,
}

pub fn status_badge(status: ScanStatus, catalog: &Catalog, locale: Locale) -> StatusBadge {
    match status {
        ScanStatus::Safe => StatusBadge { label: catalog.t(locale, "clean"), icon: "✓", tone: Tone::Success },
        ScanStatus::Warning => StatusBadge { label: catalog.t(locale, "suspicious"), icon: "⚠", tone: Tone::Warning },
        ScanStatus::Danger => StatusBadge { label: catalog.t(locale, "malicious"), icon: "✗", tone: Tone::Danger },
    }
}

/// Banner for an IP reputation report. The provider view uses its own,
/// more lenient thresholds than the scan status.
pub fn ip_banner(abuse_score: u8, catalog: &Catalog, locale: Locale) -> StatusBadge {
    match abuse_score {
        0..=20 => status_badge(ScanStatus::Safe, catalog, locale),
        21..=60 => status_badge(ScanStatus::Warning, catalog, locale),
        _ => status_badge(ScanStatus::Danger, catalog, locale),
    }
}

pub fn category_tone(category: EngineCategory) -> Tone {
    match category {
        EngineCategory::Harmless => Tone::Success,
        EngineCategory::Malicious => Tone::Danger,
        EngineCategory::Suspicious => Tone::Warning,
        EngineCategory::Undetected => Tone::Neutral,
        EngineCategory::Other => Tone::Info,
    }
}

/// Formats an ISO-8601 / RFC 3339 timestamp as `May 1, 2024, 12:30 PM` (UTC).
/// Empty or unparsable input yields `N/A`.
pub fn format_date(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    match parse_timestamp(text) {
        Some(when) => when.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `N/A` for absent values.
pub fn display_value<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => display_text(&v.to_string()),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `N/A` for empty strings.
pub fn display_text(value: &str) -> String {
    if value.is_empty() { NOT_AVAILABLE.to_string() } else { value.to_string() }
}

pub fn display_bool(value: Option<bool>, catalog: &Catalog, locale: Locale) -> String {
    match value {
        Some(true) => catalog.t(locale, "yes"),
        Some(false) => catalog.t(locale, "no"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

/// Builds the complete view of a result.
pub fn present(result: &ScanResult, catalog: &Catalog, locale: Locale) -> ResultView {
    let badge = match &result.report {
        ScanDetails::Ip(rep) => ip_banner(rep.abuse_confidence_score, catalog, locale),
        _ => status_badge(result.status, catalog, locale),
    };

    let mut sections = match &result.report {
        ScanDetails::Url(report) => url_sections(report, catalog, locale),
        ScanDetails::Ip(rep) => ip_sections(rep, catalog, locale),
        ScanDetails::File(report) => file_sections(report, catalog, locale),
    };

    if !result.threats.is_empty() {
        sections.insert(0, threats_section(&result.threats, catalog, locale));
    }

    ResultView {
        badge,
        score: result.score,
        details: result.details.clone(),
        sections,
    }
}

fn threats_section(threats: &[String], catalog: &Catalog, locale: Locale) -> Section {
    let title = format!("{} ({})", catalog.t(locale, "detected.threats"), threats.len());
    let mut fields: Vec<Field> = threats
        .iter()
        .take(VISIBLE_THREATS)
        .map(|threat| Field::toned(String::new(), threat.clone(), Tone::Danger))
        .collect();
    if threats.len() > VISIBLE_THREATS {
        fields.push(Field::new(
            String::new(),
            format!("+{} more threats detected", threats.len() - VISIBLE_THREATS),
        ));
    }
    Section { title, fields }
}

fn stats_section(stats: &VerdictStats, catalog: &Catalog, locale: Locale) -> Section {
    Section {
        title: catalog.t(locale, "threat.analysis.results"),
        fields: vec![
            Field::toned(catalog.t(locale, "harmless"), stats.harmless.to_string(), Tone::Success),
            Field::toned(catalog.t(locale, "malicious"), stats.malicious.to_string(), Tone::Danger),
            Field::toned(catalog.t(locale, "suspicious"), stats.suspicious.to_string(), Tone::Warning),
            Field::new(catalog.t(locale, "undetected"), stats.undetected.to_string()),
        ],
    }
}

fn url_sections(report: &UrlReport, catalog: &Catalog, locale: Locale) -> Vec<Section> {
    let mut sections = Vec::new();

    let mut info = Vec::new();
    if !report.url.is_empty() {
        info.push(Field::new(catalog.t(locale, "scanned.url"), report.url.clone()));
    }
    if !report.analysis_id.is_empty() {
        info.push(Field::new(catalog.t(locale, "analysis.id"), report.analysis_id.clone()));
    }
    if let Some(last) = &report.last_analysis {
        info.push(Field::new(catalog.t(locale, "analysis.date"), format_date(last)));
    }
    if !info.is_empty() {
        sections.push(Section { title: catalog.t(locale, "view.full.report"), fields: info });
    }

    sections.push(stats_section(&report.stats, catalog, locale));

    if !report.engines.is_empty() {
        let fields = report
            .engines
            .iter()
            .map(|engine| {
                let value = match engine.result.as_str() {
                    "clean" | "undetected" => engine.category.to_string(),
                    other => format!("{} ({})", engine.category, other),
                };
                Field::toned(engine.engine.clone(), value, category_tone(engine.category))
            })
            .collect();
        sections.push(Section {
            title: format!("{} ({})", catalog.t(locale, "engine.results"), report.engines.len()),
            fields,
        });
    }

    sections
}

fn ip_sections(rep: &IpReputation, catalog: &Catalog, locale: Locale) -> Vec<Section> {
    let t = |key: &str| catalog.t(locale, key);

    let mut overview = vec![
        Field::new(t("ip.address"), display_text(&rep.ip_address)),
        Field::new(t("abuse.confidence"), format!("{}%", rep.abuse_confidence_score)),
        Field::new(t("reports"), display_value(rep.total_reports)),
        Field::new(t("users"), display_value(rep.num_distinct_users)),
        Field::new(t("ip.version"), format!("IPv{}", display_value(rep.ip_version))),
    ];
    if rep.is_whitelisted == Some(true) {
        overview.push(Field::toned(t("whitelisted"), "✓".to_string(), Tone::Success));
    }

    let network = vec![
        Field::new(t("country"), display_value(rep.country_code.as_deref())),
        Field::new(t("isp"), display_value(rep.isp.as_deref())),
        Field::new(t("usage"), display_value(rep.usage_type.as_deref())),
        Field::new(t("domain"), display_value(rep.domain.as_deref())),
    ];

    let flag_tone = |flag: Option<bool>, when_set: Tone| {
        if flag == Some(true) { when_set } else { Tone::Success }
    };
    let security = vec![
        Field::toned(
            t("public.ip"),
            display_bool(rep.is_public, catalog, locale),
            flag_tone(rep.is_public, Tone::Warning),
        ),
        Field::toned(
            t("tor.exit"),
            display_bool(rep.is_tor, catalog, locale),
            flag_tone(rep.is_tor, Tone::Danger),
        ),
        Field::toned(
            t("reports"),
            display_value(rep.total_reports),
            if rep.total_reports.unwrap_or(0) > 0 { Tone::Danger } else { Tone::Success },
        ),
        Field::new(t("last.report"), format_date(rep.last_reported_at.as_deref().unwrap_or(""))),
    ];

    let mut sections = vec![
        Section { title: t("ip.address"), fields: overview },
        Section { title: t("location.network"), fields: network },
        Section { title: t("security.information"), fields: security },
    ];

    if !rep.hostnames.is_empty() {
        sections.push(Section {
            title: t("hostnames"),
            fields: rep
                .hostnames
                .iter()
                .map(|h| Field::toned(String::new(), h.clone(), Tone::Success))
                .collect(),
        });
    }

    sections
}

fn file_sections(report: &FileReport, catalog: &Catalog, locale: Locale) -> Vec<Section> {
    vec![
        Section {
            title: catalog.t(locale, "file.scanner"),
            fields: vec![
                Field::new(catalog.t(locale, "file.name"), display_text(&report.file_name)),
                Field::new(catalog.t(locale, "file.size"), format_file_size(report.size)),
            ],
        },
        stats_section(&report.stats, catalog, locale),
    ]
}
