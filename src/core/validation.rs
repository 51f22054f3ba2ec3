// src/core/validation.rs

use crate::config::{MAX_INPUT_CHARS, MAX_UPLOAD_MB};
use crate::core::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

// Statically compiled patterns used by the sanitizer and the validators.
static RE_MARKUP_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>'"]"#).unwrap());
static RE_SCRIPT_SCHEMES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)javascript:|data:").unwrap());
static RE_HAS_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://").unwrap());
static RE_PRIVATE_172: Lazy<Regex> = Lazy::new(|| Regex::new(r"^172\.(1[6-9]|2[0-9]|3[01])\.").unwrap());
static RE_IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$").unwrap()
});

/// MIME types the file scanner accepts: documents, images and archives.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/zip",
    "application/x-zip-compressed",
    "application/x-rar-compressed",
];

// Extension -> MIME type, used when a file is picked from the filesystem.
static EXTENSION_MIME: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("xls", "application/vnd.ms-excel"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("txt", "text/plain"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("zip", "application/zip"),
    ("rar", "application/x-rar-compressed"),
    ("exe", "application/x-msdownload"),
    ("js", "text/javascript"),
    ("html", "text/html"),
];

const OCTET_STREAM: &str = "application/octet-stream";

/// Cleans raw user input before it is validated or sent anywhere.
///
/// Trims, removes `<`, `>`, `'` and `"`, removes every `javascript:` and
/// `data:` occurrence regardless of case, and keeps at most
/// `MAX_INPUT_CHARS` characters. Removals repeat until nothing changes, so
/// the function is idempotent: `sanitize(&sanitize(x)) == sanitize(x)`.
pub fn sanitize(input: &str) -> String {
    let mut current = input.trim().to_string();
    loop {
        let stripped = RE_MARKUP_CHARS.replace_all(&current, "");
        let stripped = RE_SCRIPT_SCHEMES.replace_all(&stripped, "").into_owned();
        if stripped == current {
            break;
        }
        current = stripped;
    }
    let truncated: String = current.chars().take(MAX_INPUT_CHARS).collect();
    truncated.trim().to_string()
}

fn is_private_or_loopback_host(hostname: &str) -> bool {
    hostname == "localhost"
        || hostname.starts_with("127.")
        || hostname.starts_with("192.168.")
        || hostname.starts_with("10.")
        || RE_PRIVATE_172.is_match(hostname)
}

/// Accepts public `http`/`https` URLs. A missing scheme defaults to https.
pub fn validate_url(input: &str) -> bool {
    let candidate = if RE_HAS_SCHEME.is_match(input) {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = match Url::parse(&candidate) {
        Ok(url) => url,
        Err(e) => {
            debug!(input, error = %e, "URL rejected: parse failure.");
            return false;
        }
    };

    if !matches!(url.scheme(), "http" | "https") {
        debug!(scheme = url.scheme(), "URL rejected: scheme not allowed.");
        return false;
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => !is_private_or_loopback_host(&host.to_lowercase()),
        _ => false,
    }
}

/// Accepts dotted-quad IPv4 addresses outside the loopback and private ranges.
pub fn validate_ip_address(input: &str) -> bool {
    if !RE_IPV4.is_match(input) {
        return false;
    }

    let octets: Vec<u8> = match input.split('.').map(str::parse::<u8>).collect() {
        Ok(octets) => octets,
        Err(_) => return false,
    };

    match (octets[0], octets[1]) {
        (127, _) => false,
        (10, _) => false,
        (192, 168) => false,
        (172, second) if (16..=31).contains(&second) => false,
        _ => true,
    }
}

/// A file chosen for upload, described the way the file scanner needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub path: Option<PathBuf>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), mime: mime.into(), size, path: None }
    }

    /// Describes a file on disk. The MIME type comes from the extension.
    pub fn from_path(path: &Path) -> Result<Self, ValidationError> {
        let unreadable = |reason: String| ValidationError::UnreadableFile {
            path: path.display().to_string(),
            reason,
        };

        let metadata = std::fs::metadata(path).map_err(|e| unreadable(e.to_string()))?;
        if !metadata.is_file() {
            return Err(unreadable("not a regular file".to_string()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            mime: mime_for_path(path).to_string(),
            size: metadata.len(),
            path: Some(path.to_path_buf()),
        })
    }
}

pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = match path.extension() {
        Some(ext) => ext.to_string_lossy().to_lowercase(),
        None => return OCTET_STREAM,
    };
    EXTENSION_MIME
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .unwrap_or(OCTET_STREAM)
}

pub fn validate_file_type(file: &FileCandidate) -> bool {
    ALLOWED_MIME_TYPES.contains(&file.mime.as_str())
}

pub fn validate_file_size(file: &FileCandidate, max_mb: u64) -> bool {
    file.size <= max_mb * 1024 * 1024
}

/// Size first, then type.
pub fn validate_file(file: &FileCandidate, max_mb: u64) -> Result<(), ValidationError> {
    if !validate_file_size(file, max_mb) {
        return Err(ValidationError::FileTooLarge { max_mb });
    }
    if !validate_file_type(file) {
        return Err(ValidationError::UnsupportedFileType { mime: file.mime.clone() });
    }
    Ok(())
}

/// Sanitizes and validates input for the URL scanner.
pub fn prepare_url_input(raw: &str) -> Result<String, ValidationError> {
    let sanitized = sanitize(raw);
    if sanitized.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    if !validate_url(&sanitized) {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(sanitized)
}

/// Sanitizes and validates input for the IP scanner.
pub fn prepare_ip_input(raw: &str) -> Result<String, ValidationError> {
    let sanitized = sanitize(raw);
    if sanitized.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    if !validate_ip_address(&sanitized) {
        return Err(ValidationError::InvalidIp);
    }
    Ok(sanitized)
}

/// Resolves and validates a typed file path for the file scanner.
pub fn prepare_file_input(raw: &str) -> Result<FileCandidate, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    let file = FileCandidate::from_path(Path::new(trimmed))?;
    validate_file(&file, MAX_UPLOAD_MB)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_markup_and_script_schemes() {
        assert_eq!(sanitize("  <b>example.com</b>  "), "bexample.com/b");
        assert_eq!(sanitize("JavaScript:alert(1)"), "alert(1)");
        assert_eq!(sanitize("DATA:text/html,hi"), "text/html,hi");
        assert_eq!(sanitize("'\"8.8.8.8\"'"), "8.8.8.8");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "java<script:alert(1)",
            "jav<ascript:x",
            "  data:  ",
            "dadata:ta:x",
            "a <",
            "plain.example.org/path?q=1",
            "",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input: {input:?}");
            assert!(!once.to_lowercase().contains("javascript:"));
            assert!(!once.to_lowercase().contains("data:"));
        }
    }

    #[test]
    fn sanitize_truncates_long_input() {
        let long = "a".repeat(5000);
        assert_eq!(sanitize(&long).chars().count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn url_validation() {
        assert!(validate_url("example.com"));
        assert!(validate_url("http://example.com/path"));
        assert!(validate_url("HTTPS://Example.COM"));
        assert!(!validate_url("localhost"));
        assert!(!validate_url("http://LOCALHOST:3000"));
        assert!(!validate_url("ftp://x.com"));
        assert!(!validate_url("127.0.0.1"));
        assert!(!validate_url("https://10.1.2.3"));
        assert!(!validate_url("192.168.1.1/admin"));
        assert!(!validate_url("172.20.0.1"));
        assert!(validate_url("172.32.0.1"));
        assert!(!validate_url("http://"));
        assert!(!validate_url("exa mple.com"));
    }

    #[test]
    fn ip_validation() {
        assert!(validate_ip_address("8.8.8.8"));
        assert!(validate_ip_address("172.15.0.1"));
        assert!(validate_ip_address("172.32.0.1"));
        assert!(!validate_ip_address("127.0.0.1"));
        assert!(!validate_ip_address("999.1.1.1"));
        assert!(!validate_ip_address("10.0.0.1"));
        assert!(!validate_ip_address("192.168.0.10"));
        assert!(!validate_ip_address("172.16.0.1"));
        assert!(!validate_ip_address("172.31.255.255"));
        assert!(!validate_ip_address("1.2.3"));
        assert!(!validate_ip_address("1.2.3.4.5"));
        assert!(!validate_ip_address(" 8.8.8.8"));
    }

    #[test]
    fn file_type_and_size() {
        let pdf = FileCandidate::new("report.pdf", "application/pdf", 1024);
        assert!(validate_file_type(&pdf));
        assert!(validate_file_size(&pdf, 1));

        let exe = FileCandidate::new("setup.exe", "application/x-msdownload", 10);
        assert!(!validate_file_type(&exe));

        let exact = FileCandidate::new("a.zip", "application/zip", 2 * 1024 * 1024);
        assert!(validate_file_size(&exact, 2));
        let over = FileCandidate { size: 2 * 1024 * 1024 + 1, ..exact };
        assert!(!validate_file_size(&over, 2));
    }

    #[test]
    fn validate_file_checks_size_before_type() {
        let huge_exe = FileCandidate::new("big.exe", "application/x-msdownload", 200 * 1024 * 1024);
        assert_eq!(
            validate_file(&huge_exe, 100),
            Err(ValidationError::FileTooLarge { max_mb: 100 })
        );
    }

    #[test]
    fn mime_comes_from_extension() {
        assert_eq!(mime_for_path(Path::new("a/b/Scan.PDF")), "application/pdf");
        assert_eq!(mime_for_path(Path::new("notes")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("x.unknown")), "application/octet-stream");
    }

    #[test]
    fn prepare_inputs() {
        assert_eq!(prepare_ip_input("  8.8.8.8 "), Ok("8.8.8.8".to_string()));
        assert_eq!(prepare_ip_input("<>"), Err(ValidationError::EmptyInput));
        assert_eq!(prepare_url_input("localhost"), Err(ValidationError::InvalidUrl));
        assert_eq!(prepare_url_input("example.com"), Ok("example.com".to_string()));
        assert_eq!(prepare_file_input("   "), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn file_candidate_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.txt");
        std::fs::write(&path, b"hello").unwrap();

        let file = prepare_file_input(path.to_str().unwrap()).unwrap();
        assert_eq!(file.name, "invoice.txt");
        assert_eq!(file.mime, "text/plain");
        assert_eq!(file.size, 5);

        let missing = dir.path().join("nope.pdf");
        assert!(matches!(
            prepare_file_input(missing.to_str().unwrap()),
            Err(ValidationError::UnreadableFile { .. })
        ));

        assert!(matches!(
            FileCandidate::from_path(dir.path()),
            Err(ValidationError::UnreadableFile { .. })
        ));
    }
}
