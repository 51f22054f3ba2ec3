// src/core/error.rs

//! Error types for the scan pipeline.
//!
//! Every failure is terminal for the scan attempt that produced it and leaves
//! the scanner ready for a fresh attempt.

use crate::core::models::ScannerKind;
use std::time::Duration;
use thiserror::Error;

/// Rejected user input. Raised before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a value to scan")]
    EmptyInput,

    #[error("Please enter a valid, public URL")]
    InvalidUrl,

    #[error("Please enter a valid, public IP address")]
    InvalidIp,

    #[error("Maximum file size is {max_mb}MB")]
    FileTooLarge { max_mb: u64 },

    #[error("Please select a supported file type")]
    UnsupportedFileType { mime: String },

    #[error("Cannot read file {path}: {reason}")]
    UnreadableFile { path: String, reason: String },
}

impl ValidationError {
    /// Short headline shown above the message in a notification.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "Input Required",
            ValidationError::InvalidUrl => "Invalid URL",
            ValidationError::InvalidIp => "Invalid IP Address",
            ValidationError::FileTooLarge { .. } => "File Too Large",
            ValidationError::UnsupportedFileType { .. } => "Invalid File Type",
            ValidationError::UnreadableFile { .. } => "File Required",
        }
    }
}

/// Failure of a dispatched scan: transport or decoding.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Scan timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        ScanError::InvalidResponse(reason.into())
    }

    /// The text shown to the user in the "Scan Failed" notification.
    pub fn user_message(&self, kind: ScannerKind) -> String {
        match self {
            ScanError::Timeout { .. } if kind == ScannerKind::File => {
                "File scan timeout. Please try again with a smaller file.".to_string()
            }
            ScanError::Timeout { .. } => "Scan timeout. Please try again.".to_string(),
            ScanError::Network(_) => "Network error. Please check your connection.".to_string(),
            ScanError::Http { message, .. } => message.clone(),
            ScanError::InvalidResponse(reason) => format!("Invalid response format: {reason}"),
            ScanError::Validation(e) => e.to_string(),
            ScanError::Client(_) | ScanError::Io(_) => {
                "Unable to complete the scan. Please try again.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ScanError::InvalidResponse(e.to_string())
        } else if e.is_builder() {
            ScanError::Client(e.to_string())
        } else {
            ScanError::Network(e.to_string())
        }
    }
}

pub type ScanOutcome<T> = Result<T, ScanError>;
