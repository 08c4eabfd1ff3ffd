//! Error types for duplicate-key scanning.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Invalid [`ScanOptions`](crate::ScanOptions).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum OptionsError {
    /// The comment marker is empty or whitespace only.
    #[error("comment marker must not be empty")]
    EmptyCommentMarker,
}

/// The kind of failure that prevented a file from being scanned.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The `max_files` limit was reached, truncating the scan.
    LimitExceeded,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A file that could not be scanned at all.
///
/// Duplicate keys are reported as [`Finding`](crate::Finding)s; a `ScanError`
/// means the file never reached the scanner, so its dictionaries are unchecked.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    /// The file path that could not be scanned.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    /// Create a scan error for `file`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, kind: ScanErrorKind, message: String) -> Self {
        Self {
            file: file.into(),
            kind,
            message,
        }
    }

    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [scan error] {}", self.file.display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scan_error() {
        let err = ScanError::new(
            "src/i18n/dictionaries/de.ts",
            ScanErrorKind::InvalidEncoding,
            "File is not valid UTF-8".to_owned(),
        );

        assert_eq!(
            err.format_human_readable(),
            "src/i18n/dictionaries/de.ts: [scan error] File is not valid UTF-8"
        );
    }

    #[test]
    fn test_options_error_message() {
        assert_eq!(
            OptionsError::EmptyCommentMarker.to_string(),
            "comment marker must not be empty"
        );
    }
}
