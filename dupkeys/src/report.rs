//! Report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::ScanError;
use crate::scanner::{Finding, ScanStats};

/// Scan result for one file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FileReport {
    /// The scanned file.
    pub file: PathBuf,
    /// Duplicate keys in line order.
    pub findings: Vec<Finding>,
    /// Scan counters for the file.
    pub stats: ScanStats,
}

impl FileReport {
    /// Whether the file has at least one duplicate key.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Result of a check run over one or more files.
///
/// Callers must check both `findings_count()` and `scan_errors`: a
/// non-empty `scan_errors` means some files were never scanned.
#[derive(Debug, Clone, Default, Serialize)]
#[non_exhaustive]
pub struct CheckReport {
    /// Number of files successfully read and scanned.
    pub scanned_files: usize,
    /// Number of files that could not be scanned.
    pub failed_files: usize,
    /// No duplicates found AND no scan errors occurred.
    pub ok: bool,
    /// Per-file results, one entry per scanned file, sorted by path.
    pub files: Vec<FileReport>,
    /// Files that could not be read, plus walk and configuration problems.
    pub scan_errors: Vec<ScanError>,
}

impl CheckReport {
    /// Total number of files attempted (scanned + failed).
    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.scanned_files + self.failed_files
    }

    /// Number of duplicate keys across all files.
    #[must_use]
    pub fn findings_count(&self) -> usize {
        self.files.iter().map(|f| f.findings.len()).sum()
    }

    /// Reports of the files that contain duplicates.
    pub fn files_with_duplicates(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.has_duplicates())
    }
}
