//! # dupkeys
//!
//! Detects duplicate sibling keys in brace-delimited key/value sources such as
//! translation dictionaries (`export const de = { nav: { home: "..." } }`).
//!
//! The crate separates the **scanner** (a heuristic, line-oriented pass over
//! text, see [`scanner`]) from **input strategies** (starting with filesystem
//! discovery). The scanner never parses values; it tracks brace depth and the
//! keys seen at each open level.
//!
//! ## Quick Start
//!
//! ```rust
//! use dupkeys::{Finding, scan};
//!
//! let findings = scan(["{", "  key: 1", "  key: 2", "}"]);
//! assert_eq!(findings, vec![Finding::new(3, "key")]);
//! ```
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use dupkeys::{FsSourceConfig, ScanOptions, check_fs};
//!
//! let mut fs_config = FsSourceConfig::default();
//! fs_config.paths = vec![PathBuf::from("src/i18n/dictionaries")];
//!
//! let report = check_fs(&fs_config, &ScanOptions::default()).unwrap();
//! println!("Files scanned: {}", report.scanned_files);
//! println!("Duplicates: {}", report.findings_count());
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod error;
pub mod output;
mod report;
pub mod scanner;
mod strategy;

pub use config::{DEFAULT_COMMENT_MARKER, DEFAULT_EXTENSIONS, FsSourceConfig, ScanOptions};
pub use error::{OptionsError, ScanError, ScanErrorKind};
pub use report::{CheckReport, FileReport};
pub use scanner::{Finding, ScanOutcome, ScanStats, Scanner, scan, scan_text};

use std::path::Path;

use tracing::{debug, info, warn};

use strategy::fs::{find_files, read_file_bounded};

/// Scan already-loaded text and wrap the outcome in a [`FileReport`].
///
/// # Errors
///
/// Returns an error if `options` are invalid.
pub fn check_text(
    content: &str,
    path: &Path,
    options: &ScanOptions,
) -> Result<FileReport, OptionsError> {
    let outcome = scan_text(content, options)?;
    Ok(FileReport {
        file: path.to_owned(),
        findings: outcome.findings,
        stats: outcome.stats,
    })
}

/// Check dictionary files on disk for duplicate sibling keys.
///
/// This is the primary filesystem API.
///
/// # Arguments
///
/// * `fs_config` - Filesystem source options (paths, exclude, extensions, limits)
/// * `options` - Scanner options (comment marker, quoted keys)
///
/// # Errors
///
/// Returns an error if `options` are invalid, if `fs_config.paths` is empty, or
/// if any provided path does not exist. Returns `Ok` with `scanned_files: 0` if
/// the paths exist but contain no matching files. Per-file failures are
/// reported in `report.scan_errors` and never silently discarded.
pub fn check_fs(fs_config: &FsSourceConfig, options: &ScanOptions) -> anyhow::Result<CheckReport> {
    options.validate()?;

    if fs_config.paths.is_empty() {
        anyhow::bail!("No paths provided for checking");
    }

    for path in &fs_config.paths {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    let (files, mut scan_errors) = find_files(fs_config);
    debug!(
        candidates = files.len(),
        discovery_errors = scan_errors.len(),
        "file discovery finished"
    );

    // Discovery failures are counted as failed files upfront.
    let mut failed_files = scan_errors.len();
    let mut scanned_files: usize = 0;
    let mut reports = Vec::with_capacity(files.len());

    for file_path in &files {
        if scanned_files + failed_files >= fs_config.max_files {
            scan_errors.push(ScanError::new(
                file_path.clone(),
                ScanErrorKind::LimitExceeded,
                format!(
                    "Scan aborted: max_files limit ({}) reached; remaining files not scanned",
                    fs_config.max_files
                ),
            ));
            failed_files += 1;
            break;
        }

        let content = match read_file_bounded(file_path, fs_config.max_file_size) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %file_path.display(), error = %e.message, "file skipped");
                scan_errors.push(e);
                failed_files += 1;
                continue;
            }
        };

        let report = check_text(&content, file_path, options)?;
        debug!(
            path = %file_path.display(),
            lines = report.stats.lines,
            duplicates = report.findings.len(),
            "file scanned"
        );
        if report.stats.unclosed_scopes > 0 || report.stats.stray_closes > 0 {
            info!(
                path = %file_path.display(),
                unclosed = report.stats.unclosed_scopes,
                stray = report.stats.stray_closes,
                "unbalanced braces"
            );
        }
        scanned_files += 1;
        reports.push(report);
    }

    let ok = reports.iter().all(|r| !r.has_duplicates()) && scan_errors.is_empty();
    Ok(CheckReport {
        scanned_files,
        failed_files,
        ok,
        files: reports,
        scan_errors,
    })
}
