//! Filesystem source.
//!
//! Discovers dictionary files on disk and reads them for the scanner.
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Dependency and build directories are skipped
//! - Maximum directory depth is enforced
//! - Reads are bounded by `max_file_size`

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::FsSourceConfig;
use crate::error::{ScanError, ScanErrorKind};

/// Directories to skip
pub const SKIP_DIRS: &[&str] = &["node_modules", ".git", "target", "dist", ".next"];

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// `true` if the entry should be walked into (i.e., is NOT a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() > 0
        && entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

/// Check if the file has one of the configured extensions.
fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

fn compile_excludes(exclude: &[String], scan_errors: &mut Vec<ScanError>) -> Vec<Pattern> {
    let mut patterns = Vec::with_capacity(exclude.len());
    for pat_str in exclude {
        match Pattern::new(pat_str) {
            Ok(pat) => patterns.push(pat),
            Err(e) => scan_errors.push(ScanError::new(
                pat_str,
                ScanErrorKind::InvalidExcludePattern,
                format!("Invalid exclude glob pattern '{pat_str}': {e}"),
            )),
        }
    }
    patterns
}

/// Find all files to scan in the given paths.
///
/// Returns `(files, scan_errors)`:
/// - `files`: paths that passed all filters, sorted and deduplicated.
/// - `scan_errors`: walk errors and invalid exclude patterns.
pub fn find_files(config: &FsSourceConfig) -> (Vec<PathBuf>, Vec<ScanError>) {
    let mut files = Vec::new();
    let mut scan_errors = Vec::new();
    let exclude_patterns = compile_excludes(&config.exclude, &mut scan_errors);

    for root in &config.paths {
        if root.is_file() {
            // Explicitly named files are scanned whatever their extension.
            if matches_exclude(root, &exclude_patterns) {
                debug!(path = %root.display(), "skipping excluded file");
            } else {
                files.push(root.clone());
            }
            continue;
        }

        if !root.is_dir() {
            continue;
        }

        for entry_result in WalkDir::new(root)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
            .into_iter()
            .filter_entry(is_not_skip_dir)
        {
            let entry = match entry_result {
                Ok(e) => e,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    scan_errors.push(ScanError::new(
                        path,
                        ScanErrorKind::WalkError,
                        format!("Directory traversal error: {walk_err}"),
                    ));
                    continue;
                }
            };

            let file_path = entry.path();
            if !entry.file_type().is_file() || !matches_extension(file_path, &config.extensions) {
                continue;
            }

            if matches_exclude(file_path, &exclude_patterns) {
                debug!(path = %file_path.display(), "skipping excluded file");
                continue;
            }

            files.push(file_path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    (files, scan_errors)
}

/// Read a file as UTF-8 text, reading at most `max_file_size + 1` bytes.
///
/// # Errors
///
/// Returns a [`ScanError`] if the file cannot be opened or read, exceeds
/// `max_file_size`, or is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, ScanError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ScanError::new(
            path,
            ScanErrorKind::IoError,
            format!("Failed to open file: {e}"),
        )
    })?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            ScanError::new(
                path,
                ScanErrorKind::IoError,
                format!("Failed to read file: {e}"),
            )
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(ScanError::new(
            path,
            ScanErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer).map_err(|_| {
        ScanError::new(
            path,
            ScanErrorKind::InvalidEncoding,
            "File is not valid UTF-8".to_owned(),
        )
    })
}
