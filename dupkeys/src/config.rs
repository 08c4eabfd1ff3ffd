//! Configuration types for duplicate-key scanning.
//!
//! Split into scan options (how a single text is scanned) and source-specific
//! config (how files are discovered). The scanner itself never sees filesystem
//! concerns.

use std::path::PathBuf;

use crate::error::OptionsError;

/// Single-line comment marker recognised by default.
pub const DEFAULT_COMMENT_MARKER: &str = "//";

/// Extensions scanned when walking a directory, unless overridden.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "json"];

/// Options for the line scanner. Apply regardless of where the text came from.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ScanOptions {
    /// Lines whose trimmed content starts with this marker contribute no
    /// brace transitions. Key extraction still runs on them.
    pub comment_marker: String,
    /// Also accept keys wrapped in single or double quotes (`"key":`).
    /// The quotes are stripped before comparison.
    pub quoted_keys: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            comment_marker: DEFAULT_COMMENT_MARKER.to_owned(),
            quoted_keys: false,
        }
    }
}

impl ScanOptions {
    /// Check that the options describe a usable scan.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::EmptyCommentMarker`] if `comment_marker` is empty,
    /// since every line would then count as a comment.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.comment_marker.trim().is_empty() {
            return Err(OptionsError::EmptyCommentMarker);
        }
        Ok(())
    }
}

/// Filesystem-specific source options.
///
/// `paths` is required and must be non-empty.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Paths to scan (files or directories).
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format), matched against the full path and the file name.
    pub exclude: Vec<String>,
    /// File extensions (without the dot) picked up while walking directories.
    /// Files named explicitly in `paths` are scanned whatever their extension.
    pub extensions: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links while walking (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
    /// Maximum number of files attempted (default: `100_000`).
    pub max_files: usize,
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|&e| e.to_owned()).collect(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
            max_files: 100_000,
        }
    }
}
