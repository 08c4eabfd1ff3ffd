//! Line-oriented duplicate sibling-key scanner.
//!
//! The scan is a heuristic, single pass over the lines of a brace-delimited
//! key/value source. It does not parse values. For each line, in order:
//! 1. extract at most one indented `key:` token, looking past the comment
//!    marker on commented lines;
//! 2. compare it against the keys already seen in the current scope;
//! 3. open one scope per `{` on the line;
//! 4. close one scope per `}` on the line.
//!
//! Steps 3 and 4 are skipped on lines whose trimmed content starts with the
//! comment marker. All opens of a line are applied before its closes, whatever
//! their textual order, so `} {` on one line nests one level deeper before
//! coming back.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ScanOptions;
use crate::error::OptionsError;

/// Identifier followed by a colon. Matched after the indentation is stripped.
static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"^(\w+):") {
    Ok(regex) => regex,
    Err(err) => panic!("Invalid key regex: {err}"),
});

/// Same as [`KEY_PATTERN`], also accepting `"key":` and `'key':`.
static QUOTED_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r#"^(?:"(\w+)"|'(\w+)'|(\w+)):"#) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid quoted key regex: {err}"),
    });

/// A key seen twice among the siblings of one open scope.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct Finding {
    /// Line number (1-indexed) of the repeated occurrence.
    pub line: usize,
    /// The repeated key, without quotes.
    pub key: String,
}

impl Finding {
    /// Create a finding for `key` at `line`.
    #[must_use]
    pub fn new(line: usize, key: impl Into<String>) -> Self {
        Self {
            line,
            key: key.into(),
        }
    }

    /// Format the finding as `Line <N>: <key>`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("Line {}: {}", self.line, self.key)
    }
}

/// Counters gathered during one scan.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanStats {
    /// Lines processed.
    pub lines: usize,
    /// Keys extracted, duplicates included.
    pub keys: usize,
    /// Scopes pushed (one per counted `{`).
    pub scopes_opened: usize,
    /// Scopes popped (one per counted `}` that had a scope to close).
    pub scopes_closed: usize,
    /// Counted `}` met while only the top-level scope was open.
    pub stray_closes: usize,
    /// Deepest nesting reached; the top level is depth 0.
    pub max_depth: usize,
    /// Scopes still open when the input ended.
    pub unclosed_scopes: usize,
}

/// Result of a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanOutcome {
    /// Duplicates in input order.
    pub findings: Vec<Finding>,
    /// Scan counters.
    pub stats: ScanStats,
}

/// Key sets of the open nesting levels.
///
/// `current` is the innermost open scope. The top-level scope starts as
/// `current` and is never popped.
#[derive(Debug, Default)]
struct ScopeStack {
    current: HashSet<String>,
    enclosing: Vec<HashSet<String>>,
}

impl ScopeStack {
    /// Record `key` in the current scope. Returns `false` if it was already there.
    fn insert(&mut self, key: &str) -> bool {
        if self.current.contains(key) {
            return false;
        }
        self.current.insert(key.to_owned())
    }

    fn push(&mut self) {
        let outer = std::mem::take(&mut self.current);
        self.enclosing.push(outer);
    }

    /// Restore the enclosing scope. Returns `false` on the top level.
    fn pop(&mut self) -> bool {
        match self.enclosing.pop() {
            Some(outer) => {
                self.current = outer;
                true
            }
            None => false,
        }
    }

    fn depth(&self) -> usize {
        self.enclosing.len()
    }
}

/// Incremental scanner. Feed it lines in order, then call [`Scanner::finish`].
#[derive(Debug)]
pub struct Scanner {
    comment_marker: String,
    quoted_keys: bool,
    scopes: ScopeStack,
    line_number: usize,
    findings: Vec<Finding>,
    stats: ScanStats,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::from_valid_options(&ScanOptions::default())
    }
}

impl Scanner {
    /// Create a scanner with the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if `options` fail [`ScanOptions::validate`].
    pub fn new(options: &ScanOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self::from_valid_options(options))
    }

    fn from_valid_options(options: &ScanOptions) -> Self {
        Self {
            comment_marker: options.comment_marker.clone(),
            quoted_keys: options.quoted_keys,
            scopes: ScopeStack::default(),
            line_number: 0,
            findings: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// Process the next line of input.
    pub fn feed_line(&mut self, line: &str) {
        self.line_number += 1;
        self.stats.lines += 1;

        if let Some(key) = self.extract_key(line) {
            self.stats.keys += 1;
            if !self.scopes.insert(key) {
                debug!(line = self.line_number, key, "duplicate sibling key");
                self.findings.push(Finding::new(self.line_number, key));
            }
        }

        if line.trim().starts_with(self.comment_marker.as_str()) {
            return;
        }

        for _ in line.matches('{') {
            self.scopes.push();
            self.stats.scopes_opened += 1;
        }
        self.stats.max_depth = self.stats.max_depth.max(self.scopes.depth());

        for _ in line.matches('}') {
            if self.scopes.pop() {
                self.stats.scopes_closed += 1;
            } else {
                self.stats.stray_closes += 1;
                trace!(line = self.line_number, "closing brace without open scope");
            }
        }
    }

    /// Extract the key of an indented `key:` line.
    ///
    /// Unindented lines never yield a key. On an indented commented line the
    /// marker is skipped, so `  // key: 1` yields `key`.
    fn extract_key<'l>(&self, line: &'l str) -> Option<&'l str> {
        if !line.starts_with(char::is_whitespace) {
            return None;
        }
        let trimmed = line.trim_start();
        let body = trimmed
            .strip_prefix(self.comment_marker.as_str())
            .map_or(trimmed, str::trim_start);
        let pattern = if self.quoted_keys {
            &*QUOTED_KEY_PATTERN
        } else {
            &*KEY_PATTERN
        };
        let captures = pattern.captures(body)?;
        captures.iter().skip(1).flatten().next().map(|m| m.as_str())
    }

    /// Number of lines processed so far.
    #[must_use]
    pub fn lines_seen(&self) -> usize {
        self.line_number
    }

    /// Findings collected so far.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// End the scan. Scopes still open are counted, never reported as errors.
    #[must_use]
    pub fn finish(mut self) -> ScanOutcome {
        self.stats.unclosed_scopes = self.scopes.depth();
        if self.stats.unclosed_scopes > 0 {
            debug!(
                unclosed = self.stats.unclosed_scopes,
                "input ended with open scopes"
            );
        }
        ScanOutcome {
            findings: self.findings,
            stats: self.stats,
        }
    }
}

/// Scan `lines` with the default options and return the duplicates found.
///
/// Line numbers in the result start at 1.
#[must_use]
pub fn scan<I, S>(lines: I) -> Vec<Finding>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::default();
    for line in lines {
        scanner.feed_line(line.as_ref());
    }
    scanner.finish().findings
}

/// Split `content` on `'\n'` and scan every line.
///
/// # Errors
///
/// Returns an error if `options` are invalid.
pub fn scan_text(content: &str, options: &ScanOptions) -> Result<ScanOutcome, OptionsError> {
    let mut scanner = Scanner::new(options)?;
    for line in content.split('\n') {
        scanner.feed_line(line);
    }
    Ok(scanner.finish())
}
