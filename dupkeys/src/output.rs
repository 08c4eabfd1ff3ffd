//! Output formatting for check reports.
//!
//! Provides JSON and plain-text formatters for `CheckReport`.
//! Color belongs to the CLI layer, not to this module.

use std::io::Write;

use crate::report::CheckReport;

/// Message written when a report contains no duplicate keys.
pub const NO_DUPLICATES_MESSAGE: &str = "No duplicates found.";

/// Format a `CheckReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `CheckReport` as plain text to a writer.
///
/// Every file with duplicates gets a header followed by one `Line <N>: <key>`
/// line per finding. Scan errors follow. A report without findings and without
/// scan errors ends with [`NO_DUPLICATES_MESSAGE`].
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    for file in report.files_with_duplicates() {
        writeln!(writer, "Found duplicates in {}:", file.file.display())?;
        for finding in &file.findings {
            writeln!(writer, "{}", finding.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if !report.scan_errors.is_empty() {
        writeln!(writer, "Scan errors (files that could not be checked):")?;
        for scan_err in &report.scan_errors {
            writeln!(writer, "{}", scan_err.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    let findings = report.findings_count();
    if findings > 0 {
        writeln!(
            writer,
            "{findings} duplicate key(s) in {} of {} scanned file(s).",
            report.files_with_duplicates().count(),
            report.scanned_files
        )?;
    } else if report.scan_errors.is_empty() {
        writeln!(writer, "{NO_DUPLICATES_MESSAGE}")?;
    }
    if !report.scan_errors.is_empty() {
        writeln!(
            writer,
            "{} file(s) could not be scanned.",
            report.failed_files
        )?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::error::{ScanError, ScanErrorKind};
    use crate::report::FileReport;
    use crate::scanner::{Finding, ScanStats};

    fn render(report: &CheckReport) -> String {
        let mut out = Vec::new();
        write_human(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn report_with(findings: Vec<Finding>) -> CheckReport {
        let ok = findings.is_empty();
        CheckReport {
            scanned_files: 1,
            failed_files: 0,
            ok,
            files: vec![FileReport {
                file: PathBuf::from("dictionaries/de.ts"),
                findings,
                stats: ScanStats::default(),
            }],
            scan_errors: vec![],
        }
    }

    #[test]
    fn test_human_lists_findings() {
        let text = render(&report_with(vec![Finding::new(3, "key"), Finding::new(6, "a")]));
        assert!(text.contains("Found duplicates in dictionaries/de.ts:"));
        assert!(text.contains("Line 3: key\nLine 6: a\n"));
        assert!(text.contains("2 duplicate key(s) in 1 of 1 scanned file(s)."));
        assert!(!text.contains(NO_DUPLICATES_MESSAGE));
    }

    #[test]
    fn test_human_clean_report() {
        let text = render(&report_with(vec![]));
        assert_eq!(text, "No duplicates found.\n");
    }

    #[test]
    fn test_human_scan_errors_are_not_reported_clean() {
        let mut report = report_with(vec![]);
        report.failed_files = 1;
        report.ok = false;
        report.scan_errors.push(ScanError::new(
            "dictionaries/fr.ts",
            ScanErrorKind::InvalidEncoding,
            "File is not valid UTF-8".to_owned(),
        ));

        let text = render(&report);
        assert!(text.contains("dictionaries/fr.ts: [scan error] File is not valid UTF-8"));
        assert!(!text.contains(NO_DUPLICATES_MESSAGE));
        assert!(text.contains("1 file(s) could not be scanned."));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_json(&report_with(vec![Finding::new(3, "key")]), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["files"][0]["findings"][0]["line"], 3);
        assert_eq!(value["files"][0]["findings"][0]["key"], "key");
        assert_eq!(value["files"][0]["stats"]["unclosed_scopes"], 0);
    }
}
