use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use dupkeys::output::{write_human, write_json};
use dupkeys::{CheckReport, DEFAULT_COMMENT_MARKER, FsSourceConfig, ScanOptions, check_fs};

use crate::logging;

/// Exit status when duplicates were found or files could not be scanned.
pub const EXIT_FINDINGS: u8 = 1;
/// Exit status for setup errors (missing paths, invalid options, I/O on output).
pub const EXIT_SETUP_ERROR: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `Line <N>: <key>` lines grouped per file
    Human,
    /// Pretty-printed JSON report
    Json,
}

/// Find duplicate sibling keys in brace-delimited dictionary sources.
#[derive(Debug, Parser)]
#[command(name = "dupkeys", version)]
pub struct Cli {
    /// Files or directories to scan
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Glob pattern to exclude (matched against the path and the file name)
    #[arg(short, long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// File extension to pick up while walking directories (replaces the default list)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Single-line comment marker; braces on commented lines are not counted
    #[arg(long, value_name = "MARKER", default_value = DEFAULT_COMMENT_MARKER)]
    pub comment_marker: String,

    /// Also recognise quoted keys ("key": / 'key':)
    #[arg(long)]
    pub quoted_keys: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Maximum file size in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Follow symbolic links while walking directories
    #[arg(long)]
    pub follow_links: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Map the arguments onto the library configuration.
    pub fn configs(&self) -> (FsSourceConfig, ScanOptions) {
        let mut fs_config = FsSourceConfig::default();
        fs_config.paths.clone_from(&self.paths);
        fs_config.exclude.clone_from(&self.exclude);
        if !self.extensions.is_empty() {
            fs_config.extensions.clone_from(&self.extensions);
        }
        if let Some(max) = self.max_file_size {
            fs_config.max_file_size = max;
        }
        fs_config.follow_links = self.follow_links;

        let mut options = ScanOptions::default();
        options.comment_marker.clone_from(&self.comment_marker);
        options.quoted_keys = self.quoted_keys;

        (fs_config, options)
    }
}

/// Parse the command line, set up the terminal and run the check.
///
/// Returns the process exit status.
pub fn run() -> u8 {
    let cli = Cli::parse();

    let color = !cli.no_color && std::io::stderr().is_terminal();
    colored::control::set_override(color);
    logging::init(cli.verbose, color);

    let mut stdout = std::io::stdout().lock();
    execute(&cli, &mut stdout)
}

/// Run the check described by `cli`, writing the report to `out`.
///
/// Setup failures are printed to stderr and mapped to [`EXIT_SETUP_ERROR`].
pub fn execute(cli: &Cli, out: &mut dyn Write) -> u8 {
    match run_with(cli, out) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {e:#}");
            EXIT_SETUP_ERROR
        }
    }
}

/// Run the check and write the report.
///
/// # Errors
///
/// Returns an error if the check cannot start or the report cannot be written.
pub fn run_with(cli: &Cli, out: &mut dyn Write) -> Result<u8> {
    let (fs_config, options) = cli.configs();
    let report = check_fs(&fs_config, &options)?;

    match cli.format {
        OutputFormat::Human => {
            write_human(&report, out)?;
            eprintln!("{}", status_line(&report));
        }
        OutputFormat::Json => write_json(&report, out)?,
    }

    Ok(exit_status(&report))
}

/// `0` when nothing was found and every file was scanned, [`EXIT_FINDINGS`] otherwise.
pub fn exit_status(report: &CheckReport) -> u8 {
    if report.findings_count() == 0 && report.scan_errors.is_empty() {
        0
    } else {
        EXIT_FINDINGS
    }
}

fn status_line(report: &CheckReport) -> String {
    if report.ok {
        format!(
            "{} {} file(s) checked, no duplicate keys",
            "\u{2713}".green(),
            report.scanned_files
        )
    } else {
        format!(
            "{} {} duplicate key(s), {} file(s) not scanned",
            "\u{2717}".red(),
            report.findings_count(),
            report.failed_files
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use dupkeys::{ScanError, ScanErrorKind, check_text};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn run_args(args: &[&str]) -> (u8, String) {
        let mut argv = vec!["dupkeys", "--no-color"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let status = execute(&cli, &mut out);
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dupkeys", "src/i18n"]).unwrap();
        let (fs_config, options) = cli.configs();

        assert_eq!(fs_config.paths, vec![PathBuf::from("src/i18n")]);
        assert_eq!(fs_config.extensions, FsSourceConfig::default().extensions);
        assert_eq!(fs_config.max_file_size, FsSourceConfig::default().max_file_size);
        assert_eq!(options.comment_marker, "//");
        assert!(!options.quoted_keys);
        assert_eq!(cli.format, OutputFormat::Human);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "dupkeys",
            "de.ts",
            "en.ts",
            "--exclude",
            "*.d.ts",
            "--ext",
            "ts",
            "--ext",
            "json",
            "--comment-marker",
            "#",
            "--quoted-keys",
            "--format",
            "json",
            "--max-file-size",
            "2048",
            "--follow-links",
            "-vv",
        ])
        .unwrap();
        let (fs_config, options) = cli.configs();

        assert_eq!(fs_config.paths.len(), 2);
        assert_eq!(fs_config.exclude, vec!["*.d.ts".to_owned()]);
        assert_eq!(fs_config.extensions, vec!["ts".to_owned(), "json".to_owned()]);
        assert_eq!(fs_config.max_file_size, 2048);
        assert!(fs_config.follow_links);
        assert_eq!(options.comment_marker, "#");
        assert!(options.quoted_keys);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_paths_required() {
        assert!(Cli::try_parse_from(["dupkeys"]).is_err());
    }

    #[test]
    fn test_status_line() {
        colored::control::set_override(false);
        let mut report = CheckReport::default();
        report.ok = true;
        report.scanned_files = 4;
        assert_eq!(
            status_line(&report),
            "\u{2713} 4 file(s) checked, no duplicate keys"
        );
    }

    #[test]
    fn test_exit_status_clean() {
        let mut report = CheckReport::default();
        report.ok = true;
        report.scanned_files = 1;
        assert_eq!(exit_status(&report), 0);
    }

    #[test]
    fn test_exit_status_findings_only() {
        let file = check_text("{\n  a: 1\n  a: 2\n}", Path::new("de.ts"), &ScanOptions::default())
            .unwrap();
        let mut report = CheckReport::default();
        report.scanned_files = 1;
        report.files.push(file);
        assert_eq!(exit_status(&report), EXIT_FINDINGS);
    }

    #[test]
    fn test_exit_status_scan_errors_only() {
        let mut report = CheckReport::default();
        report.failed_files = 1;
        report.scan_errors.push(ScanError::new(
            "fr.ts",
            ScanErrorKind::InvalidEncoding,
            "File is not valid UTF-8".to_owned(),
        ));
        assert_eq!(exit_status(&report), EXIT_FINDINGS);
    }

    #[test]
    fn test_execute_clean_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("en.ts"), "{\n  save: 'Save',\n}\n").unwrap();

        let (status, out) = run_args(&[tmp.path().to_str().unwrap()]);
        assert_eq!(status, 0);
        assert_eq!(out.trim_end(), "No duplicates found.");
    }

    #[test]
    fn test_execute_reports_duplicates() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("de.ts"), "{\n  a: 1,\n  a: 2,\n}\n").unwrap();

        let (status, out) = run_args(&[tmp.path().to_str().unwrap()]);
        assert_eq!(status, EXIT_FINDINGS);
        assert!(out.contains("Line 3: a"), "got: {out}");
    }

    #[test]
    fn test_execute_unreadable_file_fails() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("fr.ts"), [0x7b, 0x0a, 0xff, 0x0a, 0x7d]).unwrap();

        let (status, out) = run_args(&["--format", "json", tmp.path().to_str().unwrap()]);
        assert_eq!(status, EXIT_FINDINGS);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["scan_errors"][0]["kind"], "InvalidEncoding");
    }

    #[test]
    fn test_execute_missing_path_is_setup_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does_not_exist");

        let (status, out) = run_args(&[missing.to_str().unwrap()]);
        assert_eq!(status, EXIT_SETUP_ERROR);
        assert!(out.is_empty());
    }

    #[test]
    fn test_execute_invalid_comment_marker_is_setup_error() {
        let tmp = TempDir::new().unwrap();
        let (status, _) = run_args(&["--comment-marker", " ", tmp.path().to_str().unwrap()]);
        assert_eq!(status, EXIT_SETUP_ERROR);
    }
}
