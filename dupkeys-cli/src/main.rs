// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: CLI tools are expected to print to stdout/stderr for user output.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stdout, clippy::print_stderr, clippy::exit)]

mod cli;
mod logging;

use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(cli::run())
}
