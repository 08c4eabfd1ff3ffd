//! Input sources for the scanner.
//!
//! Only the filesystem source exists today. The scanner takes plain text, so a
//! second source (stdin, an editor buffer) needs no trait until it shows up.

pub mod fs;
