//! CLI error type.

use std::io;

use thiserror::Error;

/// Errors the CLI reports to the user before exiting non-zero.
///
/// The mode engine itself never fails; only the surrounding I/O can.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the input file (or stdin) failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path as given on the command line, or `<stdin>`.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },
}
