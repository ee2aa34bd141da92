//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: engine error (unknown tool, invalid tool parameters, bad dimensions)
//! - 11: I/O error (image load or save, recipe file)
//! - 12: input error (bad color, bad interpolation, bad recipe JSON)
//! - 13: serialization error

use marbling_core::MarblingError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// An engine-level error (unknown tool, rejected parameters, bad dimensions).
    Engine(MarblingError),
    /// An I/O error (PNG read/write, recipe read/write).
    Io(String),
    /// A user input error (bad color, bad flag value, bad recipe JSON).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<MarblingError> for CliError {
    fn from(e: MarblingError) -> Self {
        match e {
            MarblingError::Io(msg) => CliError::Io(msg),
            MarblingError::InvalidColor(msg) => CliError::Input(format!("invalid color: {msg}")),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
