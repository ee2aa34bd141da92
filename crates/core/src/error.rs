//! Error types for the marbling core.

use thiserror::Error;

/// Errors produced by canvas construction and warp operations.
///
/// Caller errors (`InvalidDimensions`, `InvalidArgument`, ...) are always
/// reported before the canvas is touched. `SampleOutOfBounds` signals a
/// broken clamping invariant inside a warp, never bad input.
#[derive(Debug, Error)]
pub enum MarblingError {
    /// Height or width was zero, or the buffer size overflows `usize`.
    #[error("invalid dimensions: height and width must be non-zero")]
    InvalidDimensions,

    /// A tool parameter was rejected (zero direction, non-positive radius, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A pickup coordinate escaped clamping.
    #[error("sample ({row}, {col}) out of bounds for canvas of size ({height}, {width})")]
    SampleOutOfBounds {
        row: f64,
        col: f64,
        height: usize,
        width: usize,
    },

    /// A raw pixel buffer did not match the declared dimensions.
    #[error("buffer length mismatch: expected {expected} channel values, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A tool method name was not recognized.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Reading or writing an image failed.
    #[error("i/o error: {0}")]
    Io(String),
}
