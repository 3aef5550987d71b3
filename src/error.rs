//! Error types for calib-plot operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Which axis of a plot an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Malformed plot data, rejected before anything is drawn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A plot needs at least one point.
    #[error("plot has no data points")]
    EmptyPoints,

    /// Error bars are symmetric half-heights and cannot be negative.
    #[error("point {index} has negative y error {value}")]
    NegativeError {
        /// Index of the offending point.
        index: usize,
        /// The rejected error value.
        value: f64,
    },

    /// NaN or infinite coordinate.
    #[error("point {index} has a non-finite {field}")]
    NonFinite {
        /// Index of the offending point.
        index: usize,
        /// Field name (`x`, `y` or `y_error`).
        field: &'static str,
    },

    /// Axis bounds must be finite with `min < max`.
    #[error("invalid {axis} axis range [{min}, {max}]")]
    InvalidAxisRange {
        /// Axis the range belongs to.
        axis: Axis,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

/// Errors that can occur in calib-plot operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Plot data failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or canvas.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A style parameter is non-finite or outside its allowed range.
    #[error("Invalid style: {field} = {value} (allowed {min} to {max})")]
    InvalidStyle {
        /// Style field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Smallest allowed value.
        min: f64,
        /// Largest allowed value.
        max: f64,
    },

    /// Figure configuration could not be parsed.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// 1-based line of the error, 0 if unknown.
        line: usize,
        /// Parser message.
        message: String,
    },

    /// Output file extension not recognised.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Scale domain error (e.g., empty domain).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Invalid color string.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
