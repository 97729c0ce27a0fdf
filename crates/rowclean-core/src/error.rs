//! Error types for the cleaning engine
//!
//! Only structurally unusable input is an error. Ragged rows, odd dates and
//! unparseable numbers are handled by best-effort normalization instead.

use thiserror::Error;

/// Cleaning engine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input contained no non-blank lines
    #[error("CSV file is empty")]
    EmptyInput,

    /// The header line produced no usable column names
    #[error("CSV file has no headers")]
    NoHeaders,
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;
