//! Error types for identifier parsing

use thiserror::Error;

/// Errors that can occur while parsing a typed identifier
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Input is not valid hexadecimal
    #[error("Invalid hex identifier: '{input}'")]
    InvalidHex { input: String },

    /// Decoded byte length does not match the identifier width
    #[error("Invalid identifier length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
