//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Errors from parsing account and content keys out of text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountParseError {
    /// Input was not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded value has the wrong byte length.
    #[error("Wrong length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    /// Decoded value exceeds the fixed word size.
    #[error("Too long: at most {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}
