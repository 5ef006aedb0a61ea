//! Errors reported by the host layer.
//!
//! The scorer itself never fails: "no match" is a value, see
//! [`SearchResult`](crate::SearchResult).

use thiserror::Error;

/// Error type for reading candidates and validating configuration
#[derive(Error, Debug)]
pub enum SurferError {
    /// Reading candidates failed
    #[error("Error reading input: {0}")]
    Io(#[from] std::io::Error),
    /// A configuration value is outside its valid range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
