//! Custom error types for RMAnalyzer
//!
//! This module defines the error hierarchy for the summary pipeline using
//! thiserror for ergonomic error definitions. Every variant is terminal for
//! a run: the pipeline never produces a partial report.

use thiserror::Error;

use crate::models::AccountNumber;

/// Problems with the household configuration document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON or is missing required keys
    #[error("Malformed configuration: {0}")]
    MalformedDocument(String),

    /// An email address does not have a valid shape
    #[error("Invalid email address for {field}: '{value}'")]
    InvalidEmail { field: String, value: String },

    /// The same account number is claimed by two people
    #[error("Account {account} is assigned to both '{first}' and '{second}'")]
    DuplicateAccount {
        account: AccountNumber,
        first: String,
        second: String,
    },

    /// No people were configured
    #[error("Configuration must list at least one person")]
    EmptyPersonList,
}

/// The main error type for RMAnalyzer operations
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The household configuration is invalid
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The CSV header does not match the expected export format
    #[error("CSV header mismatch: expected [{}], found [{}]", .expected.join(", "), .found.join(", "))]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A single CSV row could not be parsed
    #[error("Invalid row on line {line}, field '{field}': {reason}")]
    RowParse {
        line: u64,
        field: String,
        reason: String,
    },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl AnalyzerError {
    /// Create a row parse error for a specific line and field
    pub fn row(line: u64, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RowParse {
            line,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for AnalyzerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for RMAnalyzer operations
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
