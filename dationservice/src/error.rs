//! Error types for the Dation client

use dationsoap::SoapError;

/// Result type alias for Dation operations
pub type Result<T> = std::result::Result<T, DationError>;

/// Errors that can occur when talking to the Dation service
#[derive(Debug, thiserror::Error)]
pub enum DationError {
    /// SOAP exchange or response extraction failed
    #[error("SOAP error: {0}")]
    Soap(#[from] SoapError),

    /// An extracted value is missing from the result mapping
    #[error("Missing value '{0}' in response")]
    MissingValue(String),

    /// An extracted value does not have the shape the workflow needs
    #[error("Unexpected value for '{field}': expected {expected}, got {found}")]
    UnexpectedValue {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl DationError {
    pub fn unexpected_value(field: &str, expected: &'static str, found: &'static str) -> Self {
        Self::UnexpectedValue {
            field: field.to_string(),
            expected,
            found,
        }
    }
}
