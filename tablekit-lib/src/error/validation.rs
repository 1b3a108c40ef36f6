//! Validation error types

/// Error information for a cell value that failed validation.
///
/// Validation failures are collected by the save path and surfaced to the
/// caller; they are never silently dropped.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Column '{column}', row '{row_key}': {message}")]
pub struct ValidationError {
    /// The key of the column whose value failed validation.
    pub column: String,
    /// Display form of the record's key value.
    pub row_key: String,
    /// Human-readable validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(
        column: impl Into<String>,
        row_key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            row_key: row_key.into(),
            message: message.into(),
        }
    }
}
