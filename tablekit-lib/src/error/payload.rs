//! Malformed payload error types

/// Errors raised while parsing a client-submitted payload or request
/// parameter.
///
/// `init_records` uses the abort policy: the first malformed row fails the
/// whole call and nothing is inserted.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The payload is not an ordered collection of rows.
    #[error("Submission payload is not an array of rows")]
    NotAnArray,

    /// A row in the payload is not a JSON object.
    #[error("Row {index} is not an object")]
    RowNotObject { index: usize },

    /// A row is missing the configured key field.
    #[error("Row {index} is missing the key field '{field}'")]
    MissingKeyField { index: usize, field: String },

    /// A cell holds a non-scalar value.
    #[error("Row {index}, field '{field}' holds a non-scalar value")]
    NonScalarCell { index: usize, field: String },

    /// A request parameter has the wrong shape.
    #[error("Request parameter '{name}' must be {expected}")]
    InvalidParameter { name: String, expected: &'static str },

    /// A required request parameter is absent.
    #[error("Missing required request parameter '{name}'")]
    MissingParameter { name: String },

    /// A string payload could not be parsed as JSON.
    #[error("Payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl PayloadError {
    /// Creates a row-not-object error.
    pub fn row_not_object(index: usize) -> Self {
        Self::RowNotObject { index }
    }

    /// Creates a missing key field error.
    pub fn missing_key_field(index: usize, field: impl Into<String>) -> Self {
        Self::MissingKeyField {
            index,
            field: field.into(),
        }
    }

    /// Creates a non-scalar cell error.
    pub fn non_scalar_cell(index: usize, field: impl Into<String>) -> Self {
        Self::NonScalarCell {
            index,
            field: field.into(),
        }
    }

    /// Creates a missing parameter error.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            expected,
        }
    }
}
