//! Inbound request abstraction.
//!
//! The transport layer is an external collaborator; the widget only needs
//! the request method and a flat map of structured parameters, which the
//! host builds from whatever its HTTP stack provides.

use std::collections::HashMap;

/// The method of an inbound request, reduced to what the synchronization
/// protocol distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMethod {
    /// A read-only request.
    #[default]
    Get,
    /// A data-submitting request (POST-equivalent).
    Post,
}

/// An inbound request as seen by the table widget.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tablekit_lib::request::TableRequest;
///
/// let request = TableRequest::post()
///     .with_param("tableTableData", json!([{"id": 1, "name": "A"}]));
/// assert!(request.is_post());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableRequest {
    method: RequestMethod,
    params: HashMap<String, serde_json::Value>,
}

impl TableRequest {
    /// Creates a new GET request with no parameters.
    pub fn get() -> Self {
        Self {
            method: RequestMethod::Get,
            params: HashMap::new(),
        }
    }

    /// Creates a new POST request with no parameters.
    pub fn post() -> Self {
        Self {
            method: RequestMethod::Post,
            params: HashMap::new(),
        }
    }

    /// Adds a structured parameter (builder pattern).
    pub fn with_param(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Returns the request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Returns `true` for data-submitting requests.
    pub fn is_post(&self) -> bool {
        self.method == RequestMethod::Post
    }

    /// Returns a structured parameter, if present.
    pub fn param(&self, name: &str) -> Option<&serde_json::Value> {
        self.params.get(name)
    }

    /// Returns `true` if the request carries the given parameter.
    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }
}
