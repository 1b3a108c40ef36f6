//! StoreError for external record store delegates

/// Failure reported by a host-supplied record store.
///
/// External data sources forward these to the caller of the CRUD operation
/// untouched; no retries happen at this layer.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Store operation '{operation}' failed: {message}")]
pub struct StoreError {
    /// The operation that failed (e.g., "load_all", "save").
    pub operation: String,
    /// Human-readable failure description from the delegate.
    pub message: String,
}

impl StoreError {
    /// Creates a new store error.
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
