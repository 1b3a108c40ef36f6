//! Configuration error types

/// Errors raised while constructing a table widget from its configuration.
///
/// These are always fatal: construction aborts and no data source instance
/// is created.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The configuration does not name a data source.
    #[error("The table widget data source is not specified in the configuration")]
    MissingDataSource,

    /// The configured data source identifier is not registered.
    #[error("The table widget data source \"{id}\" could not be resolved")]
    UnknownDataSource { id: String },

    /// A column key collides with the configured record key field.
    #[error("Column key \"{key}\" collides with the record key field")]
    ReservedColumnKey { key: String },

    /// The same column key is declared more than once.
    #[error("Column key \"{key}\" is declared more than once")]
    DuplicateColumnKey { key: String },
}

impl ConfigError {
    /// Creates an unknown data source error.
    pub fn unknown_source(id: impl Into<String>) -> Self {
        Self::UnknownDataSource { id: id.into() }
    }

    /// Creates a reserved column key error.
    pub fn reserved_column(key: impl Into<String>) -> Self {
        Self::ReservedColumnKey { key: key.into() }
    }

    /// Creates a duplicate column key error.
    pub fn duplicate_column(key: impl Into<String>) -> Self {
        Self::DuplicateColumnKey { key: key.into() }
    }
}
