//! Error types

mod config;
mod field;
mod payload;
mod store;
mod validation;

pub use config::*;
pub use field::*;
pub use payload::*;
pub use store::*;
pub use validation::*;

/// Top-level error type for table widget operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fatal configuration problem raised at widget construction.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed submission payload or request parameter.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Failure reported by an external record store delegate.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A submitted cell value failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
