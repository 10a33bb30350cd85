//! Error types for roomly-core

use thiserror::Error;

pub use crate::backend::{BackendError, BackendErrorKind};
pub use crate::store::{StoreError, StoreOperation};

/// Result type alias using roomly-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating settings or user input.
///
/// Backend and store failures keep their own types ([`BackendError`],
/// [`StoreError`]) so callers can inspect the failed operation.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
