//! Application error types.

use finclient_domain::DomainError;
use finclient_store::StoreError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Domain error
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// No party with the given name
    #[error("No party named {0}")]
    UnknownParty(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
