//! Storage layer errors

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// A party with the same identity is already present
    #[error("Duplicate entity: party named {name} already exists")]
    DuplicateEntity {
        /// Name of the colliding party
        name: String,
    },

    /// The targeted party is not present
    #[error("Entity not found: party named {name}")]
    EntityNotFound {
        /// Name of the missing party
        name: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error (reading a persisted snapshot)
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Domain error passthrough
    #[error("Domain error: {0}")]
    Domain(#[from] finclient_domain::DomainError),
}

impl StoreError {
    /// Create a duplicate error
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateEntity { name: name.into() }
    }

    /// Create a not found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::EntityNotFound { name: name.into() }
    }

    /// Create a missing-field deserialization error
    pub fn missing_field(field: &str) -> Self {
        Self::Deserialization(format!("Party's {} field is missing!", field))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            StoreError::Deserialization(err.to_string())
        } else {
            StoreError::Serialization(err.to_string())
        }
    }
}
