//! Error types for the snippet store.

use thiserror::Error;

use crate::types::SnippetId;

/// Result type alias for snippet store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during snippet store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The snippet does not exist or has expired.
    #[error("no matching snippet found for id {0}")]
    NotFound(SnippetId),

    #[error("failed to open database: {0}")]
    Connect(String),

    #[error("migration error: {0}")]
    Migrate(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("expiry of {0} days is out of range")]
    InvalidExpiry(i32),
}

impl StoreError {
    /// True when the error means "absent" rather than "broken".
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
