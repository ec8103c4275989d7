//! Error taxonomy for domain operations.
//!
//! Validation and not-found failures are recoverable by the caller
//! (re-prompt, refresh); persistence failures wrap whatever the storage
//! layer reported and never invalidate the in-memory session state.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// User input failed a required-field or type check. The mutation
    /// was rejected and no state changed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation referenced a tab or entry that no longer exists.
    /// The operation was a no-op; the caller should refresh its view.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backing store failed. In-memory state remains the source of
    /// truth for the session.
    #[error("persistence failure: {0}")]
    Persistence(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
