//! Error types for reconciliation

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure reported by the external publication store.
///
/// Any store failure is terminal for that call; the core never retries on
/// its own. Retry is a manual `refetch()` by the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Transport-level failure
    #[error("network error: {0}")]
    Network(String),

    /// The store has no publication under this id
    #[error("publication not found: {0}")]
    NotFound(String),

    /// The store rejected the call for quota reasons
    #[error("rate limited by publication store")]
    RateLimited,

    /// Any other backend failure
    #[error("publication store error: {0}")]
    Backend(String),
}

/// Aggregate-level failure surfaced through a use case's `error` field.
///
/// Per-item decode failures never reach this level; they are logged and
/// dropped inside the resolver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// No authenticated profile is available for a use case that needs one
    #[error("no authenticated profile")]
    ProfileNull,

    /// A whole top-level fetch failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] StoreError),
}
