//! Error types for the member directory.
//!
//! Two layers: `StoreError` for record validation and storage backends,
//! `DirectoryError` for the directory service API surface. All rejections
//! are local and synchronous; a rejected record never enters the store.

use thiserror::Error;

/// Errors raised by the record store and its persistence backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record failed a schema or content-address check. Rejected before
    /// any state change.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Persistence backend failure (durable log append/replay).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by the directory service.
///
/// Absence of a record is not an error anywhere in this API: queries for
/// unknown agents resolve to empty or `None` results.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Attempted write to a record owned by a different agent.
    #[error("Not self: {0}")]
    NotSelf(String),

    /// Admission control declined a role assignment.
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Configuration or logging setup failure.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
