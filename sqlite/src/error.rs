//! Error types for session operations.
//!
//! The same engine error can mean different things depending on which
//! operation raised it, so [`rusqlite::Error`] is never converted
//! implicitly. Each call site picks the category.

use thiserror::Error;
use userinfo_core::ValidationError;

/// Errors that can occur while using a [`Session`](crate::Session).
#[derive(Debug, Error)]
pub enum SessionError {
    /// The store file could not be opened, configured, or closed.
    #[error("connection error: {0}")]
    ConnectionError(#[source] rusqlite::Error),

    /// Creating or dropping the table failed.
    #[error("schema error: {0}")]
    SchemaError(#[source] rusqlite::Error),

    /// An insert, update, or delete failed.
    #[error("write error: {0}")]
    WriteError(#[source] rusqlite::Error),

    /// A query failed, or a row could not be decoded.
    #[error("read error: {0}")]
    ReadError(#[source] rusqlite::Error),

    /// The session was used after [`close`](crate::Session::close).
    #[error("session is closed")]
    Closed,

    /// The record was rejected before reaching the store.
    #[error("invalid user record: {0}")]
    InvalidUser(#[from] ValidationError),

    /// Table name contains characters that cannot be used as an identifier.
    #[error(
        "invalid table name '{0}': must be ASCII alphanumerics or underscores and not start with a digit"
    )]
    InvalidTableName(String),

    /// Configuration file could not be read or written.
    #[error("config error: {0}")]
    ConfigError(String),
}

impl SessionError {
    /// Returns `true` for [`SessionError::Closed`].
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Convenience alias for results with [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;
