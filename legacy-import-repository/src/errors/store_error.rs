//! Document store error types.
//!
//! This module defines the unified error type for all document store
//! operations, from connection setup to bulk inserts.

use thiserror::Error;

/// Unified errors from document store operations.
///
/// Used by the `DocumentStore` and `StoreConnector` traits. Only connection
/// errors are fatal to an import run; every other variant is reported against
/// the table being written and the run moves on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Failed to establish or keep a connection to the store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The store configuration (connection string, database name) is invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A bulk insert failed as a whole.
    #[error("Insert error: {0}")]
    InsertError(String),

    /// Failed to serialize a document for the store.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Unknown error.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an insert error.
    pub fn insert(msg: impl Into<String>) -> Self {
        Self::InsertError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create an unknown error.
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    /// Whether this error means the store can no longer be used.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConnectionError(_) | Self::ConfigurationError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_level_errors_are_fatal() {
        assert!(StoreError::connection("server selection timed out").is_fatal());
        assert!(StoreError::configuration("bad uri").is_fatal());
        assert!(!StoreError::insert("E11000 duplicate key").is_fatal());
        assert!(!StoreError::serialization("u64 overflow").is_fatal());
        assert!(!StoreError::unknown("?").is_fatal());
    }

    #[test]
    fn test_display_carries_message() {
        let err = StoreError::insert("write concern failed");
        assert_eq!(err.to_string(), "Insert error: write concern failed");
    }
}
