//! Error types for the legacy import.

use legacy_import_repository::StoreError;
use thiserror::Error;

/// Errors that stop an import run.
///
/// Every variant is fatal: the run ends, the store connection is released
/// and the process exits with a failure status. Problems with individual
/// rows or tables never surface here.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Invalid configuration or logging setup.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The snapshot file could not be read.
    #[error("Snapshot read error: {0}")]
    SnapshotReadError(String),

    /// The snapshot file is not a valid JSON table export.
    #[error("Snapshot parse error: {0}")]
    SnapshotParseError(String),

    /// The document store is unreachable or misconfigured.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

impl ImportError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a snapshot read error.
    pub fn snapshot_read(msg: impl Into<String>) -> Self {
        Self::SnapshotReadError(msg.into())
    }

    /// Create a snapshot parse error.
    pub fn snapshot_parse(msg: impl Into<String>) -> Self {
        Self::SnapshotParseError(msg.into())
    }
}

/// Errors raised while turning a single legacy row into a document.
///
/// These reject the row they belong to and nothing else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessorError {
    /// The row could not be encoded as BSON.
    #[error("Serialization error in {table} row {index}: {message}")]
    SerializationError {
        table: String,
        index: usize,
        message: String,
    },
}

impl ProcessorError {
    /// Create a serialization error for the row at `index` of `table`.
    pub fn serialization(table: &str, index: usize, msg: impl Into<String>) -> Self {
        Self::SerializationError {
            table: table.to_string(),
            index,
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_convert() {
        let err: ImportError = StoreError::connection("server selection timeout").into();
        assert!(matches!(err, ImportError::StoreError(_)));
        assert!(err.to_string().contains("server selection timeout"));
    }

    #[test]
    fn test_processor_error_names_the_row() {
        let err = ProcessorError::serialization("tempcart", 4, "u64 out of range");
        assert_eq!(
            err.to_string(),
            "Serialization error in tempcart row 4: u64 out of range"
        );
    }
}
