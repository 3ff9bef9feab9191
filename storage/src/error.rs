//! Storage error types.
//!
//! `NotFound` and `NilValue` are expected outcomes of a read that callers branch on; the rest are failures.

use std::time::Duration;
use thiserror::Error;

use crate::kv_store::GLOBAL_BUCKET;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("key not found: {0}")]
    NotFound(String),
    #[error("value is nil for key: {0}")]
    NilValue(String),
    #[error("bucket '{}' not found", GLOBAL_BUCKET)]
    NamespaceMissing,
    #[error("IO error: {0}")]
    Io(String),
    #[error("Transaction error: {0}")]
    Transaction(String),
    #[error("timed out after {0:?} while closing the DB")]
    Timeout(Duration),
    #[error("DB is closed")]
    Closed,
    #[error("close timeout must be greater than zero")]
    InvalidTimeout,
}

impl From<redb::TransactionError> for StorageError {
    fn from(e: redb::TransactionError) -> Self {
        StorageError::Transaction(e.to_string())
    }
}

impl From<redb::CommitError> for StorageError {
    fn from(e: redb::CommitError) -> Self {
        StorageError::Transaction(e.to_string())
    }
}

impl From<redb::TableError> for StorageError {
    fn from(e: redb::TableError) -> Self {
        match e {
            redb::TableError::TableDoesNotExist(_) => StorageError::NamespaceMissing,
            other => StorageError::Transaction(other.to_string()),
        }
    }
}

impl From<redb::StorageError> for StorageError {
    fn from(e: redb::StorageError) -> Self {
        StorageError::Io(e.to_string())
    }
}
