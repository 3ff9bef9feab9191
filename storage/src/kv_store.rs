//! Key-value store: get/put/delete/list/purge over one fixed bucket in a redb file.
//!
//! Every operation is a single engine transaction (read-only for reads, read-write for writes), so each
//! call is atomic on its own; nothing spans calls. Values are `Option<&[u8]>` so a stored `None` can be
//! told apart from a missing key.
//! External: redb file on disk; callers use open/keys/get/put/delete/purge/close.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use redb::{Database, ReadableTable, TableDefinition, TableHandle, WriteTransaction};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::StorageError;

/// Name of the single bucket every entry lives in.
pub const GLOBAL_BUCKET: &str = "global";

const BUCKET: TableDefinition<&str, Option<&[u8]>> = TableDefinition::new(GLOBAL_BUCKET);

/// File-backed store holding one `global` bucket of string keys to opaque bytes.
///
/// Reads and writes are serialized by the engine; share it behind an `Arc` without extra locking.
/// After [`KvStore::close`] every operation fails with [`StorageError::Closed`].
pub struct KvStore {
    db: RwLock<Option<Arc<Database>>>,
    path: PathBuf,
    close_timeout: Duration,
}

impl KvStore {
    /// Opens (creating if absent) the file at `path` and makes sure the bucket exists.
    pub fn open(path: impl AsRef<Path>, close_timeout: Duration) -> Result<Self, StorageError> {
        if close_timeout.is_zero() {
            return Err(StorageError::InvalidTimeout);
        }
        let path = path.as_ref().to_path_buf();

        debug!(path = %path.display(), timeout = ?close_timeout, "Creating DB connection");
        let db = Database::create(&path).map_err(|e| {
            StorageError::Io(format!("unable to open DB at {}: {}", path.display(), e))
        })?;

        debug!(bucket = GLOBAL_BUCKET, "Setting the default bucket");
        Self::create_bucket(&db)
            .map_err(|e| StorageError::Transaction(format!("unable to create global bucket: {e}")))?;

        debug!("DB initiated");
        Ok(Self {
            db: RwLock::new(Some(Arc::new(db))),
            path,
            close_timeout,
        })
    }

    fn create_bucket(db: &Database) -> Result<(), StorageError> {
        let txn = db.begin_write()?;
        txn.open_table(BUCKET)?;
        txn.commit()?;
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn handle(&self) -> Result<Arc<Database>, StorageError> {
        self.db
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(StorageError::Closed)
    }

    /// Opening a table in a write transaction would recreate a purged bucket, so writes check first.
    fn begin_bucket_write(db: &Database) -> Result<WriteTransaction, StorageError> {
        let txn = db.begin_write()?;
        let exists = txn.list_tables()?.any(|table| table.name() == GLOBAL_BUCKET);
        if !exists {
            txn.abort()?;
            return Err(StorageError::NamespaceMissing);
        }
        Ok(txn)
    }

    /// Returns every key holding a non-nil value, in lexicographic (byte) order.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        debug!("Getting the list of DB current keys");
        let db = self.handle()?;
        let txn = db.begin_read()?;
        let table = txn.open_table(BUCKET)?;

        let mut keys = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            if value.value().is_some() {
                keys.push(key.value().to_string());
            }
        }
        Ok(keys)
    }

    /// Looks up `key` with a positional seek: the first entry at or after `key` must match exactly.
    pub fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        debug!(key, "Getting value from DB");
        let db = self.handle()?;
        let txn = db.begin_read()?;
        let table = txn.open_table(BUCKET)?;

        let mut cursor = table.range(key..)?;
        let Some(entry) = cursor.next() else {
            return Err(StorageError::NotFound(key.to_string()));
        };
        let (found, value) = entry?;
        if found.value() != key {
            return Err(StorageError::NotFound(key.to_string()));
        }
        let value = value
            .value()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| StorageError::NilValue(key.to_string()))?;

        debug!(key, "Got the value");
        Ok(value)
    }

    /// Sets or overwrites the value for `key`.
    pub fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        debug!(key, len = value.len(), "Saving the value to DB");
        self.write(key, Some(value))
    }

    /// Stores a nil marker for `key`: it stays present but reads report [`StorageError::NilValue`]
    /// and [`KvStore::keys`] skips it.
    pub fn put_nil(&self, key: &str) -> Result<(), StorageError> {
        debug!(key, "Saving nil value to DB");
        self.write(key, None)
    }

    fn write(&self, key: &str, value: Option<&[u8]>) -> Result<(), StorageError> {
        let db = self.handle()?;
        let txn = Self::begin_bucket_write(&db)?;
        {
            let mut table = txn.open_table(BUCKET)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Removes `key`; deleting an absent key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        debug!(key, "Deleting from DB");
        let db = self.handle()?;
        let txn = Self::begin_bucket_write(&db)?;
        {
            let mut table = txn.open_table(BUCKET)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Drops the whole bucket. Reopen the store before using it again.
    pub fn purge(&self) -> Result<(), StorageError> {
        info!(bucket = GLOBAL_BUCKET, "Purging bucket from DB");
        let db = self.handle()?;
        let txn = db.begin_write()?;
        if !txn.delete_table(BUCKET)? {
            txn.abort()?;
            return Err(StorageError::NamespaceMissing);
        }
        txn.commit()?;
        Ok(())
    }

    /// Closes the file, waiting at most the configured close timeout.
    ///
    /// On timeout the close keeps running in the background and [`StorageError::Timeout`] is returned.
    /// The file is removed only when `delete_file` is set and the close finished in time.
    pub async fn close(&self, delete_file: bool) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), "Closing the DB");
        let db = self
            .db
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(StorageError::Closed)?;

        let closing = tokio::task::spawn_blocking(move || {
            drop(db);
            debug!("DB closed OK");
        });
        finish_close(closing, self.close_timeout, delete_file, &self.path).await
    }
}

/// Waits for the close and removes the file only when it finished within `timeout`.
async fn finish_close(
    closing: JoinHandle<()>,
    timeout: Duration,
    delete_file: bool,
    path: &Path,
) -> Result<(), StorageError> {
    await_close(closing, timeout).await?;

    if delete_file {
        debug!(path = %path.display(), "Removing DB file");
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| StorageError::Io(format!("unable to remove {}: {}", path.display(), e)))?;
    }
    Ok(())
}

/// Races the background close against `timeout`; the close task is never cancelled.
async fn await_close(closing: JoinHandle<()>, timeout: Duration) -> Result<(), StorageError> {
    match tokio::time::timeout(timeout, closing).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(StorageError::Io(format!("unable to close DB: {e}"))),
        Err(_) => Err(StorageError::Timeout(timeout)),
    }
}
