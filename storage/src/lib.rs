//! Storage crate: a single-namespace key-value store over an embedded transactional B-tree engine.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`kv_store`] – KvStore (redb-backed, one `global` bucket)

pub mod error;
pub mod kv_store;

pub use error::StorageError;
pub use kv_store::{KvStore, GLOBAL_BUCKET};
