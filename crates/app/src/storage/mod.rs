//! Client-local Storage
//!
//! A small string key-value port standing in for the browser's durable
//! storage. Every component that persists anything goes through
//! [`KeyValueStore`]; nothing reaches for the filesystem directly.

use std::fmt::Debug;

use mockall::automock;

mod errors;
mod file;
mod memory;

pub use errors::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Durable string key-value storage.
#[automock]
pub trait KeyValueStore: Debug + Send + Sync {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage can't be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage can't be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage can't be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
