//! Persistent key-value storage.
//!
//! A `Storage` holds opaque string blobs by key, the way a browser's
//! localStorage does. Writes are full-key overwrites; concurrent writers
//! get last-write-wins.
//!
//! - `MemoryStorage`: process-local map, used in tests and for throwaway sessions
//! - `FileStorage`: one JSON file per key in a directory

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub trait Storage: Send + Sync {
    /// Read the raw blob stored under `key`, if any
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the blob stored under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
