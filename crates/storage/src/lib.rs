//! Storage layer for locally cached records.
//! - `Storage` is the byte-store seam records persist through.
//! - `FileStorage` keeps each key as a file under a configured root.

pub mod errors;
pub mod file_storage;

pub use errors::StorageError;
pub use file_storage::FileStorage;

/// Byte store keyed by relative path.
/// Implementations can be file-backed, in-memory, or remote.
pub trait Storage {
    /// Write `content` under `path`, replacing anything already there.
    fn save(&self, path: &str, content: &[u8]) -> Result<(), StorageError>;

    /// Read the bytes stored under `path`; `Ok(None)` when nothing is stored.
    fn load(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Check whether `path` is stored. With `wildcard`, `path` is a glob pattern
    /// and any match counts.
    fn exists(&self, path: &str, wildcard: bool) -> Result<bool, StorageError>;
}
