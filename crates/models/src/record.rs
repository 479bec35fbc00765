use serde::{de::DeserializeOwned, Serialize};
use storage::Storage;
use tracing::debug;

use crate::errors::ModelError;

/// A record kept as a single JSON file in a `Storage`.
///
/// Each implementing type owns one fixed key, so at most one instance of a type
/// is stored at a time; persisting again replaces it. The storage is borrowed
/// for the duration of a call and never retained by the record.
pub trait PersistentRecord: Serialize + DeserializeOwned {
    /// Relative path of the record's file under the storage root.
    const STORAGE_KEY: &'static str;

    /// Compact JSON encoding of the record.
    fn to_bytes(&self) -> Result<Vec<u8>, ModelError> {
        serde_json::to_vec(self).map_err(|e| ModelError::Encode(e.to_string()))
    }

    /// Decode a record, rejecting malformed JSON and payloads that do not fit the schema.
    fn from_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        serde_json::from_slice(bytes)
            .map_err(|e| ModelError::Validation(format!("{}: {}", Self::STORAGE_KEY, e)))
    }

    /// Serialize and write the record under `STORAGE_KEY`.
    fn persist<S: Storage + ?Sized>(&self, storage: &S) -> Result<(), ModelError> {
        let content = self.to_bytes()?;
        storage.save(Self::STORAGE_KEY, &content)?;
        debug!(key = Self::STORAGE_KEY, bytes = content.len(), "record persisted");
        Ok(())
    }

    /// Read the record stored under `STORAGE_KEY`; `Ok(None)` when nothing is stored
    /// or the stored file is empty.
    fn load<S: Storage + ?Sized>(storage: &S) -> Result<Option<Self>, ModelError> {
        let Some(content) = storage.load(Self::STORAGE_KEY)? else {
            debug!(key = Self::STORAGE_KEY, "record absent");
            return Ok(None);
        };
        // A zero-length file is what an interrupted write leaves behind.
        if content.is_empty() {
            debug!(key = Self::STORAGE_KEY, "record file empty; treating as absent");
            return Ok(None);
        }
        Self::from_bytes(&content).map(Some)
    }
}
