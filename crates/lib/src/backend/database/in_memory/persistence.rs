//! Persistence operations for the InMemory store
//!
//! This module handles serialization and file I/O for saving/loading
//! the in-memory store state to/from JSON files.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::{InMemory, ItemMap, storage};
use crate::{Error, Result, backend::errors::BackendError, item::ItemRecord};

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// On-disk shape of the store: a versioned list of records.
#[derive(Serialize, Deserialize)]
struct SerializableStore {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    #[serde(default)]
    items: Vec<ItemRecord>,
}

/// Saves every record to `path` as pretty-printed JSON, ordered by id.
pub(crate) async fn save_to_file<P: AsRef<Path>>(backend: &InMemory, path: P) -> Result<()> {
    let items = backend.items.read().await.values().cloned().collect();

    let serializable = SerializableStore {
        version: PERSISTENCE_VERSION,
        items,
    };

    let json = serde_json::to_string_pretty(&serializable)
        .map_err(|e| -> Error { BackendError::SerializationFailed { source: e }.into() })?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| -> Error { BackendError::FileIo { source: e }.into() })
}

/// Loads a store from `path`.
///
/// If the file does not exist, a new, empty `InMemory` store is returned.
/// Records are re-inserted one by one, so a file with duplicate ids or
/// addresses is rejected.
pub(crate) async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<InMemory> {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => {
            let serializable: SerializableStore = serde_json::from_str(&json).map_err(|e| -> Error {
                BackendError::DeserializationFailed { source: e }.into()
            })?;

            let mut items = ItemMap::new();
            for record in serializable.items {
                storage::insert(&mut items, record)?;
            }
            Ok(InMemory::from_items(items))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(InMemory::new()),
        Err(e) => Err(BackendError::FileIo { source: e }.into()),
    }
}
