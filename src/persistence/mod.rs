//! Save/load persistence
//!
//! The game only sees [`PersistenceGateway`]: opaque blobs under string keys.
//! Blobs are whole JSON documents, rewritten in full on every save.
//!
//! Backends:
//! - [`MemoryStore`]: in-process map (tests, headless runs)
//! - [`FileStore`]: one `<key>.json` file per blob (native)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm32)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys for the three persisted blobs
pub const USER_KEY: &str = "frostfin_user";
pub const SETTINGS_KEY: &str = "frostfin_settings";
pub const FISH_KEY: &str = "frostfin_fish";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage rejected write: {0}")]
    Rejected(String),
}

/// Durable key/blob storage
pub trait PersistenceGateway {
    /// Stored bytes for `key`, or `None` if absent or unreadable
    fn load(&self, key: &str) -> Option<Vec<u8>>;
    /// Replace the blob stored under `key`
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

/// Decode the blob under `key`, falling back to `default` when it is missing
/// or does not decode
pub fn load_or_default<T, S, F>(store: &S, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    S: PersistenceGateway + ?Sized,
    F: FnOnce() -> T,
{
    let Some(bytes) = store.load(key) else {
        log::info!("No saved {key}, using defaults");
        return default();
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => {
            log::info!("Loaded {key} ({} bytes)", bytes.len());
            value
        }
        Err(e) => {
            log::warn!("Discarding unreadable {key}: {e}");
            default()
        }
    }
}

/// Encode `value` as JSON and write it under `key`
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: PersistenceGateway + ?Sized,
{
    let bytes = serde_json::to_vec(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.save(key, &bytes)?;
    log::debug!("Saved {key} ({} bytes)", bytes.len());
    Ok(())
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, Vec<u8>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one blob
    pub fn with_blob(key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let mut store = Self::new();
        store.blobs.insert(key.to_string(), bytes.into());
        store
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs.contains_key(key)
    }

    /// Total successful writes since creation
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PersistenceGateway for MemoryStore {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.get(key).cloned()
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        self.writes += 1;
        Ok(())
    }
}
