//! Browser LocalStorage store (wasm32 only)

use super::{PersistenceGateway, StoreError};

/// Blobs live in LocalStorage as UTF-8 JSON strings
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl PersistenceGateway for LocalStorageStore {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        let storage = Self::storage()?;
        let json = storage.get_item(key).ok()??;
        Some(json.into_bytes())
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        let json = std::str::from_utf8(bytes)
            .map_err(|e| StoreError::Rejected(e.to_string()))?;
        storage
            .set_item(key, json)
            .map_err(|e| StoreError::Rejected(format!("{e:?}")))
    }
}
