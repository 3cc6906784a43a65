//! `localStorage` backend.

use lib_core::store::{KeyValueStorage, MemoryStorage, StorageError};

/// `window.localStorage`. Holds no handle, so it is `Send + Sync` and can
/// live inside signals; the storage object is looked up on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn local() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError("no window".to_string()))?
            .local_storage()
            .map_err(|e| StorageError(format!("localStorage blocked: {:?}", e)))?
            .ok_or_else(|| StorageError("localStorage unavailable".to_string()))
    }

    pub fn is_available() -> bool {
        Self::local().is_ok()
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::local()?
            .get_item(key)
            .map_err(|e| StorageError(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::local()?
            .set_item(key, value)
            .map_err(|e| StorageError(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::local()?
            .remove_item(key)
            .map_err(|e| StorageError(format!("{:?}", e)))
    }
}

/// `localStorage` when the browser allows it (private mode and sandboxed
/// iframes may not), an in-memory map otherwise.
#[derive(Debug, Clone)]
pub enum AppStorage {
    Browser(BrowserStorage),
    Memory(MemoryStorage),
}

impl AppStorage {
    pub fn detect() -> Self {
        if BrowserStorage::is_available() {
            AppStorage::Browser(BrowserStorage)
        } else {
            log::warn!("[STORE] localStorage unavailable, session will not survive reloads");
            AppStorage::Memory(MemoryStorage::new())
        }
    }
}

impl KeyValueStorage for AppStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            AppStorage::Browser(s) => s.get(key),
            AppStorage::Memory(s) => s.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            AppStorage::Browser(s) => s.set(key, value),
            AppStorage::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            AppStorage::Browser(s) => s.remove(key),
            AppStorage::Memory(s) => s.remove(key),
        }
    }
}
