use log::warn;
use spin_shared::{KeyValueStore, MemoryStorage, StorageError};
use web_sys::window;

/// `window.localStorage`, or an in-memory map when the browser refuses
/// storage (private mode, disabled cookies).
#[derive(Clone)]
pub enum BrowserStorage {
    Local(web_sys::Storage),
    Memory(MemoryStorage),
}

impl BrowserStorage {
    pub fn local() -> Self {
        match window().and_then(|w| w.local_storage().ok().flatten()) {
            Some(storage) => Self::Local(storage),
            None => {
                warn!("localStorage unavailable, wheel settings last for this page only");
                Self::Memory(MemoryStorage::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::Local(storage) => storage
                .get_item(key)
                .map_err(|e| StorageError::Unavailable(format!("{:?}", e))),
            Self::Memory(storage) => storage.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Local(storage) => storage
                .set_item(key, value)
                .map_err(|e| StorageError::Write(format!("{:?}", e))),
            Self::Memory(storage) => storage.set_item(key, value),
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::Local(storage) => storage
                .remove_item(key)
                .map_err(|e| StorageError::Write(format!("{:?}", e))),
            Self::Memory(storage) => storage.remove_item(key),
        }
    }
}
