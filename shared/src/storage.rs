use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;

/// String key-value persistence, shaped like the browser's `Storage` API.
///
/// Methods take `&self` because the browser store is a shared handle; an
/// implementation must write a value in one step so a reader never sees a
/// partial record.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same map, so dropping one handle and
/// building new components from a clone behaves like a page reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Reads succeed, every write fails. Stands in for a full or locked store.
    #[derive(Debug, Clone, Default)]
    pub struct ReadOnlyStorage {
        pub inner: MemoryStorage,
    }

    impl KeyValueStore for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".to_string()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_clones_share_items() {
        let storage = MemoryStorage::new();
        let reloaded = storage.clone();
        storage.set_item("k", "v").unwrap();
        assert_eq!(reloaded.get_item("k").unwrap(), Some("v".to_string()));
        reloaded.remove_item("k").unwrap();
        assert!(storage.is_empty());
    }
}
