use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::error::PersistError;
use crate::state::GridSnapshot;

/// Key-value store holding serialized grid snapshots.
pub trait SnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn write(&self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-process store, used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read and decode the snapshot stored under `key`.
///
/// A missing, unreadable or corrupt snapshot yields `None`.
pub fn restore_snapshot(store: &dyn SnapshotStore, key: &str) -> Option<GridSnapshot> {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read grid snapshot '{}': {}", key, e);
            return None;
        }
    };

    match serde_json::from_str::<GridSnapshot>(&raw) {
        Ok(snapshot) => {
            info!("Restored grid snapshot '{}'", key);
            Some(snapshot)
        }
        Err(e) => {
            warn!("Ignoring corrupt grid snapshot '{}': {}", key, e);
            None
        }
    }
}

pub fn write_snapshot(
    store: &dyn SnapshotStore,
    key: &str,
    snapshot: &GridSnapshot,
) -> Result<(), PersistError> {
    let raw = serde_json::to_string(snapshot)?;
    store.write(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;

    #[test]
    fn test_write_then_restore() {
        let store = MemoryStore::new();
        let snapshot = GridSnapshot {
            page: 1,
            rows_per_page: Some(25),
            total: 30,
            order_by: Some("name".to_string()),
            sort_direction: Some(SortDirection::Asc),
            ..GridSnapshot::default()
        };

        write_snapshot(&store, "grid", &snapshot).unwrap();
        assert_eq!(restore_snapshot(&store, "grid"), Some(snapshot));
        assert_eq!(restore_snapshot(&store, "other"), None);
    }

    #[test]
    fn test_corrupt_snapshot_is_ignored() {
        let store = MemoryStore::new();
        store.write("grid", "{not json").unwrap();
        assert_eq!(restore_snapshot(&store, "grid"), None);
    }

    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, PersistError> {
            Err(PersistError::Unavailable("quota".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), PersistError> {
            Err(PersistError::Backend("quota".to_string()))
        }
    }

    #[test]
    fn test_store_failures() {
        assert_eq!(restore_snapshot(&BrokenStore, "grid"), None);
        assert!(write_snapshot(&BrokenStore, "grid", &GridSnapshot::default()).is_err());
    }
}
