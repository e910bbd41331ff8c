use datagrid_shared::{PersistError, SnapshotStore, StoreKind};
use gloo::storage::{LocalStorage, SessionStorage, Storage};

/// Browser `localStorage` / `sessionStorage` backed snapshot store.
///
/// Snapshots are stored as raw JSON text, not re-encoded, so they stay
/// readable by anything else using the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserStore {
    kind: StoreKind,
}

impl BrowserStore {
    pub fn new(kind: StoreKind) -> Self {
        Self { kind }
    }

    fn storage(&self) -> web_sys::Storage {
        match self.kind {
            StoreKind::Local => LocalStorage::raw(),
            StoreKind::Session => SessionStorage::raw(),
        }
    }
}

impl SnapshotStore for BrowserStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        self.storage()
            .get_item(key)
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.storage()
            .set_item(key, value)
            .map_err(|e| PersistError::Backend(format!("{:?}", e)))
    }
}
