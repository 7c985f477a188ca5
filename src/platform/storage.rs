//! LocalStorage-backed best-score store

use crate::persistence::KeyValueStore;

/// Integers stored as decimal strings in `window.localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageStore {
    /// Open LocalStorage; private browsing or a sandboxed frame may deny it
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - best score will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<i64> {
        let storage = self.storage.as_ref()?;
        let raw = storage.get_item(key).ok().flatten()?;
        match raw.trim().parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring unparsable value {:?} for {}", raw, key);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: i64) {
        let Some(storage) = &self.storage else { return };
        if storage.set_item(key, &value.to_string()).is_err() {
            log::warn!("Failed to write {} to LocalStorage", key);
        }
    }
}
