use wasm_bindgen::JsValue;
use web_sys::Storage;

use tiempos_core::{KeyValueStore, StorageError};

/// `window.localStorage`, or nothing when the browser refuses access
/// (private mode, disabled storage). Without storage every read is empty and
/// every write fails, so the page still runs on defaults.
pub(crate) struct BrowserStorage {
    storage: Option<Storage>,
}

impl BrowserStorage {
    pub(crate) fn open() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            gloo::console::warn!("local storage unavailable, layout will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

fn rejected(key: &str, err: JsValue) -> StorageError {
    StorageError::Rejected {
        key: key.to_string(),
        reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(storage) = self.storage.as_ref() else {
            return Ok(None);
        };
        storage.get_item(key).map_err(|err| rejected(key, err))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| rejected(key, err))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| rejected(key, err))
    }
}
