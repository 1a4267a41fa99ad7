//! `localStorage` adapter for the metrics log

use vitals_core::{StoragePort, VitalsError};
use wasm_bindgen::JsValue;

/// Browser `localStorage`, shared by every script on the origin
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Acquire `window.localStorage`
    ///
    /// Fails when there is no window (workers) or storage is disabled.
    pub fn open() -> Result<Self, VitalsError> {
        let window =
            web_sys::window().ok_or_else(|| VitalsError::Storage("No window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| VitalsError::Storage("No localStorage".to_string()))?;
        Ok(Self { storage })
    }

    /// Remove an entry (used to reset state between browser tests)
    pub fn remove(&self, key: &str) -> Result<(), VitalsError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

impl StoragePort for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, VitalsError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), VitalsError> {
        self.storage.set_item(key, value).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> VitalsError {
    VitalsError::Storage(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const KEY: &str = "vitalsStorageTest";

    #[wasm_bindgen_test]
    fn test_get_missing_key() {
        let storage = LocalStorage::open().unwrap();
        storage.remove(KEY).unwrap();
        assert_eq!(storage.get(KEY).unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn test_set_then_get() {
        let mut storage = LocalStorage::open().unwrap();
        storage.set(KEY, "[]").unwrap();
        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some("[]"));
        storage.remove(KEY).unwrap();
    }
}
