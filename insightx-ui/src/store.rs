//! Browser Storage
//!
//! [`KeyValueStore`] over `window.localStorage`.

use wasm_bindgen::JsValue;

use insightx::error::{StoreError, StoreResult};
use insightx::store::KeyValueStore;

/// `localStorage` slots
///
/// Stateless: every call looks the storage object up again, so a missing or
/// blocked storage degrades to "nothing persisted" instead of failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    fn require() -> StoreResult<web_sys::Storage> {
        Self::storage().ok_or_else(|| StoreError::Unavailable("localStorage".to_string()))
    }
}

fn storage_error(e: JsValue) -> StoreError {
    StoreError::Unavailable(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        Self::require()?
            .set_item(key, value)
            .map_err(storage_error)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        Self::require()?
            .remove_item(key)
            .map_err(storage_error)
    }
}
