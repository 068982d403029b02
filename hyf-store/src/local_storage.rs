//! Browser localStorage backend for the WASM dashboard.

use crate::{decode, storage_key, ForecastStore};
use hyf_core::forecast::ForecastResult;
use hyf_core::selection::SelectionKey;
use log::warn;
use web_sys::Storage;

/// Forecast store backed by `window.localStorage`.
///
/// Construction fails soft: if storage is unavailable (private browsing,
/// sandboxed iframe), every load returns `None` and saves are dropped with
/// a warning, so the dashboard degrades to session-only state.
#[derive(Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl ForecastStore for LocalStorageStore {
    fn load(&self, key: &SelectionKey) -> Option<ForecastResult> {
        let storage_key = storage_key(key);
        let storage = self.storage()?;
        let blob = storage.get_item(&storage_key).ok().flatten()?;
        decode(&storage_key, &blob)
    }

    fn save(&self, key: &SelectionKey, result: &ForecastResult) {
        let storage_key = storage_key(key);
        let Some(storage) = self.storage() else {
            warn!("localStorage unavailable, dropping save for {}", storage_key);
            return;
        };
        match serde_json::to_string(result) {
            Ok(blob) => {
                if storage.set_item(&storage_key, &blob).is_err() {
                    warn!("Failed to persist forecast for {}", storage_key);
                }
            }
            Err(e) => warn!("Failed to serialize forecast for {}: {}", storage_key, e),
        }
    }
}
