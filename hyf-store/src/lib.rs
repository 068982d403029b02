//! Persistence port for forecast results.
//!
//! The dashboard keeps the last successful `ForecastResult` per filter
//! selection so a page reload does not blank the charts. This crate models
//! that as an explicit port: a [`ForecastStore`] trait with `load`/`save`
//! keyed by selection, injected into the caller so the normalizer and
//! generator stay free of storage concerns.
//!
//! Two backends:
//! - [`MemoryStore`] for native binaries and tests
//! - `LocalStorageStore` (behind the `web` feature) backed by the browser's
//!   `localStorage` for the WASM dashboard
//!
//! Results are serialized verbatim with `serde_json`. A corrupt stored blob
//! loads as `None` (logged, never an error); a new save always overwrites
//! the prior entry wholesale.

use hyf_core::forecast::ForecastResult;
use hyf_core::selection::SelectionKey;
use log::warn;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[cfg(feature = "web")]
mod local_storage;
#[cfg(feature = "web")]
pub use local_storage::LocalStorageStore;

/// Storage key for a selection: `hyf:<site>:<sector>`.
pub fn storage_key(key: &SelectionKey) -> String {
    format!("hyf:{}:{}", key.site, key.sector)
}

/// Keyed load/save of forecast results.
pub trait ForecastStore {
    /// Load the last saved result for a selection, or `None` if absent
    /// or unreadable.
    fn load(&self, key: &SelectionKey) -> Option<ForecastResult>;

    /// Save a result for a selection, replacing any prior entry.
    fn save(&self, key: &SelectionKey, result: &ForecastResult);
}

/// Deserialize a stored blob, treating corruption as absence.
fn decode(key: &str, blob: &str) -> Option<ForecastResult> {
    match serde_json::from_str(blob) {
        Ok(result) => Some(result),
        Err(e) => {
            warn!("Discarding unreadable stored forecast for {}: {}", key, e);
            None
        }
    }
}

/// In-memory store for native binaries and tests.
///
/// Cheaply cloneable; clones share the same underlying map, mirroring how
/// the WASM backend shares the browser's storage.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ForecastStore for MemoryStore {
    fn load(&self, key: &SelectionKey) -> Option<ForecastResult> {
        let storage_key = storage_key(key);
        let entries = self.entries.borrow();
        let blob = entries.get(&storage_key)?;
        decode(&storage_key, blob)
    }

    fn save(&self, key: &SelectionKey, result: &ForecastResult) {
        let storage_key = storage_key(key);
        match serde_json::to_string(result) {
            Ok(blob) => {
                self.entries.borrow_mut().insert(storage_key, blob);
            }
            Err(e) => warn!("Failed to serialize forecast for {}: {}", storage_key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hyf_core::forecast::{DailyForecast, ForecastResult};

    fn sample_result() -> ForecastResult {
        let series = vec![DailyForecast::new(
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            100.0,
        )];
        ForecastResult::assemble(series, None)
    }

    #[test]
    fn test_storage_key_format() {
        assert_eq!(storage_key(&SelectionKey::new("adm", "A1")), "hyf:adm:A1");
        assert_eq!(storage_key(&SelectionKey::all()), "hyf:all:all");
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        let key = SelectionKey::new("adm", "A1");
        assert!(store.load(&key).is_none());

        let result = sample_result();
        store.save(&key, &result);
        assert_eq!(store.load(&key), Some(result));
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let store = MemoryStore::new();
        let key = SelectionKey::all();

        store.save(&key, &sample_result());
        let replacement = ForecastResult::assemble(
            vec![DailyForecast::new(
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                120.0,
            )],
            None,
        );
        store.save(&key, &replacement);
        assert_eq!(store.load(&key), Some(replacement));
    }

    #[test]
    fn test_corrupt_blob_loads_as_none() {
        let store = MemoryStore::new();
        let key = SelectionKey::new("adm", "A1");
        store
            .entries
            .borrow_mut()
            .insert(storage_key(&key), "{not json".to_string());
        assert!(store.load(&key).is_none());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let copy = store.clone();
        let key = SelectionKey::new("alm", "all");
        store.save(&key, &sample_result());
        assert!(copy.load(&key).is_some());
    }
}
