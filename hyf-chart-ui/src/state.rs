//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use dioxus::prelude::*;
use hyf_core::forecast::ForecastResult;
use hyf_core::selection::{SelectionKey, ALL};

/// Where the currently displayed forecast came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Normalized from the prediction backend payload
    Backend,
    /// Deterministic offline generator
    Mock,
    /// Restored from the persisted last result
    Stored,
}

/// Shared application state for the harvest forecast dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Currently selected site (or "all")
    pub selected_site: Signal<String>,
    /// Currently selected sector (or "all")
    pub selected_sector: Signal<String>,
    /// Start date of the forecast window (ISO "YYYY-MM-DD")
    pub as_of: Signal<String>,
    /// Available sites for the selector
    pub sites: Signal<Vec<String>>,
    /// Available sectors for the selector
    pub sectors: Signal<Vec<String>>,
    /// The current forecast, if any
    pub result: Signal<Option<ForecastResult>>,
    /// Where the current forecast came from
    pub source: Signal<Option<DataSource>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            selected_site: Signal::new(ALL.to_string()),
            selected_sector: Signal::new(ALL.to_string()),
            as_of: Signal::new(String::new()),
            sites: Signal::new(vec![ALL.to_string(), "adm".to_string(), "alm".to_string()]),
            sectors: Signal::new(vec![ALL.to_string()]),
            result: Signal::new(None),
            source: Signal::new(None),
        }
    }

    /// The active selection as a key for normalization and persistence.
    pub fn selection(&self) -> SelectionKey {
        SelectionKey::new((self.selected_site)(), (self.selected_sector)())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
