//! Harvest Yield Forecast Dashboard
//!
//! Shows the 7-day predicted harvest for the selected site/sector as a
//! D3.js banded line chart with summary cards and a per-day table.
//!
//! Data flow:
//! 1. `include_str!` embeds a sample prediction payload into the WASM binary
//!    (stand-in for the prediction service response).
//! 2. On mount: parse the payload, restore the persisted last result for
//!    the default selection, and initialize the D3 scripts.
//! 3. On filter change: normalize the payload for the new selection. If the
//!    selection is absent from the payload, fall back to the deterministic
//!    mock generator so the dashboard never goes blank.
//! 4. Every successful result is persisted per selection via localStorage,
//!    surviving page reloads.

use hyf_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, ForecastDatePicker, LoadingSpinner, SectorSelector,
    SiteSelector,
};
use hyf_chart_ui::debug_log::DebugLog;
use hyf_chart_ui::js_bridge;
use hyf_chart_ui::state::{AppState, DataSource};
use hyf_core::dates::parse_date;
use hyf_core::error::NormalizationError;
use hyf_store::{ForecastStore, LocalStorageStore};

use dioxus::prelude::*;

// Embedded sample prediction payload (hierarchical site/sector shape).
const SAMPLE_PREDICTIONS: &str = include_str!("../data/sample_predictions.json");

/// DOM id for the D3 chart container div.
const CHART_CONTAINER_ID: &str = "harvest-forecast-chart";

/// DOM id for the summary table container div.
const TABLE_CONTAINER_ID: &str = "harvest-summary-table";

/// Sector catalog for the filter sidebar. Planted sectors that have no
/// predictions yet (e.g. "B7") resolve through the mock fallback.
const SECTOR_CATALOG: [&str; 5] = ["all", "A1", "A2", "Z1", "B7"];

/// Debug ring buffer capacity.
const DEBUG_LOG_LINES: usize = 50;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("harvest-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let mut payload: Signal<Option<serde_json::Value>> = use_signal(|| None);
    let mut debug_log = use_signal(|| DebugLog::new(DEBUG_LOG_LINES));
    let mut show_debug = use_signal(|| false);

    // ─── Effect 1: Parse the embedded payload once on mount ───
    use_effect(move || {
        match serde_json::from_str::<serde_json::Value>(SAMPLE_PREDICTIONS) {
            Ok(value) => {
                log::info!("loaded embedded prediction payload");
                payload.set(Some(value));
            }
            Err(e) => {
                state
                    .error_msg
                    .set(Some(format!("Prediction payload unreadable: {}", e)));
            }
        }

        state
            .sectors
            .set(SECTOR_CATALOG.iter().map(|s| s.to_string()).collect());
        state.as_of.set("2024-03-04".to_string());
        state.loading.set(false);

        // Initialize D3 chart scripts (one-time)
        js_bridge::init_charts();
    });

    // ─── Effect 2: Resolve the forecast whenever the selection changes ───
    use_effect(move || {
        let loading = (state.loading)();
        let selection = state.selection();
        let as_of = (state.as_of)();

        if loading {
            return;
        }

        let store = LocalStorageStore::new();
        let raw = payload.read().clone();
        let Some(raw) = raw else {
            // Payload never parsed: the persisted last result is all we have
            if let Some(stored) = store.load(&selection) {
                debug_log
                    .write()
                    .push(format!("restored stored forecast for {}", selection));
                state.result.set(Some(stored));
                state.source.set(Some(DataSource::Stored));
            }
            return;
        };

        match hyf_forecast::normalize(&raw, &selection) {
            Ok(result) => {
                debug_log
                    .write()
                    .push(format!("normalized backend forecast for {}", selection));
                state.error_msg.set(None);
                store.save(&selection, &result);
                state.result.set(Some(result));
                state.source.set(Some(DataSource::Backend));
            }
            Err(NormalizationError::SelectionNotFound(detail))
            | Err(NormalizationError::EmptySeries(detail)) => {
                // No predictions for this slice: keep the dashboard
                // populated with deterministic offline numbers
                let start = parse_date(&as_of)
                    .unwrap_or_else(|_| chrono::Local::now().naive_local().date());
                let result = hyf_forecast::generate_mock(&selection, start);
                debug_log
                    .write()
                    .push(format!("mock fallback for {} ({})", selection, detail));
                state.error_msg.set(None);
                store.save(&selection, &result);
                state.result.set(Some(result));
                state.source.set(Some(DataSource::Mock));
            }
            Err(NormalizationError::MalformedPayload(detail)) => {
                debug_log
                    .write()
                    .push(format!("malformed payload for {}: {}", selection, detail));
                state
                    .error_msg
                    .set(Some(format!("Prediction data unusable: {}", detail)));
                // Show the persisted last good result, if any
                if let Some(stored) = store.load(&selection) {
                    state.result.set(Some(stored));
                    state.source.set(Some(DataSource::Stored));
                }
            }
        }
    });

    // ─── Effect 3: Render chart + table whenever the result changes ───
    use_effect(move || {
        let Some(result) = state.result.read().clone() else {
            return;
        };

        let data_json = serde_json::to_string(&result.predictions).unwrap_or_default();
        let config_json = serde_json::json!({
            "title": "Predicted Harvest",
            "unit": "kg",
        })
        .to_string();

        js_bridge::render_forecast_chart(CHART_CONTAINER_ID, &data_json, &config_json);
        js_bridge::render_summary_table(TABLE_CONTAINER_ID, &data_json, &config_json);
    });

    // ─── Render ───
    rsx! {
        div {
            style: "max-width: 960px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            h2 {
                style: "margin: 8px 0;",
                "Harvest Yield Forecast"
            }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay {
                    message: err.clone(),
                    hint: "Showing the last saved forecast if one exists.".to_string(),
                }
            }

            if *state.loading.read() {
                LoadingSpinner {}
            } else {
                div {
                    style: "display: flex; gap: 16px; flex-wrap: wrap; align-items: center; padding: 4px 0; border-bottom: 1px solid #e0e0e0;",
                    SiteSelector {}
                    SectorSelector {}
                    ForecastDatePicker {}
                }

                SummaryCards {}

                ChartHeader {
                    title: "Predicted Harvest".to_string(),
                    unit_description: "Harvest volume (kg)".to_string(),
                }

                ChartContainer {
                    id: CHART_CONTAINER_ID.to_string(),
                    loading: *state.loading.read(),
                    caption: match (state.source)() {
                        Some(DataSource::Mock) => {
                            "No backend predictions for this selection; showing generated demo data."
                        }
                        Some(DataSource::Stored) => "Showing the last saved forecast for this selection.",
                        _ => "",
                    }
                    .to_string(),
                }

                div {
                    id: "{TABLE_CONTAINER_ID}",
                    style: "margin-top: 12px;",
                }

                button {
                    style: "margin-top: 12px; font-size: 11px; color: #666;",
                    onclick: move |_| {
                        let current = *show_debug.read();
                        show_debug.set(!current);
                    },
                    "Debug log"
                }
                if *show_debug.read() {
                    pre {
                        style: "font-size: 11px; background: #f5f5f5; padding: 8px; border-radius: 4px; max-height: 200px; overflow-y: auto;",
                        {debug_log.read().entries().collect::<Vec<_>>().join("\n")}
                    }
                }
            }
        }
    }
}

/// Summary cards for total, daily average and aggregated error band.
#[component]
fn SummaryCards() -> Element {
    let state = use_context::<AppState>();
    let result = state.result.read().clone();
    let Some(result) = result else {
        return rsx! {
            div {
                style: "padding: 16px 0; color: #666;",
                "Select a site and sector to view the forecast."
            }
        };
    };

    rsx! {
        div {
            style: "display: flex; gap: 16px; margin: 12px 0;",
            SummaryCard {
                label: "7-day total".to_string(),
                value: format!("{} kg", result.total),
            }
            SummaryCard {
                label: "Daily average".to_string(),
                value: format!("{} kg", result.average),
            }
            if let Some(error) = result.aggregated_error {
                SummaryCard {
                    label: "Uncertainty".to_string(),
                    value: format!("± {} kg", error),
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct SummaryCardProps {
    label: String,
    value: String,
}

#[component]
fn SummaryCard(props: SummaryCardProps) -> Element {
    rsx! {
        div {
            style: "flex: 1; padding: 12px 16px; background: #f1f8e9; border: 1px solid #c5e1a5; border-radius: 6px;",
            div {
                style: "font-size: 12px; color: #558b2f;",
                "{props.label}"
            }
            div {
                style: "font-size: 22px; font-weight: bold; color: #33691e;",
                "{props.value}"
            }
        }
    }
}
