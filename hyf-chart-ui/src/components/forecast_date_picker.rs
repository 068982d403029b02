//! Date input for the start of the forecast window.

use crate::state::AppState;
use dioxus::prelude::*;

/// Picker for the forecast window start date ("as of").
#[component]
pub fn ForecastDatePicker() -> Element {
    let mut state = use_context::<AppState>();
    let as_of = (state.as_of)();

    let on_change = move |evt: Event<FormData>| {
        state.as_of.set(evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Forecast from: "
                input {
                    r#type: "date",
                    value: "{as_of}",
                    onchange: on_change,
                }
            }
        }
    }
}
