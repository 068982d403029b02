//! Dropdown selector for choosing a sector within the selected site.

use crate::state::AppState;
use dioxus::prelude::*;

/// Sector dropdown selector.
/// Reads available sectors from AppState and updates selected_sector on
/// change. The "all" entry selects the site-level aggregate.
#[component]
pub fn SectorSelector() -> Element {
    let mut state = use_context::<AppState>();
    let sectors = state.sectors.read().clone();
    let selected = (state.selected_sector)();

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        state.selected_sector.set(value);
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "sector-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Sector: "
            }
            select {
                id: "sector-select",
                onchange: on_change,
                for sector in sectors.iter() {
                    option {
                        value: "{sector}",
                        selected: *sector == selected,
                        if sector == "all" { "All sectors" } else { "{sector}" }
                    }
                }
            }
        }
    }
}
