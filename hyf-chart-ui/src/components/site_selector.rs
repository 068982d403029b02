//! Dropdown selector for choosing a site.

use crate::state::AppState;
use dioxus::prelude::*;

/// Site dropdown selector.
/// Reads available sites from AppState and updates selected_site on change.
/// The "all" entry selects the cross-site aggregate.
#[component]
pub fn SiteSelector() -> Element {
    let mut state = use_context::<AppState>();
    let sites = state.sites.read().clone();
    let selected = (state.selected_site)();

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        state.selected_site.set(value);
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "site-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Site: "
            }
            select {
                id: "site-select",
                onchange: on_change,
                for site in sites.iter() {
                    option {
                        value: "{site}",
                        selected: *site == selected,
                        if site == "all" { "All sites" } else { "{site.to_uppercase()}" }
                    }
                }
            }
        }
    }
}
