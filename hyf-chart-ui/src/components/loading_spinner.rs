//! Placeholder shown while forecast data resolves.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    /// Message shown while the dashboard prepares its data.
    #[props(default = "Loading forecast...".to_string())]
    pub message: String,
}

/// Centered loading indicator with a configurable message.
#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "{props.message}"
        }
    }
}
