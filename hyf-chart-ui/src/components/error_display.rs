//! Error display component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Optional recovery hint shown beneath the message
    /// (e.g. "Try different filters" for a missing selection).
    #[props(default = String::new())]
    pub hint: String,
}

/// Displays an error message in a styled box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "Error: " }
            "{props.message}"
            if !props.hint.is_empty() {
                div {
                    style: "margin-top: 4px; font-size: 12px; color: #8E0000;",
                    "{props.hint}"
                }
            }
        }
    }
}
