//! Header above the forecast chart.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    /// Chart title, e.g. "Predicted Harvest".
    pub title: String,
    /// What the plotted values measure, shown as a subtitle
    /// (e.g. "Harvest volume (kg)"). Hidden when empty.
    #[props(default = String::new())]
    pub unit_description: String,
}

/// Title and measurement subtitle for the forecast chart section.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "display: flex; align-items: baseline; gap: 10px; margin-bottom: 8px;",
            h3 {
                style: "margin: 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.unit_description.is_empty() {
                span {
                    style: "font-size: 12px; color: #666;",
                    "{props.unit_description}"
                }
            }
        }
    }
}
