//! Container the D3 forecast chart renders into.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id the render functions poll for before drawing.
    pub id: String,
    /// Whether forecast data is still being resolved.
    #[props(default = false)]
    pub loading: bool,
    /// Minimum height, sized for a 7-day banded line chart with axis labels.
    #[props(default = 380)]
    pub min_height: u32,
    /// Caption under the chart, e.g. where the displayed forecast came from.
    #[props(default = String::new())]
    pub caption: String,
}

/// Reserved area for the forecast chart.
///
/// The div keeps its height while data resolves so the layout does not jump
/// when D3 replaces the placeholder with the rendered SVG.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            if props.loading {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "Rendering forecast..."
                }
            }
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
            if !props.caption.is_empty() {
                p {
                    style: "font-size: 11px; color: #888; text-align: center; margin: 4px 0 0 0;",
                    "{props.caption}"
                }
            }
        }
    }
}
