//! Reusable Dioxus RSX components for the harvest dashboard.

mod chart_container;
mod chart_header;
mod error_display;
mod forecast_date_picker;
mod loading_spinner;
mod sector_selector;
mod site_selector;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use forecast_date_picker::ForecastDatePicker;
pub use loading_spinner::LoadingSpinner;
pub use sector_selector::SectorSelector;
pub use site_selector::SiteSelector;
