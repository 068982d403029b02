//! Offline deterministic forecast generation.

use chrono::Local;
use hyf_core::dates::parse_date;
use hyf_core::selection::SelectionKey;
use log::info;

/// Generate a deterministic 7-day mock forecast for the selection.
///
/// The same site, sector and start date always produce the same numbers,
/// so the output is reproducible across runs and machines.
pub fn run_mock(
    site: &str,
    sector: &str,
    as_of: Option<&str>,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let selection = SelectionKey::new(site, sector);
    let start = match as_of {
        Some(text) => parse_date(text)?,
        None => Local::now().naive_local().date(),
    };

    info!("Generating mock forecast for {} starting {}", selection, start);
    let result = hyf_forecast::generate_mock(&selection, start);

    crate::write_result(&result, output)
}
