//! CSV prediction file ingestion.

use hyf_core::selection::SelectionKey;
use hyf_core::upload::parse_csv_payload;
use log::info;

/// Parse an uploaded CSV prediction file and print the normalized result.
///
/// The CSV must carry a date column and a value column (named `value` or
/// `predicted`, any order, case-insensitive). The parsed rows form a flat
/// date-to-value payload, which the normalizer turns into the canonical
/// forecast with derived totals and averages.
pub fn run_ingest(input: &str, output: Option<&str>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)?;
    info!("Ingesting CSV predictions from {}", input);

    let payload = parse_csv_payload(&text)?;

    // Flat payloads carry no site/sector structure; the aggregate
    // selection is the only one they can answer.
    let selection = SelectionKey::all();
    let result = hyf_forecast::normalize(&payload, &selection)
        .map_err(|e| anyhow::anyhow!("normalization failed: {}", e))?;

    info!(
        "Ingested {} days, total {}",
        result.predictions.len(),
        result.total
    );
    crate::write_result(&result, output)
}
