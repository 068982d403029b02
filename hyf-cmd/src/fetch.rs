//! Fetch-and-normalize against the prediction backend.

use hyf_core::client::fetch_raw_predictions;
use hyf_core::selection::SelectionKey;
use log::info;

/// Fetch raw predictions for the selection and print the normalized result.
///
/// The raw payload may arrive in any of the supported shapes; the
/// normalizer resolves the selection and produces the canonical forecast.
/// A selection the backend has no predictions for is reported as an error
/// here rather than silently substituted (use the `mock` subcommand for
/// offline numbers).
pub async fn run_fetch(
    base_url: &str,
    site: &str,
    sector: &str,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let selection = SelectionKey::new(site, sector);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    info!("Fetching predictions for {} from {}", selection, base_url);
    let raw = fetch_raw_predictions(&client, base_url, &selection).await?;

    let result = hyf_forecast::normalize(&raw, &selection)
        .map_err(|e| anyhow::anyhow!("normalization failed: {}", e))?;

    info!(
        "Normalized {} days, total {}",
        result.predictions.len(),
        result.total
    );
    crate::write_result(&result, output)
}
