//! HTTP client for the external prediction service.
//!
//! Transport only: the response body is returned as untyped JSON for the
//! normalizer to validate. Timeouts and retry policy belong to the caller,
//! which builds the `reqwest::Client`.

use crate::selection::SelectionKey;
use log::info;
use reqwest::Client;
use serde_json::Value;

/// Path of the prediction endpoint relative to the service base URL.
pub const PREDICTIONS_PATH: &str = "/predictions";

/// Fetch the raw prediction payload for a selection.
///
/// Issues a single GET against `{base_url}/predictions?site=..&sector=..`
/// and returns the body as untyped JSON. No shape validation happens here.
pub async fn fetch_raw_predictions(
    client: &Client,
    base_url: &str,
    selection: &SelectionKey,
) -> anyhow::Result<Value> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), PREDICTIONS_PATH);
    info!("Fetching predictions for {} from {}", selection, url);

    let response = client
        .get(&url)
        .query(&[("site", selection.site.as_str()), ("sector", selection.sector.as_str())])
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!(
            "prediction service returned {} for {}",
            response.status(),
            selection
        );
    }

    let body = response.json::<Value>().await?;
    Ok(body)
}
