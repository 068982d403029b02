//! CSV ingestion for uploaded harvest data.
//!
//! Uploaded files carry one row per day with a date column and a predicted
//! value column. Parsing produces the same flat-map JSON payload shape the
//! prediction backend returns, so uploads flow through the normal
//! normalization path.

use crate::dates::parse_date;
use csv::ReaderBuilder;
use serde_json::{Map, Number, Value};

/// Accepted header names for the value column.
const VALUE_HEADERS: [&str; 2] = ["value", "predicted"];

/// Parse CSV text of `date,value` rows into a flat-map prediction payload.
///
/// The header row must contain a `date` column and a `value` (or
/// `predicted`) column, in any order. Rows with unparseable dates or
/// non-numeric values are rejected outright rather than skipped, so a
/// partially-corrupt file never produces a silently truncated forecast.
pub fn parse_csv_payload(text: &str) -> anyhow::Result<Value> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr.headers()?.clone();
    let date_idx = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("date"))
        .ok_or_else(|| anyhow::anyhow!("missing 'date' column in CSV header"))?;
    let value_idx = headers
        .iter()
        .position(|h| {
            VALUE_HEADERS
                .iter()
                .any(|name| h.trim().eq_ignore_ascii_case(name))
        })
        .ok_or_else(|| anyhow::anyhow!("missing 'value' or 'predicted' column in CSV header"))?;

    let mut payload = Map::new();
    for (row_num, result) in rdr.records().enumerate() {
        let record = result?;
        let date_str = record
            .get(date_idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("row {}: missing date", row_num + 2))?;
        let date = parse_date(date_str)
            .map_err(|e| anyhow::anyhow!("row {}: invalid date '{}': {}", row_num + 2, date_str, e))?;

        let value_str = record
            .get(value_idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("row {}: missing value", row_num + 2))?;
        let value: f64 = value_str
            .parse()
            .map_err(|_| anyhow::anyhow!("row {}: non-numeric value '{}'", row_num + 2, value_str))?;

        let number = Number::from_f64(value)
            .ok_or_else(|| anyhow::anyhow!("row {}: value '{}' is not finite", row_num + 2, value_str))?;
        payload.insert(crate::dates::format_date(&date), Value::Number(number));
    }

    Ok(Value::Object(payload))
}
