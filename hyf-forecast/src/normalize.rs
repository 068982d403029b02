//! Response normalizer for raw prediction payloads.
//!
//! The upstream prediction service's response format evolved over time, so
//! four shapes are in the wild: a flat date->value map, a flat map wrapped
//! with precomputed stats, and two hierarchical site/sector nestings. Shape
//! detection happens once at the entry point and resolves into a tagged
//! [`PayloadShape`]; everything downstream works on typed series.
//!
//! Normalization is all-or-nothing: any missing or wrong-typed field fails
//! the whole call, no partial results are returned.

use chrono::NaiveDate;
use hyf_core::dates::parse_date;
use hyf_core::error::NormalizationError;
use hyf_core::forecast::{DailyForecast, ForecastResult};
use hyf_core::selection::SelectionKey;
use serde_json::{Map, Value};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

/// Site sentinel used by the second hierarchical payload variant.
const ALL_SITES: &str = "all_sites";

/// Sector sentinel used by the second hierarchical payload variant.
const ALL_SECTORS: &str = "all_sectors";

/// The supported raw payload shapes, detected structurally.
enum PayloadShape<'a> {
    /// `{ "2024-03-04": 100, ... }`
    FlatMap(&'a Map<String, Value>),
    /// `{ "predictions": { date: value }, "total": n, "average"?: n }`
    FlatWithStats {
        predictions: &'a Map<String, Value>,
        average: Option<f64>,
    },
    /// `{ "global"?: block, "sites": { site: { ..block, "sectors": { sector: block } } } }`
    SitesTree {
        obj: &'a Map<String, Value>,
        sites: &'a Map<String, Value>,
    },
    /// `{ "predictions": { site: { sector: block } } }` with
    /// `"all_sites"`/`"all_sectors"` sentinel keys.
    PredictionsTree(&'a Map<String, Value>),
}

/// Normalize a raw backend payload into a [`ForecastResult`].
///
/// `raw` is untyped JSON straight from the network boundary. `selection`
/// constrains which branch of a hierarchical payload is extracted; flat
/// payloads are treated as already filtered server-side and ignore it.
///
/// Pure function of its inputs: no I/O, no clock, no shared state.
pub fn normalize(
    raw: &Value,
    selection: &SelectionKey,
) -> Result<ForecastResult, NormalizationError> {
    match detect_shape(raw)? {
        PayloadShape::FlatMap(map) => {
            let series = parse_flat_series(map)?;
            finish_series(series, None, "flat payload")
        }
        PayloadShape::FlatWithStats {
            predictions,
            average,
        } => {
            let series = parse_flat_series(predictions)?;
            finish_series(series, average, "'predictions' map")
        }
        PayloadShape::SitesTree { obj, sites } => resolve_sites_tree(obj, sites, selection),
        PayloadShape::PredictionsTree(map) => resolve_predictions_tree(map, selection),
    }
}

/// Structural shape detection, performed once per payload.
fn detect_shape(raw: &Value) -> Result<PayloadShape<'_>, NormalizationError> {
    let obj = raw.as_object().ok_or_else(|| {
        NormalizationError::MalformedPayload("payload is not a JSON object".to_string())
    })?;

    if let Some(sites) = obj.get("sites") {
        let sites = sites.as_object().ok_or_else(|| {
            NormalizationError::MalformedPayload("'sites' is not an object".to_string())
        })?;
        return Ok(PayloadShape::SitesTree { obj, sites });
    }

    if let Some(predictions) = obj.get("predictions") {
        let predictions = predictions.as_object().ok_or_else(|| {
            NormalizationError::MalformedPayload("'predictions' is not an object".to_string())
        })?;
        // An empty predictions map is the flat-with-stats shape; callers
        // get EmptySeries rather than MalformedPayload for it.
        if predictions.values().all(Value::is_number) {
            return Ok(PayloadShape::FlatWithStats {
                predictions,
                average: optional_number(obj, "average", "'predictions' map")?,
            });
        }
        if predictions.values().all(Value::is_object) {
            return Ok(PayloadShape::PredictionsTree(predictions));
        }
        return Err(NormalizationError::MalformedPayload(
            "mixed entry types under 'predictions'".to_string(),
        ));
    }

    if obj.values().all(Value::is_number) {
        return Ok(PayloadShape::FlatMap(obj));
    }

    Err(NormalizationError::MalformedPayload(
        "payload matches no supported shape".to_string(),
    ))
}

/// Parse a flat `date -> value` map into raw forecast days.
fn parse_flat_series(map: &Map<String, Value>) -> Result<Vec<DailyForecast>, NormalizationError> {
    let mut series = Vec::with_capacity(map.len());
    for (key, value) in map {
        let date = parse_date(key).map_err(|_| {
            NormalizationError::MalformedPayload(format!("invalid date key '{}'", key))
        })?;
        let value = value.as_f64().ok_or_else(|| {
            NormalizationError::MalformedPayload(format!("value for '{}' is not numeric", key))
        })?;
        if value < 0.0 {
            return Err(NormalizationError::MalformedPayload(format!(
                "negative value {} for '{}'",
                value, key
            )));
        }
        series.push(DailyForecast::new(date, value));
    }
    Ok(series)
}

/// Reject empty series, then assemble the result.
fn finish_series(
    series: Vec<DailyForecast>,
    supplied_average: Option<f64>,
    context: &str,
) -> Result<ForecastResult, NormalizationError> {
    if series.is_empty() {
        return Err(NormalizationError::EmptySeries(context.to_string()));
    }
    Ok(ForecastResult::assemble(series, supplied_average))
}

/// Parse a `SeriesBlock` object: `daily_forecast` array plus optional
/// precomputed `average`. The precomputed `total` is deliberately ignored;
/// totals are always recomputed locally.
fn parse_series_block(
    block: &Map<String, Value>,
    context: &str,
) -> Result<(Vec<DailyForecast>, Option<f64>), NormalizationError> {
    let days = block
        .get("daily_forecast")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            NormalizationError::MalformedPayload(format!(
                "{}: missing 'daily_forecast' array",
                context
            ))
        })?;

    let mut seen: HashSet<NaiveDate> = HashSet::with_capacity(days.len());
    let mut series = Vec::with_capacity(days.len());
    for entry in days {
        let day = parse_forecast_entry(entry, context)?;
        if !seen.insert(day.date) {
            return Err(NormalizationError::MalformedPayload(format!(
                "{}: duplicate date {}",
                context, day.date
            )));
        }
        series.push(day);
    }

    let average = optional_number(block, "average", context)?;
    Ok((series, average))
}

/// Parse one `daily_forecast` entry, deriving missing band edges from
/// `error` when present.
fn parse_forecast_entry(
    entry: &Value,
    context: &str,
) -> Result<DailyForecast, NormalizationError> {
    let obj = entry.as_object().ok_or_else(|| {
        NormalizationError::MalformedPayload(format!("{}: forecast entry is not an object", context))
    })?;

    let date_str = obj.get("date").and_then(Value::as_str).ok_or_else(|| {
        NormalizationError::MalformedPayload(format!("{}: entry missing 'date' string", context))
    })?;
    let date = parse_date(date_str).map_err(|_| {
        NormalizationError::MalformedPayload(format!("{}: invalid date '{}'", context, date_str))
    })?;

    let value = obj.get("value").and_then(Value::as_f64).ok_or_else(|| {
        NormalizationError::MalformedPayload(format!(
            "{}: entry for {} missing numeric 'value'",
            context, date_str
        ))
    })?;
    if value < 0.0 {
        return Err(NormalizationError::MalformedPayload(format!(
            "{}: negative value {} on {}",
            context, value, date_str
        )));
    }

    let error = optional_number(obj, "error", context)?;
    if let Some(e) = error {
        if e < 0.0 {
            return Err(NormalizationError::MalformedPayload(format!(
                "{}: negative error {} on {}",
                context, e, date_str
            )));
        }
    }
    let mut lower = optional_number(obj, "lower", context)?;
    let mut upper = optional_number(obj, "upper", context)?;
    if let Some(e) = error {
        lower = lower.or(Some(value - e));
        upper = upper.or(Some(value + e));
    }

    Ok(DailyForecast {
        date,
        value,
        error,
        lower,
        upper,
    })
}

fn optional_number(
    obj: &Map<String, Value>,
    key: &str,
    context: &str,
) -> Result<Option<f64>, NormalizationError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or_else(|| {
            NormalizationError::MalformedPayload(format!("{}: '{}' is not numeric", context, key))
        }),
    }
}

/// Sum constituent series per matching date. `value`, `error`, `lower`
/// and `upper` all add. A constituent without a band contributes zero
/// error and its value as both band edges, so a mixed aggregate keeps
/// `lower <= value <= upper`; band fields stay absent only while no
/// constituent carries them.
fn aggregate_series(series_list: Vec<Vec<DailyForecast>>) -> Vec<DailyForecast> {
    let mut merged: BTreeMap<NaiveDate, DailyForecast> = BTreeMap::new();
    for series in series_list {
        for day in series {
            match merged.entry(day.date) {
                Entry::Occupied(mut slot) => {
                    let acc = slot.get_mut();
                    let banded = acc.error.is_some()
                        || acc.lower.is_some()
                        || acc.upper.is_some()
                        || day.error.is_some()
                        || day.lower.is_some()
                        || day.upper.is_some();
                    if banded {
                        acc.error = Some(acc.error.unwrap_or(0.0) + day.error.unwrap_or(0.0));
                        acc.lower =
                            Some(acc.lower.unwrap_or(acc.value) + day.lower.unwrap_or(day.value));
                        acc.upper =
                            Some(acc.upper.unwrap_or(acc.value) + day.upper.unwrap_or(day.value));
                    }
                    acc.value += day.value;
                }
                Entry::Vacant(slot) => {
                    slot.insert(day);
                }
            }
        }
    }
    merged.into_values().collect()
}

fn finish_block(
    block: &Map<String, Value>,
    context: &str,
) -> Result<ForecastResult, NormalizationError> {
    let (series, average) = parse_series_block(block, context)?;
    finish_series(series, average, context)
}

fn finish_aggregate(
    series_list: Vec<Vec<DailyForecast>>,
    context: &str,
) -> Result<ForecastResult, NormalizationError> {
    let merged = aggregate_series(series_list);
    finish_series(merged, None, context)
}

/// Resolve a selection against the `sites`-keyed hierarchical shape.
///
/// Sentinel components select aggregate levels: `("all", "all")` reads the
/// precomputed `global` block (or sums everything when absent), and
/// `(site, "all")` reads the site's own series block (or sums its sectors).
/// A concrete site or sector that is absent fails with `SelectionNotFound`;
/// aggregate levels never silently stand in for a named sector.
fn resolve_sites_tree(
    obj: &Map<String, Value>,
    sites: &Map<String, Value>,
    selection: &SelectionKey,
) -> Result<ForecastResult, NormalizationError> {
    if selection.is_all_sites() {
        if let Some(global) = obj.get("global") {
            let block = global.as_object().ok_or_else(|| {
                NormalizationError::MalformedPayload("'global' is not an object".to_string())
            })?;
            return finish_block(block, "global aggregate");
        }
        let mut lists = Vec::new();
        for (site_name, site_value) in sites {
            let site_obj = site_object(site_name, site_value)?;
            lists.push(site_aggregate_series(site_name, site_obj)?);
        }
        return finish_aggregate(lists, "global aggregate");
    }

    let site_obj = match sites.get(&selection.site) {
        None => {
            return Err(NormalizationError::SelectionNotFound(format!(
                "site '{}' not present in payload",
                selection.site
            )))
        }
        Some(v) => site_object(&selection.site, v)?,
    };

    if selection.is_all_sectors() {
        let series = site_aggregate_series(&selection.site, site_obj)?;
        return finish_series(
            series,
            site_supplied_average(site_obj, &selection.site)?,
            &format!("site '{}' aggregate", selection.site),
        );
    }

    let sectors = site_obj
        .get("sectors")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            NormalizationError::SelectionNotFound(format!(
                "site '{}' has no sectors in payload",
                selection.site
            ))
        })?;
    let block = match sectors.get(&selection.sector) {
        None => {
            return Err(NormalizationError::SelectionNotFound(format!(
                "sector '{}' not present under site '{}'",
                selection.sector, selection.site
            )))
        }
        Some(v) => v.as_object().ok_or_else(|| {
            NormalizationError::MalformedPayload(format!(
                "sector '{}' under site '{}' is not an object",
                selection.sector, selection.site
            ))
        })?,
    };
    finish_block(
        block,
        &format!("site '{}' sector '{}'", selection.site, selection.sector),
    )
}

fn site_object<'a>(
    site_name: &str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>, NormalizationError> {
    value.as_object().ok_or_else(|| {
        NormalizationError::MalformedPayload(format!("site '{}' entry is not an object", site_name))
    })
}

/// The site-level aggregate: the site's own series block when it carries
/// one, otherwise the per-date sum of its sector blocks.
fn site_aggregate_series(
    site_name: &str,
    site_obj: &Map<String, Value>,
) -> Result<Vec<DailyForecast>, NormalizationError> {
    let context = format!("site '{}' aggregate", site_name);
    if site_obj.contains_key("daily_forecast") {
        let (series, _) = parse_series_block(site_obj, &context)?;
        return Ok(series);
    }

    let sectors = site_obj
        .get("sectors")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            NormalizationError::SelectionNotFound(format!(
                "site '{}' has neither a series block nor sectors",
                site_name
            ))
        })?;
    let mut lists = Vec::new();
    for (sector_name, sector_value) in sectors {
        let block = sector_value.as_object().ok_or_else(|| {
            NormalizationError::MalformedPayload(format!(
                "sector '{}' under site '{}' is not an object",
                sector_name, site_name
            ))
        })?;
        let (series, _) =
            parse_series_block(block, &format!("site '{}' sector '{}'", site_name, sector_name))?;
        lists.push(series);
    }
    Ok(aggregate_series(lists))
}

/// Supplied average for a site's own block, if the site carries one.
fn site_supplied_average(
    site_obj: &Map<String, Value>,
    site_name: &str,
) -> Result<Option<f64>, NormalizationError> {
    if site_obj.contains_key("daily_forecast") {
        optional_number(site_obj, "average", &format!("site '{}' aggregate", site_name))
    } else {
        Ok(None)
    }
}

/// Resolve a selection against the `predictions[site][sector]` hierarchical
/// shape, which uses `"all_sites"`/`"all_sectors"` sentinel keys instead of
/// `"all"`.
fn resolve_predictions_tree(
    map: &Map<String, Value>,
    selection: &SelectionKey,
) -> Result<ForecastResult, NormalizationError> {
    let site_key = if selection.is_all_sites() {
        ALL_SITES
    } else {
        selection.site.as_str()
    };
    let sector_key = if selection.is_all_sectors() {
        ALL_SECTORS
    } else {
        selection.sector.as_str()
    };

    if let Some(site_value) = map.get(site_key) {
        let sectors = site_value.as_object().ok_or_else(|| {
            NormalizationError::MalformedPayload(format!(
                "entry for site '{}' is not an object",
                site_key
            ))
        })?;

        if let Some(block_value) = sectors.get(sector_key) {
            let block = block_value.as_object().ok_or_else(|| {
                NormalizationError::MalformedPayload(format!(
                    "entry for '{}'/'{}' is not an object",
                    site_key, sector_key
                ))
            })?;
            return finish_block(
                block,
                &format!("site '{}' sector '{}'", selection.site, selection.sector),
            );
        }

        if selection.is_all_sectors() {
            // No precomputed sector aggregate: sum the sectors ourselves
            let mut lists = Vec::new();
            for (sector_name, sector_value) in sectors {
                if sector_name == ALL_SECTORS {
                    continue;
                }
                let block = sector_value.as_object().ok_or_else(|| {
                    NormalizationError::MalformedPayload(format!(
                        "entry for '{}'/'{}' is not an object",
                        site_key, sector_name
                    ))
                })?;
                let (series, _) = parse_series_block(
                    block,
                    &format!("site '{}' sector '{}'", selection.site, sector_name),
                )?;
                lists.push(series);
            }
            return finish_aggregate(lists, &format!("site '{}' aggregate", selection.site));
        }

        return Err(NormalizationError::SelectionNotFound(format!(
            "sector '{}' not present under site '{}'",
            selection.sector, selection.site
        )));
    }

    if selection.is_all_sites() {
        // No precomputed global entry: sum every sector of every site
        let mut lists = Vec::new();
        for (site_name, site_value) in map {
            if site_name == ALL_SITES {
                continue;
            }
            let sectors = site_value.as_object().ok_or_else(|| {
                NormalizationError::MalformedPayload(format!(
                    "entry for site '{}' is not an object",
                    site_name
                ))
            })?;
            for (sector_name, sector_value) in sectors {
                if sector_name == ALL_SECTORS {
                    continue;
                }
                let block = sector_value.as_object().ok_or_else(|| {
                    NormalizationError::MalformedPayload(format!(
                        "entry for '{}'/'{}' is not an object",
                        site_name, sector_name
                    ))
                })?;
                let (series, _) = parse_series_block(
                    block,
                    &format!("site '{}' sector '{}'", site_name, sector_name),
                )?;
                lists.push(series);
            }
        }
        return finish_aggregate(lists, "global aggregate");
    }

    Err(NormalizationError::SelectionNotFound(format!(
        "site '{}' not present in payload",
        selection.site
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn all() -> SelectionKey {
        SelectionKey::all()
    }

    #[test]
    fn test_flat_map_end_to_end() {
        let raw = json!({"2024-03-04": 100, "2024-03-05": 120});
        let result = normalize(&raw, &all()).unwrap();

        assert_eq!(result.predictions.len(), 2);
        assert_eq!(result.predictions[0].weekday, "Monday");
        assert_eq!(result.predictions[0].date, "2024-03-04");
        assert_eq!(result.predictions[0].value, 100.0);
        assert_eq!(result.predictions[1].weekday, "Tuesday");
        assert_eq!(result.predictions[1].value, 120.0);
        assert_eq!(result.total, 220.0);
        assert_eq!(result.average, 110.0);
        assert_eq!(result.aggregated_error, None);
    }

    #[test]
    fn test_flat_map_ignores_selection() {
        let raw = json!({"2024-03-04": 100});
        let result = normalize(&raw, &SelectionKey::new("adm", "A1")).unwrap();
        assert_eq!(result.total, 100.0);
    }

    #[test]
    fn test_flat_map_sorts_raw_order() {
        let raw = json!({"2024-03-06": 90, "2024-03-04": 100, "2024-03-05": 120});
        let result = normalize(&raw, &all()).unwrap();
        let dates: Vec<&str> = result.predictions.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-04", "2024-03-05", "2024-03-06"]);
    }

    #[test]
    fn test_flat_with_stats_recomputes_total_trusts_average() {
        // Upstream total is wrong on purpose; it must be recomputed
        let raw = json!({
            "predictions": {"2024-03-04": 100, "2024-03-05": 120},
            "total": 999,
            "average": 111
        });
        let result = normalize(&raw, &all()).unwrap();
        assert_eq!(result.total, 220.0);
        assert_eq!(result.average, 111.0);
    }

    #[test]
    fn test_flat_with_stats_computes_missing_average() {
        let raw = json!({
            "predictions": {"2024-03-04": 100, "2024-03-05": 120},
            "total": 220
        });
        let result = normalize(&raw, &all()).unwrap();
        assert_eq!(result.average, 110.0);
    }

    #[test]
    fn test_flat_with_stats_non_numeric_average_is_malformed() {
        let raw = json!({
            "predictions": {"2024-03-04": 100},
            "total": 100,
            "average": "high"
        });
        let err = normalize(&raw, &all()).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedPayload(_)));
        assert!(err.to_string().contains("average"));
    }

    #[test]
    fn test_series_block_non_numeric_average_is_malformed() {
        let raw = json!({
            "sites": {
                "adm": {
                    "daily_forecast": [{"date": "2024-01-01", "value": 10}],
                    "total": 10,
                    "average": "ten"
                }
            }
        });
        let err = normalize(&raw, &SelectionKey::new("adm", "all")).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedPayload(_)));
        assert!(err.to_string().contains("average"));
    }

    #[test]
    fn test_empty_predictions_is_empty_series() {
        let raw = json!({"predictions": {}, "total": 0, "average": 0});
        let err = normalize(&raw, &all()).unwrap_err();
        assert!(matches!(err, NormalizationError::EmptySeries(_)));
    }

    #[test]
    fn test_empty_flat_map_is_empty_series() {
        let raw = json!({});
        let err = normalize(&raw, &all()).unwrap_err();
        assert!(matches!(err, NormalizationError::EmptySeries(_)));
    }

    #[test]
    fn test_non_object_payload_is_malformed() {
        let err = normalize(&json!([1, 2, 3]), &all()).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedPayload(_)));
    }

    #[test]
    fn test_bad_date_key_is_malformed() {
        let raw = json!({"yesterday": 100});
        let err = normalize(&raw, &all()).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedPayload(_)));
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_negative_value_is_malformed() {
        let raw = json!({"2024-03-04": -5});
        let err = normalize(&raw, &all()).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedPayload(_)));
    }

    fn sites_payload() -> Value {
        json!({
            "meta": {"model": "harvest-v2"},
            "global": {
                "daily_forecast": [
                    {"date": "2024-01-01", "value": 60, "error": 6},
                    {"date": "2024-01-02", "value": 66, "error": 5}
                ],
                "total": 126,
                "average": 63
            },
            "sites": {
                "adm": {
                    "daily_forecast": [
                        {"date": "2024-01-01", "value": 25, "error": 2},
                        {"date": "2024-01-02", "value": 28, "error": 3}
                    ],
                    "total": 53,
                    "average": 27,
                    "sectors": {
                        "A1": {
                            "daily_forecast": [
                                {"date": "2024-01-01", "value": 10, "error": 1},
                                {"date": "2024-01-02", "value": 12, "error": 1}
                            ],
                            "total": 22,
                            "average": 11
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_sites_tree_exact_sector() {
        let result = normalize(&sites_payload(), &SelectionKey::new("adm", "A1")).unwrap();
        assert_eq!(result.total, 22.0);
        assert_eq!(result.average, 11.0);
        assert_eq!(result.aggregated_error, Some(2.0));
        assert_eq!(result.predictions[0].lower, Some(9.0));
        assert_eq!(result.predictions[0].upper, Some(11.0));
    }

    #[test]
    fn test_sites_tree_missing_sector_fails_not_falls_back() {
        // Site aggregate exists, but "B2" must still be a SelectionNotFound
        let err = normalize(&sites_payload(), &SelectionKey::new("adm", "B2")).unwrap_err();
        match err {
            NormalizationError::SelectionNotFound(detail) => {
                assert!(detail.contains("B2"));
                assert!(detail.contains("adm"));
            }
            other => panic!("expected SelectionNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_sites_tree_site_aggregate() {
        let result = normalize(&sites_payload(), &SelectionKey::new("adm", "all")).unwrap();
        assert_eq!(result.total, 53.0);
        // The site block supplied its own average
        assert_eq!(result.average, 27.0);
    }

    #[test]
    fn test_sites_tree_missing_site() {
        let err = normalize(&sites_payload(), &SelectionKey::new("xyz", "all")).unwrap_err();
        assert!(matches!(err, NormalizationError::SelectionNotFound(_)));
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_sites_tree_global() {
        let result = normalize(&sites_payload(), &all()).unwrap();
        assert_eq!(result.total, 126.0);
        assert_eq!(result.aggregated_error, Some(11.0));
    }

    #[test]
    fn test_sites_tree_site_aggregate_summed_from_sectors() {
        // No site-level block: ("site", "all") sums the sector series
        let raw = json!({
            "sites": {
                "adm": {
                    "sectors": {
                        "A1": {"daily_forecast": [{"date": "2024-01-01", "value": 10}], "total": 10, "average": 10},
                        "A2": {"daily_forecast": [{"date": "2024-01-01", "value": 15}], "total": 15, "average": 15}
                    }
                }
            }
        });
        let result = normalize(&raw, &SelectionKey::new("adm", "all")).unwrap();
        assert_eq!(result.predictions.len(), 1);
        assert_eq!(result.predictions[0].value, 25.0);
        assert_eq!(result.total, 25.0);
    }

    #[test]
    fn test_sites_tree_global_summed_without_global_block() {
        let raw = json!({
            "sites": {
                "adm": {
                    "sectors": {
                        "A1": {"daily_forecast": [{"date": "2024-01-01", "value": 10}], "total": 10, "average": 10}
                    }
                },
                "alm": {
                    "sectors": {
                        "Z9": {"daily_forecast": [{"date": "2024-01-01", "value": 30}], "total": 30, "average": 30}
                    }
                }
            }
        });
        let result = normalize(&raw, &all()).unwrap();
        assert_eq!(result.total, 40.0);
    }

    fn predictions_tree_payload() -> Value {
        json!({
            "predictions": {
                "all_sites": {
                    "all_sectors": {
                        "daily_forecast": [
                            {"date": "2024-01-01", "value": 100}
                        ],
                        "total": 100,
                        "average": 100
                    }
                },
                "adm": {
                    "A1": {
                        "daily_forecast": [
                            {"date": "2024-01-01", "value": 40, "error": 4}
                        ],
                        "total": 40,
                        "average": 40
                    },
                    "A2": {
                        "daily_forecast": [
                            {"date": "2024-01-01", "value": 20, "error": 2}
                        ],
                        "total": 20,
                        "average": 20
                    }
                }
            }
        })
    }

    #[test]
    fn test_predictions_tree_sentinel_mapping() {
        let result = normalize(&predictions_tree_payload(), &all()).unwrap();
        assert_eq!(result.total, 100.0);
    }

    #[test]
    fn test_predictions_tree_exact_sector() {
        let result =
            normalize(&predictions_tree_payload(), &SelectionKey::new("adm", "A1")).unwrap();
        assert_eq!(result.total, 40.0);
        assert_eq!(result.aggregated_error, Some(4.0));
    }

    #[test]
    fn test_predictions_tree_sector_aggregate_summed() {
        // "adm" has no "all_sectors" entry, so the sectors are summed
        let result =
            normalize(&predictions_tree_payload(), &SelectionKey::new("adm", "all")).unwrap();
        assert_eq!(result.total, 60.0);
        assert_eq!(result.predictions[0].value, 60.0);
        assert_eq!(result.aggregated_error, Some(6.0));
    }

    #[test]
    fn test_predictions_tree_missing_sector() {
        let err =
            normalize(&predictions_tree_payload(), &SelectionKey::new("adm", "B2")).unwrap_err();
        assert!(matches!(err, NormalizationError::SelectionNotFound(_)));
    }

    #[test]
    fn test_series_block_duplicate_dates_malformed() {
        let raw = json!({
            "sites": {
                "adm": {
                    "daily_forecast": [
                        {"date": "2024-01-01", "value": 10},
                        {"date": "2024-01-01", "value": 12}
                    ],
                    "total": 22,
                    "average": 11
                }
            }
        });
        let err = normalize(&raw, &SelectionKey::new("adm", "all")).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedPayload(_)));
        assert!(err.to_string().contains("duplicate date"));
    }

    #[test]
    fn test_series_block_non_numeric_value_malformed() {
        let raw = json!({
            "sites": {
                "adm": {
                    "daily_forecast": [{"date": "2024-01-01", "value": "ten"}],
                    "total": 0,
                    "average": 0
                }
            }
        });
        let err = normalize(&raw, &SelectionKey::new("adm", "all")).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedPayload(_)));
    }

    #[test]
    fn test_series_block_entry_sorting() {
        let raw = json!({
            "sites": {
                "adm": {
                    "daily_forecast": [
                        {"date": "2024-01-03", "value": 3},
                        {"date": "2024-01-01", "value": 1},
                        {"date": "2024-01-02", "value": 2}
                    ],
                    "total": 6,
                    "average": 2
                }
            }
        });
        let result = normalize(&raw, &SelectionKey::new("adm", "all")).unwrap();
        let values: Vec<f64> = result.predictions.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_aggregation_mixed_bands_keeps_value_inside_band() {
        // A1 carries a band, A2 does not: A2 must widen the band edges by
        // its value, not leave them at A1's scale
        let raw = json!({
            "sites": {
                "adm": {
                    "sectors": {
                        "A1": {"daily_forecast": [{"date": "2024-01-01", "value": 10, "error": 1}], "total": 10, "average": 10},
                        "A2": {"daily_forecast": [{"date": "2024-01-01", "value": 15}], "total": 15, "average": 15}
                    }
                }
            }
        });
        let result = normalize(&raw, &SelectionKey::new("adm", "all")).unwrap();
        let day = &result.predictions[0];
        assert_eq!(day.value, 25.0);
        assert_eq!(day.error, Some(1.0));
        assert_eq!(day.lower, Some(24.0));
        assert_eq!(day.upper, Some(26.0));
        assert!(day.lower.unwrap() <= day.value && day.value <= day.upper.unwrap());
    }

    #[test]
    fn test_aggregation_band_arriving_after_unbanded_constituent() {
        // The unbanded sector sorts first; the band introduced by the
        // second sector must still account for the first sector's value
        let raw = json!({
            "sites": {
                "adm": {
                    "sectors": {
                        "A1": {"daily_forecast": [{"date": "2024-01-01", "value": 10}], "total": 10, "average": 10},
                        "A2": {"daily_forecast": [{"date": "2024-01-01", "value": 15, "error": 2}], "total": 15, "average": 15}
                    }
                }
            }
        });
        let result = normalize(&raw, &SelectionKey::new("adm", "all")).unwrap();
        let day = &result.predictions[0];
        assert_eq!(day.value, 25.0);
        assert_eq!(day.error, Some(2.0));
        assert_eq!(day.lower, Some(23.0));
        assert_eq!(day.upper, Some(27.0));
    }

    #[test]
    fn test_aggregation_sums_bands_per_date() {
        let raw = json!({
            "sites": {
                "adm": {
                    "sectors": {
                        "A1": {"daily_forecast": [{"date": "2024-01-01", "value": 10, "error": 1}], "total": 10, "average": 10},
                        "A2": {"daily_forecast": [{"date": "2024-01-01", "value": 15, "error": 2}], "total": 15, "average": 15}
                    }
                }
            }
        });
        let result = normalize(&raw, &SelectionKey::new("adm", "all")).unwrap();
        let day = &result.predictions[0];
        assert_eq!(day.value, 25.0);
        assert_eq!(day.error, Some(3.0));
        assert_eq!(day.lower, Some(22.0));
        assert_eq!(day.upper, Some(28.0));
    }
}
