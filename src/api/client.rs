//! HTTP Client
//!
//! Fetches the covid19india v4 timeseries document and reshapes it into
//! per-day chart records.

use gloo_net::http::Request;
use std::collections::HashMap;

use crate::state::global::{DailyRecord, DayCounters, Month};

/// Public endpoint serving the full time-series document for all regions.
pub const TIMESERIES_URL: &str = "https://data.covid19india.org/v4/min/timeseries.min.json";

/// Region whose series the dashboard displays (Andaman and Nicobar Islands).
pub const REGION: &str = "AN";

// ============ Wire Types ============

/// The remote document: a map from region code to that region's series.
pub type TimeseriesDocument = HashMap<String, RegionEntry>;

/// One region's series, keyed by ISO date (`YYYY-MM-DD`).
///
/// Unknown siblings of `dates` (e.g. `meta`) are ignored.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RegionEntry {
    #[serde(default)]
    pub dates: HashMap<String, DayEntry>,
}

/// Counters reported for a single date.
///
/// Either counter set may be absent; unknown siblings (e.g. `total`) are
/// ignored.
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub struct DayEntry {
    #[serde(default)]
    pub delta: DayCounters,
    #[serde(default)]
    pub delta7: DayCounters,
}

// ============ API Functions ============

/// Fetch and parse the full time-series document.
pub async fn fetch_timeseries() -> Result<TimeseriesDocument, String> {
    let response = Request::get(TIMESERIES_URL)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Request failed: HTTP {}", response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    serde_json::from_str(&body).map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the document and extract the records for one region and month.
pub async fn fetch_month_records(region: &str, month: Month) -> Result<Vec<DailyRecord>, String> {
    let document = fetch_timeseries().await?;
    Ok(extract_month(&document, region, month))
}

/// Reshape the document into one record per day of `month` for `region`.
///
/// Produces exactly `month.day_count()` records in calendar order, labeled
/// `DD-MM`. Any level missing from the document (region, date, counter set,
/// individual counter) contributes zeros rather than an error.
pub fn extract_month(
    document: &TimeseriesDocument,
    region: &str,
    month: Month,
) -> Vec<DailyRecord> {
    let dates = document.get(region).map(|entry| &entry.dates);

    (1..=month.day_count())
        .map(|day| {
            let date_key = format!("{}-{:02}", month.value(), day);
            let entry = dates.and_then(|dates| dates.get(&date_key));

            DailyRecord {
                label: format!("{:02}-{:02}", day, month.number()),
                delta: entry.map(|e| e.delta).unwrap_or_default(),
                delta7: entry.map(|e| e.delta7).unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> TimeseriesDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_month_of_zero_padded_labels() {
        let records = extract_month(&TimeseriesDocument::new(), REGION, Month::Mar);

        assert_eq!(records.len(), 31);
        assert_eq!(records[0].label, "01-03");
        assert_eq!(records[8].label, "09-03");
        assert_eq!(records[30].label, "31-03");
    }

    #[test]
    fn test_leap_february_has_29_records() {
        let records = extract_month(&TimeseriesDocument::new(), REGION, Month::Feb);

        assert_eq!(records.len(), 29);
        assert_eq!(records[28].label, "29-02");
    }

    #[test]
    fn test_every_month_yields_one_record_per_day() {
        for month in Month::ALL {
            let records = extract_month(&TimeseriesDocument::new(), REGION, month);

            assert_eq!(records.len(), month.day_count() as usize);
            assert_eq!(
                records.last().unwrap().label,
                format!("{:02}-{:02}", month.day_count(), month.number())
            );
        }
    }

    #[test]
    fn test_missing_data_defaults_to_zero() {
        let records = extract_month(&TimeseriesDocument::new(), REGION, Month::Jun);

        assert!(records
            .iter()
            .all(|r| r.delta == DayCounters::default() && r.delta7 == DayCounters::default()));
    }

    #[test]
    fn test_single_reported_day() {
        let doc = document(json!({
            "AN": { "dates": { "2020-03-05": { "delta": { "confirmed": 12 } } } }
        }));

        let records = extract_month(&doc, "AN", Month::Mar);

        assert_eq!(records.len(), 31);
        assert_eq!(records[4].label, "05-03");
        assert_eq!(records[4].delta.confirmed, 12);
        assert_eq!(records[4].delta.deceased, 0);
        assert_eq!(records[4].delta7, DayCounters::default());

        let others = records.iter().enumerate().filter(|(i, _)| *i != 4);
        for (_, record) in others {
            assert_eq!(record.delta, DayCounters::default());
            assert_eq!(record.delta7, DayCounters::default());
        }
    }

    #[test]
    fn test_other_regions_are_ignored() {
        let doc = document(json!({
            "DL": { "dates": { "2020-03-05": { "delta": { "confirmed": 99 } } } }
        }));

        let records = extract_month(&doc, "AN", Month::Mar);

        assert!(records.iter().all(|r| r.delta.confirmed == 0));
    }

    #[test]
    fn test_counter_sets_default_independently() {
        let doc = document(json!({
            "AN": {
                "dates": {
                    "2020-04-01": { "delta7": { "confirmed": 70, "tested": 700 } },
                    "2020-04-02": { "delta": { "recovered": 3 } }
                }
            }
        }));

        let records = extract_month(&doc, "AN", Month::Apr);

        assert_eq!(records[0].delta, DayCounters::default());
        assert_eq!(records[0].delta7.confirmed, 70);
        assert_eq!(records[0].delta7.tested, 700);
        assert_eq!(records[1].delta.recovered, 3);
        assert_eq!(records[1].delta7, DayCounters::default());
    }

    #[test]
    fn test_document_parses_around_unknown_fields() {
        let raw = r#"{
            "AN": {
                "dates": {
                    "2020-03-10": {
                        "delta": { "confirmed": 1, "other": 5 },
                        "delta7": { "confirmed": 7 },
                        "total": { "confirmed": 33 }
                    }
                },
                "meta": { "population": 397000 }
            }
        }"#;

        let doc: TimeseriesDocument = serde_json::from_str(raw).unwrap();
        let records = extract_month(&doc, "AN", Month::Mar);

        assert_eq!(records[9].delta.confirmed, 1);
        assert_eq!(records[9].delta7.confirmed, 7);
    }
}
