//! Remote Data Access
//!
//! Client for the public covid19india time-series endpoint.

pub mod client;

pub use client::{
    extract_month, fetch_month_records, fetch_timeseries, DayEntry, RegionEntry,
    TimeseriesDocument, REGION, TIMESERIES_URL,
};
