//! Global Application State
//!
//! Reactive state management using Leptos signals.

use chrono::NaiveDate;
use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Month currently shown on the chart
    pub selected_month: RwSignal<Month>,
    /// Daily records for the selected month, in calendar order
    pub records: RwSignal<Vec<DailyRecord>>,
    /// Whether a fetch is in flight
    pub loading: RwSignal<bool>,
    /// Generation id of the newest fetch; stale responses are discarded
    fetch_generation: RwSignal<u64>,
}

/// One of the twelve selectable months of 2020.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All selectable months, in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// `YYYY-MM` form used as the dropdown value and the date-key prefix.
    pub fn value(self) -> &'static str {
        match self {
            Month::Jan => "2020-01",
            Month::Feb => "2020-02",
            Month::Mar => "2020-03",
            Month::Apr => "2020-04",
            Month::May => "2020-05",
            Month::Jun => "2020-06",
            Month::Jul => "2020-07",
            Month::Aug => "2020-08",
            Month::Sep => "2020-09",
            Month::Oct => "2020-10",
            Month::Nov => "2020-11",
            Month::Dec => "2020-12",
        }
    }

    /// Short display label for the dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Calendar month number, 1 through 12.
    pub fn number(self) -> u32 {
        match self {
            Month::Jan => 1,
            Month::Feb => 2,
            Month::Mar => 3,
            Month::Apr => 4,
            Month::May => 5,
            Month::Jun => 6,
            Month::Jul => 7,
            Month::Aug => 8,
            Month::Sep => 9,
            Month::Oct => 10,
            Month::Nov => 11,
            Month::Dec => 12,
        }
    }

    /// Year of the enumerated set.
    pub fn year(self) -> i32 {
        2020
    }

    /// Number of days in this month, derived from the calendar (2020 is a
    /// leap year, so February has 29).
    pub fn day_count(self) -> u32 {
        let first = NaiveDate::from_ymd_opt(self.year(), self.number(), 1).unwrap();
        let next = if self.number() == 12 {
            NaiveDate::from_ymd_opt(self.year() + 1, 1, 1).unwrap()
        } else {
            NaiveDate::from_ymd_opt(self.year(), self.number() + 1, 1).unwrap()
        };
        next.signed_duration_since(first).num_days() as u32
    }

    /// Look up a month from its `YYYY-MM` dropdown value.
    pub fn from_value(value: &str) -> Option<Month> {
        Month::ALL.into_iter().find(|month| month.value() == value)
    }
}

impl Default for Month {
    fn default() -> Self {
        Month::Mar
    }
}

/// The four case counters reported for a single day.
///
/// Doubles as the wire shape of the remote `delta` / `delta7` objects; any
/// counter missing from the document defaults to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct DayCounters {
    #[serde(default)]
    pub confirmed: i64,
    #[serde(default)]
    pub deceased: i64,
    #[serde(default)]
    pub recovered: i64,
    #[serde(default)]
    pub tested: i64,
}

/// One charted day: the `DD-MM` axis label plus both counter sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DailyRecord {
    pub label: String,
    pub delta: DayCounters,
    pub delta7: DayCounters,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        selected_month: create_rw_signal(Month::default()),
        records: create_rw_signal(Vec::new()),
        loading: create_rw_signal(false),
        fetch_generation: create_rw_signal(0),
    };

    provide_context(state);
}

impl GlobalState {
    /// Allocate the generation id for a fetch that is about to start.
    pub fn begin_fetch(&self) -> u64 {
        let next = self.fetch_generation.get_untracked() + 1;
        self.fetch_generation.set(next);
        next
    }

    /// Whether `generation` still belongs to the newest fetch.
    pub fn is_current(&self, generation: u64) -> bool {
        self.fetch_generation.get_untracked() == generation
    }

    /// Apply fetched records unless a newer fetch has started since.
    /// Returns whether the records were applied.
    pub fn apply_records(&self, generation: u64, records: Vec<DailyRecord>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.records.set(records);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_values_and_labels() {
        assert_eq!(Month::Jan.value(), "2020-01");
        assert_eq!(Month::Dec.value(), "2020-12");
        assert_eq!(Month::Mar.label(), "Mar");
        assert_eq!(Month::Sep.number(), 9);
    }

    #[test]
    fn test_all_twelve_months_in_order() {
        assert_eq!(Month::ALL.len(), 12);
        for (index, month) in Month::ALL.into_iter().enumerate() {
            assert_eq!(month.number() as usize, index + 1);
        }
    }

    #[test]
    fn test_day_counts_follow_2020_calendar() {
        assert_eq!(Month::Jan.day_count(), 31);
        assert_eq!(Month::Feb.day_count(), 29);
        assert_eq!(Month::Apr.day_count(), 30);
        assert_eq!(Month::Dec.day_count(), 31);
    }

    #[test]
    fn test_month_from_value() {
        assert_eq!(Month::from_value("2020-07"), Some(Month::Jul));
        assert_eq!(Month::from_value("2021-07"), None);
        assert_eq!(Month::from_value("July"), None);
    }

    #[test]
    fn test_default_month_is_march() {
        assert_eq!(Month::default(), Month::Mar);
    }

    #[test]
    fn test_stale_fetch_generation_is_discarded() {
        let runtime = create_runtime();

        let state = GlobalState {
            selected_month: create_rw_signal(Month::default()),
            records: create_rw_signal(Vec::new()),
            loading: create_rw_signal(false),
            fetch_generation: create_rw_signal(0),
        };

        let first = state.begin_fetch();
        let second = state.begin_fetch();
        assert!(!state.is_current(first));
        assert!(state.is_current(second));

        let stale = vec![DailyRecord {
            label: "01-03".to_string(),
            ..Default::default()
        }];
        assert!(!state.apply_records(first, stale));
        assert!(state.records.get_untracked().is_empty());

        assert!(state.apply_records(second, vec![DailyRecord::default()]));
        assert_eq!(state.records.get_untracked().len(), 1);

        runtime.dispose();
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let counters: DayCounters = serde_json::from_str("{}").unwrap();
        assert_eq!(counters, DayCounters::default());

        let counters: DayCounters = serde_json::from_str(r#"{"confirmed": 4}"#).unwrap();
        assert_eq!(counters.confirmed, 4);
        assert_eq!(counters.tested, 0);
    }
}
