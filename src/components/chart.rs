//! Chart Component
//!
//! Daily and 7-day rolling confirmed-case lines rendered as inline SVG.

use leptos::*;

use crate::state::global::{DailyRecord, DayCounters, GlobalState};

/// Chart surface size and margins
const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 400.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_LEFT: f64 = 60.0;

/// Relative padding between bands
const BAND_PADDING: f64 = 0.1;
const MARKER_RADIUS: f64 = 4.0;
const STROKE_WIDTH: f64 = 3.0;

/// Number of even y-axis intervals
const Y_TICKS: usize = 5;

/// Series and chrome colors
const DELTA_COLOR: &str = "#58b865";
const DELTA7_COLOR: &str = "blue";
const AXIS_COLOR: &str = "#9ca3af";
const GRID_COLOR: &str = "#374151";
const LABEL_COLOR: &str = "#9ca3af";
const TOOLTIP_COLOR: &str = "#f9fafb";

/// The two plotted series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Series {
    /// Day-over-day counters
    Delta,
    /// 7-day rolling counters
    Delta7,
}

impl Series {
    /// Both series, in draw order.
    pub const ALL: [Series; 2] = [Series::Delta, Series::Delta7];

    /// Stroke and marker color.
    pub fn color(self) -> &'static str {
        match self {
            Series::Delta => DELTA_COLOR,
            Series::Delta7 => DELTA7_COLOR,
        }
    }

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            Series::Delta => "Delta",
            Series::Delta7 => "Delta7",
        }
    }

    /// The counter set this series reads from a record.
    pub fn counters(self, record: &DailyRecord) -> DayCounters {
        match self {
            Series::Delta => record.delta,
            Series::Delta7 => record.delta7,
        }
    }

    /// Confirmed count, the value plotted on the y axis.
    fn confirmed(self, record: &DailyRecord) -> i64 {
        self.counters(record).confirmed
    }
}

/// Time-series chart component
#[component]
pub fn CovidChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="overflow-x-auto">
            // Rebuilt wholesale whenever the records change
            {move || render_chart(state.records.get())}
        </div>
    }
}

/// Chart legend showing series colors
#[component]
pub fn ChartLegend() -> impl IntoView {
    view! {
        <div class="flex justify-center flex-wrap gap-4 mt-4">
            {Series::ALL
                .into_iter()
                .map(|series| {
                    view! {
                        <div class="flex items-center space-x-2">
                            <div
                                class="w-3 h-3 rounded-full"
                                style=format!("background-color: {}", series.color())
                            />
                            <span class="text-sm text-gray-300">{series.label()}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Build the complete SVG for one record sequence.
///
/// Runs once per data change; the previous SVG subtree is discarded
/// wholesale, so every redraw starts blank with both tooltips hidden.
fn render_chart(records: Vec<DailyRecord>) -> View {
    if records.is_empty() {
        return view! {
            <svg width=WIDTH height=HEIGHT class="max-w-full h-auto">
                <text
                    x={WIDTH / 2.0}
                    y={HEIGHT / 2.0}
                    text-anchor="middle"
                    font-size="16"
                    fill="#6b7280"
                >
                    "No data loaded"
                </text>
            </svg>
        }
        .into_view();
    }

    let band = BandScale::new(records.len(), MARGIN_LEFT, WIDTH - MARGIN_RIGHT, BAND_PADDING);
    let axis_max = confirmed_axis_max(&records) as f64;
    let linear = LinearScale::new(axis_max, HEIGHT - MARGIN_BOTTOM, MARGIN_TOP);

    let delta_path = line_path(&records, band, linear, |r| r.delta.confirmed);
    let delta7_path = line_path(&records, band, linear, |r| r.delta7.confirmed);

    // Fresh per-rebuild hover state, one per series
    let delta_hover = create_rw_signal(None::<usize>);
    let delta7_hover = create_rw_signal(None::<usize>);

    view! {
        <svg width=WIDTH height=HEIGHT class="max-w-full h-auto overflow-visible">
            {y_axis(axis_max, linear)}
            {x_axis(&records, band)}

            // Axis captions
            <text
                text-anchor="middle"
                transform=format!("translate({},{}) rotate(-90)", MARGIN_LEFT / 2.0, HEIGHT / 2.0)
                font-size="12"
                fill=LABEL_COLOR
            >
                "No. of Confirmed Patients"
            </text>
            <text
                text-anchor="middle"
                transform=format!("translate({},{})", WIDTH / 2.0, HEIGHT - MARGIN_BOTTOM + 40.0)
                font-size="12"
                fill=LABEL_COLOR
            >
                "Date"
            </text>

            // One line per series
            <path fill="none" stroke=Series::Delta.color() stroke-width=STROKE_WIDTH d=delta_path />
            <path fill="none" stroke=Series::Delta7.color() stroke-width=STROKE_WIDTH d=delta7_path />

            {series_markers(&records, Series::Delta, delta_hover, band, linear)}
            {series_markers(&records, Series::Delta7, delta7_hover, band, linear)}

            {series_tooltip(records.clone(), Series::Delta, delta_hover, band, linear)}
            {series_tooltip(records, Series::Delta7, delta7_hover, band, linear)}
        </svg>
    }
    .into_view()
}

/// Band axis: base line plus one rotated day label per record.
fn x_axis(records: &[DailyRecord], band: BandScale) -> impl IntoView {
    let baseline = HEIGHT - MARGIN_BOTTOM;

    view! {
        <g>
            <line
                x1=MARGIN_LEFT
                y1=baseline
                x2={WIDTH - MARGIN_RIGHT}
                y2=baseline
                stroke=AXIS_COLOR
            />
            {records
                .iter()
                .enumerate()
                .map(|(index, record)| {
                    view! {
                        <text
                            transform=format!(
                                "translate({},{}) rotate(-45)",
                                band.center(index),
                                baseline + 9.0,
                            )
                            text-anchor="end"
                            font-size="11"
                            fill=LABEL_COLOR
                        >
                            {record.label.clone()}
                        </text>
                    }
                })
                .collect_view()}
        </g>
    }
}

/// Linear axis: base line, gridlines, and numeric labels at even intervals.
fn y_axis(axis_max: f64, linear: LinearScale) -> impl IntoView {
    view! {
        <g>
            <line
                x1=MARGIN_LEFT
                y1=MARGIN_TOP
                x2=MARGIN_LEFT
                y2={HEIGHT - MARGIN_BOTTOM}
                stroke=AXIS_COLOR
            />
            {(0..=Y_TICKS)
                .map(|step| {
                    let value = axis_max * step as f64 / Y_TICKS as f64;
                    let y = linear.y(value);
                    view! {
                        <g>
                            <line
                                x1=MARGIN_LEFT
                                y1=y
                                x2={WIDTH - MARGIN_RIGHT}
                                y2=y
                                stroke=GRID_COLOR
                            />
                            <text
                                x={MARGIN_LEFT - 8.0}
                                y={y + 4.0}
                                text-anchor="end"
                                font-size="11"
                                fill=LABEL_COLOR
                            >
                                {format!("{:.0}", value)}
                            </text>
                        </g>
                    }
                })
                .collect_view()}
        </g>
    }
}

/// Markers for one series, with hover and touch handling per circle.
fn series_markers(
    records: &[DailyRecord],
    series: Series,
    hover: RwSignal<Option<usize>>,
    band: BandScale,
    linear: LinearScale,
) -> impl IntoView {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let cy = linear.y(series.confirmed(record) as f64);
            view! {
                <circle
                    cx=band.position(index)
                    cy=cy
                    r=MARKER_RADIUS
                    fill=series.color()
                    on:mouseover=move |_| hover.set(Some(index))
                    on:mouseout=move |_| hover.set(None)
                    on:touchstart=move |ev: web_sys::TouchEvent| ev.prevent_default()
                />
            }
        })
        .collect_view()
}

/// Hover label for one series: day label plus all four counters.
fn series_tooltip(
    records: Vec<DailyRecord>,
    series: Series,
    hover: RwSignal<Option<usize>>,
    band: BandScale,
    linear: LinearScale,
) -> impl IntoView {
    view! {
        <g pointer-events="none">
            {move || {
                hover
                    .get()
                    .and_then(|index| records.get(index).map(|record| (index, record.clone())))
                    .map(|(index, record)| {
                        let counters = series.counters(&record);
                        let y = linear.y(counters.confirmed as f64);
                        view! {
                            <g transform=format!("translate({},{})", band.position(index), y)>
                                <text
                                    text-anchor="middle"
                                    dy="-10"
                                    font-size="14"
                                    font-weight="bold"
                                    fill=TOOLTIP_COLOR
                                >
                                    {format!(
                                        "Date: {}  Confirmed: {}  Deceased: {}  Recovered: {}  Tested: {}",
                                        record.label,
                                        counters.confirmed,
                                        counters.deceased,
                                        counters.recovered,
                                        counters.tested,
                                    )}
                                </text>
                            </g>
                        }
                    })
            }}
        </g>
    }
}

/// Upper bound of the y domain: the larger confirmed count across both
/// series, floored at zero (the source data contains occasional negative
/// corrections).
fn confirmed_axis_max(records: &[DailyRecord]) -> i64 {
    records
        .iter()
        .map(|r| r.delta.confirmed.max(r.delta7.confirmed))
        .max()
        .unwrap_or(0)
        .max(0)
}

/// SVG path through one point per record.
fn line_path(
    records: &[DailyRecord],
    band: BandScale,
    linear: LinearScale,
    value: impl Fn(&DailyRecord) -> i64,
) -> String {
    let mut path = String::new();
    for (index, record) in records.iter().enumerate() {
        path.push(if index == 0 { 'M' } else { 'L' });
        path.push_str(&format!(
            "{},{}",
            band.position(index),
            linear.y(value(record) as f64)
        ));
    }
    path
}

/// Band scale: one band per record across the horizontal extent, with
/// relative padding between bands and half of it at each outer edge.
#[derive(Clone, Copy, Debug, PartialEq)]
struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    fn new(count: usize, range_start: f64, range_end: f64, padding: f64) -> Self {
        let n = count as f64;
        let step = (range_end - range_start) / f64::max(1.0, n + padding);
        let start = range_start + (range_end - range_start - step * (n - padding)) * 0.5;

        Self {
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Left edge of the band at `index`.
    fn position(&self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }

    /// Center of the band at `index`, where tick labels sit.
    fn center(&self, index: usize) -> f64 {
        self.position(index) + self.bandwidth / 2.0
    }
}

/// Linear scale mapping the domain `[0, max]` onto the vertical extent.
#[derive(Clone, Copy, Debug, PartialEq)]
struct LinearScale {
    max: f64,
    bottom: f64,
    top: f64,
}

impl LinearScale {
    fn new(max: f64, bottom: f64, top: f64) -> Self {
        Self { max, bottom, top }
    }

    /// Pixel y for `value`; a zero domain pins everything to the baseline.
    fn y(&self, value: f64) -> f64 {
        if self.max <= 0.0 {
            return self.bottom;
        }
        self.bottom - (value / self.max) * (self.bottom - self.top)
    }
}
