//! Serializable line-chart configuration in the shape Chart.js (with the
//! time adapter and annotation plugin) consumes.
//!
//! Label formatters cannot travel as JSON, so scales and tooltips name a
//! [`Formatter`] instead; the Rust implementation of each lives in
//! [`crate::format`].

use chrono::{DateTime, Utc};
use halvings_shared_models::{HalvingEvent, PricePoint};
use serde::Serialize;

use crate::format::{format_tick, format_tooltip_price};

/// Marker colours for halving lines, cycled by event index.
pub const PALETTE: [&str; 4] = ["#ff6384", "#36a2eb", "#4bc0c0", "#ff9f40"];

pub const CHART_TITLE: &str = "Bitcoin Price History with Halving Events";
pub const CHART_SUBTITLE: &str = "Historical price performance with Bitcoin halving events marked";
pub const DATASET_LABEL: &str = "Bitcoin Price (USD)";

const GRID_COLOR: &str = "rgba(0, 0, 0, 0.05)";
const LABEL_BACKGROUND: &str = "rgba(255, 255, 255, 0.9)";
const MUTED_TEXT: &str = "#666";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
    /// `$0.05`, `$950`, `$20.0K`, `$1.2M`
    UsdAbbreviated,
    /// `Price: $29,000.00`
    UsdCents,
}

impl Formatter {
    pub fn apply(self, value: f64) -> String {
        match self {
            Formatter::UsdAbbreviated => format_tick(value),
            Formatter::UsdCents => format_tooltip_price(value),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<DateTime<Utc>>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub border_width: u32,
    pub fill: bool,
    pub tension: f64,
    pub point_radius: u32,
    pub point_hit_radius: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub interaction: Interaction,
    pub scales: Scales,
    pub plugins: Plugins,
}

/// Hover picks the nearest point along x; the cursor need not touch the line.
#[derive(Debug, Clone, Serialize)]
pub struct Interaction {
    pub intersect: bool,
    pub mode: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scales {
    pub x: TimeScale,
    pub y: LogScale,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeScale {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub time: TimeOptions,
    pub grid: Grid,
    pub title: AxisTitle,
    pub ticks: TimeTicks,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOptions {
    pub unit: &'static str,
    pub display_formats: DisplayFormats,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayFormats {
    pub year: &'static str,
    pub month: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTicks {
    pub max_rotation: u32,
    pub auto_skip: bool,
    pub auto_skip_padding: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogScale {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub grid: Grid,
    pub title: AxisTitle,
    pub ticks: ValueTicks,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValueTicks {
    pub callback: Formatter,
}

#[derive(Debug, Clone, Serialize)]
pub struct Grid {
    pub display: bool,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: &'static str,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<&'static str>,
}

impl Font {
    fn bold(size: u32) -> Self {
        Self {
            size,
            weight: Some("bold"),
        }
    }

    fn regular(size: u32) -> Self {
        Self { size, weight: None }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Padding {
    All(u32),
    Bottom { bottom: u32 },
}

#[derive(Debug, Clone, Serialize)]
pub struct Plugins {
    pub title: Heading,
    pub subtitle: Heading,
    pub legend: Legend,
    pub annotation: Annotations,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, Serialize)]
pub struct Heading {
    pub display: bool,
    pub text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    pub padding: Padding,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: &'static str,
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendLabels {
    pub padding: u32,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct Annotations {
    pub annotations: Vec<LineAnnotation>,
}

/// Vertical marker at a halving date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAnnotation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x_min: DateTime<Utc>,
    pub x_max: DateTime<Utc>,
    pub border_color: &'static str,
    pub border_width: u32,
    pub label: AnnotationLabel,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationLabel {
    pub content: Vec<String>,
    pub display: bool,
    pub position: &'static str,
    pub background_color: &'static str,
    pub color: &'static str,
    pub padding: u32,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub background_color: &'static str,
    pub title_color: &'static str,
    pub body_color: &'static str,
    pub border_color: &'static str,
    pub border_width: u32,
    pub padding: u32,
    pub callbacks: TooltipCallbacks,
}

#[derive(Debug, Clone, Serialize)]
pub struct TooltipCallbacks {
    pub label: Formatter,
}

/// Palette colour for the halving at `index`. Wraps after four events.
pub fn halving_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn halving_annotations(halvings: &[HalvingEvent]) -> Vec<LineAnnotation> {
    halvings
        .iter()
        .enumerate()
        .map(|(index, halving)| LineAnnotation {
            kind: "line",
            x_min: halving.date,
            x_max: halving.date,
            border_color: halving_color(index),
            border_width: 2,
            label: AnnotationLabel {
                content: vec![halving.label.to_string(), format!("ROI: {}", halving.roi)],
                display: true,
                position: "top",
                background_color: LABEL_BACKGROUND,
                color: MUTED_TEXT,
                padding: 8,
                font: Font::regular(11),
            },
        })
        .collect()
}

/// Builds the full chart for a price series.
///
/// Points without a price are skipped, so labels and data always line up.
pub fn build_chart_config(series: &[PricePoint], halvings: &[HalvingEvent]) -> ChartConfig {
    let (labels, data): (Vec<_>, Vec<_>) = series
        .iter()
        .filter_map(|point| point.price.map(|price| (point.date, price)))
        .unzip();

    ChartConfig {
        kind: "line",
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: DATASET_LABEL,
                data,
                border_color: "rgb(31, 119, 180)",
                background_color: "rgba(31, 119, 180, 0.1)",
                border_width: 2,
                fill: true,
                tension: 0.1,
                point_radius: 0,
                point_hit_radius: 5,
            }],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            interaction: Interaction {
                intersect: false,
                mode: "index",
            },
            scales: Scales {
                x: TimeScale {
                    kind: "time",
                    time: TimeOptions {
                        unit: "year",
                        display_formats: DisplayFormats {
                            year: "yyyy",
                            month: "MMM yyyy",
                        },
                    },
                    grid: Grid {
                        display: true,
                        color: GRID_COLOR,
                    },
                    title: AxisTitle {
                        display: true,
                        text: "Date",
                        font: Font::bold(14),
                    },
                    ticks: TimeTicks {
                        max_rotation: 0,
                        auto_skip: true,
                        auto_skip_padding: 20,
                    },
                },
                y: LogScale {
                    kind: "logarithmic",
                    grid: Grid {
                        display: true,
                        color: GRID_COLOR,
                    },
                    title: AxisTitle {
                        display: true,
                        text: "Price (USD)",
                        font: Font::bold(14),
                    },
                    ticks: ValueTicks {
                        callback: Formatter::UsdAbbreviated,
                    },
                },
            },
            plugins: Plugins {
                title: Heading {
                    display: true,
                    text: CHART_TITLE,
                    font: Some(Font::bold(20)),
                    padding: Padding::All(20),
                },
                subtitle: Heading {
                    display: true,
                    text: CHART_SUBTITLE,
                    font: None,
                    padding: Padding::Bottom { bottom: 30 },
                },
                legend: Legend {
                    display: true,
                    position: "bottom",
                    labels: LegendLabels {
                        padding: 20,
                        font: Font::regular(12),
                    },
                },
                annotation: Annotations {
                    annotations: halving_annotations(halvings),
                },
                tooltip: Tooltip {
                    background_color: LABEL_BACKGROUND,
                    title_color: MUTED_TEXT,
                    body_color: MUTED_TEXT,
                    border_color: "rgba(0, 0, 0, 0.1)",
                    border_width: 1,
                    padding: 10,
                    callbacks: TooltipCallbacks {
                        label: Formatter::UsdCents,
                    },
                },
            },
        },
    }
}
