//! Default chart options shared by every dashboard chart.
//!
//! The serializable part mirrors the charting library's option object; the
//! label callbacks are exposed as plain functions over the currency formatter.

use crate::format::format_currency;
use serde::{Deserialize, Serialize};

/// Chart option defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDefaults {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: ChartPlugins,
    pub scales: ChartScales,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPlugins {
    pub legend: LegendOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub position: LegendPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub y: AxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub begin_at_zero: bool,
}

impl Default for ChartDefaults {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: ChartPlugins {
                legend: LegendOptions {
                    position: LegendPosition::Top,
                },
            },
            scales: ChartScales {
                y: AxisOptions {
                    begin_at_zero: true,
                },
            },
        }
    }
}

impl ChartDefaults {
    /// Tooltip text for a data point: `"<dataset>: <amount>"`.
    ///
    /// The label prefix is dropped when the dataset has no label, and the
    /// amount is dropped when the point has no y value.
    pub fn tooltip_label(dataset_label: &str, y: Option<f64>) -> String {
        let mut label = String::from(dataset_label);
        if !label.is_empty() {
            label.push_str(": ");
        }
        if let Some(value) = y {
            label.push_str(&format_currency(Some(value)));
        }
        label
    }

    /// Y-axis tick text.
    pub fn tick_label(value: f64) -> String {
        format_currency(Some(value))
    }
}
