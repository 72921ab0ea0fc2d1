//! Horizontal bar chart view model.
//!
//! Bars are plain CSS widths relative to the largest value, so the chart
//! renders without any client-side script.

use serde::Serialize;

/// One bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    /// X-axis category.
    pub label: String,
    /// Y-axis value.
    pub value: i64,
    /// CSS width, e.g. `"62.5%"`.
    pub width: String,
}

/// A bar chart of labelled totals.
#[derive(Debug, Clone, Serialize)]
pub struct BarChart {
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Build a chart, keeping the input order.
    #[must_use]
    pub fn new(
        x_label: &str,
        y_label: &str,
        points: impl IntoIterator<Item = (String, i64)>,
    ) -> Self {
        let points: Vec<(String, i64)> = points.into_iter().collect();
        let max = points.iter().map(|(_, v)| *v).max().unwrap_or(0);

        let bars = points
            .into_iter()
            .map(|(label, value)| Bar {
                width: bar_width(value, max),
                label,
                value,
            })
            .collect();

        Self {
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            bars,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Width of a bar as a percentage of the largest value.
#[allow(clippy::cast_precision_loss)]
fn bar_width(value: i64, max: i64) -> String {
    if max <= 0 || value <= 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", (value as f64 / max as f64) * 100.0)
}
