//! Chart generation for a month of daily totals.
//!
//! Two outputs are supported:
//! - **Line geometry**: pixel-space vertices and axis ticks for drawing the
//!   income and expense lines on a canvas of a given size.
//! - **ECharts options**: the same series as an ECharts line chart for
//!   front ends that render with ECharts.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisPointer, AxisPointerType, AxisType, Tooltip, Trigger},
    series::Line,
};
use serde::Serialize;

use crate::{aggregation::DailySeries, navigation::MonthRange};

/// The number of labelled ticks on the y-axis, including zero and the maximum.
pub const Y_TICK_COUNT: usize = 6;

/// A vertex in canvas coordinates, where y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal position from the left edge.
    pub x: f64,
    /// Vertical position from the top edge.
    pub y: f64,
}

/// A labelled position along an axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    /// The position along the axis in canvas units.
    pub position: f64,
    /// The text to draw at `position`.
    pub label: String,
}

/// Everything needed to draw the daily totals chart on a canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGeometry {
    /// The income line, starting at the bottom-left corner.
    pub income_path: Vec<Point>,
    /// The expense line, starting at the bottom-left corner.
    pub expense_path: Vec<Point>,
    /// Evenly spaced value ticks from zero to the scale maximum.
    pub y_ticks: Vec<AxisTick>,
    /// One tick per day of the month.
    pub x_ticks: Vec<AxisTick>,
    /// The value drawn at the top of the canvas.
    ///
    /// This is the largest value in either series, or 1 when every value is
    /// zero so that the scale stays finite.
    pub scale_max: i64,
}

/// Map both series of `series` onto a `width` by `height` canvas.
pub fn chart_geometry(series: &DailySeries, width: f64, height: f64) -> ChartGeometry {
    let scale_max = scale_max(series);
    let month_length = series.month_length();

    ChartGeometry {
        income_path: to_line_path(&series.income_per_day, scale_max, width, height),
        expense_path: to_line_path(&series.expense_per_day, scale_max, width, height),
        y_ticks: y_ticks(scale_max, height),
        x_ticks: x_ticks(month_length, width),
        scale_max,
    }
}

/// Map one per-day series onto canvas vertices.
///
/// The path starts at `(0, height)`, followed by vertex `i` at
/// `(i * width / n, height - values[i] * height / scale_max)` where `n` is the
/// number of values. A `scale_max` of zero or less is treated as 1.
pub fn to_line_path(values: &[i64], scale_max: i64, width: f64, height: f64) -> Vec<Point> {
    let mut path = Vec::with_capacity(values.len() + 1);
    path.push(Point { x: 0.0, y: height });

    if values.is_empty() {
        return path;
    }

    let step_x = width / values.len() as f64;
    let step_y = height / scale_max.max(1) as f64;

    path.extend(values.iter().enumerate().map(|(i, &value)| Point {
        x: i as f64 * step_x,
        y: height - value as f64 * step_y,
    }));

    path
}

fn scale_max(series: &DailySeries) -> i64 {
    series.max_value().max(1)
}

fn y_ticks(scale_max: i64, height: f64) -> Vec<AxisTick> {
    let intervals = (Y_TICK_COUNT - 1) as f64;

    (0..Y_TICK_COUNT)
        .map(|i| {
            let value = scale_max as f64 * i as f64 / intervals;
            AxisTick {
                position: height - value * height / scale_max as f64,
                label: format_tick_value(value),
            }
        })
        .collect()
}

fn x_ticks(month_length: usize, width: f64) -> Vec<AxisTick> {
    if month_length == 0 {
        return Vec::new();
    }

    let step_x = width / month_length as f64;

    (0..month_length)
        .map(|i| AxisTick {
            position: i as f64 * step_x,
            label: (i + 1).to_string(),
        })
        .collect()
}

/// Whole numbers are shown without decimals, anything else with one decimal place.
fn format_tick_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn to_chart_values(values: &[i64]) -> Vec<f64> {
    values.iter().map(|&value| value as f64).collect()
}

/// Build an ECharts line chart of the daily income and expense totals for `month`.
pub fn daily_totals_chart(series: &DailySeries, month: MonthRange) -> Chart {
    let labels: Vec<String> = (1..=series.month_length())
        .map(|day| day.to_string())
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Daily totals")
                .subtext(format!("{} to {}", month.start, month.end)),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(
            Line::new()
                .name("Income")
                .data(to_chart_values(&series.income_per_day)),
        )
        .series(
            Line::new()
                .name("Expense")
                .data(to_chart_values(&series.expense_per_day)),
        )
}
