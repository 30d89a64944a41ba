use serde::{Deserialize, Serialize};

use super::model::{CellValue, Table};
use crate::pareto::Direction;

/// A column shown as a bar in a point's detail window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailMetric {
    pub column: String,
    #[serde(default)]
    pub direction: Direction,
}

/// One bar: the raw value plus its position in the column's range, oriented
/// so that `1.0` is the best value in the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricBar {
    pub column: String,
    pub value: CellValue,
    pub ratio: Option<f64>,
}

/// Min-max normalize `row`'s value for every metric.
pub fn metric_bars(table: &Table, row: usize, metrics: &[DetailMetric]) -> Vec<MetricBar> {
    metrics
        .iter()
        .map(|metric| {
            let value = table
                .cell(row, &metric.column)
                .cloned()
                .unwrap_or(CellValue::Null);
            let ratio = value
                .as_f64()
                .and_then(|v| oriented_ratio(table, &metric.column, v, metric.direction));
            MetricBar {
                column: metric.column.clone(),
                value,
                ratio,
            }
        })
        .collect()
}

fn oriented_ratio(table: &Table, column: &str, value: f64, direction: Direction) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let col = table.column(column)?;
    let (min, max) = col
        .values
        .iter()
        .filter_map(CellValue::as_f64)
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    let range = max - min;
    if !range.is_finite() {
        return None;
    }
    // Every option ties: all of them are the best.
    if range.abs() < f64::EPSILON {
        return Some(1.0);
    }
    let normalized = ((value - min) / range).clamp(0.0, 1.0);
    Some(match direction {
        Direction::Maximize => normalized,
        Direction::Minimize => 1.0 - normalized,
    })
}
