// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Metric cleaning.
//!
//! Planners sometimes write a chart type (`"bar"`, `"histogram"`, ...) into a metric's
//! `operation`. Such entries are dropped without error. Any other operation outside the
//! statistical vocabulary is rejected.

use serde_json::Value as Json;
use tracing::debug;

use crate::error::{ValidationError, render};
use crate::schema::{ChartType, Metric, MetricOp};

/// Returns `true` if `operation` names a chart type rather than a statistic.
pub fn is_chart_operation(operation: &str) -> bool {
    ChartType::parse(operation).is_some()
}

/// Cleans the raw `metrics` list against the table's columns.
///
/// For each entry, in order:
/// - a chart-type operation drops the entry;
/// - an operation outside [`MetricOp::NAMES`] fails with
///   [`ValidationError::InvalidMetricOperation`];
/// - a column the table does not have fails with [`ValidationError::InvalidMetricColumn`].
///
/// The returned list never contains a chart-type operation.
pub fn clean_metrics<S: AsRef<str>>(
    metrics: &[Json],
    columns: &[S],
) -> Result<Vec<Metric>, ValidationError> {
    let mut cleaned = Vec::with_capacity(metrics.len());

    for (index, raw) in metrics.iter().enumerate() {
        let Some(obj) = raw.as_object() else {
            return Err(ValidationError::malformed(
                format!("metrics[{index}]"),
                "expected an object",
            ));
        };

        let op = obj.get("operation").unwrap_or(&Json::Null);
        if let Some(name) = op.as_str()
            && is_chart_operation(name)
        {
            debug!(index, operation = name, "dropping chart-type metric operation");
            continue;
        }
        let Some(operation) = op.as_str().and_then(MetricOp::parse) else {
            return Err(ValidationError::InvalidMetricOperation {
                index,
                operation: render(op),
                allowed: MetricOp::NAMES,
            });
        };

        let Some(column) = obj.get("column") else {
            return Err(ValidationError::malformed(
                format!("metrics[{index}].column"),
                "missing key",
            ));
        };
        match column.as_str() {
            Some(name) if columns.iter().any(|c| c.as_ref() == name) => {
                cleaned.push(Metric::new(name, operation));
            }
            _ => {
                return Err(ValidationError::InvalidMetricColumn {
                    index,
                    column: render(column),
                });
            }
        }
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ValidationErrorKind;

    const COLUMNS: &[&str] = &["region", "sales", "age"];

    fn metrics(v: Json) -> Vec<Json> {
        v.as_array().cloned().unwrap()
    }

    #[test]
    fn chart_type_operations_are_dropped() {
        let raw = metrics(json!([
            {"column": "sales", "operation": "bar"},
            {"column": "sales", "operation": "sum"},
            {"column": "age", "operation": "histogram"},
        ]));
        let cleaned = clean_metrics(&raw, COLUMNS).unwrap();
        assert_eq!(cleaned, vec![Metric::new("sales", MetricOp::Sum)]);
        assert!(
            cleaned
                .iter()
                .all(|m| !is_chart_operation(m.operation.name())),
            "no chart-type operation may survive cleaning"
        );
    }

    #[test]
    fn dropped_entry_skips_column_check() {
        // The column of a dropped entry is never looked at.
        let raw = metrics(json!([{"column": "nope", "operation": "scatter"}]));
        assert!(clean_metrics(&raw, COLUMNS).unwrap().is_empty());
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let raw = metrics(json!([{"column": "sales", "operation": "average"}]));
        let err = clean_metrics(&raw, COLUMNS).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::InvalidMetricOperation);

        let raw = metrics(json!([{"column": "sales"}]));
        let err = clean_metrics(&raw, COLUMNS).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::InvalidMetricOperation);
    }

    #[test]
    fn unknown_column_is_rejected() {
        let raw = metrics(json!([{"column": "profit", "operation": "mean"}]));
        let err = clean_metrics(&raw, COLUMNS).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidMetricColumn {
                index: 0,
                column: "profit".into(),
            }
        );
    }

    #[test]
    fn order_is_preserved() {
        let raw = metrics(json!([
            {"column": "age", "operation": "max"},
            {"column": "sales", "operation": "line"},
            {"column": "sales", "operation": "median"},
        ]));
        let cleaned = clean_metrics(&raw, COLUMNS).unwrap();
        assert_eq!(
            cleaned,
            vec![
                Metric::new("age", MetricOp::Max),
                Metric::new("sales", MetricOp::Median),
            ]
        );
    }
}
