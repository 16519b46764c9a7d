// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Y-axis metric relocation.
//!
//! A known planner confusion writes a statistic (`"mean"`, `"count"`, ...) into
//! `visualization.y` instead of building a metric. This step moves it back into the metric
//! list. It only ever looks at `y`. Disable it with
//! [`ValidatorConfig::repair_metric_axis`](crate::ValidatorConfig::repair_metric_axis).

use tracing::info;

use crate::error::ValidationError;
use crate::schema::{Metric, MetricOp};

/// Relocates a statistic written into the y-axis.
///
/// If `y` names a [`MetricOp`], returns the metric to append: the operation applied to the
/// first group-by column, or to the table's first column when there is no group-by. The
/// returned metric's column is the new y-axis. Returns `Ok(None)` when `y` is not a
/// statistic.
///
/// Fails with [`ValidationError::InvalidAxis`] when there is no column to target.
pub fn relocate_metric_axis<S: AsRef<str>>(
    y: Option<&str>,
    group_by: &[String],
    table_columns: &[S],
) -> Result<Option<Metric>, ValidationError> {
    let Some((y, operation)) = y.and_then(|y| Some((y, MetricOp::parse(y)?))) else {
        return Ok(None);
    };

    let target = group_by
        .first()
        .map(String::as_str)
        .or_else(|| table_columns.first().map(|c| c.as_ref()))
        .ok_or_else(|| ValidationError::InvalidAxis {
            axis: "y",
            column: y.to_owned(),
        })?;

    info!(
        operation = operation.name(),
        column = target,
        "relocating statistic from y-axis into metrics"
    );
    Ok(Some(Metric::new(target, operation)))
}
