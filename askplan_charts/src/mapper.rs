// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visualization mapping.

use askplan_core::Table;
use askplan_plan::{ChartType, Metric, VisualizationSpec};
use thiserror::Error;
use tracing::debug;

use crate::descriptor::ChartDescriptor;

/// The visualization request cannot be satisfied by the result table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The y-axis (requested or resolved from the metrics) is not a result column.
    #[error("invalid y-axis `{attempted}`; available columns: {available:?}")]
    InvalidYAxis {
        /// The y-axis that was tried.
        attempted: String,
        /// Columns of the result table.
        available: Vec<String>,
    },
}

/// The y-axis for `viz` over `result`.
///
/// An explicit `y` is used as is. Otherwise the first metric whose column is a result column
/// is chosen.
pub fn resolve_y<'a>(
    result: &Table,
    viz: &'a VisualizationSpec,
    metrics: &'a [Metric],
) -> Option<&'a str> {
    viz.y.as_deref().or_else(|| {
        metrics
            .iter()
            .map(|m| m.column.as_str())
            .find(|c| result.has_column(c))
    })
}

/// Builds the chart descriptor for a result table.
///
/// Returns `Ok(None)` when there is nothing to draw: no visualization, an `x` the result no
/// longer has, or a chart missing an axis it needs (histograms need `x`, the other kinds need
/// `x` and `y`).
pub fn build_chart(
    result: &Table,
    viz: Option<&VisualizationSpec>,
    metrics: &[Metric],
) -> Result<Option<ChartDescriptor>, ConfigurationError> {
    let Some(viz) = viz else {
        return Ok(None);
    };

    let y = resolve_y(result, viz, metrics);
    if let Some(y) = y
        && !result.has_column(y)
    {
        return Err(ConfigurationError::InvalidYAxis {
            attempted: y.to_owned(),
            available: result.column_names().map(str::to_owned).collect(),
        });
    }

    let Some(x) = viz.x.as_deref() else {
        debug!(chart = viz.chart.name(), "no x-axis; no chart");
        return Ok(None);
    };
    if !result.has_column(x) {
        debug!(chart = viz.chart.name(), x, "x-axis not in result; no chart");
        return Ok(None);
    }
    let y = match (viz.chart, y) {
        (ChartType::Histogram, _) => None,
        (_, Some(y)) => Some(y.to_owned()),
        (_, None) => {
            debug!(chart = viz.chart.name(), "no y-axis; no chart");
            return Ok(None);
        }
    };

    Ok(Some(ChartDescriptor {
        kind: viz.chart,
        x: x.to_owned(),
        y,
        color: viz.color.clone(),
    }))
}
