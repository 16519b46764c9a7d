// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validate-then-execute.

use askplan_charts::{ChartDescriptor, ConfigurationError, build_chart};
use askplan_core::Table;
use askplan_plan::{NormalizedPlan, RawPlan, Validator, ValidatorConfig};
use askplan_transforms::{ExecutionError, Program};
use tracing::{debug, warn};

use crate::error::PipelineError;

/// Everything one plan execution produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// The filtered, aggregated, sorted and truncated result.
    pub result: Table,
    /// The chart for `result`, if one was requested and could be resolved.
    ///
    /// A configuration error here leaves `result` and `filtered` usable.
    pub chart: Result<Option<ChartDescriptor>, ConfigurationError>,
    /// The table after filtering, before aggregation.
    pub filtered: Table,
}

/// Executes a validated plan against `table`.
///
/// The table is copied on entry; the caller's table is never touched.
pub fn execute(plan: &NormalizedPlan, table: &Table) -> Result<Analysis, ExecutionError> {
    let out = Program::for_plan(plan).execute(table.clone())?;
    let chart = build_chart(&out.result, plan.visualization.as_ref(), &plan.metrics);
    if let Err(err) = &chart {
        warn!(%err, "chart not built");
    }
    debug!(
        input_rows = table.row_count(),
        filtered_rows = out.filtered.row_count(),
        result_rows = out.result.row_count(),
        "plan executed"
    );
    Ok(Analysis {
        result: out.result,
        chart,
        filtered: out.filtered,
    })
}

/// A validated plan and its execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// The normalized plan that was executed.
    pub plan: NormalizedPlan,
    /// What it produced.
    pub analysis: Analysis,
}

/// Validates raw plans and executes them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    validator: Validator,
}

impl Pipeline {
    /// Creates a pipeline.
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            validator: Validator::new(config),
        }
    }

    /// Validates `raw` against `table`'s columns, then executes it.
    ///
    /// Validation errors abort before any data is transformed.
    pub fn run(&self, raw: &RawPlan, table: &Table) -> Result<Run, PipelineError> {
        let columns: Vec<&str> = table.column_names().collect();
        let plan = self.validator.validate(raw, &columns)?;
        let analysis = execute(&plan, table)?;
        Ok(Run { plan, analysis })
    }
}

#[cfg(test)]
mod tests {
    use askplan_core::{Field, Value};
    use askplan_plan::ValidationErrorKind;
    use serde_json::json;

    use super::*;

    fn table() -> Table {
        Table::from_columns(vec![
            (
                Field::text("region"),
                vec!["EU".into(), "NA".into(), "EU".into()],
            ),
            (
                Field::numeric("sales"),
                vec![5.0.into(), 7.0.into(), 11.0.into()],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn run_validates_then_executes() {
        let raw = RawPlan::new(json!({
            "analysis_type": "comparison",
            "filters": [],
            "group_by": ["region"],
            "metrics": [{"column": "sales", "operation": "sum"}],
            "sort": {"by": "sales", "order": "desc"},
            "visualization": {"type": "bar", "x": "region", "y": "sales"},
        }));
        let run = Pipeline::default().run(&raw, &table()).unwrap();
        assert_eq!(
            run.analysis.result.column("sales").unwrap(),
            &[Value::from(16.0), Value::from(7.0)]
        );
        assert_eq!(run.analysis.filtered, table());
        assert!(run.analysis.chart.unwrap().is_some());
    }

    #[test]
    fn validation_errors_stop_the_run() {
        let raw = RawPlan::new(json!({"analysis_type": "comparison"}));
        let err = Pipeline::default().run(&raw, &table()).unwrap_err();
        match err {
            PipelineError::Validation(e) => assert_eq!(e.kind(), ValidationErrorKind::MissingKey),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn chart_errors_keep_the_result() {
        // `sales` is grouped away by a distinct-only aggregation, so the y-axis is gone.
        let raw = RawPlan::new(json!({
            "analysis_type": "comparison",
            "filters": [],
            "group_by": ["region"],
            "metrics": [],
            "sort": null,
            "visualization": {"type": "bar", "x": "region", "y": "sales"},
        }));
        let run = Pipeline::default().run(&raw, &table()).unwrap();
        assert_eq!(run.analysis.result.row_count(), 2);
        assert!(matches!(
            run.analysis.chart,
            Err(ConfigurationError::InvalidYAxis { .. })
        ));
    }

    #[test]
    fn caller_table_is_untouched() {
        let t = table();
        let raw = RawPlan::new(json!({
            "analysis_type": "aggregation",
            "filters": [{"column": "sales", "operator": ">", "value": "6"}],
            "group_by": [],
            "metrics": [],
            "sort": null,
            "visualization": null,
        }));
        let run = Pipeline::default().run(&raw, &t).unwrap();
        assert_eq!(run.analysis.result.row_count(), 2);
        assert_eq!(t, table());
    }
}
