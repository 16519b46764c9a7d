// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform program and executor.

use askplan_core::Table;
use askplan_plan::NormalizedPlan;
use tracing::debug;

use crate::aggregate::{self, AggregateMode};
use crate::filter;
use crate::order;
use crate::transform::Transform;

/// Errors returned when executing a transform [`Program`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// A transform requires a column that is not present in its input table.
    #[error("{transform} requires column `{column}`, which is not in its input")]
    MissingColumn {
        /// The transform that was missing a column.
        transform: &'static str,
        /// The missing column.
        column: String,
    },
    /// A transform is invalid (e.g. empty column set).
    #[error("{0} requires at least one column")]
    InvalidTransform(&'static str),
}

/// Outputs of executing a program.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramOutput {
    /// The table produced by the last transform.
    pub result: Table,
    /// The table as of the last [`Transform::Snapshot`], or `result` if there was none.
    pub filtered: Table,
}

/// A sequence of table transforms.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Program {
    transforms: Vec<Transform>,
}

impl Program {
    /// Creates an empty program.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Compiles a validated plan.
    ///
    /// The program filters, snapshots, aggregates, sorts and truncates. Truncation is left out
    /// when the plan's user intent asks for both ends of the result.
    pub fn for_plan(plan: &NormalizedPlan) -> Self {
        let mut p = Self::new();
        for f in &plan.filters {
            p.push(Transform::Filter(f.clone()));
        }
        p.push(Transform::Snapshot);
        if let Some(t) =
            AggregateMode::select(&plan.metrics, &plan.group_by).into_transform(&plan.group_by)
        {
            p.push(t);
        }
        if let Some(sort) = &plan.sort {
            p.push(Transform::Sort {
                by: sort.by.clone(),
                order: sort.order,
            });
        }
        if let Some(n) = order::row_limit(plan.top_n(), plan.user_intent.as_ref()) {
            p.push(Transform::Head { n });
        }
        p
    }

    /// Adds a transform to the end of the program.
    pub fn push(&mut self, t: Transform) {
        self.transforms.push(t);
    }

    /// Returns the transform list.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Execute the program over `input`.
    ///
    /// Transforms run in order, each consuming the previous output.
    pub fn execute(&self, input: Table) -> Result<ProgramOutput, ExecutionError> {
        let mut current = input;
        let mut filtered = None;

        for t in &self.transforms {
            let rows_in = current.row_count();
            current = match t {
                Transform::Filter(f) => filter::apply_one(current, f),
                Transform::Snapshot => {
                    filtered = Some(current.clone());
                    current
                }
                Transform::CountScalar { column } => {
                    require_columns(t, &current, core::slice::from_ref(column))?;
                    aggregate::count_scalar(&current, column)
                }
                Transform::Aggregate { group_by, fields } => {
                    if fields.is_empty() {
                        return Err(ExecutionError::InvalidTransform(t.name()));
                    }
                    require_columns(t, &current, group_by)?;
                    for f in fields {
                        require_columns(t, &current, core::slice::from_ref(&f.column))?;
                    }
                    aggregate::group(&current, group_by, fields)
                }
                Transform::Distinct { columns } => {
                    if columns.is_empty() {
                        return Err(ExecutionError::InvalidTransform(t.name()));
                    }
                    require_columns(t, &current, columns)?;
                    aggregate::distinct(&current, columns)
                }
                Transform::Sort { by, order } => order::sort_by(current, by, *order),
                Transform::Head { n } => order::head(current, *n),
            };
            debug!(
                transform = t.name(),
                rows_in,
                rows_out = current.row_count(),
                "executed transform"
            );
        }

        let filtered = filtered.unwrap_or_else(|| current.clone());
        Ok(ProgramOutput {
            result: current,
            filtered,
        })
    }
}

fn require_columns(
    transform: &Transform,
    table: &Table,
    cols: &[String],
) -> Result<(), ExecutionError> {
    for c in cols {
        if !table.has_column(c) {
            return Err(ExecutionError::MissingColumn {
                transform: transform.name(),
                column: c.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use askplan_core::{Field, Value};
    use askplan_plan::{
        AnalysisType, ChartType, Filter, FilterOp, FilterValue, Focus, Literal, Metric, MetricOp,
        SortOrder, SortSpec, UserIntent, VisualizationSpec,
    };

    use super::*;
    use crate::transform::AggregateField;

    fn frame() -> Table {
        Table::from_columns(vec![
            (
                Field::text("country"),
                vec!["FR".into(), "DE".into(), "IT".into(), "ES".into()],
            ),
            (
                Field::text("region"),
                vec!["west".into(), "central".into(), "south".into(), "south".into()],
            ),
            (
                Field::numeric("population"),
                vec![68.0.into(), 84.0.into(), 59.0.into(), 48.0.into()],
            ),
        ])
        .unwrap()
    }

    fn plan() -> NormalizedPlan {
        NormalizedPlan {
            analysis_type: AnalysisType::Aggregation,
            filters: vec![],
            group_by: vec![],
            metrics: vec![],
            sort: None,
            visualization: None,
            user_intent: None,
        }
    }

    #[test]
    fn filter_preserves_row_keys() {
        let mut p = Program::new();
        p.push(Transform::Filter(Filter {
            column: "population".into(),
            op: FilterOp::Ge,
            value: FilterValue::Scalar(Literal::Number(60.0)),
        }));
        let out = p.execute(frame()).unwrap();
        assert_eq!(out.result.row_keys, vec![0, 1]);
        assert_eq!(out.filtered, out.result);
    }

    #[test]
    fn snapshot_captures_rows_before_aggregation() {
        let mut p = Program::new();
        p.push(Transform::Filter(Filter {
            column: "region".into(),
            op: FilterOp::Ne,
            value: FilterValue::Scalar(Literal::Text("west".into())),
        }));
        p.push(Transform::Snapshot);
        p.push(Transform::Aggregate {
            group_by: vec!["region".into()],
            fields: vec![AggregateField::new("population", MetricOp::Sum)],
        });
        let out = p.execute(frame()).unwrap();
        assert_eq!(out.filtered.row_keys, vec![1, 2, 3]);
        assert_eq!(out.filtered.column_count(), 3);
        assert_eq!(
            out.result.column("population").unwrap(),
            &[Value::from(84.0), Value::from(107.0)]
        );
    }

    #[test]
    fn aggregate_requires_its_columns() {
        let mut p = Program::new();
        p.push(Transform::Aggregate {
            group_by: vec!["continent".into()],
            fields: vec![AggregateField::new("population", MetricOp::Sum)],
        });
        assert_eq!(
            p.execute(frame()).unwrap_err(),
            ExecutionError::MissingColumn {
                transform: "aggregate",
                column: "continent".into(),
            }
        );

        let mut p = Program::new();
        p.push(Transform::Distinct { columns: vec![] });
        assert_eq!(
            p.execute(frame()).unwrap_err(),
            ExecutionError::InvalidTransform("distinct")
        );
    }

    #[test]
    fn compiles_plan_stages_in_order() {
        let plan = NormalizedPlan {
            filters: vec![Filter {
                column: "population".into(),
                op: FilterOp::Gt,
                value: FilterValue::Scalar(Literal::Number(50.0)),
            }],
            group_by: vec!["region".into()],
            metrics: vec![Metric::new("population", MetricOp::Mean)],
            sort: Some(SortSpec {
                by: "population".into(),
                order: SortOrder::Desc,
            }),
            visualization: Some(VisualizationSpec {
                chart: ChartType::Bar,
                x: Some("region".into()),
                y: Some("population".into()),
                color: None,
                top_n: Some(2),
            }),
            ..plan()
        };
        let names: Vec<_> = Program::for_plan(&plan)
            .transforms()
            .iter()
            .map(Transform::name)
            .collect();
        assert_eq!(names, ["filter", "snapshot", "aggregate", "sort", "head"]);

        let out = Program::for_plan(&plan).execute(frame()).unwrap();
        assert_eq!(
            out.result.column("region").unwrap(),
            &[Value::from("central"), Value::from("west")]
        );
        assert_eq!(out.filtered.row_count(), 3);
    }

    #[test]
    fn both_ends_focus_compiles_without_head() {
        let plan = NormalizedPlan {
            visualization: Some(VisualizationSpec {
                chart: ChartType::Bar,
                x: Some("country".into()),
                y: Some("population".into()),
                color: None,
                top_n: Some(1),
            }),
            user_intent: Some(UserIntent {
                focus: Some(Focus::Both),
                ..UserIntent::default()
            }),
            ..plan()
        };
        let p = Program::for_plan(&plan);
        assert!(!p.transforms().iter().any(|t| matches!(t, Transform::Head { .. })));
        assert_eq!(p.execute(frame()).unwrap().result.row_count(), 4);
    }

    #[test]
    fn scalar_count_plan() {
        let plan = NormalizedPlan {
            metrics: vec![Metric::new("region", MetricOp::Count)],
            ..plan()
        };
        let out = Program::for_plan(&plan).execute(frame()).unwrap();
        assert_eq!(out.result.column("count").unwrap(), &[Value::from(3.0)]);
        assert_eq!(out.filtered, frame());
    }
}
