// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plan validation.
//!
//! [`Validator::validate`] turns an untrusted [`RawPlan`] into a [`NormalizedPlan`], checking
//! each step in a fixed order and stopping at the first violation:
//!
//! 1. shape and required top-level keys,
//! 2. `analysis_type`,
//! 3. filters (column, operator, `in` value),
//! 4. group-by columns,
//! 5. metric cleaning ([`crate::clean_metrics`]),
//! 6. analysis type vs. metrics,
//! 7. visualization presence,
//! 8. literal `"null"` axis values,
//! 9. chart type,
//! 10. y-axis metric repair ([`crate::relocate_metric_axis`]), re-checking step 6,
//! 11. histogram and correlation axis rules,
//! 12. axis columns,
//! 13. `top_n`.

use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::clean::clean_metrics;
use crate::config::ValidatorConfig;
use crate::error::{ValidationError, render};
use crate::repair::relocate_metric_axis;
use crate::schema::{
    AnalysisType, ChartType, Filter, FilterOp, FilterValue, Literal, NormalizedPlan, RawPlan,
    SortOrder, SortSpec, UserIntent, VisualizationSpec,
};

/// Top-level keys every plan must carry, in the order they are checked.
pub const REQUIRED_KEYS: [&str; 6] = [
    "analysis_type",
    "filters",
    "group_by",
    "metrics",
    "sort",
    "visualization",
];

/// Validates plans against a table's columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates and normalizes `plan` against `table_columns`.
    ///
    /// The returned plan is authoritative; `plan` itself is never modified.
    pub fn validate<S: AsRef<str>>(
        &self,
        plan: &RawPlan,
        table_columns: &[S],
    ) -> Result<NormalizedPlan, ValidationError> {
        let Some(obj) = plan.as_json().as_object() else {
            return Err(ValidationError::malformed("plan", "expected a JSON object"));
        };
        for key in REQUIRED_KEYS {
            if !obj.contains_key(key) {
                return Err(ValidationError::MissingKey { key });
            }
        }
        let has = |name: &str| table_columns.iter().any(|c| c.as_ref() == name);

        let analysis_type = parse_analysis_type(&obj["analysis_type"])?;
        let filters = parse_filters(&obj["filters"], has)?;
        let group_by = parse_group_by(&obj["group_by"], has)?;

        let raw_metrics = as_array(&obj["metrics"], "metrics")?;
        let mut metrics = clean_metrics(raw_metrics, table_columns)?;
        if analysis_type.forbids_metrics() && !metrics.is_empty() {
            return Err(ValidationError::AnalysisTypeMetricConflict {
                analysis_type,
                metrics: metrics.len(),
            });
        }

        let sort = parse_sort(&obj["sort"])?;
        let user_intent = obj.get("user_intent").and_then(UserIntent::from_json);

        let raw_viz = &obj["visualization"];
        if is_falsy(raw_viz) {
            debug!(analysis_type = analysis_type.name(), "plan has no visualization");
            return Ok(NormalizedPlan {
                analysis_type,
                filters,
                group_by,
                metrics,
                sort,
                visualization: None,
                user_intent,
            });
        }
        let Some(viz) = raw_viz.as_object() else {
            return Err(ValidationError::malformed(
                "visualization",
                "expected an object or null",
            ));
        };

        let chart = parse_chart_type(viz)?;
        let x = axis_field(viz, "x")?;
        let mut y = axis_field(viz, "y")?;
        let color = match non_null(viz, "color") {
            Some(Json::String(s)) => Some(s.clone()),
            Some(v @ (Json::Number(_) | Json::Bool(_))) => Some(render(v)),
            Some(other) => {
                debug!(color = %other, "non-scalar color ignored");
                None
            }
            None => None,
        };

        if self.config.repair_metric_axis
            && let Some(metric) = relocate_metric_axis(y.as_deref(), &group_by, table_columns)?
        {
            y = Some(metric.column.clone());
            metrics.push(metric);
            if analysis_type.forbids_metrics() {
                return Err(ValidationError::AnalysisTypeMetricConflict {
                    analysis_type,
                    metrics: metrics.len(),
                });
            }
        }

        if chart == ChartType::Histogram {
            if y.is_some() {
                return Err(ValidationError::HistogramAxisConflict {
                    reason: "histogram must not have a y-axis",
                });
            }
            if x.is_none() {
                return Err(ValidationError::HistogramAxisConflict {
                    reason: "histogram must have an x-axis",
                });
            }
        }
        if analysis_type == AnalysisType::Correlation {
            if chart != ChartType::Scatter {
                return Err(ValidationError::CorrelationAxisConflict {
                    reason: "correlation requires a scatter chart",
                });
            }
            if x.is_none() || y.is_none() {
                return Err(ValidationError::CorrelationAxisConflict {
                    reason: "correlation scatter chart must have both x and y axes",
                });
            }
        }

        for (axis, column) in [("x", &x), ("y", &y)] {
            if let Some(column) = column
                && !has(column)
            {
                return Err(ValidationError::InvalidAxis {
                    axis,
                    column: column.clone(),
                });
            }
        }

        let top_n = match non_null(viz, "top_n") {
            None => None,
            Some(v) => match v.as_u64() {
                Some(n) if n > 0 => Some(n),
                _ => return Err(ValidationError::InvalidTopN { value: render(v) }),
            },
        };

        Ok(NormalizedPlan {
            analysis_type,
            filters,
            group_by,
            metrics,
            sort,
            visualization: Some(VisualizationSpec {
                chart,
                x,
                y,
                color,
                top_n,
            }),
            user_intent,
        })
    }
}

/// Validates `plan` with the default [`ValidatorConfig`].
pub fn validate<S: AsRef<str>>(
    plan: &RawPlan,
    table_columns: &[S],
) -> Result<NormalizedPlan, ValidationError> {
    Validator::default().validate(plan, table_columns)
}

fn parse_analysis_type(value: &Json) -> Result<AnalysisType, ValidationError> {
    value
        .as_str()
        .and_then(AnalysisType::parse)
        .ok_or_else(|| ValidationError::InvalidAnalysisType {
            value: render(value),
            allowed: AnalysisType::NAMES,
        })
}

fn parse_filters(
    value: &Json,
    has: impl Fn(&str) -> bool,
) -> Result<Vec<Filter>, ValidationError> {
    let raw = as_array(value, "filters")?;
    let mut filters = Vec::with_capacity(raw.len());

    for (index, f) in raw.iter().enumerate() {
        let Some(f) = f.as_object() else {
            return Err(ValidationError::malformed(
                format!("filters[{index}]"),
                "expected an object",
            ));
        };

        let Some(column) = f.get("column") else {
            return Err(ValidationError::malformed(
                format!("filters[{index}].column"),
                "missing key",
            ));
        };
        let column = match column.as_str() {
            Some(name) if has(name) => name.to_owned(),
            _ => {
                return Err(ValidationError::InvalidFilterColumn {
                    index,
                    column: render(column),
                });
            }
        };

        let Some(op) = f.get("operator") else {
            return Err(ValidationError::malformed(
                format!("filters[{index}].operator"),
                "missing key",
            ));
        };
        let Some(op) = op.as_str().and_then(FilterOp::parse) else {
            return Err(ValidationError::InvalidOperator {
                index,
                operator: render(op),
                allowed: FilterOp::NAMES,
            });
        };

        let raw_value = f.get("value").unwrap_or(&Json::Null);
        if op == FilterOp::In && !raw_value.is_array() {
            return Err(ValidationError::InvalidOperatorValue {
                index,
                column,
                value: render(raw_value),
            });
        }
        let value = filter_value(raw_value).ok_or_else(|| {
            ValidationError::malformed(format!("filters[{index}].value"), "expected scalars")
        })?;

        filters.push(Filter { column, op, value });
    }

    Ok(filters)
}

fn filter_value(value: &Json) -> Option<FilterValue> {
    match value {
        Json::Array(items) => items
            .iter()
            .map(Literal::from_json)
            .collect::<Option<Vec<_>>>()
            .map(FilterValue::List),
        other => Literal::from_json(other).map(FilterValue::Scalar),
    }
}

fn parse_group_by(
    value: &Json,
    has: impl Fn(&str) -> bool,
) -> Result<Vec<String>, ValidationError> {
    as_array(value, "group_by")?
        .iter()
        .map(|col| match col.as_str() {
            Some(name) if has(name) => Ok(name.to_owned()),
            _ => Err(ValidationError::InvalidGroupByColumn {
                column: render(col),
            }),
        })
        .collect()
}

fn parse_sort(value: &Json) -> Result<Option<SortSpec>, ValidationError> {
    if is_falsy(value) {
        return Ok(None);
    }
    let Some(obj) = value.as_object() else {
        return Err(ValidationError::malformed("sort", "expected an object or null"));
    };
    let by = match obj.get("by") {
        Some(Json::String(by)) if !by.is_empty() => by.clone(),
        Some(Json::String(_) | Json::Null) | None => return Ok(None),
        Some(_) => return Err(ValidationError::malformed("sort.by", "expected a column name")),
    };
    let order = SortOrder::parse_lenient(obj.get("order").and_then(Json::as_str));
    Ok(Some(SortSpec { by, order }))
}

fn parse_chart_type(viz: &Map<String, Json>) -> Result<ChartType, ValidationError> {
    let value = viz.get("type").unwrap_or(&Json::Null);
    value
        .as_str()
        .and_then(ChartType::parse)
        .ok_or_else(|| ValidationError::InvalidVisualizationType {
            value: render(value),
            allowed: ChartType::NAMES,
        })
}

/// Reads an axis; non-string axes can never name a column.
fn axis_field(
    viz: &Map<String, Json>,
    axis: &'static str,
) -> Result<Option<String>, ValidationError> {
    match non_null(viz, axis) {
        None => Ok(None),
        Some(Json::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ValidationError::InvalidAxis {
            axis,
            column: render(other),
        }),
    }
}

/// A visualization field, with JSON `null` and the literal strings `"null"`/`"NULL"`
/// treated as absent.
fn non_null<'a>(viz: &'a Map<String, Json>, key: &str) -> Option<&'a Json> {
    match viz.get(key)? {
        Json::Null => None,
        Json::String(s) if s == "null" || s == "NULL" => None,
        other => Some(other),
    }
}

fn as_array<'a>(value: &'a Json, field: &'static str) -> Result<&'a [Json], ValidationError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ValidationError::malformed(field, "expected an array"))
}

fn is_falsy(value: &Json) -> bool {
    match value {
        Json::Null => true,
        Json::Bool(b) => !b,
        Json::Number(n) => n.as_f64() == Some(0.0),
        Json::String(s) => s.is_empty(),
        Json::Array(a) => a.is_empty(),
        Json::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::schema::{Focus, Metric, MetricOp};

    const COLUMNS: &[&str] = &["country", "region", "population", "age", "score", "discount"];

    fn plan(v: Json) -> RawPlan {
        RawPlan::new(v)
    }

    fn base() -> Json {
        json!({
            "analysis_type": "aggregation",
            "filters": [],
            "group_by": [],
            "metrics": [],
            "sort": null,
            "visualization": null,
        })
    }

    fn with(mut v: Json, key: &str, value: Json) -> Json {
        v[key] = value;
        v
    }

    fn kind(v: Json) -> ValidationErrorKind {
        validate(&plan(v), COLUMNS).unwrap_err().kind()
    }

    #[test]
    fn non_object_is_malformed() {
        assert_eq!(kind(json!([1, 2])), ValidationErrorKind::Malformed);
        assert_eq!(kind(json!("plan")), ValidationErrorKind::Malformed);
    }

    #[test]
    fn every_required_key_is_checked() {
        for key in REQUIRED_KEYS {
            let mut v = base();
            v.as_object_mut().unwrap().remove(key);
            let err = validate(&plan(v), COLUMNS).unwrap_err();
            assert_eq!(err, ValidationError::MissingKey { key }, "removed {key}");
        }
    }

    #[test]
    fn minimal_plan_normalizes() {
        let p = validate(&plan(base()), COLUMNS).unwrap();
        assert_eq!(p.analysis_type, AnalysisType::Aggregation);
        assert!(p.filters.is_empty());
        assert!(p.visualization.is_none());
        assert!(p.sort.is_none());
        assert!(p.user_intent.is_none());
    }

    #[test]
    fn analysis_type_is_closed() {
        let err = validate(&plan(with(base(), "analysis_type", json!("forecast"))), COLUMNS)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidAnalysisType {
                value: "forecast".into(),
                allowed: AnalysisType::NAMES,
            }
        );
        assert_eq!(
            kind(with(base(), "analysis_type", json!(3))),
            ValidationErrorKind::InvalidAnalysisType
        );
    }

    #[test]
    fn filter_rules() {
        let f = |filter: Json| with(base(), "filters", json!([filter]));

        assert_eq!(
            kind(f(json!({"column": "gdp", "operator": "==", "value": 1}))),
            ValidationErrorKind::InvalidFilterColumn
        );
        for op in ["=", "like", "contains", "IN"] {
            assert_eq!(
                kind(f(json!({"column": "age", "operator": op, "value": 1}))),
                ValidationErrorKind::InvalidOperator,
                "operator {op}"
            );
        }
        for value in [json!("EU"), json!(3), json!(null), json!("['EU']")] {
            assert_eq!(
                kind(f(json!({"column": "region", "operator": "in", "value": value}))),
                ValidationErrorKind::InvalidOperatorValue
            );
        }
        assert_eq!(
            kind(f(json!({"column": "region", "operator": "in"}))),
            ValidationErrorKind::InvalidOperatorValue
        );

        let p = validate(
            &plan(f(json!({"column": "region", "operator": "in", "value": ["EU", "NA"]}))),
            COLUMNS,
        )
        .unwrap();
        assert_eq!(
            p.filters[0].value,
            FilterValue::List(vec![Literal::Text("EU".into()), Literal::Text("NA".into())])
        );
    }

    #[test]
    fn filter_column_checked_before_operator() {
        assert_eq!(
            kind(with(
                base(),
                "filters",
                json!([{"column": "gdp", "operator": "~", "value": 1}])
            )),
            ValidationErrorKind::InvalidFilterColumn
        );
    }

    #[test]
    fn group_by_columns_must_exist() {
        assert_eq!(
            kind(with(base(), "group_by", json!(["continent"]))),
            ValidationErrorKind::InvalidGroupByColumn
        );
    }

    #[test]
    fn chart_type_metrics_are_cleaned() {
        let p = validate(
            &plan(with(
                base(),
                "metrics",
                json!([
                    {"column": "population", "operation": "bar"},
                    {"column": "population", "operation": "sum"},
                ]),
            )),
            COLUMNS,
        )
        .unwrap();
        assert_eq!(p.metrics, vec![Metric::new("population", MetricOp::Sum)]);
    }

    #[test]
    fn distribution_with_metrics_conflicts() {
        let v = json!({
            "analysis_type": "distribution",
            "filters": [],
            "group_by": [],
            "metrics": [{"column": "age", "operation": "mean"}],
            "sort": null,
            "visualization": {"type": "histogram", "x": "age"},
        });
        let err = validate(&plan(v), COLUMNS).unwrap_err();
        assert_eq!(
            err,
            ValidationError::AnalysisTypeMetricConflict {
                analysis_type: AnalysisType::Distribution,
                metrics: 1,
            }
        );
    }

    #[test]
    fn conflict_ignores_dropped_metrics() {
        let v = json!({
            "analysis_type": "correlation",
            "filters": [],
            "group_by": [],
            "metrics": [{"column": "age", "operation": "scatter"}],
            "sort": null,
            "visualization": {"type": "scatter", "x": "age", "y": "score"},
        });
        let p = validate(&plan(v), COLUMNS).unwrap();
        assert!(p.metrics.is_empty());
    }

    #[test]
    fn falsy_visualization_means_no_chart() {
        for viz in [json!(null), json!({}), json!(false), json!(""), json!([])] {
            let p = validate(&plan(with(base(), "visualization", viz)), COLUMNS).unwrap();
            assert!(p.visualization.is_none());
        }
    }

    #[test]
    fn string_nulls_become_absent() {
        let v = with(
            base(),
            "visualization",
            json!({"type": "bar", "x": "country", "y": "NULL", "color": "null", "top_n": "null"}),
        );
        let viz = validate(&plan(v), COLUMNS).unwrap().visualization.unwrap();
        assert_eq!(viz.x.as_deref(), Some("country"));
        assert_eq!(viz.y, None);
        assert_eq!(viz.color, None);
        assert_eq!(viz.top_n, None);
    }

    #[test]
    fn chart_type_is_closed() {
        assert_eq!(
            kind(with(base(), "visualization", json!({"type": "pie", "x": "country"}))),
            ValidationErrorKind::InvalidVisualizationType
        );
        assert_eq!(
            kind(with(base(), "visualization", json!({"x": "country"}))),
            ValidationErrorKind::InvalidVisualizationType
        );
    }

    #[test]
    fn histogram_axis_rules() {
        let viz = |v: Json| with(base(), "visualization", v);
        assert_eq!(
            kind(viz(json!({"type": "histogram", "x": "age", "y": "score"}))),
            ValidationErrorKind::HistogramAxisConflict
        );
        assert_eq!(
            kind(viz(json!({"type": "histogram", "x": null}))),
            ValidationErrorKind::HistogramAxisConflict
        );
        assert!(validate(&plan(viz(json!({"type": "histogram", "x": "age"}))), COLUMNS).is_ok());
    }

    #[test]
    fn correlation_requires_two_axis_scatter() {
        let corr = |v: Json| {
            with(
                with(base(), "analysis_type", json!("correlation")),
                "visualization",
                v,
            )
        };
        assert_eq!(
            kind(corr(json!({"type": "line", "x": "age", "y": "score"}))),
            ValidationErrorKind::CorrelationAxisConflict
        );
        assert_eq!(
            kind(corr(json!({"type": "scatter", "x": "age"}))),
            ValidationErrorKind::CorrelationAxisConflict
        );
        assert!(
            validate(
                &plan(corr(json!({"type": "scatter", "x": "age", "y": "score"}))),
                COLUMNS
            )
            .is_ok()
        );
    }

    #[test]
    fn axes_must_be_columns() {
        let err = validate(
            &plan(with(
                base(),
                "visualization",
                json!({"type": "bar", "x": "continent", "y": "population"}),
            )),
            COLUMNS,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidAxis {
                axis: "x",
                column: "continent".into(),
            }
        );
    }

    #[test]
    fn top_n_must_be_positive_integer() {
        for top_n in [json!(0), json!(-3), json!(2.5), json!("5"), json!(true)] {
            assert_eq!(
                kind(with(
                    base(),
                    "visualization",
                    json!({"type": "bar", "x": "country", "y": "population", "top_n": top_n}),
                )),
                ValidationErrorKind::InvalidTopN
            );
        }
        let p = validate(
            &plan(with(
                base(),
                "visualization",
                json!({"type": "bar", "x": "country", "y": "population", "top_n": 5}),
            )),
            COLUMNS,
        )
        .unwrap();
        assert_eq!(p.top_n(), Some(5));
    }

    #[test]
    fn y_axis_statistic_is_relocated() {
        let v = json!({
            "analysis_type": "comparison",
            "filters": [],
            "group_by": ["region"],
            "metrics": [],
            "sort": null,
            "visualization": {"type": "bar", "x": "region", "y": "mean"},
        });
        let p = validate(&plan(v), COLUMNS).unwrap();
        assert_eq!(p.metrics, vec![Metric::new("region", MetricOp::Mean)]);
        assert_eq!(p.visualization.unwrap().y.as_deref(), Some("region"));
    }

    #[test]
    fn y_axis_repair_can_be_disabled() {
        let v = json!({
            "analysis_type": "comparison",
            "filters": [],
            "group_by": ["region"],
            "metrics": [],
            "sort": null,
            "visualization": {"type": "bar", "x": "region", "y": "mean"},
        });
        let strict = Validator::new(ValidatorConfig {
            repair_metric_axis: false,
        });
        let err = strict.validate(&plan(v), COLUMNS).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidAxis {
                axis: "y",
                column: "mean".into(),
            }
        );
    }

    #[test]
    fn sort_is_read_leniently() {
        let p = validate(
            &plan(with(base(), "sort", json!({"by": "population", "order": "desc"}))),
            COLUMNS,
        )
        .unwrap();
        assert_eq!(
            p.sort,
            Some(SortSpec {
                by: "population".into(),
                order: SortOrder::Desc,
            })
        );

        let p = validate(&plan(with(base(), "sort", json!({"by": "age"}))), COLUMNS).unwrap();
        assert_eq!(p.sort.unwrap().order, SortOrder::Asc);

        let p = validate(&plan(with(base(), "sort", json!({"by": null}))), COLUMNS).unwrap();
        assert!(p.sort.is_none());
    }

    #[test]
    fn user_intent_passes_through() {
        let v = with(
            base(),
            "user_intent",
            json!({"focus": "highest", "explicit_limit": null, "show_highest": true}),
        );
        let p = validate(&plan(v), COLUMNS).unwrap();
        let intent = p.user_intent.unwrap();
        assert_eq!(intent.focus, Some(Focus::Highest));
        assert_eq!(intent.show_highest, Some(true));
    }

    #[test]
    fn validation_is_idempotent() {
        let v = json!({
            "analysis_type": "comparison",
            "filters": [
                {"column": "discount", "operator": ">", "value": "10%"},
                {"column": "region", "operator": "in", "value": ["EU", "NA"]},
            ],
            "group_by": ["region"],
            "metrics": [
                {"column": "population", "operation": "sum"},
                {"column": "population", "operation": "line"},
            ],
            "sort": {"by": "population", "order": "desc"},
            "visualization": {"type": "bar", "x": "region", "y": "count", "color": "null", "top_n": 3},
            "user_intent": {"focus": "both"},
        });
        let once = validate(&plan(v), COLUMNS).unwrap();
        let twice = validate(&once.to_raw().unwrap(), COLUMNS).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn repair_cannot_add_metrics_to_metric_free_analyses() {
        let cases = [
            (
                "correlation",
                json!({"type": "scatter", "x": "age", "y": "mean"}),
                AnalysisType::Correlation,
            ),
            (
                "distribution",
                json!({"type": "bar", "x": "age", "y": "count"}),
                AnalysisType::Distribution,
            ),
        ];
        for (name, viz, analysis_type) in cases {
            let v = with(with(base(), "analysis_type", json!(name)), "visualization", viz);
            assert_eq!(
                validate(&plan(v.clone()), COLUMNS).unwrap_err(),
                ValidationError::AnalysisTypeMetricConflict {
                    analysis_type,
                    metrics: 1,
                },
                "{name}"
            );

            // Without the repair the statistic stays in `y` and is not a column.
            let strict = Validator::new(ValidatorConfig {
                repair_metric_axis: false,
            });
            assert_eq!(
                strict.validate(&plan(v), COLUMNS).unwrap_err().kind(),
                ValidationErrorKind::InvalidAxis,
                "{name}"
            );
        }
    }

    #[test]
    fn color_is_carried_through() {
        let viz = |color: Json| {
            let v = with(
                base(),
                "visualization",
                json!({"type": "bar", "x": "country", "y": "population", "color": color}),
            );
            validate(&plan(v), COLUMNS).unwrap().visualization.unwrap().color
        };
        assert_eq!(viz(json!("not_a_column")).as_deref(), Some("not_a_column"));
        assert_eq!(viz(json!(3)).as_deref(), Some("3"));
        assert_eq!(viz(json!(["region"])), None);
    }

    #[test]
    fn input_plan_is_not_modified() {
        let v = with(
            base(),
            "visualization",
            json!({"type": "bar", "x": "country", "y": "mean"}),
        );
        let raw = plan(v.clone());
        let _ = validate(&raw, COLUMNS).unwrap();
        assert_eq!(raw.as_json(), &v);
    }
}
