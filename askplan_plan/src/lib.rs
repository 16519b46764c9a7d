// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Analysis plans and their validator.
//!
//! A planner (typically a language model) answers a natural-language question with a JSON
//! plan. This crate provides:
//! - the typed plan model ([`NormalizedPlan`] and its parts),
//! - [`Validator`], which checks a [`RawPlan`] against a table's columns and returns the
//!   normalized plan or the first [`ValidationError`], and
//! - the two planner-confusion repairs it applies on the way: [`clean_metrics`] and
//!   [`relocate_metric_axis`].
//!
//! ```
//! use askplan_plan::{RawPlan, validate};
//!
//! let raw = RawPlan::from_json_str(
//!     r#"{"analysis_type": "aggregation", "filters": [], "group_by": ["region"],
//!         "metrics": [{"column": "sales", "operation": "sum"}],
//!         "sort": {"by": "sales", "order": "desc"}, "visualization": null}"#,
//! )
//! .unwrap();
//! let plan = validate(&raw, &["region", "sales"]).unwrap();
//! assert_eq!(plan.group_by, ["region"]);
//! ```

mod clean;
mod config;
mod error;
mod repair;
mod schema;
mod validate;

pub use clean::{clean_metrics, is_chart_operation};
pub use config::ValidatorConfig;
pub use error::{ValidationError, ValidationErrorKind};
pub use repair::relocate_metric_axis;
pub use schema::{
    AnalysisType, ChartType, Filter, FilterOp, FilterValue, Focus, Literal, Metric, MetricOp,
    NormalizedPlan, RawPlan, SortOrder, SortSpec, UserIntent, VisualizationSpec,
};
pub use validate::{REQUIRED_KEYS, Validator, validate};
