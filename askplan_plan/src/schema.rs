// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plan data model.
//!
//! Two layers:
//! - [`RawPlan`] wraps whatever JSON the planner produced. Nothing about it is trusted.
//! - [`NormalizedPlan`] is the typed, internally consistent plan returned by
//!   [`crate::validate`]. Execution stages only ever see this type.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Untrusted plan as received from the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPlan(Json);

impl RawPlan {
    /// Wraps a JSON value.
    pub fn new(value: Json) -> Self {
        Self(value)
    }

    /// Parses a plan from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s).map(Self)
    }

    /// The wrapped JSON value.
    pub fn as_json(&self) -> &Json {
        &self.0
    }

    /// Unwraps the JSON value.
    pub fn into_json(self) -> Json {
        self.0
    }
}

impl From<Json> for RawPlan {
    fn from(value: Json) -> Self {
        Self(value)
    }
}

/// Kind of analysis the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    /// Compare categories against each other.
    Comparison,
    /// Change over an ordered (usually temporal) dimension.
    Trend,
    /// Summary statistics, optionally grouped.
    Aggregation,
    /// Relationship between two columns.
    Correlation,
    /// Spread of a single column.
    Distribution,
}

impl AnalysisType {
    /// Every analysis type, in vocabulary order.
    pub const ALL: [Self; 5] = [
        Self::Comparison,
        Self::Trend,
        Self::Aggregation,
        Self::Correlation,
        Self::Distribution,
    ];

    /// Vocabulary names, aligned with [`Self::ALL`].
    pub const NAMES: &'static [&'static str] = &[
        "comparison",
        "trend",
        "aggregation",
        "correlation",
        "distribution",
    ];

    /// Transport name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Comparison => "comparison",
            Self::Trend => "trend",
            Self::Aggregation => "aggregation",
            Self::Correlation => "correlation",
            Self::Distribution => "distribution",
        }
    }

    /// Parses a transport name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == s)
    }

    /// Distribution and correlation analyses operate on raw rows and carry no metrics.
    pub fn forbids_metrics(self) -> bool {
        matches!(self, Self::Distribution | Self::Correlation)
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Filter operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOp {
    /// `==`
    #[serde(rename = "==")]
    Eq,
    /// `!=`
    #[serde(rename = "!=")]
    Ne,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// Set membership.
    #[serde(rename = "in")]
    In,
}

impl FilterOp {
    /// Every operator, in vocabulary order.
    pub const ALL: [Self; 7] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Lt,
        Self::Ge,
        Self::Le,
        Self::In,
    ];

    /// Vocabulary symbols, aligned with [`Self::ALL`].
    pub const NAMES: &'static [&'static str] = &["==", "!=", ">", "<", ">=", "<=", "in"];

    /// Transport symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::In => "in",
        }
    }

    /// Parses a transport symbol.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.symbol() == s)
    }

    /// `>`, `<`, `>=` and `<=` compare numerically after coercion.
    pub fn is_relational(self) -> bool {
        matches!(self, Self::Gt | Self::Lt | Self::Ge | Self::Le)
    }
}

/// A scalar constant from a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(f64),
    /// JSON string.
    Text(String),
}

impl Literal {
    /// Reads a JSON scalar. Arrays and objects are not literals.
    pub fn from_json(value: &Json) -> Option<Self> {
        match value {
            Json::Null => Some(Self::Null),
            Json::Bool(b) => Some(Self::Bool(*b)),
            Json::Number(n) => n.as_f64().map(Self::Number),
            Json::String(s) => Some(Self::Text(s.clone())),
            Json::Array(_) | Json::Object(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Right-hand side of a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A list of scalars (required by `in` after validation).
    List(Vec<Literal>),
    /// A single scalar.
    Scalar(Literal),
}

/// One conjunct of the plan's row filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Column to test.
    pub column: String,
    /// Operator.
    #[serde(rename = "operator")]
    pub op: FilterOp,
    /// Right-hand value.
    pub value: FilterValue,
}

/// Statistical operation of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricOp {
    /// Sum of numeric values.
    Sum,
    /// Arithmetic mean.
    Mean,
    /// Count of non-missing values.
    Count,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
    /// Median.
    Median,
    /// Sample standard deviation.
    Std,
}

impl MetricOp {
    /// Every operation, in vocabulary order.
    pub const ALL: [Self; 7] = [
        Self::Sum,
        Self::Mean,
        Self::Count,
        Self::Min,
        Self::Max,
        Self::Median,
        Self::Std,
    ];

    /// Vocabulary names, aligned with [`Self::ALL`].
    pub const NAMES: &'static [&'static str] =
        &["sum", "mean", "count", "min", "max", "median", "std"];

    /// Transport name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Count => "count",
            Self::Min => "min",
            Self::Max => "max",
            Self::Median => "median",
            Self::Std => "std",
        }
    }

    /// Parses a transport name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == s)
    }
}

impl fmt::Display for MetricOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A column plus the statistic to compute over it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metric {
    /// Input column.
    pub column: String,
    /// Operation to apply.
    pub operation: MetricOp,
}

impl Metric {
    /// Creates a metric.
    pub fn new(column: impl Into<String>, operation: MetricOp) -> Self {
        Self {
            column: column.into(),
            operation,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Anything other than `"desc"` sorts ascending.
    pub fn parse_lenient(s: Option<&str>) -> Self {
        match s {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column of the result table to sort by.
    pub by: String,
    /// Direction.
    #[serde(default)]
    pub order: SortOrder,
}

/// Chart kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Bar chart.
    Bar,
    /// Line chart.
    Line,
    /// Scatter plot.
    Scatter,
    /// Histogram of one column.
    Histogram,
}

impl ChartType {
    /// Every chart type, in vocabulary order.
    pub const ALL: [Self; 4] = [Self::Bar, Self::Line, Self::Scatter, Self::Histogram];

    /// Vocabulary names, aligned with [`Self::ALL`].
    pub const NAMES: &'static [&'static str] = &["bar", "line", "scatter", "histogram"];

    /// Transport name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Scatter => "scatter",
            Self::Histogram => "histogram",
        }
    }

    /// Parses a transport name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == s)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Requested chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualizationSpec {
    /// Chart kind.
    #[serde(rename = "type")]
    pub chart: ChartType,
    /// X-axis column.
    pub x: Option<String>,
    /// Y-axis column.
    pub y: Option<String>,
    /// Series/grouping column, passed through to the renderer.
    pub color: Option<String>,
    /// Truncate the result to its first `top_n` rows.
    pub top_n: Option<u64>,
}

/// What part of the result the user cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    /// The largest value.
    Highest,
    /// The smallest value.
    Lowest,
    /// Both ends of the result.
    Both,
    /// No particular focus.
    General,
}

impl Focus {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "highest" => Some(Self::Highest),
            "lowest" => Some(Self::Lowest),
            "both" => Some(Self::Both),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

/// Planner hints about presentation. Display-only: never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIntent {
    /// Focus of the question.
    pub focus: Option<Focus>,
    /// Row limit the user stated explicitly.
    pub explicit_limit: Option<u64>,
    /// The user asked for the highest value.
    pub show_highest: Option<bool>,
    /// The user asked for the lowest value.
    pub show_lowest: Option<bool>,
}

impl UserIntent {
    /// Reads intent hints field by field; unreadable fields are left unset.
    ///
    /// Returns `None` for anything that is not a JSON object.
    pub fn from_json(value: &Json) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            focus: obj.get("focus").and_then(Json::as_str).and_then(Focus::parse),
            explicit_limit: obj.get("explicit_limit").and_then(Json::as_u64),
            show_highest: obj.get("show_highest").and_then(Json::as_bool),
            show_lowest: obj.get("show_lowest").and_then(Json::as_bool),
        })
    }

    /// Returns `true` when the user wants both ends of the result.
    pub fn wants_both_ends(&self) -> bool {
        self.focus == Some(Focus::Both)
    }
}

/// A validated plan.
///
/// Produced only by [`crate::validate`]; every column it names existed in the table it was
/// validated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPlan {
    /// Kind of analysis.
    pub analysis_type: AnalysisType,
    /// Row filters, applied as a conjunction in order.
    pub filters: Vec<Filter>,
    /// Group-by key columns.
    pub group_by: Vec<String>,
    /// Metrics, after cleaning and repair.
    pub metrics: Vec<Metric>,
    /// Result ordering.
    pub sort: Option<SortSpec>,
    /// Requested chart.
    pub visualization: Option<VisualizationSpec>,
    /// Presentation hints, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_intent: Option<UserIntent>,
}

impl NormalizedPlan {
    /// Re-encodes the plan in its transport shape.
    pub fn to_raw(&self) -> Result<RawPlan, serde_json::Error> {
        serde_json::to_value(self).map(RawPlan)
    }

    /// `visualization.top_n`, if any.
    pub fn top_n(&self) -> Option<u64> {
        self.visualization.as_ref().and_then(|v| v.top_n)
    }
}
