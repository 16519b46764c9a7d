// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validation error taxonomy.

use serde_json::Value as Json;
use thiserror::Error;

use crate::schema::AnalysisType;

/// A plan rejected by the validator.
///
/// Validation is fail-fast: the first violation is reported. Every variant carries the
/// offending field or value, and the allowed vocabulary where one exists, so callers can
/// display a precise message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The plan (or one of its parts) does not have the expected JSON shape.
    #[error("malformed plan at `{field}`: {reason}")]
    Malformed {
        /// Path of the offending field.
        field: String,
        /// What was expected.
        reason: &'static str,
    },

    /// A required top-level key is absent.
    #[error("missing key: {key}")]
    MissingKey {
        /// The missing key.
        key: &'static str,
    },

    /// `analysis_type` is not in the closed vocabulary.
    #[error("invalid analysis_type `{value}` (allowed: {allowed:?})")]
    InvalidAnalysisType {
        /// The offending value.
        value: String,
        /// Allowed analysis types.
        allowed: &'static [&'static str],
    },

    /// A filter names a column the table does not have.
    #[error("invalid filter column `{column}` in filter #{index}")]
    InvalidFilterColumn {
        /// Position of the filter.
        index: usize,
        /// The offending column.
        column: String,
    },

    /// A filter operator is not in the closed vocabulary.
    #[error("invalid operator `{operator}` in filter #{index} (allowed: {allowed:?})")]
    InvalidOperator {
        /// Position of the filter.
        index: usize,
        /// The offending operator.
        operator: String,
        /// Allowed operators.
        allowed: &'static [&'static str],
    },

    /// An `in` filter whose value is not a list.
    #[error("operator `in` on `{column}` requires a list value, got `{value}`")]
    InvalidOperatorValue {
        /// Position of the filter.
        index: usize,
        /// Filtered column.
        column: String,
        /// The offending value.
        value: String,
    },

    /// A group-by key names a column the table does not have.
    #[error("invalid group_by column `{column}`")]
    InvalidGroupByColumn {
        /// The offending column.
        column: String,
    },

    /// A metric operation is neither statistical nor a droppable chart-type name.
    #[error(
        "invalid metric operation `{operation}` in metric #{index}; only statistical operations are allowed ({allowed:?})"
    )]
    InvalidMetricOperation {
        /// Position of the metric.
        index: usize,
        /// The offending operation.
        operation: String,
        /// Allowed operations.
        allowed: &'static [&'static str],
    },

    /// A metric names a column the table does not have.
    #[error("invalid metric column `{column}` in metric #{index}")]
    InvalidMetricColumn {
        /// Position of the metric.
        index: usize,
        /// The offending column.
        column: String,
    },

    /// Distribution or correlation analysis with metrics.
    #[error("{analysis_type} analysis must not contain metrics (got {metrics})")]
    AnalysisTypeMetricConflict {
        /// The analysis type.
        analysis_type: AnalysisType,
        /// Number of metrics left after cleaning.
        metrics: usize,
    },

    /// Chart type not in the closed vocabulary.
    #[error("invalid visualization type `{value}` (allowed: {allowed:?})")]
    InvalidVisualizationType {
        /// The offending value.
        value: String,
        /// Allowed chart types.
        allowed: &'static [&'static str],
    },

    /// Histogram with a y-axis, or without an x-axis.
    #[error("{reason}")]
    HistogramAxisConflict {
        /// Which rule was broken.
        reason: &'static str,
    },

    /// Correlation analysis without a two-axis scatter chart.
    #[error("{reason}")]
    CorrelationAxisConflict {
        /// Which rule was broken.
        reason: &'static str,
    },

    /// An axis names a column the table does not have.
    #[error("invalid {axis}-axis `{column}`")]
    InvalidAxis {
        /// `"x"` or `"y"`.
        axis: &'static str,
        /// The offending column.
        column: String,
    },

    /// `top_n` is not a positive integer.
    #[error("top_n must be a positive integer, got `{value}`")]
    InvalidTopN {
        /// The offending value.
        value: String,
    },
}

/// Fieldless discriminant of [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// See [`ValidationError::Malformed`].
    Malformed,
    /// See [`ValidationError::MissingKey`].
    MissingKey,
    /// See [`ValidationError::InvalidAnalysisType`].
    InvalidAnalysisType,
    /// See [`ValidationError::InvalidFilterColumn`].
    InvalidFilterColumn,
    /// See [`ValidationError::InvalidOperator`].
    InvalidOperator,
    /// See [`ValidationError::InvalidOperatorValue`].
    InvalidOperatorValue,
    /// See [`ValidationError::InvalidGroupByColumn`].
    InvalidGroupByColumn,
    /// See [`ValidationError::InvalidMetricOperation`].
    InvalidMetricOperation,
    /// See [`ValidationError::InvalidMetricColumn`].
    InvalidMetricColumn,
    /// See [`ValidationError::AnalysisTypeMetricConflict`].
    AnalysisTypeMetricConflict,
    /// See [`ValidationError::InvalidVisualizationType`].
    InvalidVisualizationType,
    /// See [`ValidationError::HistogramAxisConflict`].
    HistogramAxisConflict,
    /// See [`ValidationError::CorrelationAxisConflict`].
    CorrelationAxisConflict,
    /// See [`ValidationError::InvalidAxis`].
    InvalidAxis,
    /// See [`ValidationError::InvalidTopN`].
    InvalidTopN,
}

impl ValidationError {
    /// Returns the error's kind.
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::Malformed { .. } => ValidationErrorKind::Malformed,
            Self::MissingKey { .. } => ValidationErrorKind::MissingKey,
            Self::InvalidAnalysisType { .. } => ValidationErrorKind::InvalidAnalysisType,
            Self::InvalidFilterColumn { .. } => ValidationErrorKind::InvalidFilterColumn,
            Self::InvalidOperator { .. } => ValidationErrorKind::InvalidOperator,
            Self::InvalidOperatorValue { .. } => ValidationErrorKind::InvalidOperatorValue,
            Self::InvalidGroupByColumn { .. } => ValidationErrorKind::InvalidGroupByColumn,
            Self::InvalidMetricOperation { .. } => ValidationErrorKind::InvalidMetricOperation,
            Self::InvalidMetricColumn { .. } => ValidationErrorKind::InvalidMetricColumn,
            Self::AnalysisTypeMetricConflict { .. } => {
                ValidationErrorKind::AnalysisTypeMetricConflict
            }
            Self::InvalidVisualizationType { .. } => ValidationErrorKind::InvalidVisualizationType,
            Self::HistogramAxisConflict { .. } => ValidationErrorKind::HistogramAxisConflict,
            Self::CorrelationAxisConflict { .. } => ValidationErrorKind::CorrelationAxisConflict,
            Self::InvalidAxis { .. } => ValidationErrorKind::InvalidAxis,
            Self::InvalidTopN { .. } => ValidationErrorKind::InvalidTopN,
        }
    }

    pub(crate) fn malformed(field: impl Into<String>, reason: &'static str) -> Self {
        Self::Malformed {
            field: field.into(),
            reason,
        }
    }
}

/// Text form of an offending JSON value: strings verbatim, everything else as JSON.
pub(crate) fn render(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}
