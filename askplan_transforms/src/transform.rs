// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform IR types.

use askplan_plan::{Filter, MetricOp, SortOrder};

/// A single aggregated output column.
///
/// The output column is named after its input column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateField {
    /// Input column.
    pub column: String,
    /// Operation to apply.
    pub op: MetricOp,
}

impl AggregateField {
    /// Creates a field.
    pub fn new(column: impl Into<String>, op: MetricOp) -> Self {
        Self {
            column: column.into(),
            op,
        }
    }
}

/// A table transform from the current table to the next one.
///
/// Transforms run in order; each consumes the previous output.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Keep only rows that satisfy a filter.
    ///
    /// Relational filters also replace the filtered column with its numeric coercion.
    Filter(Filter),
    /// Record the current table as the program's filtered output.
    Snapshot,
    /// Collapse the table into a single `count` cell.
    ///
    /// Text and temporal columns count distinct non-missing values; numeric columns count
    /// rows.
    CountScalar {
        /// Counted column.
        column: String,
    },
    /// Group rows by one or more key columns and compute aggregates.
    ///
    /// Output columns are `group_by` (in order) followed by one column per field (in order).
    /// Rows with a missing key are dropped; groups come out in ascending key order.
    Aggregate {
        /// Group-by key columns.
        group_by: Vec<String>,
        /// Aggregated fields.
        fields: Vec<AggregateField>,
    },
    /// Distinct combinations of `columns`, in first-occurrence order.
    Distinct {
        /// Columns to keep and de-duplicate on.
        columns: Vec<String>,
    },
    /// Stable sort by a column, missing values last.
    ///
    /// Skipped when the column is absent.
    Sort {
        /// Column used as the sort key.
        by: String,
        /// Sort order.
        order: SortOrder,
    },
    /// Keep the first `n` rows.
    Head {
        /// Row limit.
        n: usize,
    },
}

impl Transform {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Filter(_) => "filter",
            Self::Snapshot => "snapshot",
            Self::CountScalar { .. } => "count",
            Self::Aggregate { .. } => "aggregate",
            Self::Distinct { .. } => "distinct",
            Self::Sort { .. } => "sort",
            Self::Head { .. } => "head",
        }
    }
}
