// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row filtering.
//!
//! Filters are a conjunction applied in list order. Two comparison regimes coexist:
//! - relational operators (`>`, `<`, `>=`, `<=`) coerce both sides to numbers, and
//! - `==`, `!=` and `in` compare cells as stored.

use askplan_core::{ColumnKind, Table, Value, coerce_numeric, coerce_numeric_str};
use askplan_plan::{Filter, FilterOp, FilterValue, Literal};
use serde_json::Value as Json;
use tracing::{debug, warn};

/// Applies `filters` in order, keeping rows that satisfy all of them.
pub fn apply(table: Table, filters: &[Filter]) -> Table {
    filters.iter().fold(table, apply_one)
}

/// Applies one filter.
///
/// A relational filter replaces its column with the column's numeric coercion (unparseable
/// cells become missing) and then drops rows whose coerced value is missing. A filter on a
/// column the table does not have keeps no rows.
pub fn apply_one(mut table: Table, filter: &Filter) -> Table {
    let Some(ci) = table.column_index(&filter.column) else {
        warn!(column = %filter.column, "filter column not in table; no rows match");
        return table.take_rows(&[]);
    };
    let before = table.row_count();

    let keep: Vec<usize> = if filter.op.is_relational() {
        coerce_column(&mut table, ci);
        let Some(rhs) = numeric_rhs(&filter.value) else {
            warn!(
                column = %filter.column,
                operator = filter.op.symbol(),
                value = ?filter.value,
                "relational filter value is not numeric; no rows match"
            );
            return table.take_rows(&[]);
        };
        rows_where(&table.data[ci], |v| {
            v.as_f64().is_some_and(|lhs| compare(filter.op, lhs, rhs))
        })
    } else {
        let column = &table.data[ci];
        match filter.op {
            FilterOp::Eq => rows_where(column, |v| value_eq(v, &filter.value)),
            FilterOp::Ne => rows_where(column, |v| !value_eq(v, &filter.value)),
            _ => {
                let members = membership_list(&filter.value);
                rows_where(column, |v| members.iter().any(|m| literal_eq(v, m)))
            }
        }
    };

    let out = table.take_rows(&keep);
    debug!(
        column = %filter.column,
        operator = filter.op.symbol(),
        before,
        after = out.row_count(),
        "applied filter"
    );
    out
}

fn rows_where(column: &[Value], mut pred: impl FnMut(&Value) -> bool) -> Vec<usize> {
    column
        .iter()
        .enumerate()
        .filter_map(|(row, v)| pred(v).then_some(row))
        .collect()
}

fn coerce_column(table: &mut Table, ci: usize) {
    let coerced = table.data[ci]
        .iter()
        .map(|v| Value::from(coerce_numeric(v)))
        .collect();
    table.data[ci] = coerced;
    table.fields[ci].kind = ColumnKind::Numeric;
}

/// Right-hand side of a relational filter, read with the same leniency as the cells.
fn numeric_rhs(value: &FilterValue) -> Option<f64> {
    match value {
        FilterValue::Scalar(Literal::Number(n)) => (!n.is_nan()).then_some(*n),
        FilterValue::Scalar(Literal::Text(s)) => coerce_numeric_str(s),
        FilterValue::Scalar(Literal::Bool(b)) => Some(bool_to_f64(*b)),
        FilterValue::Scalar(Literal::Null) | FilterValue::List(_) => None,
    }
}

fn compare(op: FilterOp, lhs: f64, rhs: f64) -> bool {
    match op {
        FilterOp::Gt => lhs > rhs,
        FilterOp::Lt => lhs < rhs,
        FilterOp::Ge => lhs >= rhs,
        FilterOp::Le => lhs <= rhs,
        FilterOp::Eq | FilterOp::Ne | FilterOp::In => false,
    }
}

fn value_eq(cell: &Value, value: &FilterValue) -> bool {
    match value {
        FilterValue::Scalar(lit) => literal_eq(cell, lit),
        FilterValue::List(_) => false,
    }
}

/// Equality between a cell and a literal.
///
/// Numbers compare numerically and booleans read as `1`/`0`. Text compares exactly. A
/// number never equals text, and a missing value equals nothing.
pub fn literal_eq(cell: &Value, lit: &Literal) -> bool {
    match lit {
        Literal::Null => false,
        Literal::Bool(b) => cell.as_f64() == Some(bool_to_f64(*b)),
        Literal::Number(n) => cell.as_f64() == Some(*n),
        Literal::Text(s) => cell.as_str() == Some(s.as_str()),
    }
}

/// Members of an `in` filter.
///
/// A text value shaped like a bracketed list (`"['EU', 'NA']"`) is parsed as one, with single
/// quotes read as double quotes. If that fails the text is a single member. Other scalars are
/// a singleton list.
pub fn membership_list(value: &FilterValue) -> Vec<Literal> {
    match value {
        FilterValue::List(items) => items.clone(),
        FilterValue::Scalar(Literal::Text(s)) if s.starts_with('[') && s.ends_with(']') => {
            parse_list_literal(s).unwrap_or_else(|| vec![Literal::Text(s.clone())])
        }
        FilterValue::Scalar(lit) => vec![lit.clone()],
    }
}

fn parse_list_literal(s: &str) -> Option<Vec<Literal>> {
    match serde_json::from_str::<Json>(&s.replace('\'', "\"")).ok()? {
        Json::Array(items) => items.iter().map(Literal::from_json).collect(),
        _ => None,
    }
}

fn bool_to_f64(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
