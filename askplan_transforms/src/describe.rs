// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-column dataset summary.

use askplan_core::{Field, Table, Value};
use hashbrown::HashSet;

/// Summarizes a table, one row per column.
///
/// Output columns: `column`, `kind`, `non_null`, `nulls` and `unique` (distinct non-missing
/// values).
pub fn describe(table: &Table) -> Table {
    let n = table.column_count();
    let mut names = Vec::with_capacity(n);
    let mut kinds = Vec::with_capacity(n);
    let mut non_null = Vec::with_capacity(n);
    let mut nulls = Vec::with_capacity(n);
    let mut unique = Vec::with_capacity(n);

    for (field, values) in table.fields.iter().zip(&table.data) {
        let present = values.iter().filter(|v| !v.is_null()).count();
        let distinct = values
            .iter()
            .filter(|v| !v.is_null())
            .map(Value::group_key)
            .collect::<HashSet<_>>()
            .len();
        names.push(Value::from(field.name.as_str()));
        kinds.push(Value::from(field.kind.name()));
        non_null.push(Value::Number(present as f64));
        nulls.push(Value::Number((values.len() - present) as f64));
        unique.push(Value::Number(distinct as f64));
    }

    Table {
        row_keys: (0..n as u64).collect(),
        fields: vec![
            Field::text("column"),
            Field::text("kind"),
            Field::numeric("non_null"),
            Field::numeric("nulls"),
            Field::numeric("unique"),
        ],
        data: vec![names, kinds, non_null, nulls, unique],
    }
}
