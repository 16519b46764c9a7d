// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sort and top-N stages.

use core::cmp::Ordering;

use askplan_core::{Table, Value};
use askplan_plan::{SortOrder, SortSpec, UserIntent};
use tracing::debug;

/// Sorts by `sort` (if it names a result column), then truncates to `top_n` rows unless the
/// user asked for both ends of the result.
pub fn order(
    table: Table,
    sort: Option<&SortSpec>,
    top_n: Option<u64>,
    user_intent: Option<&UserIntent>,
) -> Table {
    let table = match sort {
        Some(spec) => sort_by(table, &spec.by, spec.order),
        None => table,
    };
    match row_limit(top_n, user_intent) {
        Some(n) => head(table, n),
        None => table,
    }
}

/// How many rows the top-N stage keeps, if it truncates at all.
///
/// A focus on both ends of the result overrides `top_n`.
pub fn row_limit(top_n: Option<u64>, user_intent: Option<&UserIntent>) -> Option<usize> {
    let n = top_n?;
    if user_intent.is_some_and(UserIntent::wants_both_ends) {
        debug!(top_n = n, "focus is both ends; top_n skipped");
        return None;
    }
    Some(usize::try_from(n).unwrap_or(usize::MAX))
}

/// Stable sort on one column; missing values go last in either direction.
///
/// Returns the table unchanged if the column is absent.
pub fn sort_by(table: Table, by: &str, order: SortOrder) -> Table {
    let Some(ci) = table.column_index(by) else {
        debug!(column = by, "sort column not in result; sort skipped");
        return table;
    };
    let col = &table.data[ci];
    let mut idx: Vec<usize> = (0..table.row_count()).collect();
    idx.sort_by(|&a, &b| cmp_cells(&col[a], &col[b], order));
    table.take_rows(&idx)
}

/// Keeps the first `n` rows.
pub fn head(table: Table, n: usize) -> Table {
    if table.row_count() <= n {
        return table;
    }
    let idx: Vec<usize> = (0..n).collect();
    table.take_rows(&idx)
}

fn cmp_cells(a: &Value, b: &Value, order: SortOrder) -> Ordering {
    match (missing(a), missing(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.total_cmp(b);
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        }
    }
}

fn missing(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Number(n) => n.is_nan(),
        Value::Text(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use askplan_core::Field;
    use askplan_plan::Focus;

    use super::*;

    fn table() -> Table {
        Table::from_columns(vec![
            (
                Field::text("country"),
                vec!["FR".into(), "DE".into(), "IT".into(), "ES".into(), "PT".into()],
            ),
            (
                Field::numeric("population"),
                vec![68.0.into(), 84.0.into(), Value::Null, 48.0.into(), 68.0.into()],
            ),
        ])
        .unwrap()
    }

    fn spec(by: &str, order: SortOrder) -> SortSpec {
        SortSpec {
            by: by.into(),
            order,
        }
    }

    #[test]
    fn sorts_stably_with_missing_last() {
        let asc = sort_by(table(), "population", SortOrder::Asc);
        assert_eq!(asc.row_keys, vec![3, 0, 4, 1, 2]);

        let desc = sort_by(table(), "population", SortOrder::Desc);
        // Ties keep input order; missing stays last.
        assert_eq!(desc.row_keys, vec![1, 0, 4, 3, 2]);
    }

    #[test]
    fn unknown_sort_column_is_skipped() {
        let out = order(table(), Some(&spec("gdp", SortOrder::Desc)), None, None);
        assert_eq!(out, table());
    }

    #[test]
    fn top_n_truncates_after_sorting() {
        let out = order(
            table(),
            Some(&spec("population", SortOrder::Desc)),
            Some(2),
            None,
        );
        assert_eq!(out.column("country").unwrap(), &[Value::from("DE"), Value::from("FR")]);

        let out = order(table(), None, Some(50), None);
        assert_eq!(out.row_count(), 5);
    }

    #[test]
    fn focus_on_both_ends_skips_top_n() {
        let intent = UserIntent {
            focus: Some(Focus::Both),
            ..UserIntent::default()
        };
        let out = order(
            table(),
            Some(&spec("population", SortOrder::Asc)),
            Some(1),
            Some(&intent),
        );
        assert_eq!(out.row_count(), 5);
        assert_eq!(out.row_keys[0], 3);

        let highest = UserIntent {
            focus: Some(Focus::Highest),
            ..UserIntent::default()
        };
        let out = order(table(), None, Some(1), Some(&highest));
        assert_eq!(out.row_count(), 1);
    }

    #[test]
    fn row_limit_needs_top_n_and_a_single_end() {
        let both = UserIntent {
            focus: Some(Focus::Both),
            ..UserIntent::default()
        };
        assert_eq!(row_limit(Some(3), None), Some(3));
        assert_eq!(row_limit(Some(3), Some(&UserIntent::default())), Some(3));
        assert_eq!(row_limit(Some(3), Some(&both)), None);
        assert_eq!(row_limit(None, None), None);
    }
}
