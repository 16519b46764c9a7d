// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display selection.
//!
//! The explainer always sees the full result. Only what is shown to the user is cut down
//! here, according to the plan's user intent.

use askplan_core::Table;
use askplan_plan::{Focus, UserIntent};

/// The rows chosen for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRows {
    /// The rows to show.
    pub table: Table,
    /// Row count of the full result.
    pub total_rows: usize,
    /// One-line description of what is shown.
    pub caption: String,
}

/// Picks the rows of `result` to show.
///
/// - focus `highest` or `lowest`: the first row;
/// - focus `both`: the first and the last row (once, if they are the same row);
/// - otherwise: up to `display_limit` rows from the top.
pub fn select_rows(
    result: &Table,
    user_intent: Option<&UserIntent>,
    display_limit: usize,
) -> DisplayRows {
    let total = result.row_count();
    let focus = user_intent.and_then(|intent| intent.focus);

    let (rows, caption): (Vec<usize>, String) = match focus {
        Some(focus @ (Focus::Highest | Focus::Lowest)) => {
            let label = if focus == Focus::Highest {
                "highest"
            } else {
                "lowest"
            };
            (
                (0..total.min(1)).collect(),
                format!("Showing the {label} value from {total} total records analyzed"),
            )
        }
        Some(Focus::Both) => {
            let mut rows: Vec<usize> = Vec::with_capacity(2);
            if total > 0 {
                rows.push(0);
                let last = total - 1;
                if result.row_keys[last] != result.row_keys[0] {
                    rows.push(last);
                }
            }
            (
                rows,
                format!("Showing highest and lowest from {total} total records analyzed"),
            )
        }
        Some(Focus::General) | None => {
            let shown = display_limit.min(total);
            let caption = if total > shown {
                format!("Showing first {shown} of {total} total results")
            } else {
                format!("Showing all {total} results")
            };
            ((0..shown).collect(), caption)
        }
    };

    DisplayRows {
        table: result.take_rows(&rows),
        total_rows: total,
        caption,
    }
}
