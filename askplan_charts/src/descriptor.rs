// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use askplan_core::{Table, Value};
use askplan_plan::ChartType;
use serde::{Deserialize, Serialize};

/// A resolved, renderable chart request.
///
/// `x` and `y` name columns of the result table the descriptor was built against. Histograms
/// never carry `y`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    /// Chart kind.
    #[serde(rename = "type")]
    pub kind: ChartType,
    /// X-axis column.
    pub x: String,
    /// Y-axis column.
    pub y: Option<String>,
    /// Series column, passed through unchecked.
    pub color: Option<String>,
}

impl ChartDescriptor {
    /// Pairs up the x and y cells of `table`, row by row.
    ///
    /// Histograms pair each x cell with [`Value::Null`]. Returns `None` if a named column is
    /// absent from `table`.
    pub fn points<'a>(&self, table: &'a Table) -> Option<Vec<(&'a Value, &'a Value)>> {
        const NULL: &Value = &Value::Null;
        let xs = table.column(&self.x)?;
        match &self.y {
            Some(y) => {
                let ys = table.column(y)?;
                Some(xs.iter().zip(ys).collect())
            }
            None => Some(xs.iter().map(|x| (x, NULL)).collect()),
        }
    }
}
