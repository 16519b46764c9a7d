// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregation stage.
//!
//! [`AggregateMode::select`] picks one of four shapes from the plan's metrics and group-by
//! keys; [`aggregate`] runs it.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use askplan_core::{ColumnKind, Field, GroupKey, Table, Value};
use askplan_plan::{Metric, MetricOp};
use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::transform::{AggregateField, Transform};

type Key = SmallVec<[GroupKey; 4]>;

/// How the aggregation stage reshapes the filtered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateMode {
    /// No group-by and a single `count` metric: one `count` cell.
    ScalarCount {
        /// Counted column.
        column: String,
    },
    /// Group-by with at least one aggregatable metric.
    Grouped(Vec<AggregateField>),
    /// Group-by whose metrics all target group-by keys: distinct key combinations.
    Distinct,
    /// Anything else: the table is left as is.
    PassThrough,
}

impl AggregateMode {
    /// Chooses the aggregation shape.
    pub fn select(metrics: &[Metric], group_by: &[String]) -> Self {
        if group_by.is_empty() {
            return match metrics {
                [only] if only.operation == MetricOp::Count => Self::ScalarCount {
                    column: only.column.clone(),
                },
                _ => Self::PassThrough,
            };
        }
        let fields = aggregation_map(metrics, group_by);
        if fields.is_empty() {
            Self::Distinct
        } else {
            Self::Grouped(fields)
        }
    }

    /// The transform that implements this mode, if any.
    pub fn into_transform(self, group_by: &[String]) -> Option<Transform> {
        match self {
            Self::ScalarCount { column } => Some(Transform::CountScalar { column }),
            Self::Grouped(fields) => Some(Transform::Aggregate {
                group_by: group_by.to_vec(),
                fields,
            }),
            Self::Distinct => Some(Transform::Distinct {
                columns: group_by.to_vec(),
            }),
            Self::PassThrough => None,
        }
    }
}

/// Builds the column-to-operation map for grouped aggregation.
///
/// Metrics on group-by keys are skipped. A column named twice keeps its first position and
/// takes the later operation.
pub fn aggregation_map(metrics: &[Metric], group_by: &[String]) -> Vec<AggregateField> {
    let mut fields: Vec<AggregateField> = Vec::with_capacity(metrics.len());
    for m in metrics {
        if group_by.contains(&m.column) {
            continue;
        }
        match fields.iter_mut().find(|f| f.column == m.column) {
            Some(existing) => existing.op = m.operation,
            None => fields.push(AggregateField::new(m.column.clone(), m.operation)),
        }
    }
    fields
}

/// Runs the aggregation stage over an already filtered table.
pub fn aggregate(table: Table, metrics: &[Metric], group_by: &[String]) -> Table {
    match AggregateMode::select(metrics, group_by) {
        AggregateMode::ScalarCount { column } => count_scalar(&table, &column),
        AggregateMode::Grouped(fields) => group(&table, group_by, &fields),
        AggregateMode::Distinct => distinct(&table, group_by),
        AggregateMode::PassThrough => table,
    }
}

pub(crate) fn count_scalar(table: &Table, column: &str) -> Table {
    let count = match (table.field(column), table.column(column)) {
        (Some(field), Some(values)) if field.kind.is_textual() => values
            .iter()
            .filter(|v| is_present(v))
            .map(Value::group_key)
            .collect::<HashSet<_>>()
            .len(),
        (Some(_), Some(_)) => table.row_count(),
        _ => {
            warn!(column, "count column not in table; counting rows");
            table.row_count()
        }
    };
    debug!(column, count, "scalar count");
    Table {
        row_keys: vec![0],
        fields: vec![Field::numeric("count")],
        data: vec![vec![Value::Number(count as f64)]],
    }
}

struct Group {
    key: Key,
    values: Vec<Value>,
    rows: Vec<usize>,
}

pub(crate) fn group(table: &Table, group_by: &[String], fields: &[AggregateField]) -> Table {
    let key_cols = resolve(table, group_by);
    let field_cols: Vec<(usize, &AggregateField)> = fields
        .iter()
        .filter_map(|f| match table.column_index(&f.column) {
            Some(ci) => Some((ci, f)),
            None => {
                warn!(column = %f.column, "aggregate column not in table; skipped");
                None
            }
        })
        .collect();

    let mut index: HashMap<Key, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    let mut dropped = 0_usize;

    'rows: for row in 0..table.row_count() {
        let mut key = Key::with_capacity(key_cols.len());
        for &ci in &key_cols {
            let v = &table.data[ci][row];
            if !is_present(v) {
                dropped += 1;
                continue 'rows;
            }
            key.push(v.group_key());
        }
        let gi = match index.get(&key).copied() {
            Some(i) => i,
            None => {
                let i = groups.len();
                groups.push(Group {
                    key: key.clone(),
                    values: key_cols.iter().map(|&ci| table.data[ci][row].clone()).collect(),
                    rows: Vec::new(),
                });
                index.insert(key, i);
                i
            }
        };
        groups[gi].rows.push(row);
    }

    groups.sort_by(|a, b| cmp_values(&a.values, &b.values));

    let mut out_fields: Vec<Field> = key_cols.iter().map(|&ci| table.fields[ci].clone()).collect();
    for &(ci, f) in &field_cols {
        let kind = match f.op {
            MetricOp::Min | MetricOp::Max => table.fields[ci].kind,
            _ => ColumnKind::Numeric,
        };
        out_fields.push(Field::new(f.column.clone(), kind));
    }

    let mut data: Vec<Vec<Value>> = vec![Vec::with_capacity(groups.len()); out_fields.len()];
    let mut row_keys = Vec::with_capacity(groups.len());
    for g in &groups {
        row_keys.push(hash_group_key(&g.key));
        for (i, v) in g.values.iter().enumerate() {
            data[i].push(v.clone());
        }
        for (fi, &(ci, f)) in field_cols.iter().enumerate() {
            let src = &table.data[ci];
            data[key_cols.len() + fi].push(reduce(g.rows.iter().map(|&r| &src[r]), f.op));
        }
    }

    debug!(
        rows = table.row_count(),
        groups = groups.len(),
        dropped,
        "grouped aggregation"
    );
    Table {
        row_keys,
        fields: out_fields,
        data,
    }
}

pub(crate) fn distinct(table: &Table, columns: &[String]) -> Table {
    let cols = resolve(table, columns);
    let mut seen: HashSet<Key> = HashSet::new();
    let mut keep = Vec::new();
    for row in 0..table.row_count() {
        let key: Key = cols.iter().map(|&ci| table.data[ci][row].group_key()).collect();
        if seen.insert(key) {
            keep.push(row);
        }
    }
    let names: Vec<&str> = cols.iter().map(|&ci| table.fields[ci].name.as_str()).collect();
    let projected = table.take_rows(&keep).project(&names).unwrap_or_default();
    debug!(rows = table.row_count(), distinct = keep.len(), "distinct key combinations");
    projected
}

/// Column indices of `names`, skipping (and logging) absent ones.
fn resolve(table: &Table, names: &[String]) -> Vec<usize> {
    names
        .iter()
        .filter_map(|name| {
            let ci = table.column_index(name);
            if ci.is_none() {
                warn!(column = %name, "group-by column not in table; skipped");
            }
            ci
        })
        .collect()
}

/// Computes one aggregate over a group's cells.
///
/// Missing cells (and NaN) are ignored throughout. Numeric operations also ignore text.
pub fn reduce<'a>(values: impl Iterator<Item = &'a Value>, op: MetricOp) -> Value {
    let present: Vec<&Value> = values.filter(|v| is_present(v)).collect();
    let mut nums: Vec<f64> = present.iter().filter_map(|v| v.as_f64()).collect();

    match op {
        MetricOp::Count => Value::Number(present.len() as f64),
        MetricOp::Sum => Value::Number(nums.iter().sum()),
        MetricOp::Mean => mean(&nums).into(),
        MetricOp::Median => {
            nums.sort_by(f64::total_cmp);
            median(&nums).into()
        }
        MetricOp::Std => std_dev(&nums).into(),
        MetricOp::Min => present
            .iter()
            .copied()
            .min_by(|a, b| a.total_cmp(b))
            .cloned()
            .unwrap_or_default(),
        MetricOp::Max => present
            .iter()
            .copied()
            .max_by(|a, b| a.total_cmp(b))
            .cloned()
            .unwrap_or_default(),
    }
}

fn mean(nums: &[f64]) -> Option<f64> {
    (!nums.is_empty()).then(|| nums.iter().sum::<f64>() / nums.len() as f64)
}

fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    }
}

/// Sample standard deviation (`n - 1` denominator).
fn std_dev(nums: &[f64]) -> Option<f64> {
    if nums.len() < 2 {
        return None;
    }
    let m = mean(nums)?;
    let ss: f64 = nums.iter().map(|x| (x - m) * (x - m)).sum();
    Some((ss / (nums.len() - 1) as f64).sqrt())
}

fn is_present(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Number(n) => !n.is_nan(),
        Value::Text(_) => true,
    }
}

fn cmp_values(a: &[Value], b: &[Value]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// FNV-1a, so group row keys do not depend on a per-process hash seed.
#[derive(Debug)]
struct Fnv1a(u64);

impl Hasher for Fnv1a {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= u64::from(b);
            self.0 = self.0.wrapping_mul(0x0100_0000_01b3);
        }
    }
}

fn hash_group_key(key: &[GroupKey]) -> u64 {
    let mut h = Fnv1a(0xcbf2_9ce4_8422_2325);
    key.hash(&mut h);
    h.finish()
}
