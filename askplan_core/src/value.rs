// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar cell values.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// The declared kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Floating-point numbers.
    Numeric,
    /// Free-form text (categorical data).
    Text,
    /// Dates and timestamps, stored as their text representation.
    Temporal,
}

impl ColumnKind {
    /// Returns `true` for kinds whose values are stored as text.
    pub fn is_textual(self) -> bool {
        matches!(self, Self::Text | Self::Temporal)
    }

    /// Lowercase name, as used in summaries.
    pub fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Temporal => "temporal",
        }
    }
}

/// A single cell.
///
/// `Null` marks a missing value. Temporal cells are `Text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value.
    #[default]
    Null,
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl Value {
    /// Returns `true` if this cell is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the number, if this is a non-NaN numeric cell.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    /// Returns the text, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String form of the cell; `None` when missing.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Number(n) => Some(format!("{n}")),
            Self::Text(s) => Some(s.clone()),
        }
    }

    /// Total order over cells: numbers (by [`f64::total_cmp`]), then text
    /// (lexicographic), then missing values.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Number(_), _) | (Self::Text(_), Self::Null) => Ordering::Less,
            (Self::Null, _) | (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }

    /// Hashable identity of the cell, used for grouping and de-duplication.
    ///
    /// `-0.0` and `0.0` share a key, as do all NaN payloads.
    pub fn group_key(&self) -> GroupKey {
        match self {
            Self::Null => GroupKey::Null,
            Self::Number(n) if n.is_nan() => GroupKey::Number(f64::NAN.to_bits()),
            Self::Number(n) if *n == 0.0 => GroupKey::Number(0_f64.to_bits()),
            Self::Number(n) => GroupKey::Number(n.to_bits()),
            Self::Text(s) => GroupKey::Text(s.clone()),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Hashable identity of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Missing value.
    Null,
    /// Bit pattern of a normalized `f64`.
    Number(u64),
    /// Text value.
    Text(String),
}

/// Lenient numeric reading of a cell.
///
/// The cell is rendered to text, every `%` is removed, surrounding whitespace is trimmed and
/// the rest is parsed as `f64`. Anything that does not parse (or parses to NaN) is missing.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => (!n.is_nan()).then_some(*n),
        Value::Text(s) => coerce_numeric_str(s),
    }
}

/// [`coerce_numeric`] for a bare string.
pub fn coerce_numeric_str(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|&c| c != '%').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn coerce_strips_percent_and_whitespace() {
        assert_eq!(coerce_numeric(&Value::from(" 15% ")), Some(15.0));
        assert_eq!(coerce_numeric(&Value::from("5%")), Some(5.0));
        assert_eq!(coerce_numeric(&Value::from("%%2.5")), Some(2.5));
        assert_eq!(coerce_numeric(&Value::from(7.0)), Some(7.0));
    }

    #[test]
    fn coerce_failures_are_missing() {
        assert_eq!(coerce_numeric(&Value::from("n/a")), None);
        assert_eq!(coerce_numeric(&Value::from("1,000")), None);
        assert_eq!(coerce_numeric(&Value::from("NaN")), None);
        assert_eq!(coerce_numeric(&Value::Null), None);
        assert_eq!(coerce_numeric(&Value::Number(f64::NAN)), None);
    }

    #[test]
    fn total_cmp_orders_numbers_then_text_then_missing() {
        let mut v = [
            Value::Null,
            Value::from("b"),
            Value::from(2.0),
            Value::from("a"),
            Value::from(-1.0),
        ];
        v.sort_by(Value::total_cmp);
        assert_eq!(
            v,
            [
                Value::from(-1.0),
                Value::from(2.0),
                Value::from("a"),
                Value::from("b"),
                Value::Null,
            ]
        );
    }

    #[test]
    fn signed_zero_shares_group_key() {
        assert_eq!(Value::from(0.0).group_key(), Value::from(-0.0).group_key());
        assert_ne!(Value::from(1.0).group_key(), Value::from("1").group_key());
    }
}
