// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned columnar table.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::value::{ColumnKind, Value};

/// Errors returned when building or reshaping a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A column was given an empty name.
    #[error("column names must not be empty")]
    EmptyColumnName,
    /// Two columns share a name.
    #[error("duplicate column `{0}`")]
    DuplicateColumn(String),
    /// A column's length does not match the table's row count.
    #[error("column `{column}` has {found} values, expected {expected}")]
    LengthMismatch {
        /// The offending column.
        column: String,
        /// The table's row count.
        expected: usize,
        /// The column's length.
        found: usize,
    },
}

/// A named, typed column slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Declared kind.
    pub kind: ColumnKind,
}

impl Field {
    /// Creates a field.
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Creates a numeric field.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Numeric)
    }

    /// Creates a text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Text)
    }

    /// Creates a temporal (text-encoded) field.
    pub fn temporal(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Temporal)
    }
}

/// An owned table: ordered named columns plus a stable key per row.
///
/// The representation is deliberately plain:
/// - `row_keys` identify rows across filtering and sorting,
/// - `fields` and `data` are aligned, one `Vec<Value>` per field,
/// - every column has exactly `row_keys.len()` values.
///
/// Fields are public so stages can assemble outputs directly; [`Table::check`] re-validates
/// the shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Stable keys for each row.
    pub row_keys: Vec<u64>,
    /// Column descriptors.
    pub fields: Vec<Field>,
    /// Columnar data, aligned to `fields`.
    pub data: Vec<Vec<Value>>,
}

impl Table {
    /// Creates a table with the given columns and no rows.
    pub fn new(fields: Vec<Field>) -> Result<Self, TableError> {
        let data = fields.iter().map(|_| Vec::new()).collect();
        let table = Self {
            row_keys: Vec::new(),
            fields,
            data,
        };
        table.check()?;
        Ok(table)
    }

    /// Builds a table from `(field, values)` pairs. Row keys are `0..n`.
    pub fn from_columns(columns: Vec<(Field, Vec<Value>)>) -> Result<Self, TableError> {
        let n = columns.first().map_or(0, |(_, v)| v.len());
        let mut table = Self {
            row_keys: (0..n as u64).collect(),
            fields: Vec::with_capacity(columns.len()),
            data: Vec::with_capacity(columns.len()),
        };
        for (field, values) in columns {
            table.push_column(field, values)?;
        }
        Ok(table)
    }

    /// Appends a column.
    pub fn push_column(&mut self, field: Field, values: Vec<Value>) -> Result<(), TableError> {
        if field.name.is_empty() {
            return Err(TableError::EmptyColumnName);
        }
        if self.column_index(&field.name).is_some() {
            return Err(TableError::DuplicateColumn(field.name));
        }
        if values.len() != self.row_count() {
            return Err(TableError::LengthMismatch {
                column: field.name,
                expected: self.row_count(),
                found: values.len(),
            });
        }
        self.fields.push(field);
        self.data.push(values);
        Ok(())
    }

    /// Validates the table shape.
    pub fn check(&self) -> Result<(), TableError> {
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(TableError::EmptyColumnName);
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(TableError::DuplicateColumn(field.name.clone()));
            }
            let found = self.data.get(i).map_or(0, Vec::len);
            if found != self.row_count() {
                return Err(TableError::LengthMismatch {
                    column: field.name.clone(),
                    expected: self.row_count(),
                    found,
                });
            }
        }
        Ok(())
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_keys.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty()
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.fields.len()
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns `true` if a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns the index of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns the field descriptor of a column, if present.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns a column's values, if present.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        let ci = self.column_index(name)?;
        self.data.get(ci).map(Vec::as_slice)
    }

    /// Gets a cell if both the row and the column exist.
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name)?.get(row)
    }

    /// Returns the cells of one row, in column order.
    pub fn row(&self, row: usize) -> Option<Vec<&Value>> {
        if row >= self.row_count() {
            return None;
        }
        Some(self.data.iter().map(|col| &col[row]).collect())
    }

    /// Gathers rows by index, carrying their row keys. Indices may repeat.
    ///
    /// Panics if an index is out of bounds.
    pub fn take_rows(&self, rows: &[usize]) -> Self {
        let row_keys = rows.iter().map(|&r| self.row_keys[r]).collect();
        let data = self
            .data
            .iter()
            .map(|src| rows.iter().map(|&r| src[r].clone()).collect())
            .collect();
        Self {
            row_keys,
            fields: self.fields.clone(),
            data,
        }
    }

    /// Selects a subset of columns, in the given order.
    ///
    /// Returns `None` if any column is missing.
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Option<Self> {
        let mut fields = Vec::with_capacity(names.len());
        let mut data = Vec::with_capacity(names.len());
        for name in names {
            let ci = self.column_index(name.as_ref())?;
            fields.push(self.fields[ci].clone());
            data.push(self.data[ci].clone());
        }
        Some(Self {
            row_keys: self.row_keys.clone(),
            fields,
            data,
        })
    }
}
