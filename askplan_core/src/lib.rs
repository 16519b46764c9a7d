// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Columnar table model for the askplan plan interpreter.
//!
//! This crate provides:
//! - [`Table`]: ordered, named, typed columns with a stable key per row, and
//! - [`Value`]: the scalar cell type (numbers, text, missing), plus the lenient
//!   [`coerce_numeric`] reading used by relational filters.
//!
//! Temporal columns are carried as text; their [`ColumnKind`] only records intent.

#![no_std]

extern crate alloc;

mod table;
mod value;

pub use table::{Field, Table, TableError};
pub use value::{ColumnKind, GroupKey, Value, coerce_numeric, coerce_numeric_str};
