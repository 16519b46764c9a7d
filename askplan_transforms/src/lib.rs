// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table stages for executing analysis plans.
//!
//! This crate provides:
//! - the three plan stages as plain functions over owned tables: [`filter::apply`],
//!   [`aggregate::aggregate`] and [`order::order`],
//! - a small transform IR ([`Transform`]) plus a [`Program`] executor that compiles a
//!   [`NormalizedPlan`](askplan_plan::NormalizedPlan) into those stages, and
//! - [`describe::describe`], a per-column summary used for dataset overviews.
//!
//! Every stage preserves upstream `row_keys` for the rows it keeps. Grouped aggregation
//! derives a deterministic key per group.

pub mod aggregate;
pub mod describe;
pub mod filter;
pub mod order;
mod program;
mod transform;

pub use aggregate::AggregateMode;
pub use program::{ExecutionError, Program, ProgramOutput};
pub use transform::{AggregateField, Transform};
