// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart descriptors for analysis results.
//!
//! Rendering is out of scope. [`build_chart`] only decides whether a chart can be drawn from
//! the result table and with which columns. The returned [`ChartDescriptor`] serializes to
//! the transport shape a renderer consumes:
//!
//! ```json
//! {"type": "bar", "x": "region", "y": "sales", "color": null}
//! ```

mod descriptor;
mod mapper;

pub use askplan_plan::ChartType;
pub use descriptor::ChartDescriptor;
pub use mapper::{ConfigurationError, build_chart, resolve_y};
