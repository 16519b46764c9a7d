// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// Validator switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Move a statistic written into `visualization.y` into the metric list.
    ///
    /// When off, such a plan fails with `InvalidAxis`.
    pub repair_metric_axis: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            repair_metric_axis: true,
        }
    }
}
