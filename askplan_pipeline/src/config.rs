// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use askplan_plan::ValidatorConfig;
use serde::{Deserialize, Serialize};

/// Pipeline and analyst settings.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use askplan_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::from_json_str(r#"{"display_limit": 10}"#).unwrap();
/// assert_eq!(config.display_limit, 10);
/// assert!(config.validator.repair_metric_axis);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Validator switches.
    pub validator: ValidatorConfig,
    /// Maximum number of result rows shown when the user has no particular focus.
    pub display_limit: usize,
    /// Maximum number of history entries kept; `None` keeps everything.
    pub history_capacity: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            validator: ValidatorConfig::default(),
            display_limit: 50,
            history_capacity: None,
        }
    }
}

impl PipelineConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
