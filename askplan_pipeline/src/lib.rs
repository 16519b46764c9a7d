// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end analysis runs.
//!
//! The core path is [`Pipeline::run`]: validate a raw plan against a table, then
//! [`execute`] it (filter, aggregate, sort, truncate, map the chart). Around it sits
//! [`Analyst`], which asks a [`Planner`] for the plan, hands the full result to an
//! [`Explainer`], picks the rows to display and records the answer in a [`History`].
//!
//! Every invocation works on its own copy of the caller's table.

mod analyst;
mod collaborators;
mod config;
pub mod display;
mod error;
mod history;
mod pipeline;

pub use analyst::{AnalysisAnswer, Analyst, Answer, DatasetAnswer};
pub use collaborators::{DATASET_INFO_KEYWORDS, Explainer, Planner, is_dataset_info_query};
pub use config::PipelineConfig;
pub use display::{DisplayRows, select_rows};
pub use error::{Collaborator, CollaboratorError, PipelineError};
pub use history::{History, HistoryEntry, InvocationId};
pub use pipeline::{Analysis, Pipeline, Run, execute};
