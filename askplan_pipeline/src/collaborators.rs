// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planner and explainer seams.
//!
//! Both are typically backed by a language model. Their output is untrusted: plans go
//! through the validator, and insights are passed along as text.

use askplan_core::Table;
use askplan_plan::{NormalizedPlan, RawPlan};

use crate::error::CollaboratorError;
use crate::pipeline::Analysis;

/// Turns a question into a raw plan.
pub trait Planner {
    /// Plans `question` over a table with the given columns.
    fn plan(&self, columns: &[String], question: &str) -> Result<RawPlan, CollaboratorError>;
}

/// Turns results into narrative insight.
pub trait Explainer {
    /// Explains a full (undisplayed) analysis result.
    fn explain(
        &self,
        question: &str,
        analysis: &Analysis,
        plan: &NormalizedPlan,
    ) -> Result<String, CollaboratorError>;

    /// Describes a dataset, given the table and its per-column summary.
    fn describe_dataset(&self, table: &Table, summary: &Table) -> Result<String, CollaboratorError>;
}

/// Phrases that mark a question about the dataset itself rather than its contents.
pub const DATASET_INFO_KEYWORDS: &[&str] = &[
    "dataset information",
    "dataset info",
    "describe dataset",
    "data overview",
    "summary of dataset",
    "about the dataset",
    "dataset summary",
];

/// Returns `true` if `question` asks about the dataset itself. Case-insensitive.
pub fn is_dataset_info_query(question: &str) -> bool {
    let q = question.to_lowercase();
    DATASET_INFO_KEYWORDS.iter().any(|k| q.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_info_keywords() {
        assert!(is_dataset_info_query("Give me a Data Overview please"));
        assert!(is_dataset_info_query("what is this dataset information?"));
        assert!(is_dataset_info_query("DATASET SUMMARY"));
        assert!(!is_dataset_info_query("which country has the highest population?"));
        assert!(!is_dataset_info_query("summarize sales by region"));
    }
}
