// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The question-answering loop.

use askplan_core::Table;
use askplan_plan::NormalizedPlan;
use askplan_transforms::describe::describe;
use tracing::{info, info_span};

use crate::collaborators::{Explainer, Planner, is_dataset_info_query};
use crate::config::PipelineConfig;
use crate::display::{DisplayRows, select_rows};
use crate::error::PipelineError;
use crate::history::{History, InvocationId};
use crate::pipeline::{Analysis, Pipeline};

/// Answer to a question about the dataset itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetAnswer {
    /// Per-column summary.
    pub summary: Table,
    /// The explainer's description.
    pub insight: String,
}

/// Answer to an analytical question.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisAnswer {
    /// History id of this answer.
    pub invocation: InvocationId,
    /// The validated plan.
    pub plan: NormalizedPlan,
    /// Full execution output.
    pub analysis: Analysis,
    /// The explainer's narrative, written from the full result.
    pub insight: String,
    /// The part of the result to show.
    pub display: DisplayRows,
}

/// What [`Analyst::ask`] returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// The question asked about the dataset itself.
    Dataset(DatasetAnswer),
    /// The question was planned and executed.
    Analysis(Box<AnalysisAnswer>),
}

/// Answers questions over tables with a planner and an explainer.
#[derive(Debug)]
pub struct Analyst<P, E> {
    planner: P,
    explainer: E,
    pipeline: Pipeline,
    display_limit: usize,
    history: History,
}

impl<P: Planner, E: Explainer> Analyst<P, E> {
    /// Creates an analyst with an empty history.
    pub fn new(planner: P, explainer: E, config: &PipelineConfig) -> Self {
        let history = match config.history_capacity {
            Some(cap) => History::with_capacity(cap),
            None => History::new(),
        };
        Self {
            planner,
            explainer,
            pipeline: Pipeline::new(config.validator),
            display_limit: config.display_limit,
            history,
        }
    }

    /// Answered questions so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable access to the history, e.g. to clear it.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Answers `question` over `table`.
    ///
    /// Dataset-information questions are answered from a column summary and are not
    /// recorded. Anything else is planned, validated and executed; the explainer sees the
    /// full result before display selection, and the answer is appended to the history.
    pub fn ask(&mut self, question: &str, table: &Table) -> Result<Answer, PipelineError> {
        let span = info_span!("analysis", invocation = %self.history.next_id());
        let _enter = span.enter();

        if is_dataset_info_query(question) {
            info!(columns = table.column_count(), "dataset information query");
            let summary = describe(table);
            let insight = self.explainer.describe_dataset(table, &summary)?;
            return Ok(Answer::Dataset(DatasetAnswer { summary, insight }));
        }

        let columns: Vec<String> = table.column_names().map(str::to_owned).collect();
        let raw = self.planner.plan(&columns, question)?;
        let run = self.pipeline.run(&raw, table)?;
        let insight = self.explainer.explain(question, &run.analysis, &run.plan)?;
        let shown = select_rows(
            &run.analysis.result,
            run.plan.user_intent.as_ref(),
            self.display_limit,
        );

        let invocation = self.history.push(
            question,
            run.plan.clone(),
            run.analysis.result.clone(),
            insight.clone(),
        );
        info!(
            analysis_type = run.plan.analysis_type.name(),
            result_rows = run.analysis.result.row_count(),
            shown_rows = shown.table.row_count(),
            "question answered"
        );

        Ok(Answer::Analysis(Box::new(AnalysisAnswer {
            invocation,
            plan: run.plan,
            analysis: run.analysis,
            insight,
            display: shown,
        })))
    }
}
