// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pipeline error taxonomy.

use core::fmt;

use askplan_plan::ValidationError;
use askplan_transforms::ExecutionError;
use thiserror::Error;

/// Which external collaborator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collaborator {
    /// The question-to-plan collaborator.
    Planner,
    /// The result-to-narrative collaborator.
    Explainer,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Planner => "planner",
            Self::Explainer => "explainer",
        })
    }
}

/// A planner or explainer call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{collaborator} failed: {message}")]
pub struct CollaboratorError {
    /// Who failed.
    pub collaborator: Collaborator,
    /// Human-readable cause.
    pub message: String,
}

impl CollaboratorError {
    /// A planner failure.
    pub fn planner(message: impl Into<String>) -> Self {
        Self {
            collaborator: Collaborator::Planner,
            message: message.into(),
        }
    }

    /// An explainer failure.
    pub fn explainer(message: impl Into<String>) -> Self {
        Self {
            collaborator: Collaborator::Explainer,
            message: message.into(),
        }
    }
}

/// Why a question could not be answered.
///
/// - [`PipelineError::Validation`]: the plan was rejected before touching any data.
/// - [`PipelineError::Execution`]: a transform could not run (not reachable with validated
///   plans).
/// - [`PipelineError::Collaborator`]: the planner or the explainer failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Plan validation failed.
    #[error("plan validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Plan execution failed.
    #[error("execution failed: {0}")]
    Execution(#[from] ExecutionError),
    /// A collaborator failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}
