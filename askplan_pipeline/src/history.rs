// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-owned question history.

use core::fmt;
use std::collections::VecDeque;

use askplan_core::Table;
use askplan_plan::NormalizedPlan;
use serde::{Deserialize, Serialize};

/// Identifies one answered question.
///
/// Ids are assigned in push order and never reused, even after eviction or [`History::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InvocationId(pub u64);

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Assigned on push.
    pub id: InvocationId,
    /// The question as asked.
    pub question: String,
    /// The plan that answered it.
    pub plan: NormalizedPlan,
    /// The full (undisplayed) result.
    pub result: Table,
    /// The explainer's narrative.
    pub insight: String,
}

/// Append-only log of answered questions.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: Option<usize>,
    next: u64,
}

impl History {
    /// Creates an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history that keeps at most `capacity` entries, evicting the oldest.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// The id the next [`push`](Self::push) will assign.
    pub fn next_id(&self) -> InvocationId {
        InvocationId(self.next)
    }

    /// Appends an entry and returns its id.
    pub fn push(
        &mut self,
        question: impl Into<String>,
        plan: NormalizedPlan,
        result: Table,
        insight: impl Into<String>,
    ) -> InvocationId {
        let id = self.next_id();
        self.next += 1;
        self.entries.push_back(HistoryEntry {
            id,
            question: question.into(),
            plan,
            result,
            insight: insight.into(),
        });
        if let Some(cap) = self.capacity {
            while self.entries.len() > cap {
                self.entries.pop_front();
            }
        }
        id
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    /// Entries, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter().rev()
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: InvocationId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
