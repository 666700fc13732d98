// Dweve Benchgate - Performance Regression Gate
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Verdict aggregation.
//!
//! Folds per-run verdicts into status counts and an overall outcome. The fold
//! is commutative and associative, so verdicts may arrive in any order (for
//! example from a parallel evaluation) and partial summaries can be merged.

use crate::verdict::{Verdict, VerdictStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall outcome of a batch.
///
/// Ordered by severity so the overall outcome is the maximum over runs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// No run failed or warned.
    #[default]
    Passed,
    /// At least one run warned, none failed.
    Warning,
    /// At least one run failed.
    Failed,
}

impl Outcome {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Warning => "warning",
            Outcome::Failed => "failed",
        }
    }

    /// Contribution of a single verdict status. Unmatched runs contribute nothing.
    pub fn from_status(status: VerdictStatus) -> Option<Self> {
        match status {
            VerdictStatus::Passed => Some(Outcome::Passed),
            VerdictStatus::Warning => Some(Outcome::Warning),
            VerdictStatus::Failed => Some(Outcome::Failed),
            VerdictStatus::Unmatched => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of verdicts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Passed runs.
    pub passed: usize,
    /// Runs with warnings only.
    pub warning: usize,
    /// Failed runs.
    pub failed: usize,
    /// Runs without an applicable baseline.
    pub unmatched: usize,
}

impl StatusCounts {
    /// Counts one status.
    pub fn record(&mut self, status: VerdictStatus) {
        match status {
            VerdictStatus::Passed => self.passed += 1,
            VerdictStatus::Warning => self.warning += 1,
            VerdictStatus::Failed => self.failed += 1,
            VerdictStatus::Unmatched => self.unmatched += 1,
        }
    }

    /// Adds another set of counts.
    pub fn merge(&mut self, other: &StatusCounts) {
        self.passed += other.passed;
        self.warning += other.warning;
        self.failed += other.failed;
        self.unmatched += other.unmatched;
    }

    /// Total number of counted verdicts.
    pub fn total(&self) -> usize {
        self.passed + self.warning + self.failed + self.unmatched
    }

    /// Count for one status.
    pub fn get(&self, status: VerdictStatus) -> usize {
        match status {
            VerdictStatus::Passed => self.passed,
            VerdictStatus::Warning => self.warning,
            VerdictStatus::Failed => self.failed,
            VerdictStatus::Unmatched => self.unmatched,
        }
    }
}

/// Counts plus overall outcome of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Per-status counts.
    pub counts: StatusCounts,
    /// Overall outcome; unmatched runs never affect it.
    pub overall: Outcome,
}

impl BatchSummary {
    /// Folds one status into the summary.
    pub fn record(&mut self, status: VerdictStatus) {
        self.counts.record(status);
        if let Some(outcome) = Outcome::from_status(status) {
            self.overall = self.overall.max(outcome);
        }
    }

    /// Combines two partial summaries.
    pub fn merge(mut self, other: BatchSummary) -> Self {
        self.counts.merge(&other.counts);
        self.overall = self.overall.max(other.overall);
        self
    }

    /// Total number of verdicts.
    pub fn total(&self) -> usize {
        self.counts.total()
    }
}

/// Aggregates verdicts into a [`BatchSummary`].
///
/// An empty batch is `passed` with all counts zero.
pub fn aggregate<'a, I>(verdicts: I) -> BatchSummary
where
    I: IntoIterator<Item = &'a Verdict>,
{
    let mut summary = BatchSummary::default();
    for verdict in verdicts {
        summary.record(verdict.status);
    }
    summary
}
