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

//! End-to-end evaluation of runs against a baseline table.

use crate::aggregate::{aggregate, BatchSummary};
use crate::baseline::{resolve, BaselineTable};
use crate::error::RecordError;
use crate::metrics::RunInput;
use crate::verdict::{evaluate, Verdict};
use serde::Serialize;
use tracing::{debug, warn};

/// Validates, resolves and evaluates a single run.
///
/// # Errors
///
/// Returns a [`RecordError`] when the record is malformed or lacks a metric
/// its matched baseline checks.
pub fn evaluate_run(run: &RunInput, table: &BaselineTable) -> Result<Verdict, RecordError> {
    run.record.validate(&run.source)?;

    let resolution = resolve(&run.record.test_name, &run.platform, table);
    let verdict = match resolution.entry {
        Some(entry) => evaluate(&run.record, entry, &run.source)?,
        None => Verdict::unmatched(&run.record, resolution.platform),
    };
    let verdict = Verdict {
        platform: resolution.platform,
        ..verdict
    }
    .with_notes(resolution.notes);

    debug!(
        source = %run.source,
        test = %verdict.test_name,
        status = %verdict.status,
        "evaluated run"
    );

    Ok(verdict)
}

/// A successfully evaluated run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedRun {
    /// Source identifier of the run.
    pub source: String,
    /// Its verdict.
    pub verdict: Verdict,
}

/// Outcome of evaluating a batch of runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEvaluation {
    /// Evaluated runs in input order.
    pub runs: Vec<EvaluatedRun>,
    /// Malformed runs in input order. Not counted in `summary`.
    pub errors: Vec<RecordError>,
    /// Aggregate over `runs` only.
    pub summary: BatchSummary,
}

impl BatchEvaluation {
    /// Iterates `(verdict, source)` pairs, the shape the renderer takes.
    pub fn verdicts(&self) -> impl Iterator<Item = (&Verdict, &str)> {
        self.runs.iter().map(|run| (&run.verdict, run.source.as_str()))
    }

    /// Whether any run was malformed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Evaluates every run; a malformed run never stops the batch.
pub fn evaluate_batch<'a, I>(runs: I, table: &BaselineTable) -> BatchEvaluation
where
    I: IntoIterator<Item = &'a RunInput>,
{
    let mut evaluated = Vec::new();
    let mut errors = Vec::new();

    for run in runs {
        match evaluate_run(run, table) {
            Ok(verdict) => evaluated.push(EvaluatedRun {
                source: run.source.clone(),
                verdict,
            }),
            Err(e) => {
                warn!(source = %run.source, error = %e, "skipping malformed run");
                errors.push(e);
            }
        }
    }

    let summary = aggregate(evaluated.iter().map(|run| &run.verdict));

    BatchEvaluation {
        runs: evaluated,
        errors,
        summary,
    }
}
