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


//! Report document types.
//!
//! A [`Report`] is the ordered, format-independent projection of a batch:
//! banner, counts, one section per run, then input errors. Exporters only
//! lay it out; they never look at verdicts again.

use crate::aggregate::{Outcome, StatusCounts};
use crate::metrics::MetricField;
use crate::platform::Platform;
use crate::verdict::VerdictStatus;
use serde::{Deserialize, Serialize};

/// Default report title.
pub const DEFAULT_TITLE: &str = "Performance Regression Report";

/// One row of a metrics snapshot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    /// Metric shown in this row.
    pub metric: MetricField,
    /// Human label.
    pub label: String,
    /// Raw value, if measured.
    pub value: Option<f64>,
    /// Formatted value with unit, or `n/a`.
    pub display: String,
}

/// Report section for one evaluated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Test name of the run.
    pub test_name: String,
    /// Source identifier of the run.
    pub source: String,
    /// Normalized platform.
    pub platform: Platform,
    /// Status exactly as evaluated.
    pub status: VerdictStatus,
    /// Matched baseline key.
    pub matched_key: Option<String>,
    /// Snapshot table.
    pub metrics: Vec<MetricRow>,
    /// Hard breach descriptions.
    pub failures: Vec<String>,
    /// Soft breach descriptions.
    pub warnings: Vec<String>,
    /// Resolution notes.
    pub notes: Vec<String>,
}

/// A run that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputErrorEntry {
    /// Source identifier of the malformed run.
    pub source: String,
    /// Error description.
    pub message: String,
}

/// Complete regression report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report title.
    pub title: String,
    /// Overall outcome of the batch.
    pub overall: Outcome,
    /// One-line status banner.
    pub banner: String,
    /// Per-status counts.
    pub counts: StatusCounts,
    /// One section per evaluated run, in input order.
    pub sections: Vec<ReportSection>,
    /// Malformed runs. Never counted as regressions.
    pub input_errors: Vec<InputErrorEntry>,
}

impl Report {
    /// Attaches errors for runs that could not be evaluated.
    pub fn with_input_errors<I, E>(mut self, errors: I) -> Self
    where
        I: IntoIterator<Item = (String, E)>,
        E: ToString,
    {
        self.input_errors.extend(errors.into_iter().map(|(source, error)| {
            InputErrorEntry {
                source,
                message: error.to_string(),
            }
        }));
        self
    }

    /// Whether malformed runs were attached.
    pub fn has_input_errors(&self) -> bool {
        !self.input_errors.is_empty()
    }
}
