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

//! Per-run verdicts.
//!
//! [`evaluate`] checks every bound present in a baseline entry against the
//! corresponding measured metric:
//!
//! | Bound | Metric | Direction | Breach |
//! |-------|--------|-----------|--------|
//! | `min_throughput_msgs_per_sec` | `throughput_msgs_per_sec` | min | failure |
//! | `max_memory_mb` | `peak_memory_mb` | max | failure |
//! | `max_latency_p99_us` | `latency_p99_us` | max | failure |
//! | `max_violation_percent` | `violation_rate_percent` | max | warning |
//!
//! Any failure makes the verdict `failed`; otherwise any warning makes it
//! `warning`; otherwise it is `passed`.

use crate::baseline::{BaselineEntry, BoundKind, ResolutionNote};
use crate::error::RecordError;
use crate::metrics::{format_value, format_value_exact, MetricField, MetricRecord, MetricsSnapshot};
use crate::platform::Platform;
use crate::tolerance::{effective_limit, within_bound, Direction};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a bound breach affects the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Soft breach, reported but never fails a run.
    Warning,
    /// Hard breach, fails the run.
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    /// All checked bounds hold.
    Passed,
    /// Only soft bounds were breached.
    Warning,
    /// At least one hard bound was breached.
    Failed,
    /// No baseline applies to this run.
    Unmatched,
}

impl VerdictStatus {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Passed => "passed",
            VerdictStatus::Warning => "warning",
            VerdictStatus::Failed => "failed",
            VerdictStatus::Unmatched => "unmatched",
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One breached bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breach {
    /// Which bound was breached.
    pub bound_kind: BoundKind,
    /// Measured metric.
    pub metric: MetricField,
    /// Measured value.
    pub actual: f64,
    /// Bound from the baseline.
    pub bound: f64,
    /// Tolerance applied to the bound.
    pub tolerance_percent: f64,
    /// Bound after tolerance.
    pub limit: f64,
    /// Failure or warning.
    pub severity: Severity,
    /// Ready-to-print description.
    pub message: String,
}

impl Breach {
    fn new(kind: BoundKind, actual: f64, bound: f64, tolerance_percent: f64) -> Self {
        let metric = kind.field();
        let direction = kind.direction();
        let limit = effective_limit(bound, tolerance_percent, direction);
        let relation = match direction {
            Direction::Min => "below minimum",
            Direction::Max => "above maximum",
        };
        let (actual_text, limit_text) = breach_values(metric, actual, limit);
        let message = format!(
            "{} {} {} {} (limit {} with {}% tolerance)",
            metric,
            actual_text,
            relation,
            format_value(metric, bound),
            limit_text,
            tolerance_percent
        );

        Self {
            bound_kind: kind,
            metric,
            actual,
            bound,
            tolerance_percent,
            limit,
            severity: kind.severity(),
            message,
        }
    }
}

/// Formats the actual value and the limit so a breach never prints them equal.
fn breach_values(metric: MetricField, actual: f64, limit: f64) -> (String, String) {
    let actual_text = format_value(metric, actual);
    let limit_text = format_value(metric, limit);
    if actual_text != limit_text {
        return (actual_text, limit_text);
    }
    (
        format_value_exact(metric, actual),
        format_value_exact(metric, limit),
    )
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of evaluating one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Test name of the evaluated record.
    pub test_name: String,
    /// Normalized platform.
    pub platform: Platform,
    /// Overall status of the run.
    pub status: VerdictStatus,
    /// Key of the baseline entry that applied.
    pub matched_key: Option<String>,
    /// Hard breaches, in bound order.
    pub failures: Vec<Breach>,
    /// Soft breaches, in bound order.
    pub warnings: Vec<Breach>,
    /// Headline metrics for display.
    pub metrics_snapshot: MetricsSnapshot,
    /// Resolution fallbacks that affected this run.
    pub notes: Vec<ResolutionNote>,
}

impl Verdict {
    /// Verdict for a run without an applicable baseline.
    pub fn unmatched(record: &MetricRecord, platform: Platform) -> Self {
        Self {
            test_name: record.test_name.clone(),
            platform,
            status: VerdictStatus::Unmatched,
            matched_key: None,
            failures: Vec::new(),
            warnings: Vec::new(),
            metrics_snapshot: record.snapshot(),
            notes: Vec::new(),
        }
    }

    /// Attaches resolution notes.
    pub fn with_notes(mut self, notes: Vec<ResolutionNote>) -> Self {
        self.notes = notes;
        self
    }

    /// Failure messages.
    pub fn failure_messages(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|b| b.message.as_str())
    }

    /// Warning messages.
    pub fn warning_messages(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().map(|b| b.message.as_str())
    }
}

/// Status precedence: failures dominate warnings.
pub fn derive_status(failures: &[Breach], warnings: &[Breach]) -> VerdictStatus {
    if !failures.is_empty() {
        VerdictStatus::Failed
    } else if !warnings.is_empty() {
        VerdictStatus::Warning
    } else {
        VerdictStatus::Passed
    }
}

/// Evaluates `record` against a resolved baseline entry.
///
/// `source` identifies the record in error messages.
///
/// # Errors
///
/// Returns [`RecordError::MissingField`] when the entry checks a metric the
/// record does not carry.
pub fn evaluate(
    record: &MetricRecord,
    entry: &BaselineEntry,
    source: &str,
) -> Result<Verdict, RecordError> {
    let mut failures = Vec::new();
    let mut warnings = Vec::new();

    for (kind, bound) in entry.bounds() {
        let field = kind.field();
        let actual = record.get(field).ok_or_else(|| RecordError::MissingField {
            source_id: source.to_string(),
            test_name: record.test_name.clone(),
            field,
            test_key: entry.test_key.clone(),
        })?;

        if within_bound(actual, bound, entry.tolerance_percent, kind.direction()) {
            continue;
        }

        let breach = Breach::new(kind, actual, bound, entry.tolerance_percent);
        match breach.severity {
            Severity::Failure => failures.push(breach),
            Severity::Warning => warnings.push(breach),
        }
    }

    Ok(Verdict {
        test_name: record.test_name.clone(),
        platform: entry.platform,
        status: derive_status(&failures, &warnings),
        matched_key: Some(entry.test_key.clone()),
        failures,
        warnings,
        metrics_snapshot: record.snapshot(),
        notes: Vec::new(),
    })
}
