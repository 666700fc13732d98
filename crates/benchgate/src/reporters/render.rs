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


//! Projection of verdicts into a [`Report`].

use crate::aggregate::{BatchSummary, Outcome};
use crate::metrics::format_value;
use crate::reporters::types::{MetricRow, Report, ReportSection, DEFAULT_TITLE};
use crate::verdict::Verdict;

/// Placeholder for metrics a run did not report.
pub const MISSING_VALUE: &str = "n/a";

/// One-line banner for a summary.
pub fn banner(summary: &BatchSummary) -> String {
    let counts = &summary.counts;
    let total = counts.total();
    match summary.overall {
        Outcome::Failed => format!(
            "Performance regression detected: {} of {} runs failed",
            counts.failed, total
        ),
        Outcome::Warning => format!(
            "No regressions, {} of {} runs raised warnings",
            counts.warning, total
        ),
        Outcome::Passed if total == 0 => "No runs evaluated".to_string(),
        Outcome::Passed if counts.unmatched == total => {
            "No baseline applies to any run".to_string()
        }
        Outcome::Passed => "All performance checks passed".to_string(),
    }
}

fn section(verdict: &Verdict, source: &str) -> ReportSection {
    let metrics = verdict
        .metrics_snapshot
        .rows()
        .map(|(field, value)| MetricRow {
            metric: field,
            label: field.label().to_string(),
            value,
            display: value
                .map(|v| format_value(field, v))
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
        })
        .collect();

    ReportSection {
        test_name: verdict.test_name.clone(),
        source: source.to_string(),
        platform: verdict.platform,
        status: verdict.status,
        matched_key: verdict.matched_key.clone(),
        metrics,
        failures: verdict.failure_messages().map(str::to_string).collect(),
        warnings: verdict.warning_messages().map(str::to_string).collect(),
        notes: verdict.notes.iter().map(|n| n.to_string()).collect(),
    }
}

/// Builds the report: banner, counts, then one section per verdict.
///
/// Statuses are copied from the summary and verdicts as-is.
pub fn render<'a, I, S>(summary: &BatchSummary, verdicts: I) -> Report
where
    I: IntoIterator<Item = (&'a Verdict, S)>,
    S: AsRef<str>,
{
    Report {
        title: DEFAULT_TITLE.to_string(),
        overall: summary.overall,
        banner: banner(summary),
        counts: summary.counts,
        sections: verdicts
            .into_iter()
            .map(|(verdict, source)| section(verdict, source.as_ref()))
            .collect(),
        input_errors: Vec::new(),
    }
}
