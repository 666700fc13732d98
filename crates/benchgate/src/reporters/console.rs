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


//! Plain-text rendering for terminals and CI logs.

use crate::reporters::types::Report;

/// Renders the report as plain text.
pub fn to_text(report: &Report) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);
    let thin = "-".repeat(80);

    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("{}\n", report.title.to_uppercase()));
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!(
        "Overall: {}\n",
        report.overall.as_str().to_uppercase()
    ));
    out.push_str(&format!("{}\n", report.banner));
    out.push_str(&format!(
        "Passed: {}  Warning: {}  Failed: {}  Unmatched: {}\n",
        report.counts.passed, report.counts.warning, report.counts.failed, report.counts.unmatched
    ));

    for section in &report.sections {
        out.push_str(&format!("\n{}\n", thin));
        out.push_str(&format!(
            "[{}] {} ({})\n",
            section.status.as_str().to_uppercase(),
            section.test_name,
            section.platform
        ));
        out.push_str(&format!("  Source:   {}\n", section.source));
        out.push_str(&format!(
            "  Baseline: {}\n",
            section.matched_key.as_deref().unwrap_or("none")
        ));
        for row in &section.metrics {
            out.push_str(&format!("  {:<14} {}\n", row.label, row.display));
        }
        for failure in &section.failures {
            out.push_str(&format!("  FAIL: {}\n", failure));
        }
        for warning in &section.warnings {
            out.push_str(&format!("  WARN: {}\n", warning));
        }
        for note in &section.notes {
            out.push_str(&format!("  NOTE: {}\n", note));
        }
    }

    if !report.input_errors.is_empty() {
        out.push_str(&format!("\n{}\n", thin));
        out.push_str("INPUT ERRORS (not counted as regressions):\n");
        for error in &report.input_errors {
            out.push_str(&format!("  {}: {}\n", error.source, error.message));
        }
    }

    out.push_str(&format!("{}\n", rule));
    out
}

/// Prints the report to stdout.
pub fn print_report(report: &Report) {
    print!("{}", to_text(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::BatchSummary;
    use crate::baseline::{BaselineEntry, ResolutionNote};
    use crate::metrics::MetricRecord;
    use crate::platform::Platform;
    use crate::reporters::render::render;
    use crate::verdict::evaluate;

    #[test]
    fn test_text_lists_breaches_and_notes() {
        let entry = BaselineEntry::new(Platform::Linux, "lat")
            .with_max_latency_p99(20.0)
            .with_max_violation(1.0)
            .with_tolerance(0.0);
        let record = MetricRecord::new("lat_sample")
            .with_latency_p99(25.0)
            .with_violation_rate(4.0);
        let verdict = evaluate(&record, &entry, "w.json").unwrap().with_notes(vec![
            ResolutionNote::SectionFallback {
                requested: Platform::Windows,
                used: Platform::Linux,
            },
        ]);
        let mut summary = BatchSummary::default();
        summary.record(verdict.status);

        let text = to_text(&render(&summary, [(&verdict, "w.json")]));
        assert!(text.contains("Overall: FAILED"));
        assert!(text.contains("[FAILED] lat_sample (linux)"));
        assert!(text.contains("FAIL: latency_p99_us"));
        assert!(text.contains("WARN: violation_rate_percent"));
        assert!(text.contains("NOTE: no baselines for windows"));
        assert!(!text.contains("INPUT ERRORS"));
    }

    #[test]
    fn test_print_report() {
        let report = render(&BatchSummary::default(), Vec::<(&crate::Verdict, &str)>::new());
        print_report(&report);
        // Visual test - just ensure it doesn't panic
    }
}
