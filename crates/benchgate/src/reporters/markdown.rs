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


//! Markdown export, suitable for pull-request comments.

use crate::reporters::types::{Report, ReportSection};
use crate::verdict::VerdictStatus;
use std::fs;
use std::io;
use std::path::Path;

fn status_label(status: VerdictStatus) -> &'static str {
    match status {
        VerdictStatus::Passed => "PASSED",
        VerdictStatus::Warning => "WARNING",
        VerdictStatus::Failed => "FAILED",
        VerdictStatus::Unmatched => "UNMATCHED",
    }
}

fn push_list(md: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    md.push_str(&format!("**{}**\n\n", heading));
    for item in items {
        md.push_str(&format!("- {}\n", item));
    }
    md.push('\n');
}

fn push_section(md: &mut String, section: &ReportSection) {
    md.push_str(&format!(
        "### {} ({}) - {}\n\n",
        section.test_name,
        section.platform,
        status_label(section.status)
    ));
    md.push_str(&format!("- **Source:** `{}`\n", section.source));
    match &section.matched_key {
        Some(key) => md.push_str(&format!("- **Baseline:** `{}`\n\n", key)),
        None => md.push_str("- **Baseline:** none\n\n"),
    }

    md.push_str("| Metric | Value |\n");
    md.push_str("|--------|-------|\n");
    for row in &section.metrics {
        md.push_str(&format!("| {} | {} |\n", row.label, row.display));
    }
    md.push('\n');

    push_list(md, "Failures", &section.failures);
    push_list(md, "Warnings", &section.warnings);
    push_list(md, "Notes", &section.notes);
}

/// Renders the report as Markdown.
pub fn to_markdown(report: &Report) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.title));
    md.push_str(&format!(
        "**Overall status: {}**\n\n> {}\n\n",
        report.overall.as_str().to_uppercase(),
        report.banner
    ));

    md.push_str("## Summary\n\n");
    md.push_str("| Status | Count |\n");
    md.push_str("|--------|-------|\n");
    for status in [
        VerdictStatus::Passed,
        VerdictStatus::Warning,
        VerdictStatus::Failed,
        VerdictStatus::Unmatched,
    ] {
        md.push_str(&format!(
            "| {} | {} |\n",
            status_label(status),
            report.counts.get(status)
        ));
    }
    md.push('\n');

    if !report.sections.is_empty() {
        md.push_str("## Results\n\n");
        for section in &report.sections {
            push_section(&mut md, section);
        }
    }

    if !report.input_errors.is_empty() {
        md.push_str("## Input Errors\n\n");
        md.push_str("These runs could not be evaluated and are not counted above.\n\n");
        for error in &report.input_errors {
            md.push_str(&format!("- `{}`: {}\n", error.source, error.message));
        }
        md.push('\n');
    }

    md
}

/// Writes the Markdown report to `path`.
pub fn export_markdown(report: &Report, path: &Path) -> io::Result<()> {
    fs::write(path, to_markdown(report))
}
