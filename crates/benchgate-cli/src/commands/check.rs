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


//! Check command - evaluate result files against a baseline table

use super::{collect_result_files, write_output};
use crate::batch::{BatchConfig, BatchProcessor, LoadResultsOperation};
use crate::error::CliError;
use benchgate::gate::{EXIT_BLOCK, EXIT_PASS};
use benchgate::{
    evaluate_batch, export_json, export_markdown, gate_exit_code, load_baseline_table, render,
    to_json, to_markdown, to_text, BatchEvaluation, Outcome, Report, RunInput,
};
use clap::ValueEnum;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

/// Format of the report printed to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// Markdown, suitable for PR comments
    Markdown,
}

/// Options of the `check` command.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Baseline table (YAML or JSON).
    pub baseline: PathBuf,
    /// Result files or directories.
    pub results: Vec<PathBuf>,
    /// Platform tag for records that carry none.
    pub platform: Option<String>,
    /// Exit 1 when the batch failed.
    pub enforce: bool,
    /// Also write a Markdown report here.
    pub markdown: Option<PathBuf>,
    /// Also write a JSON report here.
    pub json: Option<PathBuf>,
    /// Stdout format.
    pub format: OutputFormat,
    /// Always load files in parallel.
    pub parallel: bool,
    /// Exit 1 when any file or record could not be evaluated.
    pub fail_on_input_errors: bool,
}

/// Runs to evaluate, plus `(source, message)` for inputs that failed to load.
type CollectedRuns = (Vec<RunInput>, Vec<(String, String)>);

fn collect_runs(options: &CheckOptions) -> Result<CollectedRuns, CliError> {
    let files = collect_result_files(&options.results)?;
    if files.is_empty() {
        return Err(CliError::invalid_input("no result files found"));
    }

    let processor = BatchProcessor::new(BatchConfig {
        force_parallel: options.parallel,
        ..Default::default()
    });
    let loaded = processor.process(&files, LoadResultsOperation::new(options.platform.clone()));

    let mut runs = Vec::new();
    let mut input_errors = Vec::new();
    for file in loaded.results {
        match file.result {
            Ok(results) => {
                runs.extend(results.runs);
                input_errors.extend(results.errors.iter().map(input_error));
            }
            Err(e) => input_errors.push((file.path.display().to_string(), e.to_string())),
        }
    }

    Ok((runs, input_errors))
}

fn input_error(error: &CliError) -> (String, String) {
    match error {
        CliError::Results { source_id, message } => (source_id.clone(), message.clone()),
        other => (String::new(), other.to_string()),
    }
}

fn build_report(batch: &BatchEvaluation, file_errors: Vec<(String, String)>) -> Report {
    let record_errors = batch
        .errors
        .iter()
        .map(|e| (e.source_id().to_string(), e.to_string()));

    render(&batch.summary, batch.verdicts())
        .with_input_errors(file_errors.into_iter().chain(record_errors))
}

fn print_gate_line(outcome: Outcome, enforce: bool, exit_code: i32, input_errors: usize) {
    let line = match (outcome, enforce, exit_code != EXIT_PASS) {
        (Outcome::Failed, true, _) => "✗ Regressions detected, blocking".red().bold(),
        (Outcome::Failed, false, _) => "! Regressions detected (not enforced)".yellow().bold(),
        (_, _, true) => "✗ Input errors, blocking".red().bold(),
        (_, _, false) => "✓ Performance gate passed".green().bold(),
    };
    eprintln!("{}", line);
    if input_errors > 0 {
        eprintln!(
            "{} {} input error(s) not evaluated",
            "!".yellow().bold(),
            input_errors
        );
    }
}

/// Evaluate result files against a baseline table.
///
/// Prints the report to stdout, writes the optional report files and returns
/// the process exit code.
///
/// # Errors
///
/// Returns `Err` if the baseline cannot be loaded, no result files are found,
/// or a report cannot be written. Unreadable result files and malformed
/// records are reported in the report instead.
pub fn check(options: &CheckOptions) -> Result<i32, CliError> {
    let table = load_baseline_table(&options.baseline)?;
    let (runs, file_errors) = collect_runs(options)?;

    let batch = evaluate_batch(&runs, &table);
    let report = build_report(&batch, file_errors);

    info!(
        runs = runs.len(),
        passed = report.counts.passed,
        warning = report.counts.warning,
        failed = report.counts.failed,
        unmatched = report.counts.unmatched,
        input_errors = report.input_errors.len(),
        overall = %report.overall,
        "evaluation finished"
    );

    let rendered = match options.format {
        OutputFormat::Text => to_text(&report),
        OutputFormat::Json => to_json(&report)? + "\n",
        OutputFormat::Markdown => to_markdown(&report),
    };
    write_output(&rendered, None)?;

    if let Some(path) = &options.markdown {
        export_markdown(&report, path).map_err(|e| CliError::io_error(path, e))?;
        info!(path = %path.display(), "wrote markdown report");
    }
    if let Some(path) = &options.json {
        export_json(&report, path).map_err(|e| CliError::io_error(path, e))?;
        info!(path = %path.display(), "wrote json report");
    }

    let mut exit_code = gate_exit_code(&batch.summary, options.enforce);
    if options.fail_on_input_errors && report.has_input_errors() {
        exit_code = EXIT_BLOCK;
    }

    print_gate_line(
        report.overall,
        options.enforce,
        exit_code,
        report.input_errors.len(),
    );

    Ok(exit_code)
}
