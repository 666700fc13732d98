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


//! Performance-regression evaluation engine.
//!
//! Decides whether freshly measured benchmark runs are acceptable relative to
//! a baseline table of expected bounds per platform and test, and turns the
//! decisions into a report and a CI exit code.
//!
//! Data flows leaf-first:
//!
//! - [`metrics`]: measured values of one run
//! - [`baseline`]: baseline tables, their loading and resolution
//! - [`tolerance`]: the bound comparator
//! - [`verdict`]: per-run evaluation
//! - [`aggregate`]: batch summary
//! - [`reporters`]: report document and its exporters
//! - [`gate`]: exit code decision
//!
//! # Example
//!
//! ```
//! use benchgate::{
//!     evaluate_batch, gate_exit_code, render, to_markdown, BaselineTable, MetricRecord,
//!     Outcome, RunInput,
//! };
//!
//! let table = BaselineTable::parse(
//!     "linux:\n  ipc_throughput:\n    min_throughput_msgs_per_sec: 100000\n",
//! )?;
//!
//! let runs = vec![RunInput::new(
//!     MetricRecord::new("ipc_throughput_benchmark").with_throughput(85_000.0),
//!     "linux",
//!     "results/linux.json",
//! )];
//!
//! let batch = evaluate_batch(&runs, &table);
//! assert_eq!(batch.summary.overall, Outcome::Failed);
//!
//! let report = render(&batch.summary, batch.verdicts());
//! assert!(to_markdown(&report).contains("FAILED"));
//! assert_eq!(gate_exit_code(&batch.summary, true), 1);
//! # Ok::<(), benchgate::BaselineError>(())
//! ```

#![warn(missing_docs)]

pub mod aggregate;
pub mod baseline;
pub mod engine;
pub mod error;
pub mod gate;
pub mod metrics;
pub mod platform;
pub mod reporters;
pub mod tolerance;
pub mod verdict;

pub use aggregate::{aggregate, BatchSummary, Outcome, StatusCounts};
pub use baseline::{
    load_baseline_table, resolve, BaselineEntry, BaselineTable, BoundKind, Resolution,
    ResolutionNote, DEFAULT_TOLERANCE_PERCENT,
};
pub use engine::{evaluate_batch, evaluate_run, BatchEvaluation, EvaluatedRun};
pub use error::{BaselineError, RecordError, Result};
pub use gate::gate_exit_code;
pub use metrics::{MetricField, MetricRecord, MetricsSnapshot, RunInput};
pub use platform::Platform;
pub use reporters::{
    export_json, export_markdown, render, to_json, to_markdown, to_text, Report, ReportSection,
};
pub use tolerance::{within_bound, Direction};
pub use verdict::{evaluate, Breach, Severity, Verdict, VerdictStatus};
