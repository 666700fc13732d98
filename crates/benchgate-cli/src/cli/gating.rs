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


//! Gating commands.

use crate::commands::{self, CheckOptions, OutputFormat};
use crate::error::CliError;
use clap::Subcommand;
use std::path::PathBuf;

/// Commands that evaluate or validate gating inputs.
#[derive(Subcommand)]
pub enum GatingCommands {
    /// Evaluate benchmark results against a baseline table
    ///
    /// Prints a report and exits with the gate code: 1 only when --enforce is
    /// set and at least one run failed its baseline.
    Check {
        /// Baseline table (YAML or JSON)
        #[arg(value_name = "BASELINE")]
        baseline: PathBuf,

        /// Result files or directories of *.json result files
        #[arg(value_name = "RESULTS", required = true)]
        results: Vec<PathBuf>,

        /// Platform for records without a `platform` field
        #[arg(short, long)]
        platform: Option<String>,

        /// Exit 1 when a regression is detected
        #[arg(short, long)]
        enforce: bool,

        /// Write a Markdown report to this path
        #[arg(long, value_name = "PATH")]
        markdown: Option<PathBuf>,

        /// Write a JSON report to this path
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,

        /// Report format on stdout
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Load result files in parallel regardless of their number
        #[arg(long)]
        parallel: bool,

        /// Exit 1 when a result file or record cannot be evaluated
        #[arg(long)]
        fail_on_input_errors: bool,
    },

    /// Validate a baseline table
    ///
    /// Loads the table with the same rules as `check` and prints the number of
    /// entries per platform.
    ValidateBaseline {
        /// Baseline table (YAML or JSON)
        #[arg(value_name = "BASELINE")]
        baseline: PathBuf,
    },
}

impl GatingCommands {
    /// Execute the gating command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the command execution fails.
    pub fn execute(self) -> Result<i32, CliError> {
        match self {
            GatingCommands::Check {
                baseline,
                results,
                platform,
                enforce,
                markdown,
                json,
                format,
                parallel,
                fail_on_input_errors,
            } => commands::check(&CheckOptions {
                baseline,
                results,
                platform,
                enforce,
                markdown,
                json,
                format,
                parallel,
                fail_on_input_errors,
            }),
            GatingCommands::ValidateBaseline { baseline } => {
                commands::validate_baseline(&baseline)?;
                Ok(0)
            }
        }
    }
}
