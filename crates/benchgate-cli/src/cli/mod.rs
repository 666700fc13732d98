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


//! CLI command definitions and argument parsing.
//!
//! - `gating`: Gating commands (check, validate-baseline)
//! - `utility`: Utility commands (completion)

mod gating;
mod utility;

use crate::error::CliError;
use clap::{Parser, Subcommand};

pub use gating::GatingCommands;
pub use utility::UtilityCommands;

/// Performance regression gate for CI pipelines.
///
/// Compares benchmark results against per-platform baselines and exits
/// non-zero when enforced regressions are found.
#[derive(Parser)]
#[command(name = "benchgate")]
#[command(author, version, about = "benchgate - performance regression gate for CI", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
///
/// ```text
/// Commands
/// ├── Gating (check, validate-baseline)
/// └── Utility (completion)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Gating commands - flattened to appear at top level
    #[command(flatten)]
    Gating(GatingCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command and return the process exit code.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the command cannot run at all (unreadable baseline,
    /// no inputs, unsupported shell). Regressions are an exit code, not an
    /// error.
    pub fn execute(self) -> Result<i32, CliError> {
        match self {
            Commands::Gating(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
