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


//! Command-line front end of the benchgate regression gate.
//!
//! # Commands
//!
//! - **check**: evaluate result files against a baseline table, print a
//!   report and exit with the gate code
//! - **validate-baseline**: load a baseline table and summarise it
//! - **completion**: generate shell completion scripts
//!
//! # Inputs
//!
//! Result files are JSON documents holding one record or an array of
//! records (see [`records`]). Each record's platform comes from its own
//! `platform` field, the `--platform` flag, the file path, or the host, in
//! that order (see [`platform_detect`]).
//!
//! # Example
//!
//! ```no_run
//! use benchgate_cli::commands::{check, CheckOptions};
//!
//! # fn main() -> Result<(), benchgate_cli::error::CliError> {
//! let exit_code = check(&CheckOptions {
//!     baseline: "ci/baselines.yaml".into(),
//!     results: vec!["target/bench-results".into()],
//!     enforce: true,
//!     ..Default::default()
//! })?;
//! std::process::exit(exit_code);
//! # }
//! ```

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
pub mod platform_detect;
pub mod records;
