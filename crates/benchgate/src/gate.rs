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

//! CI gate decision.

use crate::aggregate::{BatchSummary, Outcome};

/// Exit code when the gate lets the pipeline continue.
pub const EXIT_PASS: i32 = 0;

/// Exit code when the gate blocks the pipeline.
pub const EXIT_BLOCK: i32 = 1;

/// Maps a batch summary to a process exit code.
///
/// Only an enforced, failed batch blocks. Warnings and unmatched runs never do.
///
/// ```
/// use benchgate::aggregate::{BatchSummary, Outcome};
/// use benchgate::gate::gate_exit_code;
///
/// let summary = BatchSummary { overall: Outcome::Failed, ..Default::default() };
/// assert_eq!(gate_exit_code(&summary, false), 0);
/// assert_eq!(gate_exit_code(&summary, true), 1);
/// ```
pub fn gate_exit_code(summary: &BatchSummary, enforce_regressions: bool) -> i32 {
    if enforce_regressions && summary.overall == Outcome::Failed {
        EXIT_BLOCK
    } else {
        EXIT_PASS
    }
}
