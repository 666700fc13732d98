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

//! Tolerance comparison of a measured value against one bound.

use serde::{Deserialize, Serialize};

/// Which side of the bound is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Value must stay at or above the bound (throughput).
    Min,
    /// Value must stay at or below the bound (memory, latency).
    Max,
}

/// Returns the absolute slack granted by `tolerance_percent` on `bound`.
#[inline]
pub fn tolerance_amount(bound: f64, tolerance_percent: f64) -> f64 {
    bound * tolerance_percent / 100.0
}

/// Returns the effective limit after applying the tolerance.
///
/// For [`Direction::Min`] this is `bound - tolerance`, for [`Direction::Max`]
/// it is `bound + tolerance`.
#[inline]
pub fn effective_limit(bound: f64, tolerance_percent: f64, direction: Direction) -> f64 {
    let tolerance = tolerance_amount(bound, tolerance_percent);
    match direction {
        Direction::Min => bound - tolerance,
        Direction::Max => bound + tolerance,
    }
}

/// Decides whether `actual` is acceptable against `bound`.
///
/// A zero bound yields zero tolerance, i.e. an exact requirement.
/// Callers guarantee `bound >= 0`; baseline loading enforces it.
///
/// # Examples
///
/// ```
/// use benchgate::tolerance::{within_bound, Direction};
///
/// assert!(within_bound(90_500.0, 100_000.0, 10.0, Direction::Min));
/// assert!(!within_bound(89_000.0, 100_000.0, 10.0, Direction::Min));
/// assert!(!within_bound(0.1, 0.0, 50.0, Direction::Max));
/// ```
#[inline]
pub fn within_bound(actual: f64, bound: f64, tolerance_percent: f64, direction: Direction) -> bool {
    let limit = effective_limit(bound, tolerance_percent, direction);
    match direction {
        Direction::Min => actual >= limit,
        Direction::Max => actual <= limit,
    }
}
