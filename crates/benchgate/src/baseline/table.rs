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

//! Baseline entries and the per-platform baseline table.

use crate::error::{BaselineError, Result};
use crate::metrics::MetricField;
use crate::platform::Platform;
use crate::tolerance::Direction;
use crate::verdict::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tolerance applied when an entry does not specify one.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 10.0;

/// One optional bound of a baseline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundKind {
    /// Lower bound on throughput.
    MinThroughput,
    /// Upper bound on peak memory.
    MaxMemory,
    /// Upper bound on p99 latency.
    MaxLatencyP99,
    /// Upper bound on violation rate.
    MaxViolation,
}

impl BoundKind {
    /// All bounds, in evaluation order.
    pub const ALL: [BoundKind; 4] = [
        BoundKind::MinThroughput,
        BoundKind::MaxMemory,
        BoundKind::MaxLatencyP99,
        BoundKind::MaxViolation,
    ];

    /// Field name in baseline files.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundKind::MinThroughput => "min_throughput_msgs_per_sec",
            BoundKind::MaxMemory => "max_memory_mb",
            BoundKind::MaxLatencyP99 => "max_latency_p99_us",
            BoundKind::MaxViolation => "max_violation_percent",
        }
    }

    /// The measured metric this bound constrains.
    pub fn field(&self) -> MetricField {
        match self {
            BoundKind::MinThroughput => MetricField::Throughput,
            BoundKind::MaxMemory => MetricField::PeakMemory,
            BoundKind::MaxLatencyP99 => MetricField::LatencyP99,
            BoundKind::MaxViolation => MetricField::ViolationRate,
        }
    }

    /// Which side of the bound is acceptable.
    pub fn direction(&self) -> Direction {
        match self {
            BoundKind::MinThroughput => Direction::Min,
            BoundKind::MaxMemory | BoundKind::MaxLatencyP99 | BoundKind::MaxViolation => {
                Direction::Max
            }
        }
    }

    /// Severity of a breach. Violation-rate breaches only ever warn.
    pub fn severity(&self) -> Severity {
        match self {
            BoundKind::MaxViolation => Severity::Warning,
            _ => Severity::Failure,
        }
    }
}

/// Expected bounds for tests whose name contains `test_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineEntry {
    /// Platform section this entry belongs to.
    pub platform: Platform,
    /// Substring token matched case-insensitively against test names.
    pub test_key: String,
    /// Minimum throughput in messages per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_throughput_msgs_per_sec: Option<f64>,
    /// Maximum peak memory in MB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_memory_mb: Option<f64>,
    /// Maximum p99 latency in microseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_latency_p99_us: Option<f64>,
    /// Maximum violation rate in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_violation_percent: Option<f64>,
    /// Percentage slack applied to every bound.
    pub tolerance_percent: f64,
}

impl BaselineEntry {
    /// Creates an entry with no bounds and the default tolerance.
    pub fn new(platform: Platform, test_key: impl Into<String>) -> Self {
        Self {
            platform,
            test_key: test_key.into(),
            min_throughput_msgs_per_sec: None,
            max_memory_mb: None,
            max_latency_p99_us: None,
            max_violation_percent: None,
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
        }
    }

    /// Sets the minimum throughput.
    pub fn with_min_throughput(mut self, value: f64) -> Self {
        self.min_throughput_msgs_per_sec = Some(value);
        self
    }

    /// Sets the maximum memory.
    pub fn with_max_memory(mut self, value: f64) -> Self {
        self.max_memory_mb = Some(value);
        self
    }

    /// Sets the maximum p99 latency.
    pub fn with_max_latency_p99(mut self, value: f64) -> Self {
        self.max_latency_p99_us = Some(value);
        self
    }

    /// Sets the maximum violation rate.
    pub fn with_max_violation(mut self, value: f64) -> Self {
        self.max_violation_percent = Some(value);
        self
    }

    /// Sets the tolerance.
    pub fn with_tolerance(mut self, percent: f64) -> Self {
        self.tolerance_percent = percent;
        self
    }

    /// Returns the value of a bound, if present.
    pub fn bound(&self, kind: BoundKind) -> Option<f64> {
        match kind {
            BoundKind::MinThroughput => self.min_throughput_msgs_per_sec,
            BoundKind::MaxMemory => self.max_memory_mb,
            BoundKind::MaxLatencyP99 => self.max_latency_p99_us,
            BoundKind::MaxViolation => self.max_violation_percent,
        }
    }

    /// Present bounds in evaluation order.
    pub fn bounds(&self) -> impl Iterator<Item = (BoundKind, f64)> + '_ {
        BoundKind::ALL
            .into_iter()
            .filter_map(move |kind| self.bound(kind).map(|value| (kind, value)))
    }

    /// An entry without any bound has nothing to check.
    pub fn is_degenerate(&self) -> bool {
        self.bounds().next().is_none()
    }

    /// Whether this entry's key is contained in the lower-cased test name.
    pub fn matches(&self, lowered_test_name: &str) -> bool {
        lowered_test_name.contains(&self.test_key.to_lowercase())
    }

    /// Rejects empty keys, negative or non-finite bounds and tolerances.
    pub fn validate(&self) -> Result<()> {
        if self.test_key.trim().is_empty() {
            return Err(BaselineError::InvalidTestKey {
                platform: self.platform.to_string(),
                key: self.test_key.clone(),
            });
        }

        for (kind, value) in self.bounds() {
            if !value.is_finite() || value < 0.0 {
                return Err(BaselineError::invalid_bound(
                    self.platform.as_str(),
                    &self.test_key,
                    kind.as_str(),
                    value,
                ));
            }
        }

        if !self.tolerance_percent.is_finite() || self.tolerance_percent < 0.0 {
            return Err(BaselineError::InvalidTolerance {
                platform: self.platform.to_string(),
                test_key: self.test_key.clone(),
                value: self.tolerance_percent,
            });
        }

        Ok(())
    }
}

/// Baseline entries grouped by platform.
///
/// Entry order within a platform is a priority list: the resolver picks the
/// first entry whose key matches. Tables are built through [`push`](Self::push)
/// or the loader so every entry is validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaselineTable {
    sections: BTreeMap<Platform, Vec<BaselineEntry>>,
}

impl BaselineTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends an entry to its platform section.
    pub fn push(&mut self, entry: BaselineEntry) -> Result<()> {
        entry.validate()?;
        self.sections.entry(entry.platform).or_default().push(entry);
        Ok(())
    }

    /// Builder-style [`push`](Self::push).
    pub fn with_entry(mut self, entry: BaselineEntry) -> Result<Self> {
        self.push(entry)?;
        Ok(self)
    }

    /// Entries for a platform, in priority order.
    pub fn section(&self, platform: Platform) -> Option<&[BaselineEntry]> {
        self.sections.get(&platform).map(Vec::as_slice)
    }

    /// Whether the table has a section for `platform`.
    pub fn has_section(&self, platform: Platform) -> bool {
        self.sections.contains_key(&platform)
    }

    /// Platforms with a section, in canonical order.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.sections.keys().copied()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
