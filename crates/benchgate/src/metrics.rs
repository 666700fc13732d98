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

//! Measured metrics for a single benchmark run.

use crate::error::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one measured metric of a [`MetricRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    /// Messages per second.
    Throughput,
    /// Peak resident memory in MB.
    PeakMemory,
    /// 99th percentile latency in microseconds.
    LatencyP99,
    /// Percentage of failed operations.
    ErrorRate,
    /// Percentage of operations exceeding the latency target.
    ViolationRate,
}

impl MetricField {
    /// All fields in record order.
    pub const ALL: [MetricField; 5] = [
        MetricField::Throughput,
        MetricField::PeakMemory,
        MetricField::LatencyP99,
        MetricField::ErrorRate,
        MetricField::ViolationRate,
    ];

    /// Field name as it appears in result files and breach descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricField::Throughput => "throughput_msgs_per_sec",
            MetricField::PeakMemory => "peak_memory_mb",
            MetricField::LatencyP99 => "latency_p99_us",
            MetricField::ErrorRate => "error_rate_percent",
            MetricField::ViolationRate => "violation_rate_percent",
        }
    }

    /// Short label used in report tables.
    pub fn label(&self) -> &'static str {
        match self {
            MetricField::Throughput => "Throughput",
            MetricField::PeakMemory => "Peak memory",
            MetricField::LatencyP99 => "P99 latency",
            MetricField::ErrorRate => "Error rate",
            MetricField::ViolationRate => "Violation rate",
        }
    }

    /// Display unit.
    pub fn unit(&self) -> &'static str {
        match self {
            MetricField::Throughput => "msg/s",
            MetricField::PeakMemory => "MB",
            MetricField::LatencyP99 => "µs",
            MetricField::ErrorRate | MetricField::ViolationRate => "%",
        }
    }

    fn is_percentage(&self) -> bool {
        matches!(self, MetricField::ErrorRate | MetricField::ViolationRate)
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One measured benchmark run.
///
/// Metric values are optional at the input boundary: a record only has to
/// carry the metrics that its matched baseline checks. A missing metric that
/// *is* checked surfaces as [`RecordError::MissingField`] during evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Free-text test identifier, e.g. `ipc_throughput_benchmark`.
    pub test_name: String,
    /// Messages per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput_msgs_per_sec: Option<f64>,
    /// Peak memory in MB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_memory_mb: Option<f64>,
    /// P99 latency in microseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_p99_us: Option<f64>,
    /// Error rate in percent, within [0, 100].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_rate_percent: Option<f64>,
    /// Violation rate in percent, within [0, 100].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation_rate_percent: Option<f64>,
}

impl MetricRecord {
    /// Creates a record with no metrics set.
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            ..Default::default()
        }
    }

    /// Sets the throughput.
    pub fn with_throughput(mut self, value: f64) -> Self {
        self.throughput_msgs_per_sec = Some(value);
        self
    }

    /// Sets the peak memory.
    pub fn with_peak_memory(mut self, value: f64) -> Self {
        self.peak_memory_mb = Some(value);
        self
    }

    /// Sets the p99 latency.
    pub fn with_latency_p99(mut self, value: f64) -> Self {
        self.latency_p99_us = Some(value);
        self
    }

    /// Sets the error rate.
    pub fn with_error_rate(mut self, value: f64) -> Self {
        self.error_rate_percent = Some(value);
        self
    }

    /// Sets the violation rate.
    pub fn with_violation_rate(mut self, value: f64) -> Self {
        self.violation_rate_percent = Some(value);
        self
    }

    /// Returns the value of a metric, if present.
    pub fn get(&self, field: MetricField) -> Option<f64> {
        match field {
            MetricField::Throughput => self.throughput_msgs_per_sec,
            MetricField::PeakMemory => self.peak_memory_mb,
            MetricField::LatencyP99 => self.latency_p99_us,
            MetricField::ErrorRate => self.error_rate_percent,
            MetricField::ViolationRate => self.violation_rate_percent,
        }
    }

    /// Checks every present metric against its domain.
    ///
    /// Values must be finite and non-negative; percentages must not exceed 100.
    pub fn validate(&self, source_id: &str) -> Result<(), RecordError> {
        if self.test_name.trim().is_empty() {
            return Err(RecordError::EmptyTestName {
                source_id: source_id.to_string(),
            });
        }

        for field in MetricField::ALL {
            let Some(value) = self.get(field) else {
                continue;
            };

            let reason = if !value.is_finite() {
                Some("value must be finite")
            } else if value < 0.0 {
                Some("value must be non-negative")
            } else if field.is_percentage() && value > 100.0 {
                Some("percentage must not exceed 100")
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(RecordError::InvalidValue {
                    source_id: source_id.to_string(),
                    test_name: self.test_name.clone(),
                    field,
                    value,
                    reason,
                });
            }
        }

        Ok(())
    }

    /// Headline metrics for display.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            throughput_msgs_per_sec: self.throughput_msgs_per_sec,
            peak_memory_mb: self.peak_memory_mb,
            latency_p99_us: self.latency_p99_us,
            error_rate_percent: self.error_rate_percent,
        }
    }
}

/// The four headline metrics shown for every verdict, checked or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Messages per second.
    pub throughput_msgs_per_sec: Option<f64>,
    /// Peak memory in MB.
    pub peak_memory_mb: Option<f64>,
    /// P99 latency in microseconds.
    pub latency_p99_us: Option<f64>,
    /// Error rate in percent.
    pub error_rate_percent: Option<f64>,
}

impl MetricsSnapshot {
    /// Fields of the snapshot in display order.
    pub const FIELDS: [MetricField; 4] = [
        MetricField::Throughput,
        MetricField::PeakMemory,
        MetricField::LatencyP99,
        MetricField::ErrorRate,
    ];

    /// Iterates `(field, value)` pairs in display order.
    pub fn rows(&self) -> impl Iterator<Item = (MetricField, Option<f64>)> + '_ {
        Self::FIELDS.into_iter().map(move |field| {
            let value = match field {
                MetricField::Throughput => self.throughput_msgs_per_sec,
                MetricField::PeakMemory => self.peak_memory_mb,
                MetricField::LatencyP99 => self.latency_p99_us,
                MetricField::ErrorRate => self.error_rate_percent,
                MetricField::ViolationRate => None,
            };
            (field, value)
        })
    }
}

/// A metric record together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInput {
    /// Measured values.
    pub record: MetricRecord,
    /// Platform tag as supplied by the caller; normalized during resolution.
    pub platform: String,
    /// Source identifier, typically the originating file name.
    pub source: String,
}

impl RunInput {
    /// Creates a new run input.
    pub fn new(
        record: MetricRecord,
        platform: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            record,
            platform: platform.into(),
            source: source.into(),
        }
    }
}

/// Formats a metric value with its unit for reports.
pub fn format_value(field: MetricField, value: f64) -> String {
    match field {
        MetricField::Throughput => format!("{:.0} {}", value, field.unit()),
        MetricField::PeakMemory => format!("{:.2} {}", value, field.unit()),
        MetricField::LatencyP99 => format!("{:.1} {}", value, field.unit()),
        MetricField::ErrorRate | MetricField::ViolationRate => {
            format!("{:.2}{}", value, field.unit())
        }
    }
}

/// Formats a metric value with its unit at full precision.
pub fn format_value_exact(field: MetricField, value: f64) -> String {
    match field {
        MetricField::ErrorRate | MetricField::ViolationRate => {
            format!("{}{}", value, field.unit())
        }
        _ => format!("{} {}", value, field.unit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        assert_eq!(MetricField::Throughput.as_str(), "throughput_msgs_per_sec");
        assert_eq!(MetricField::ViolationRate.to_string(), "violation_rate_percent");
    }

    #[test]
    fn test_validate_accepts_complete_record() {
        let record = MetricRecord::new("ipc_throughput_benchmark")
            .with_throughput(120_000.0)
            .with_peak_memory(42.0)
            .with_latency_p99(8.5)
            .with_error_rate(0.0)
            .with_violation_rate(0.3);
        assert!(record.validate("a.json").is_ok());
    }

    #[test]
    fn test_validate_accepts_partial_record() {
        let record = MetricRecord::new("ipc_latency").with_latency_p99(10.0);
        assert!(record.validate("a.json").is_ok());
    }

    #[test]
    fn test_validate_rejects_negative() {
        let record = MetricRecord::new("ipc").with_peak_memory(-1.0);
        let err = record.validate("a.json").unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidValue {
                field: MetricField::PeakMemory,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_percentage_over_100() {
        let record = MetricRecord::new("ipc").with_error_rate(100.5);
        assert!(record.validate("a.json").is_err());

        let record = MetricRecord::new("ipc").with_violation_rate(100.0);
        assert!(record.validate("a.json").is_ok());
    }

    #[test]
    fn test_validate_rejects_nan_and_empty_name() {
        let record = MetricRecord::new("ipc").with_throughput(f64::NAN);
        assert!(record.validate("a.json").is_err());

        let record = MetricRecord::new("  ");
        assert_eq!(
            record.validate("a.json"),
            Err(RecordError::EmptyTestName {
                source_id: "a.json".to_string()
            })
        );
    }

    #[test]
    fn test_snapshot_excludes_violation_rate() {
        let record = MetricRecord::new("ipc")
            .with_throughput(1.0)
            .with_violation_rate(5.0);
        let rows: Vec<_> = record.snapshot().rows().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], (MetricField::Throughput, Some(1.0)));
        assert!(rows.iter().all(|(f, _)| *f != MetricField::ViolationRate));
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let record: MetricRecord =
            serde_json::from_str(r#"{"test_name": "x", "latency_p99_us": 12.5}"#).unwrap();
        assert_eq!(record.latency_p99_us, Some(12.5));
        assert_eq!(record.peak_memory_mb, None);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(MetricField::Throughput, 91_000.4), "91000 msg/s");
        assert_eq!(format_value(MetricField::PeakMemory, 53.0), "53.00 MB");
        assert_eq!(format_value(MetricField::ViolationRate, 2.0), "2.00%");
    }
}
