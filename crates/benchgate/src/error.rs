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

//! Error types for baseline loading and run evaluation.
//!
//! Two families of errors exist and they are deliberately kept apart:
//!
//! - [`BaselineError`] is raised while loading a baseline table. It is fatal
//!   for the whole invocation: no run is evaluated against a table that
//!   failed validation.
//! - [`RecordError`] is raised for a single malformed metric record. It is
//!   local to that run; the rest of the batch is still evaluated.
//!
//! A test without an applicable baseline is *not* an error. It is modelled
//! as [`VerdictStatus::Unmatched`](crate::VerdictStatus::Unmatched).

use crate::metrics::MetricField;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for baseline loading.
pub type Result<T> = std::result::Result<T, BaselineError>;

/// Errors raised while loading or validating a baseline table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BaselineError {
    /// The baseline file could not be read.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// Path of the baseline file
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// The baseline source is not valid YAML/JSON, or an entry has an
    /// unexpected shape.
    #[error("Baseline parse error: {0}")]
    Parse(String),

    /// A node that must be a mapping was something else.
    #[error("Baseline '{location}' must be a mapping, found {found}")]
    NotAMapping {
        /// Dotted location of the offending node (empty for the root)
        location: String,
        /// Kind of node that was found instead
        found: String,
    },

    /// A top-level key is not one of the known platforms.
    #[error("Unknown platform '{platform}' in baseline table (expected one of: linux, macos, windows)")]
    UnknownPlatform {
        /// The platform key as written in the source
        platform: String,
    },

    /// Two top-level keys name the same platform (e.g. `linux` and `Linux`).
    #[error("Duplicate section for platform '{platform}': '{key}' repeats '{first_key}'")]
    DuplicatePlatform {
        /// The platform both keys resolve to
        platform: String,
        /// Key of the section seen first
        first_key: String,
        /// Key of the repeated section
        key: String,
    },

    /// A test key is empty or not a string.
    #[error("Invalid test key '{key}' under platform '{platform}'")]
    InvalidTestKey {
        /// Platform section containing the key
        platform: String,
        /// The offending key
        key: String,
    },

    /// A bound is negative or not finite.
    #[error("Invalid bound {field}={value} for '{platform}.{test_key}': bounds must be finite and non-negative")]
    InvalidBound {
        /// Platform section
        platform: String,
        /// Entry key
        test_key: String,
        /// Name of the bound field
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// The tolerance is negative or not finite.
    #[error("Invalid tolerance_percent={value} for '{platform}.{test_key}': tolerance must be finite and non-negative")]
    InvalidTolerance {
        /// Platform section
        platform: String,
        /// Entry key
        test_key: String,
        /// Offending value
        value: f64,
    },
}

impl BaselineError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid-bound error.
    pub fn invalid_bound(
        platform: impl Into<String>,
        test_key: impl Into<String>,
        field: &'static str,
        value: f64,
    ) -> Self {
        Self::InvalidBound {
            platform: platform.into(),
            test_key: test_key.into(),
            field,
            value,
        }
    }
}

impl From<serde_yaml::Error> for BaselineError {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse(source.to_string())
    }
}

/// Errors raised for a single malformed metric record.
///
/// These are caller-input defects. They are never folded into a verdict so
/// that a broken input can't be mistaken for a measured regression.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordError {
    /// The matched baseline checks a metric the record does not carry.
    #[error("Record '{source_id}' ({test_name}) is missing field '{field}' required by baseline key '{test_key}'")]
    MissingField {
        /// Source identifier of the record (e.g. originating file)
        source_id: String,
        /// Test name of the record
        test_name: String,
        /// The missing metric
        field: MetricField,
        /// Baseline key that required the metric
        test_key: String,
    },

    /// A metric value is negative, not finite, or out of range.
    #[error("Record '{source_id}' ({test_name}) has invalid value {value} for '{field}': {reason}")]
    InvalidValue {
        /// Source identifier of the record
        source_id: String,
        /// Test name of the record
        test_name: String,
        /// The offending metric
        field: MetricField,
        /// Offending value
        value: f64,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// The record has no usable test name.
    #[error("Record '{source_id}' has an empty test name")]
    EmptyTestName {
        /// Source identifier of the record
        source_id: String,
    },
}

impl RecordError {
    /// Source identifier of the run this error belongs to.
    pub fn source_id(&self) -> &str {
        match self {
            RecordError::MissingField { source_id, .. }
            | RecordError::InvalidValue { source_id, .. }
            | RecordError::EmptyTestName { source_id } => source_id,
        }
    }
}
