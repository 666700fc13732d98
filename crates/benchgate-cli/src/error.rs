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


//! Structured error types for the benchgate CLI.
//!
//! All CLI operations return `Result<T, CliError>`. Evaluation problems of a
//! single run are not errors here: they travel inside the batch evaluation
//! and the report.

use benchgate::BaselineError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for benchgate CLI operations.
///
/// Implements `Clone` so results of parallel file loading can be collected
/// and re-reported.
///
/// # Examples
///
/// ```rust,no_run
/// use benchgate_cli::error::CliError;
///
/// fn read(path: &str) -> Result<String, CliError> {
///     std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, directory listing).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// File size exceeds the configured limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        /// The file path that exceeded the limit
        path: PathBuf,
        /// The actual file size in bytes
        actual: u64,
        /// The maximum allowed file size in bytes
        max: u64,
        /// The maximum allowed file size in MB (for display)
        max_mb: u64,
    },

    /// The baseline table could not be loaded.
    #[error("Baseline error: {0}")]
    Baseline(#[from] BaselineError),

    /// A results file or one of its records could not be parsed.
    #[error("Invalid results in '{source_id}': {message}")]
    Results {
        /// Source identifier (path, with `#index` for array elements)
        source_id: String,
        /// What was wrong
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    ///
    /// ```rust
    /// use benchgate_cli::error::CliError;
    ///
    /// let err = CliError::file_too_large("huge.json", 200_000_000, 100 * 1024 * 1024);
    /// assert!(err.to_string().contains("100 MB"));
    /// ```
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Create a results error for one file or record.
    pub fn results(source_id: impl Into<String>, message: impl ToString) -> Self {
        Self::Results {
            source_id: source_id.into(),
            message: message.to_string(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}
