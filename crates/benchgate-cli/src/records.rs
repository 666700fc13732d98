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


//! Result-file parsing.
//!
//! A results file holds either one record object or an array of them:
//!
//! ```json
//! [
//!   {
//!     "test_name": "ipc_throughput_benchmark",
//!     "platform": "linux",
//!     "throughput_msgs_per_sec": 118000,
//!     "peak_memory_mb": 41.5,
//!     "latency_p99_us": 12.0,
//!     "error_rate_percent": 0.0,
//!     "violation_rate_percent": 0.2
//!   }
//! ]
//! ```
//!
//! Each array element is parsed on its own, so one malformed element does not
//! hide the others.

use crate::error::CliError;
use crate::platform_detect::platform_tag_for;
use benchgate::{MetricRecord, RunInput};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// One record as written in a results file.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    platform: Option<String>,
    #[serde(flatten)]
    record: MetricRecord,
}

/// Runs parsed from one file, plus its malformed records.
#[derive(Debug, Clone, Default)]
pub struct LoadedResults {
    /// Successfully parsed runs in file order.
    pub runs: Vec<RunInput>,
    /// Records that could not be parsed.
    pub errors: Vec<CliError>,
}

fn parse_record(
    value: Value,
    source_id: String,
    path: &Path,
    platform_flag: Option<&str>,
) -> Result<RunInput, CliError> {
    if !value.is_object() {
        return Err(CliError::results(source_id, "expected a JSON object"));
    }
    let raw: RawRecord =
        serde_json::from_value(value).map_err(|e| CliError::results(source_id.clone(), e))?;
    let platform = platform_tag_for(raw.platform.as_deref(), platform_flag, path);
    Ok(RunInput::new(raw.record, platform, source_id))
}

/// Parses the contents of one results file.
///
/// # Errors
///
/// Returns [`CliError::Results`] when the document is not valid JSON or is
/// neither an object nor an array. Per-record problems are collected in
/// [`LoadedResults::errors`] instead.
pub fn parse_results(
    content: &str,
    path: &Path,
    platform_flag: Option<&str>,
) -> Result<LoadedResults, CliError> {
    let file_id = path.display().to_string();
    let document: Value =
        serde_json::from_str(content).map_err(|e| CliError::results(file_id.clone(), e))?;

    let mut loaded = LoadedResults::default();
    match document {
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                let source_id = format!("{}#{}", file_id, index);
                match parse_record(item, source_id, path, platform_flag) {
                    Ok(run) => loaded.runs.push(run),
                    Err(e) => loaded.errors.push(e),
                }
            }
        }
        value @ Value::Object(_) => match parse_record(value, file_id, path, platform_flag) {
            Ok(run) => loaded.runs.push(run),
            Err(e) => loaded.errors.push(e),
        },
        _ => {
            return Err(CliError::results(
                file_id,
                "expected a record object or an array of records",
            ))
        }
    }

    Ok(loaded)
}
