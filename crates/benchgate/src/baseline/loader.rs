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

//! Baseline table loading.
//!
//! The source format is a nested mapping:
//!
//! ```yaml
//! linux:
//!   ipc_throughput:
//!     min_throughput_msgs_per_sec: 100000
//!     tolerance_percent: 10
//!   latency_stress:
//!     max_latency_p99_us: 50
//!     max_violation_percent: 1
//! macos:
//!   ipc_throughput:
//!     min_throughput_msgs_per_sec: 80000
//! ```
//!
//! The document is parsed through `serde_yaml`, which keeps mapping order and
//! also accepts JSON input. Key order inside a platform section is the
//! resolver's priority order, so it must survive loading.

use super::table::{BaselineEntry, BaselineTable, DEFAULT_TOLERANCE_PERCENT};
use crate::error::{BaselineError, Result};
use crate::platform::Platform;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Bound fields of one entry as written in the source.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    min_throughput_msgs_per_sec: Option<f64>,
    max_memory_mb: Option<f64>,
    max_latency_p99_us: Option<f64>,
    max_violation_percent: Option<f64>,
    tolerance_percent: Option<f64>,
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn expect_mapping<'a>(value: &'a Value, location: &str) -> Result<Option<&'a Mapping>> {
    match value {
        Value::Mapping(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        other => Err(BaselineError::NotAMapping {
            location: location.to_string(),
            found: kind_of(other).to_string(),
        }),
    }
}

impl BaselineTable {
    /// Parses a baseline table from YAML or JSON text.
    ///
    /// Unknown platform keys, unknown entry fields, negative bounds and
    /// negative tolerances are rejected before any evaluation happens.
    pub fn parse(source: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(source)?;
        let mut table = BaselineTable::new();
        let mut seen: BTreeMap<Platform, String> = BTreeMap::new();

        let Some(platforms) = expect_mapping(&root, "<root>")? else {
            return Ok(table);
        };

        for (platform_key, section) in platforms {
            let platform_name = key_to_string(platform_key).unwrap_or_default();
            let platform: Platform =
                platform_name
                    .parse()
                    .map_err(|_| BaselineError::UnknownPlatform {
                        platform: platform_name.clone(),
                    })?;

            if let Some(first_key) = seen.insert(platform, platform_name.clone()) {
                return Err(BaselineError::DuplicatePlatform {
                    platform: platform.to_string(),
                    first_key,
                    key: platform_name,
                });
            }

            let Some(entries) = expect_mapping(section, &platform_name)? else {
                continue;
            };

            for (test_key, body) in entries {
                let key = key_to_string(test_key).ok_or_else(|| BaselineError::InvalidTestKey {
                    platform: platform_name.clone(),
                    key: format!("{:?}", test_key),
                })?;

                let raw = match body {
                    Value::Null => RawEntry::default(),
                    Value::Mapping(_) => serde_yaml::from_value::<RawEntry>(body.clone())
                        .map_err(|e| {
                            BaselineError::parse(format!("{}.{}: {}", platform_name, key, e))
                        })?,
                    other => {
                        return Err(BaselineError::NotAMapping {
                            location: format!("{}.{}", platform_name, key),
                            found: kind_of(other).to_string(),
                        })
                    }
                };

                let entry = BaselineEntry {
                    platform,
                    test_key: key,
                    min_throughput_msgs_per_sec: raw.min_throughput_msgs_per_sec,
                    max_memory_mb: raw.max_memory_mb,
                    max_latency_p99_us: raw.max_latency_p99_us,
                    max_violation_percent: raw.max_violation_percent,
                    tolerance_percent: raw.tolerance_percent.unwrap_or(DEFAULT_TOLERANCE_PERCENT),
                };

                if entry.is_degenerate() {
                    debug!(
                        platform = %platform,
                        test_key = %entry.test_key,
                        "baseline entry has no bounds and will never gate"
                    );
                }

                table.push(entry)?;
            }
        }

        Ok(table)
    }
}

/// Loads a baseline table from a YAML or JSON file.
///
/// # Errors
///
/// Returns [`BaselineError::Io`] if the file cannot be read, and any of the
/// validation errors of [`BaselineTable::parse`].
pub fn load_baseline_table(path: impl AsRef<Path>) -> Result<BaselineTable> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| BaselineError::io_error(path, e))?;
    let table = BaselineTable::parse(&contents)?;

    info!(
        path = %path.display(),
        entries = table.len(),
        "loaded baseline table"
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
linux:
  ipc_throughput:
    min_throughput_msgs_per_sec: 100000
    tolerance_percent: 10
  latency_stress:
    max_latency_p99_us: 50
    max_violation_percent: 1
macos:
  ipc_throughput:
    min_throughput_msgs_per_sec: 80000
    max_memory_mb: 64.5
"#;

    #[test]
    fn test_parse_yaml() {
        let table = BaselineTable::parse(SAMPLE).unwrap();
        assert_eq!(table.len(), 3);

        let linux = table.section(Platform::Linux).unwrap();
        assert_eq!(linux[0].test_key, "ipc_throughput");
        assert_eq!(linux[0].min_throughput_msgs_per_sec, Some(100_000.0));
        assert_eq!(linux[1].test_key, "latency_stress");
        assert_eq!(linux[1].tolerance_percent, DEFAULT_TOLERANCE_PERCENT);

        let macos = table.section(Platform::Macos).unwrap();
        assert_eq!(macos[0].max_memory_mb, Some(64.5));
    }

    #[test]
    fn test_parse_json_preserves_key_order() {
        let json = r#"{
            "linux": {
                "zeta_bench": {"max_memory_mb": 10},
                "alpha_bench": {"max_memory_mb": 20},
                "mid_bench": {"max_memory_mb": 30}
            }
        }"#;
        let table = BaselineTable::parse(json).unwrap();
        let keys: Vec<_> = table
            .section(Platform::Linux)
            .unwrap()
            .iter()
            .map(|e| e.test_key.as_str())
            .collect();
        assert_eq!(keys, vec!["zeta_bench", "alpha_bench", "mid_bench"]);
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let err = BaselineTable::parse("freebsd:\n  ipc:\n    max_memory_mb: 1\n")
            .unwrap_err();
        assert_eq!(
            err,
            BaselineError::UnknownPlatform {
                platform: "freebsd".to_string()
            }
        );
    }

    #[test]
    fn test_platform_keys_differing_in_case_rejected() {
        let src = "linux:\n  b:\n    max_memory_mb: 1\nLinux:\n  a:\n    max_memory_mb: 2\n";
        let err = BaselineTable::parse(src).unwrap_err();
        assert_eq!(
            err,
            BaselineError::DuplicatePlatform {
                platform: "linux".to_string(),
                first_key: "linux".to_string(),
                key: "Linux".to_string(),
            }
        );
    }

    #[test]
    fn test_negative_bound_rejected() {
        let err = BaselineTable::parse("linux:\n  ipc:\n    max_memory_mb: -3\n")
            .unwrap_err();
        assert!(matches!(err, BaselineError::InvalidBound { .. }));
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let src = "windows:\n  ipc:\n    max_memory_mb: 3\n    tolerance_percent: -1\n";
        let err = BaselineTable::parse(src).unwrap_err();
        assert!(matches!(err, BaselineError::InvalidTolerance { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = BaselineTable::parse("linux:\n  ipc:\n    max_cpu: 3\n").unwrap_err();
        match err {
            BaselineError::Parse(msg) => assert!(msg.contains("linux.ipc")),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_mapping_section_rejected() {
        let err = BaselineTable::parse("linux: [1, 2]\n").unwrap_err();
        assert!(matches!(err, BaselineError::NotAMapping { .. }));

        let err = BaselineTable::parse("- linux\n").unwrap_err();
        assert!(matches!(err, BaselineError::NotAMapping { .. }));
    }

    #[test]
    fn test_empty_entry_is_degenerate() {
        let table = BaselineTable::parse("linux:\n  ipc:\n").unwrap();
        assert!(table.section(Platform::Linux).unwrap()[0].is_degenerate());
    }

    #[test]
    fn test_empty_document() {
        assert!(BaselineTable::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = load_baseline_table(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_baseline_table("/nonexistent/baselines.yaml").unwrap_err();
        assert!(matches!(err, BaselineError::Io { .. }));
    }
}
