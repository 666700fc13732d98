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

//! Matching a test run to its baseline entry.
//!
//! Resolution happens in two steps:
//!
//! 1. The platform tag is normalized. Unknown tags fall back to
//!    [`Platform::DEFAULT`] and the fallback is recorded as a note.
//! 2. The platform's section is scanned in table order and the first entry
//!    whose key is a substring of the lower-cased test name wins. When the
//!    table has no section for the platform, the default section and then the
//!    remaining sections (canonical order) are tried, each recorded as a note.
//!
//! First match wins even when a later key would be more specific; changing
//! that would silently change gating behavior for existing baseline files.

use super::table::{BaselineEntry, BaselineTable};
use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Observable detail of how a run was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionNote {
    /// The supplied platform tag was not recognised.
    UnknownPlatform {
        /// Tag as supplied
        tag: String,
        /// Platform used instead
        used: Platform,
    },
    /// The table has no section for the platform; another section was used.
    SectionFallback {
        /// Platform without a section
        requested: Platform,
        /// Section the match came from
        used: Platform,
    },
    /// The table has no section for the platform and no fallback matched.
    MissingSection {
        /// Platform without a section
        requested: Platform,
    },
    /// The first matching entry has no bounds.
    DegenerateEntry {
        /// Key of the degenerate entry
        test_key: String,
    },
}

impl fmt::Display for ResolutionNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionNote::UnknownPlatform { tag, used } => {
                write!(f, "unknown platform '{}', fell back to {}", tag, used)
            }
            ResolutionNote::SectionFallback { requested, used } => write!(
                f,
                "no baselines for {}, matched using the {} section",
                requested, used
            ),
            ResolutionNote::MissingSection { requested } => {
                write!(f, "no baselines for {}", requested)
            }
            ResolutionNote::DegenerateEntry { test_key } => write!(
                f,
                "baseline key '{}' has no bounds, treated as no applicable baseline",
                test_key
            ),
        }
    }
}

/// Outcome of resolving one run against a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    /// Normalized platform of the run.
    pub platform: Platform,
    /// Matched entry, `None` when no regression policy applies.
    pub entry: Option<&'a BaselineEntry>,
    /// Fallbacks taken along the way.
    pub notes: Vec<ResolutionNote>,
}

impl Resolution<'_> {
    /// Whether no entry applies.
    pub fn is_unmatched(&self) -> bool {
        self.entry.is_none()
    }
}

/// Sections to scan for `platform`, in order.
fn search_order(platform: Platform, table: &BaselineTable) -> Vec<Platform> {
    if table.has_section(platform) {
        return vec![platform];
    }

    let mut order = Vec::with_capacity(Platform::ALL.len());
    if platform != Platform::DEFAULT {
        order.push(Platform::DEFAULT);
    }
    order.extend(
        Platform::ALL
            .into_iter()
            .filter(|p| *p != platform && *p != Platform::DEFAULT),
    );
    order.retain(|p| table.has_section(*p));
    order
}

/// Resolves the baseline entry for `test_name` on `platform_tag`.
///
/// Never fails: a missing policy is reported as an unmatched resolution.
/// The result depends only on the arguments.
pub fn resolve<'a>(test_name: &str, platform_tag: &str, table: &'a BaselineTable) -> Resolution<'a> {
    let mut notes = Vec::new();

    let (platform, fell_back) = Platform::normalize(platform_tag);
    if fell_back {
        warn!(
            tag = platform_tag,
            fallback = %platform,
            test = test_name,
            "unknown platform tag, using default platform"
        );
        notes.push(ResolutionNote::UnknownPlatform {
            tag: platform_tag.to_string(),
            used: platform,
        });
    }

    let lowered = test_name.to_lowercase();
    let direct = table.has_section(platform);

    for section_platform in search_order(platform, table) {
        let Some(section) = table.section(section_platform) else {
            continue;
        };

        let Some(entry) = section.iter().find(|entry| entry.matches(&lowered)) else {
            continue;
        };

        if !direct {
            debug!(
                requested = %platform,
                used = %section_platform,
                test = test_name,
                "resolved through section fallback"
            );
            notes.push(ResolutionNote::SectionFallback {
                requested: platform,
                used: section_platform,
            });
        }

        if entry.is_degenerate() {
            notes.push(ResolutionNote::DegenerateEntry {
                test_key: entry.test_key.clone(),
            });
            return Resolution {
                platform,
                entry: None,
                notes,
            };
        }

        debug!(test = test_name, key = %entry.test_key, "matched baseline entry");
        return Resolution {
            platform,
            entry: Some(entry),
            notes,
        };
    }

    if !direct {
        notes.push(ResolutionNote::MissingSection {
            requested: platform,
        });
    }

    Resolution {
        platform,
        entry: None,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BaselineTable {
        BaselineTable::parse(
            r#"
linux:
  throughput:
    min_throughput_msgs_per_sec: 1000
  ipc_throughput:
    min_throughput_msgs_per_sec: 5000
  empty_policy:
macos:
  latency_stress:
    max_latency_p99_us: 50
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let table = table();
        let resolution = resolve("IPC_Throughput_Benchmark", "linux", &table);
        // "throughput" precedes the more specific "ipc_throughput".
        assert_eq!(resolution.entry.unwrap().test_key, "throughput");
        assert!(resolution.notes.is_empty());
    }

    #[test]
    fn test_unmatched() {
        let table = table();
        let resolution = resolve("startup_time", "linux", &table);
        assert!(resolution.is_unmatched());
        assert!(resolution.notes.is_empty());
    }

    #[test]
    fn test_unknown_platform_falls_back_to_linux() {
        let table = table();
        let resolution = resolve("ipc_throughput", "plan9", &table);
        assert_eq!(resolution.platform, Platform::Linux);
        assert_eq!(resolution.entry.unwrap().test_key, "throughput");
        assert_eq!(
            resolution.notes,
            vec![ResolutionNote::UnknownPlatform {
                tag: "plan9".to_string(),
                used: Platform::Linux
            }]
        );
    }

    #[test]
    fn test_direct_section_does_not_fall_through() {
        let table = table();
        // macos has a section; its miss must not fall back to linux keys.
        let resolution = resolve("ipc_throughput", "macos", &table);
        assert!(resolution.is_unmatched());
        assert!(resolution.notes.is_empty());
    }

    #[test]
    fn test_missing_section_falls_back() {
        let table = table();
        let resolution = resolve("ipc_latency_stress_test", "windows", &table);
        assert_eq!(resolution.platform, Platform::Windows);
        assert_eq!(resolution.entry.unwrap().test_key, "latency_stress");
        assert_eq!(
            resolution.notes,
            vec![ResolutionNote::SectionFallback {
                requested: Platform::Windows,
                used: Platform::Macos
            }]
        );
    }

    #[test]
    fn test_missing_section_without_match() {
        let table = table();
        let resolution = resolve("startup_time", "windows", &table);
        assert!(resolution.is_unmatched());
        assert_eq!(
            resolution.notes,
            vec![ResolutionNote::MissingSection {
                requested: Platform::Windows
            }]
        );
    }

    #[test]
    fn test_degenerate_entry_is_unmatched() {
        let table = table();
        let resolution = resolve("empty_policy_bench", "linux", &table);
        assert!(resolution.is_unmatched());
        assert_eq!(
            resolution.notes,
            vec![ResolutionNote::DegenerateEntry {
                test_key: "empty_policy".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_table() {
        let table = BaselineTable::new();
        let resolution = resolve("anything", "linux", &table);
        assert!(resolution.is_unmatched());
    }

    #[test]
    fn test_note_display() {
        let note = ResolutionNote::SectionFallback {
            requested: Platform::Linux,
            used: Platform::Macos,
        };
        assert_eq!(
            note.to_string(),
            "no baselines for linux, matched using the macos section"
        );
    }
}
