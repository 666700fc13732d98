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


//! Validate-baseline command - load a baseline table and summarise it

use crate::error::CliError;
use benchgate::{load_baseline_table, BaselineTable, Platform};
use colored::Colorize;
use std::path::Path;

/// Per-platform summary of a table, one line per section.
pub fn describe_table(table: &BaselineTable) -> String {
    let mut out = String::new();
    for platform in Platform::ALL {
        let Some(entries) = table.section(platform) else {
            continue;
        };
        let degenerate = entries.iter().filter(|e| e.is_degenerate()).count();
        out.push_str(&format!("{}: {} entries", platform, entries.len()));
        if degenerate > 0 {
            out.push_str(&format!(" ({} without bounds)", degenerate));
        }
        out.push('\n');
    }
    out
}

/// Validate a baseline table file.
///
/// Prints a per-platform entry count to stdout.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or the table is invalid.
pub fn validate_baseline(path: &Path) -> Result<(), CliError> {
    let table = load_baseline_table(path)?;

    print!("{}", describe_table(&table));
    println!(
        "{} {} ({} entries)",
        "✓".green().bold(),
        path.display(),
        table.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_table() {
        let table = BaselineTable::parse(
            "windows:\n  a:\n    max_memory_mb: 1\nlinux:\n  b:\n  c:\n    max_memory_mb: 2\n",
        )
        .unwrap();
        assert_eq!(
            describe_table(&table),
            "linux: 2 entries (1 without bounds)\nwindows: 1 entries\n"
        );
    }
}
