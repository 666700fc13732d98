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


//! CLI command implementations

mod check;
mod completion;
mod validate_baseline;

pub use check::{check, CheckOptions, OutputFormat};
pub use completion::{generate_completion_for_command, print_installation_instructions};
pub use validate_baseline::validate_baseline;

use crate::error::CliError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default maximum file size (100 MB).
/// Can be overridden via the `BENCHGATE_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_FILE_SIZE`].
pub const MAX_FILE_SIZE_ENV: &str = "BENCHGATE_MAX_FILE_SIZE";

/// Get the maximum file size from the environment or use the default.
///
/// Invalid values fall back to [`DEFAULT_MAX_FILE_SIZE`].
fn get_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file from disk with size validation.
///
/// Files larger than the configured maximum are rejected before reading.
///
/// # Errors
///
/// Returns `Err` if the metadata cannot be read, the file is too large, or the
/// contents cannot be read as UTF-8.
///
/// # Examples
///
/// ```no_run
/// use benchgate_cli::commands::read_file;
/// use std::path::Path;
///
/// # fn main() -> Result<(), benchgate_cli::error::CliError> {
/// let content = read_file(Path::new("results/linux.json"))?;
/// assert!(!content.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn read_file(path: &Path) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file or stdout.
///
/// # Errors
///
/// Returns `Err` if writing fails.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}

/// Expands result inputs into the list of files to load.
///
/// Files are kept as given. Directories are scanned (not recursively) for
/// `*.json` files, which are added in path order.
///
/// # Errors
///
/// Returns `Err` if an input does not exist or a directory cannot be listed.
pub fn collect_result_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for input in inputs {
        let metadata = fs::metadata(input).map_err(|e| CliError::io_error(input, e))?;
        if !metadata.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in fs::read_dir(input).map_err(|e| CliError::io_error(input, e))? {
            let path = entry.map_err(|e| CliError::io_error(input, e))?.path();
            let is_json = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if is_json && path.is_file() {
                found.push(path);
            }
        }
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_file_missing() {
        let err = read_file(Path::new("/nonexistent/results.json")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_collect_result_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.JSON"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();
        let single = dir.path().join("notes.txt");

        let files = collect_result_files(&[dir.path().to_path_buf(), single.clone()]).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.JSON"), dir.path().join("b.json"), single]
        );
    }

    #[test]
    fn test_collect_missing_input() {
        let err = collect_result_files(&[PathBuf::from("/nonexistent/dir")]).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
