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


//! Parallel loading of result files.
//!
//! Result files are independent, so they are read and parsed with Rayon once
//! the batch is large enough to amortise the thread pool. Results always come
//! back in input order regardless of how they were processed, which keeps
//! reports stable between serial and parallel runs.
//!
//! # Examples
//!
//! ```rust,no_run
//! use benchgate_cli::batch::{BatchConfig, BatchProcessor, LoadResultsOperation};
//! use std::path::PathBuf;
//!
//! let processor = BatchProcessor::new(BatchConfig {
//!     parallel_threshold: 4,
//!     ..Default::default()
//! });
//! let files = vec![PathBuf::from("linux.json"), PathBuf::from("macos.json")];
//! let results = processor.process(&files, LoadResultsOperation::new(None));
//! println!("loaded {} of {} files", results.success_count(), results.total_files());
//! ```

use crate::commands::read_file;
use crate::error::CliError;
use crate::records::{parse_results, LoadedResults};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum number of files to trigger parallel processing.
    ///
    /// Default: 10
    pub parallel_threshold: usize,

    /// Force parallel processing regardless of the threshold.
    pub force_parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 10,
            force_parallel: false,
        }
    }
}

/// Result of processing a single file.
#[derive(Debug, Clone)]
pub struct FileResult<T> {
    /// The file path that was processed
    pub path: PathBuf,
    /// The result of processing (Ok or Err)
    pub result: Result<T, CliError>,
}

impl<T> FileResult<T> {
    /// Check if the result is successful.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Check if the result is a failure.
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Results of a batch, in input order.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    /// Individual results for each processed file
    pub results: Vec<FileResult<T>>,
}

impl<T> BatchResults<T> {
    /// Create new batch results.
    pub fn new(results: Vec<FileResult<T>>) -> Self {
        Self { results }
    }

    /// Get the total number of files processed.
    pub fn total_files(&self) -> usize {
        self.results.len()
    }

    /// Get the number of successfully processed files.
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Get the number of failed files.
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Check if any files failed.
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.is_failure())
    }
}

/// An operation applied to every file of a batch.
///
/// The operation must be thread-safe (Send + Sync) to support parallel
/// processing.
pub trait BatchOperation: Send + Sync {
    /// The output type for successful processing
    type Output: Send;

    /// Process a single file.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`] describing why the file could not be processed.
    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError>;

    /// Human-readable name, used in logs.
    fn name(&self) -> &str;
}

/// Counts processed files across threads.
#[derive(Debug)]
struct ProgressTracker {
    total: usize,
    processed: AtomicUsize,
    failed: AtomicUsize,
    start_time: Instant,
}

impl ProgressTracker {
    fn new(total: usize) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    fn record<T>(&self, path: &Path, result: &Result<T, CliError>) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        match result {
            Ok(_) => debug!(
                file = %path.display(),
                progress = format_args!("{}/{}", processed, self.total),
                "processed file"
            ),
            Err(e) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                warn!(file = %path.display(), error = %e, "failed to process file");
            }
        }
    }

    fn log_summary(&self, operation_name: &str) {
        let processed = self.processed.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        info!(
            operation = operation_name,
            files = processed,
            failed,
            elapsed_ms = self.start_time.elapsed().as_millis() as u64,
            "batch finished"
        );
    }
}

/// Batch processor selecting serial or parallel execution.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor with the given configuration.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Create a batch processor with default configuration.
    pub fn default_config() -> Self {
        Self::new(BatchConfig::default())
    }

    fn use_parallel(&self, file_count: usize) -> bool {
        self.config.force_parallel || file_count >= self.config.parallel_threshold
    }

    /// Process every file with `operation` and collect all results.
    ///
    /// Failures of individual files never stop the batch.
    pub fn process<O>(&self, files: &[PathBuf], operation: O) -> BatchResults<O::Output>
    where
        O: BatchOperation,
    {
        if files.is_empty() {
            return BatchResults::new(vec![]);
        }

        let tracker = ProgressTracker::new(files.len());
        let process_one = |path: &PathBuf| {
            let result = operation.process_file(path);
            tracker.record(path, &result);
            FileResult {
                path: path.clone(),
                result,
            }
        };

        let results: Vec<FileResult<O::Output>> = if self.use_parallel(files.len()) {
            files.par_iter().map(process_one).collect()
        } else {
            files.iter().map(process_one).collect()
        };

        tracker.log_summary(operation.name());
        BatchResults::new(results)
    }
}

/// Reads and parses one results file.
#[derive(Debug, Clone, Default)]
pub struct LoadResultsOperation {
    platform_flag: Option<String>,
}

impl LoadResultsOperation {
    /// Create the operation; `platform_flag` is the `--platform` value.
    pub fn new(platform_flag: Option<String>) -> Self {
        Self { platform_flag }
    }
}

impl BatchOperation for LoadResultsOperation {
    type Output = LoadedResults;

    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
        let content = read_file(path)?;
        parse_results(&content, path, self.platform_flag.as_deref())
    }

    fn name(&self) -> &str {
        "load-results"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct LengthOperation;

    impl BatchOperation for LengthOperation {
        type Output = usize;

        fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
            read_file(path).map(|s| s.len())
        }

        fn name(&self) -> &str {
            "length"
        }
    }

    fn write_files(dir: &TempDir, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let path = dir.path().join(format!("f{:02}.json", i));
                fs::write(&path, "x".repeat(i)).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert_eq!(config.parallel_threshold, 10);
        assert!(!config.force_parallel);
    }

    #[test]
    fn test_empty_batch() {
        let results = BatchProcessor::default_config().process(&[], LengthOperation);
        assert_eq!(results.total_files(), 0);
        assert!(!results.has_failures());
    }

    #[test]
    fn test_serial_and_parallel_keep_order() {
        let dir = TempDir::new().unwrap();
        let files = write_files(&dir, 24);

        let serial = BatchProcessor::new(BatchConfig {
            parallel_threshold: usize::MAX,
            ..Default::default()
        })
        .process(&files, LengthOperation);
        let parallel = BatchProcessor::new(BatchConfig {
            force_parallel: true,
            ..Default::default()
        })
        .process(&files, LengthOperation);

        let lengths = |r: &BatchResults<usize>| -> Vec<usize> {
            r.results
                .iter()
                .map(|f| *f.result.as_ref().unwrap())
                .collect()
        };
        assert_eq!(lengths(&serial), (0..24).collect::<Vec<_>>());
        assert_eq!(lengths(&serial), lengths(&parallel));
    }

    #[test]
    fn test_failures_are_collected() {
        let dir = TempDir::new().unwrap();
        let mut files = write_files(&dir, 2);
        files.insert(1, dir.path().join("missing.json"));

        let results = BatchProcessor::default_config().process(&files, LengthOperation);
        assert_eq!(results.total_files(), 3);
        assert_eq!(results.success_count(), 2);
        assert_eq!(results.failure_count(), 1);
        assert!(results.results[1].is_failure());
    }

    #[test]
    fn test_load_results_operation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bench_macos.json");
        fs::write(&path, r#"{"test_name": "ipc", "throughput_msgs_per_sec": 5}"#).unwrap();

        let loaded = LoadResultsOperation::new(None).process_file(&path).unwrap();
        assert_eq!(loaded.runs.len(), 1);
        assert_eq!(loaded.runs[0].platform, "macos");
    }
}
