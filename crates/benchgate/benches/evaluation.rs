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


//! Batch evaluation benchmarks.
//!
//! Measures resolution plus evaluation over synthetic batches, and report
//! rendering for the same batches.

use benchgate::{evaluate_batch, render, to_markdown, BaselineTable, MetricRecord, RunInput};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const PLATFORMS: [&str; 3] = ["linux", "macos", "windows"];

fn build_table(keys: usize) -> BaselineTable {
    let mut source = String::new();
    for platform in PLATFORMS {
        source.push_str(&format!("{}:\n", platform));
        for i in 0..keys {
            source.push_str(&format!(
                "  suite_{}:\n    min_throughput_msgs_per_sec: 100000\n    max_memory_mb: 64\n    max_latency_p99_us: 50\n    max_violation_percent: 1\n",
                i
            ));
        }
    }
    BaselineTable::parse(&source).expect("valid generated baseline")
}

fn build_runs(count: usize, keys: usize) -> Vec<RunInput> {
    (0..count)
        .map(|i| {
            let record = MetricRecord::new(format!("suite_{}_bench_{}", i % (keys + 1), i))
                .with_throughput(80_000.0 + (i % 40) as f64 * 1_000.0)
                .with_peak_memory(40.0 + (i % 30) as f64)
                .with_latency_p99(30.0 + (i % 35) as f64)
                .with_error_rate(0.0)
                .with_violation_rate((i % 3) as f64);
            RunInput::new(record, PLATFORMS[i % 3], format!("run_{}.json", i))
        })
        .collect()
}

fn bench_evaluate_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_batch");
    let table = build_table(20);

    for size in [10usize, 100, 1_000] {
        let runs = build_runs(size, 20);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &runs, |b, runs| {
            b.iter(|| evaluate_batch(black_box(runs), &table))
        });
    }

    group.finish();
}

fn bench_render_markdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_markdown");
    let table = build_table(20);

    for size in [10usize, 100] {
        let batch = evaluate_batch(&build_runs(size, 20), &table);
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| to_markdown(&render(&batch.summary, batch.verdicts())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate_batch, bench_render_markdown);
criterion_main!(benches);
