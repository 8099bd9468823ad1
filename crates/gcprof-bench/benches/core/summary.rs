// gcprof - GC profile log summarizer
//
// Copyright (c) 2025 gcprof contributors.
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

//! Summarizer throughput: runtime selection, filters and metric passes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gcprof_bench::datasets;
use gcprof_core::{parse_profile, summarize_profile, SummaryOptions, Summarizer};

fn bench_summarize_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_profile");
    let options = SummaryOptions::default();

    for (events, log) in datasets() {
        group.throughput(Throughput::Bytes(log.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(events), &log, |b, log| {
            b.iter(|| summarize_profile(black_box(log), &options))
        });
    }

    group.finish();
}

fn bench_summarize_parsed(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_parsed");

    let configs = [
        ("default", SummaryOptions::default()),
        (
            "all_runtimes_no_windows",
            SummaryOptions::builder()
                .filter_most_active_runtime(false)
                .windowed(false)
                .build(),
        ),
    ];

    for (events, log) in datasets() {
        let Ok(data) = parse_profile(&log) else {
            continue;
        };
        for (name, options) in &configs {
            let summarizer = Summarizer::new(options);
            group.throughput(Throughput::Elements((data.major.len() + data.minor.len()) as u64));
            group.bench_with_input(BenchmarkId::new(*name, events), &data, |b, data| {
                b.iter(|| summarizer.summarize(black_box(data)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_summarize_profile, bench_summarize_parsed);
criterion_main!(benches);
