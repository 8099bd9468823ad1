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

//! Parser throughput: line classification, header layouts and record slicing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gcprof_bench::datasets;
use gcprof_core::{parse_profile, ProfileParser, TestMarkers};

fn bench_parse_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_profile");

    for (events, log) in datasets() {
        group.throughput(Throughput::Bytes(log.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(events), &log, |b, log| {
            b.iter(|| parse_profile(black_box(log)))
        });
    }

    group.finish();
}

fn bench_custom_markers(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_custom_markers");
    // Markers that never match: no window transitions.
    let markers = TestMarkers {
        start: "BEGIN-TEST".to_string(),
        end: "END-TEST".to_string(),
    };
    let parser = ProfileParser::new(markers);

    for (events, log) in datasets() {
        group.throughput(Throughput::Bytes(log.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(events), &log, |b, log| {
            b.iter(|| parser.parse(black_box(log)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_profile, bench_custom_markers);
criterion_main!(benches);
