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

//! Canned profiler logs.
//!
//! Each fixture documents the values a summary of it should produce, so
//! tests can assert exact numbers without recomputing them.

use super::builders::{MajorSlice, NurseryCollection, ProfileLogBuilder};

/// One runtime, no test windows, every column populated.
///
/// Major slices (total ms): 2, 3, 0. Minor collections (total us): 500,
/// 1500, 1000.
///
/// - `Major GC slices` 2, `Major GC time` 5, `Major GC count` 2
/// - `Minor GC count` 3, `Minor GC time` 3, `Total GC time` 8
/// - heap sizes 1000, 1200, 900: max 1200, median 1000
/// - malloc sizes 100, 120, 150: max 150, median 120
/// - nursery sizes 1024, 2048, 1024: max 2048, median 1024
/// - `ALLOC_TRIGGER slices` 2, `TOO_MUCH_MALLOC slices` 1
/// - `Full store buffer nursery collections` 1, promotion rate mean 20
/// - phase `mark` 3, `prep` 0.5, `sweep` 0.25
/// - donations per collection 4, geometric mean mark rate 100
pub fn single_runtime() -> String {
    ProfileLogBuilder::new()
        .major_header()
        .minor_header()
        .minor(
            NurseryCollection::new(500.0)
                .timestamp(0.4)
                .promotion_rate(10.0),
        )
        .major(
            MajorSlice::new(2.0)
                .timestamp(0.5)
                .size_kb(1000)
                .malloc_kb(100)
                .phases([0.5, 0.0, 0.25, 1.0, 0.25, 0.0]),
        )
        .major(
            MajorSlice::new(3.0)
                .timestamp(0.6)
                .states("1 -> 0")
                .size_kb(1200)
                .malloc_kb(120)
                .phases([0.0, 0.5, 0.25, 2.0, 0.0, 0.25])
                .marking(4, 100),
        )
        .minor(
            NurseryCollection::new(1500.0)
                .timestamp(0.7)
                .reason("FULL_CELL_PTR_OBJ_BUFFER")
                .promotion_rate(20.0)
                .nursery_kb(2048),
        )
        .minor(
            NurseryCollection::new(1000.0)
                .timestamp(0.9)
                .promotion_rate(30.0),
        )
        .major(
            MajorSlice::new(0.0)
                .timestamp(1.0)
                .reason("TOO_MUCH_MALLOC")
                .states("0 -> 0")
                .size_kb(900)
                .malloc_kb(150),
        )
        .build()
}

/// Two runtimes sharing one log behind a process prefix.
///
/// Runtime `1000/0x1` has 10 major slices of 1 ms; runtime `2000/0x2` has 3
/// slices of 5 ms and appears first. With runtime filtering `Major GC time`
/// is 10; without it, 25.
pub fn interleaved_runtimes() -> String {
    let mut builder = ProfileLogBuilder::new()
        .prefix("GECKO(1000) ")
        .major_header()
        .major(MajorSlice::new(5.0).runtime("2000", "0x2"));
    for i in 0..10 {
        builder = builder.major(MajorSlice::new(1.0).timestamp(f64::from(i)));
        if i % 4 == 0 && i > 0 {
            builder = builder.major(MajorSlice::new(5.0).runtime("2000", "0x2"));
        }
    }
    builder.build()
}

/// Two test windows with events inside and outside them.
///
/// - major (ms): 1 outside, 2 in test 1, 4 outside, 8 in test 2
/// - minor (us): 1000 outside, 2000 in test 1, 3000 in test 2
///
/// `Major GC time` 15 (10 in test, 5 outside); `Minor GC time` 6 (5 in
/// test, 1 outside).
pub fn with_test_windows() -> String {
    ProfileLogBuilder::new()
        .major_header()
        .minor_header()
        .major(MajorSlice::new(1.0))
        .minor(NurseryCollection::new(1000.0))
        .start_test("http://example.com/a")
        .major(MajorSlice::new(2.0).states("1 -> 0"))
        .minor(NurseryCollection::new(2000.0))
        .end_test()
        .major(MajorSlice::new(4.0))
        .start_test("http://example.com/b")
        .major(MajorSlice::new(8.0).states("1 -> 0"))
        .minor(NurseryCollection::new(3000.0))
        .end_test()
        .build()
}

/// A log ending in runtime teardown.
///
/// Major (ms): 1 `ALLOC_TRIGGER`, 2 `DESTROY_RUNTIME` (mid-log, kept), 4
/// `ALLOC_TRIGGER`, then the tail 8 `FINISH_GC`, 16 `SHUTDOWN_CC`, 32
/// `ROOTS_REMOVED`, 64 `DESTROY_RUNTIME`. After trimming `Major GC time` is 7.
///
/// Minor (us): 1000 `OUT_OF_NURSERY`, 1000 `EVICT_NURSERY`, 2000
/// `EVICT_NURSERY`. After trimming `Minor GC time` is 2.
pub fn shutdown_tail() -> String {
    ProfileLogBuilder::new()
        .major_header()
        .minor_header()
        .major(MajorSlice::new(1.0))
        .major(MajorSlice::new(2.0).reason("DESTROY_RUNTIME"))
        .major(MajorSlice::new(4.0))
        .minor(NurseryCollection::new(1000.0))
        .minor(NurseryCollection::new(1000.0).reason("EVICT_NURSERY"))
        .major(MajorSlice::new(8.0).reason("FINISH_GC"))
        .major(MajorSlice::new(16.0).reason("SHUTDOWN_CC"))
        .major(MajorSlice::new(32.0).reason("ROOTS_REMOVED"))
        .major(MajorSlice::new(64.0).reason("DESTROY_RUNTIME"))
        .minor(NurseryCollection::new(2000.0).reason("EVICT_NURSERY"))
        .build()
}

/// Noise, a data line before its header, totals lines and a repeated
/// header around two valid major slices (1 ms and 2 ms).
///
/// Parses to 2 major records with 1 dropped line.
pub fn malformed_lines() -> String {
    ProfileLogBuilder::new()
        .raw("console.log: page loaded")
        .major(MajorSlice::new(100.0))
        .major_header()
        .raw("[Parent 1000, Main Thread] WARNING: NS_ENSURE_TRUE(x) failed")
        .major(MajorSlice::new(1.0))
        .major_totals()
        .major_header()
        .major(MajorSlice::new(2.0))
        .raw("")
        .build()
}

/// Major slices of two runtimes with heap sizes.
///
/// `1000/0x1`: (1.0, 100), (2.0, 200). `2000/0x2`: (0.5, 50), (1.0, 60).
/// On the global clock the second runtime is shifted by 1.5 and its series
/// is (1.5, 0), (2.0, 50), (2.5, 60).
pub fn multi_runtime_heap() -> String {
    ProfileLogBuilder::new()
        .major_header()
        .major(MajorSlice::new(1.0).timestamp(1.0).size_kb(100))
        .major(MajorSlice::new(1.0).timestamp(2.0).size_kb(200))
        .major(
            MajorSlice::new(1.0)
                .runtime("2000", "0x2")
                .timestamp(0.5)
                .size_kb(50),
        )
        .major(
            MajorSlice::new(1.0)
                .runtime("2000", "0x2")
                .timestamp(1.0)
                .size_kb(60),
        )
        .build()
}

/// Many runtimes and windows, for throughput measurement.
///
/// `events` major slices are spread over three runtimes, with a nursery
/// collection after every slice and a test window every 50 events.
pub fn large_log(events: usize) -> String {
    let runtimes = [("1000", "0x1"), ("1000", "0x2"), ("2000", "0x1")];
    let mut builder = ProfileLogBuilder::new().major_header().minor_header();
    let mut in_test = false;

    for i in 0..events {
        if i % 50 == 0 {
            builder = if in_test {
                builder.end_test()
            } else {
                builder.start_test(&format!("http://example.com/{}", i))
            };
            in_test = !in_test;
        }
        let (pid, runtime) = runtimes[i % runtimes.len()];
        let t = i as f64 * 0.01;
        builder = builder
            .major(
                MajorSlice::new((i % 7) as f64 * 0.5)
                    .runtime(pid, runtime)
                    .timestamp(t)
                    .states(if i % 3 == 0 { "0 -> 1" } else { "1 -> 2" })
                    .size_kb(1024 + (i % 97) as u64)
                    .phases([0.1, 0.2, 0.3, 0.4, 0.5, 0.6])
                    .marking((i % 5) as i64, (i % 4) as i64 * 25),
            )
            .minor(
                NurseryCollection::new(100.0 + (i % 13) as f64)
                    .runtime(pid, runtime)
                    .timestamp(t)
                    .promotion_rate((i % 100) as f64),
            );
    }
    if in_test {
        builder = builder.end_test();
    }
    builder.build()
}
