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

//! Property-based tests for record filters.

use gcprof_core::filter::{by_reason, by_runtime, by_window};
use gcprof_core::{parse_profile, Layout, RuntimeKey};
use gcprof_test::fixtures::builders::{MajorSlice, ProfileLogBuilder};
use proptest::prelude::*;

const RUNTIMES: &[(&str, &str)] = &[("1000", "0x1"), ("1000", "0x2"), ("2000", "0x1")];
const REASONS: &[&str] = &["ALLOC_TRIGGER", "TOO_MUCH_MALLOC", "CC_FINISHED"];

#[derive(Debug, Clone)]
struct Event {
    runtime: (&'static str, &'static str),
    reason: &'static str,
    in_test: bool,
}

fn events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(
        (
            prop::sample::select(RUNTIMES),
            prop::sample::select(REASONS),
            any::<bool>(),
        )
            .prop_map(|(runtime, reason, in_test)| Event {
                runtime,
                reason,
                in_test,
            }),
        1..40,
    )
}

/// Each in-test event gets its own window.
fn log(events: &[Event]) -> String {
    let mut builder = ProfileLogBuilder::new().major_header();
    for (i, event) in events.iter().enumerate() {
        let slice = MajorSlice::new(1.0)
            .runtime(event.runtime.0, event.runtime.1)
            .reason(event.reason)
            .timestamp(i as f64);
        builder = if event.in_test {
            builder.start_test("http://t").major(slice).end_test()
        } else {
            builder.major(slice)
        };
    }
    builder.build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: filtering by runtime then reason equals reason then runtime.
    #[test]
    fn prop_runtime_and_reason_commute(
        events in events(),
        runtime in prop::sample::select(RUNTIMES),
        reason in prop::sample::select(REASONS),
    ) {
        let data = parse_profile(&log(&events)).unwrap();
        let key = RuntimeKey::new(runtime.0, runtime.1);

        let a = by_reason(&by_runtime(&data.major, &key), reason).unwrap();
        let b = by_runtime(&by_reason(&data.major, reason).unwrap(), &key);
        prop_assert_eq!(a.records(), b.records());
    }

    /// Property: the window filter partitions a set and keeps order.
    #[test]
    fn prop_window_filter_partitions(events in events()) {
        let data = parse_profile(&log(&events)).unwrap();
        let inside = by_window(&data.major, true);
        let outside = by_window(&data.major, false);

        prop_assert_eq!(inside.len() + outside.len(), data.major.len());
        prop_assert_eq!(inside.len(), events.iter().filter(|e| e.in_test).count());

        let stamps: Vec<&str> = inside.iter().map(|r| r.field(2).unwrap()).collect();
        let mut sorted = stamps.clone();
        sorted.sort_by(|a, b| a.parse::<f64>().unwrap().total_cmp(&b.parse::<f64>().unwrap()));
        prop_assert_eq!(stamps, sorted);
    }

    /// Property: every record is as wide as its layout.
    #[test]
    fn prop_record_width_matches_layout(events in events()) {
        let data = parse_profile(&log(&events)).unwrap();
        let width = data.major.layout().map(Layout::field_map).unwrap().len();
        for record in &data.major {
            prop_assert_eq!(record.len(), width);
        }
    }
}
