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

//! Property-based tests for shutdown trimming.

use gcprof_core::filter::trim_shutdown;
use gcprof_core::parse_profile;
use gcprof_test::fixtures::builders::{MajorSlice, NurseryCollection, ProfileLogBuilder};
use proptest::prelude::*;

const REASONS: &[&str] = &[
    "ALLOC_TRIGGER",
    "TOO_MUCH_MALLOC",
    "FINISH_GC",
    "SHUTDOWN_CC",
    "DESTROY_RUNTIME",
    "ROOTS_REMOVED",
    "EVICT_NURSERY",
    "OUT_OF_NURSERY",
];

fn reasons() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(REASONS), 1..30)
}

fn log(major: &[&str], minor: &[&str]) -> String {
    let mut builder = ProfileLogBuilder::new().major_header().minor_header();
    for (i, reason) in major.iter().enumerate() {
        builder = builder.major(MajorSlice::new(i as f64).reason(*reason));
    }
    for (i, reason) in minor.iter().enumerate() {
        builder = builder.minor(NurseryCollection::new(i as f64).reason(*reason));
    }
    builder.build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: trimming twice equals trimming once.
    #[test]
    fn prop_trim_is_idempotent(major in reasons(), minor in reasons()) {
        let data = parse_profile(&log(&major, &minor)).unwrap();

        for set in [&data.major, &data.minor] {
            let once = trim_shutdown(set);
            let twice = trim_shutdown(&once);
            prop_assert_eq!(once, twice);
        }
    }

    /// Property: trimming only ever removes a suffix.
    #[test]
    fn prop_trim_keeps_prefix(major in reasons(), minor in reasons()) {
        let data = parse_profile(&log(&major, &minor)).unwrap();

        for set in [&data.major, &data.minor] {
            let trimmed = trim_shutdown(set);
            prop_assert!(trimmed.len() <= set.len());
            prop_assert_eq!(trimmed.records(), &set.records()[..trimmed.len()]);
        }
    }

    /// Property: at most one nursery collection is trimmed.
    #[test]
    fn prop_minor_trim_removes_at_most_one(minor in reasons()) {
        let data = parse_profile(&log(&["ALLOC_TRIGGER"], &minor)).unwrap();
        let trimmed = trim_shutdown(&data.minor);
        prop_assert!(data.minor.len() - trimmed.len() <= 1);
    }

    /// Property: a major tail of plain slices is left alone.
    #[test]
    fn prop_plain_tail_is_untouched(major in reasons()) {
        let mut major = major;
        major.push("ALLOC_TRIGGER");
        let data = parse_profile(&log(&major, &[])).unwrap();
        prop_assert_eq!(trim_shutdown(&data.major).len(), major.len());
    }
}
