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

//! Property-based tests for test window attribution.

use gcprof_core::parse_profile;
use gcprof_test::fixtures::builders::{MajorSlice, ProfileLogBuilder};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Step {
    Event,
    Start,
    End,
}

fn steps() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(Step::Event),
            1 => Just(Step::Start),
            1 => Just(Step::End),
        ],
        1..60,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: each event carries the number of the window it fell in, or
    /// 0 outside any window.
    #[test]
    fn prop_events_carry_window_number(steps in steps()) {
        let mut builder = ProfileLogBuilder::new().major_header();
        let mut expected = Vec::new();
        let mut open: Option<u32> = None;
        let mut count = 0u32;

        for step in steps {
            match step {
                Step::Event => {
                    builder = builder.major(MajorSlice::new(1.0));
                    expected.push(open.unwrap_or(0));
                }
                // Never nest: a start while open is skipped.
                Step::Start if open.is_none() => {
                    count += 1;
                    open = Some(count);
                    builder = builder.start_test("http://t");
                }
                Step::Start => {}
                // End markers outside a window are ignored by the parser.
                Step::End => {
                    open = None;
                    builder = builder.end_test();
                }
            }
        }
        // Keep the log non-empty.
        builder = builder.major(MajorSlice::new(1.0));
        expected.push(open.unwrap_or(0));

        let data = parse_profile(&builder.build()).unwrap();
        let actual: Vec<u32> = data.major.iter().map(|r| r.test_num()).collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(data.test_count, count);
    }
}
