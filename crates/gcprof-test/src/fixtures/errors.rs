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

//! Logs that must fail to parse or summarize.

use super::builders::{MajorSlice, NurseryCollection, ProfileLogBuilder};

/// Logs that contain no event at all.
pub fn no_profile_data_samples() -> Vec<(&'static str, String)> {
    vec![
        ("empty", String::new()),
        ("noise_only", "console.log: hello\nconsole.log: world\n".to_string()),
        (
            "headers_only",
            ProfileLogBuilder::new().major_header().minor_header().build(),
        ),
        (
            "totals_only",
            ProfileLogBuilder::new()
                .major_header()
                .major_totals()
                .minor_totals()
                .build(),
        ),
    ]
}

/// A second start marker before the first window closed, on line 3.
pub fn nested_test_windows() -> String {
    ProfileLogBuilder::new()
        .start_test("http://a")
        .raw("console.log: still loading")
        .start_test("http://b")
        .build()
}

/// A major header whose second column is not `Runtime`.
pub fn misordered_header() -> String {
    ProfileLogBuilder::new()
        .major_columns(&["PID", "Timestamp", "Runtime", "total"])
        .major_header()
        .major_row(["1", "0.5", "0x1", "1.0"])
        .build()
}

/// A nursery collection whose promotion rate lacks the `%` suffix.
pub fn bad_promotion_rate() -> String {
    ProfileLogBuilder::new()
        .minor_header()
        .minor(NurseryCollection::new(100.0).promotion_rate_text("12.5"))
        .build()
}

/// A major slice whose total is not a number.
pub fn non_numeric_total() -> String {
    ProfileLogBuilder::new()
        .major_header()
        .major(MajorSlice::new(1.0))
        .major_row([
            "1000", "0x1", "0.1", "ALLOC_TRIGGER", "0 -> 1", "1", "1", "n/a", "", "", "", "", "",
            "", "0", "0",
        ])
        .build()
}

/// A header repeating a column name. Every data line of the category is
/// dropped, so the log holds no data.
pub fn duplicate_column() -> String {
    ProfileLogBuilder::new()
        .major_columns(&["PID", "Runtime", "mark", "mark"])
        .major_header()
        .major_row(["1", "0x1", "2", "3"])
        .build()
}
