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

//! Canonical profiler logs for tests and benchmarks.
//!
//! - **logs**: well-formed logs with documented summary values
//! - **errors**: logs that must fail to parse or summarize
//! - **builders**: aligned log builder for custom fixtures

pub mod builders;
pub mod errors;
mod logs;

pub use logs::*;

use crate::FixtureList;

/// Returns every well-formed fixture for iteration.
pub fn all() -> FixtureList {
    vec![
        ("single_runtime", single_runtime),
        ("interleaved_runtimes", interleaved_runtimes),
        ("with_test_windows", with_test_windows),
        ("shutdown_tail", shutdown_tail),
        ("malformed_lines", malformed_lines),
        ("multi_runtime_heap", multi_runtime_heap),
    ]
}
