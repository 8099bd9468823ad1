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

//! gcprof benchmarks
//!
//! Run all benchmarks:
//! ```bash
//! cargo bench --package gcprof-bench
//! ```
//!
//! Run one:
//! ```bash
//! cargo bench --package gcprof-bench --bench summary
//! ```

use gcprof_test::large_log;

/// Standard log sizes, in major GC slices (each followed by a nursery
/// collection).
pub mod sizes {
    /// ~100 events
    pub const SMALL: usize = 100;
    /// ~1,000 events
    pub const MEDIUM: usize = 1_000;
    /// ~10,000 events
    pub const LARGE: usize = 10_000;
}

/// Synthetic logs at every standard size, as `(events, log)`.
pub fn datasets() -> Vec<(usize, String)> {
    [sizes::SMALL, sizes::MEDIUM, sizes::LARGE]
        .into_iter()
        .map(|events| (events, large_log(events)))
        .collect()
}
