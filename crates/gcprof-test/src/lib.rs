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

//! Shared test fixtures for gcprof.
//!
//! Profiler logs are fixed-width tables, so fixtures are generated with a
//! builder that aligns every value under its header column instead of being
//! typed out by hand.
//!
//! # Quick Start
//!
//! ```rust
//! use gcprof_test::fixtures;
//! use gcprof_test::fixtures::builders::{MajorSlice, NurseryCollection, ProfileLogBuilder};
//!
//! // Pre-built logs
//! let log = fixtures::single_runtime();
//! let log = fixtures::with_test_windows();
//!
//! // Custom logs
//! let log = ProfileLogBuilder::new()
//!     .major_header()
//!     .minor_header()
//!     .major(MajorSlice::new(1.5).reason("TOO_MUCH_MALLOC"))
//!     .minor(NurseryCollection::new(250.0).promotion_rate(12.5))
//!     .build();
//!
//! // Failure cases
//! for (name, log) in fixtures::errors::no_profile_data_samples() {
//!     // expect ProfileError::NoProfileData
//! }
//! ```

/// Fixture name and generator pairs.
pub type FixtureList = Vec<(&'static str, fn() -> String)>;

/// Canned profiler logs.
pub mod fixtures;

pub use fixtures::*;

/// Number of lines carrying a GC category tag.
pub fn count_event_lines(log: &str) -> usize {
    log.lines()
        .filter(|line| line.contains("MajorGC:") || line.contains("MinorGC:"))
        .count()
}
