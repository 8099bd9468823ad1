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

//! Configuration for parsing and summarization.
//!
//! # Examples
//!
//! ## Default Configuration
//!
//! ```rust
//! use gcprof_core::{MetricCategory, SummaryOptions};
//!
//! let options = SummaryOptions::default();
//! assert!(options.categories.contains(MetricCategory::Major));
//! assert!(options.filter_most_active_runtime);
//! assert_eq!(options.markers.start, "Testing url");
//! ```
//!
//! ## Builder
//!
//! ```rust
//! use gcprof_core::{MetricCategory, SummaryOptions};
//!
//! let options = SummaryOptions::builder()
//!     .categories([MetricCategory::Minor, MetricCategory::Reason].into_iter().collect())
//!     .filter_most_active_runtime(false)
//!     .phase_times(false)
//!     .build();
//!
//! assert!(!options.categories.contains(MetricCategory::Major));
//! assert!(!options.filter_most_active_runtime);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default substring that opens a test window.
pub const DEFAULT_START_MARKER: &str = "Testing url";

/// Default substring that closes a test window.
pub const DEFAULT_END_MARKER: &str = "PageCompleteCheck returned true";

/// Groups of metrics a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MetricCategory {
    /// Major collection counts, times, phase and marking breakdowns.
    Major,
    /// Minor (nursery) collection counts and times.
    Minor,
    /// Heap, malloc and nursery sizes.
    Size,
    /// Reason-code counts and promotion rate.
    Reason,
}

impl MetricCategory {
    /// All categories, in declaration order.
    pub const ALL: [MetricCategory; 4] = [
        MetricCategory::Major,
        MetricCategory::Minor,
        MetricCategory::Size,
        MetricCategory::Reason,
    ];

    /// Lowercase category name.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricCategory::Major => "major",
            MetricCategory::Minor => "minor",
            MetricCategory::Size => "size",
            MetricCategory::Reason => "reason",
        }
    }
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category name that is not one of `major`, `minor`, `size`, `reason`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown metric category '{0}' (expected major, minor, size or reason)")]
pub struct ParseCategoryError(pub String);

impl FromStr for MetricCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(MetricCategory::Major),
            "minor" => Ok(MetricCategory::Minor),
            "size" => Ok(MetricCategory::Size),
            "reason" => Ok(MetricCategory::Reason),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// Set of requested metric categories.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Categories(BTreeSet<MetricCategory>);

impl Categories {
    /// No categories: only `Total GC time` is produced.
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    /// Every category.
    pub fn all() -> Self {
        MetricCategory::ALL.into_iter().collect()
    }

    #[inline]
    pub fn contains(&self, category: MetricCategory) -> bool {
        self.0.contains(&category)
    }

    /// Whether both categories are requested.
    #[inline]
    pub fn contains_both(&self, a: MetricCategory, b: MetricCategory) -> bool {
        self.contains(a) && self.contains(b)
    }

    pub fn insert(&mut self, category: MetricCategory) -> bool {
        self.0.insert(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = MetricCategory> + '_ {
        self.0.iter().copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<MetricCategory> for Categories {
    fn from_iter<I: IntoIterator<Item = MetricCategory>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for Categories {
    type Err = ParseCategoryError;

    /// Parse a comma-separated list such as `major,minor`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(MetricCategory::from_str)
            .collect()
    }
}

/// Substrings that delimit a test window in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestMarkers {
    pub start: String,
    pub end: String,
}

impl Default for TestMarkers {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_MARKER.to_string(),
            end: DEFAULT_END_MARKER.to_string(),
        }
    }
}

/// Options controlling a summarization call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SummaryOptions {
    /// Metric groups to produce.
    ///
    /// Default: all four.
    pub categories: Categories,

    /// Keep only the events of the runtime with the most events.
    ///
    /// Default: true
    pub filter_most_active_runtime: bool,

    /// Test window delimiters.
    pub markers: TestMarkers,

    /// Emit per-phase major GC time totals.
    ///
    /// Default: true
    pub phase_times: bool,

    /// Emit parallel marking donations and the geometric mean mark rate when
    /// the profile carries those columns.
    ///
    /// Default: true
    pub parallel_marking: bool,

    /// Emit the timestamp and heap size of the first non-idle major GC.
    ///
    /// Default: false
    pub first_major_gc: bool,

    /// Repeat the summary for events inside and outside test windows when
    /// the log contains at least one window.
    ///
    /// Default: true
    pub windowed: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            categories: Categories::all(),
            filter_most_active_runtime: true,
            markers: TestMarkers::default(),
            phase_times: true,
            parallel_marking: true,
            first_major_gc: false,
            windowed: true,
        }
    }
}

impl SummaryOptions {
    /// Start building options from the defaults.
    pub fn builder() -> SummaryOptionsBuilder {
        SummaryOptionsBuilder::new()
    }
}

/// Builder for [`SummaryOptions`].
#[derive(Debug, Clone, Default)]
pub struct SummaryOptionsBuilder {
    options: SummaryOptions,
}

impl SummaryOptionsBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(mut self, categories: Categories) -> Self {
        self.options.categories = categories;
        self
    }

    pub fn filter_most_active_runtime(mut self, filter: bool) -> Self {
        self.options.filter_most_active_runtime = filter;
        self
    }

    /// Replace the test window delimiters.
    pub fn markers(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.options.markers = TestMarkers {
            start: start.into(),
            end: end.into(),
        };
        self
    }

    pub fn phase_times(mut self, enabled: bool) -> Self {
        self.options.phase_times = enabled;
        self
    }

    pub fn parallel_marking(mut self, enabled: bool) -> Self {
        self.options.parallel_marking = enabled;
        self
    }

    pub fn first_major_gc(mut self, enabled: bool) -> Self {
        self.options.first_major_gc = enabled;
        self
    }

    pub fn windowed(mut self, enabled: bool) -> Self {
        self.options.windowed = enabled;
        self
    }

    pub fn build(self) -> SummaryOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Category parsing tests ====================

    #[test]
    fn test_parse_category_case_insensitive() {
        assert_eq!("Major".parse::<MetricCategory>().unwrap(), MetricCategory::Major);
        assert_eq!(" size ".parse::<MetricCategory>().unwrap(), MetricCategory::Size);
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = "heap".parse::<MetricCategory>().unwrap_err();
        assert!(err.to_string().contains("'heap'"));
    }

    #[test]
    fn test_parse_category_list() {
        let cats: Categories = "major,reason".parse().unwrap();
        assert!(cats.contains(MetricCategory::Major));
        assert!(cats.contains(MetricCategory::Reason));
        assert!(!cats.contains(MetricCategory::Minor));
        assert!(cats.contains_both(MetricCategory::Major, MetricCategory::Reason));
    }

    #[test]
    fn test_parse_empty_category_list() {
        let cats: Categories = "".parse().unwrap();
        assert!(cats.is_empty());
    }

    #[test]
    fn test_all_categories() {
        let cats = Categories::all();
        assert_eq!(cats.iter().count(), 4);
    }

    // ==================== Defaults and builder tests ====================

    #[test]
    fn test_default_options() {
        let options = SummaryOptions::default();
        assert_eq!(options.categories, Categories::all());
        assert!(options.filter_most_active_runtime);
        assert!(options.phase_times);
        assert!(options.parallel_marking);
        assert!(!options.first_major_gc);
        assert!(options.windowed);
        assert_eq!(options.markers.end, DEFAULT_END_MARKER);
    }

    #[test]
    fn test_builder_overrides() {
        let options = SummaryOptions::builder()
            .categories(Categories::none())
            .markers("BEGIN", "END")
            .first_major_gc(true)
            .windowed(false)
            .parallel_marking(false)
            .build();

        assert!(options.categories.is_empty());
        assert_eq!(options.markers.start, "BEGIN");
        assert_eq!(options.markers.end, "END");
        assert!(options.first_major_gc);
        assert!(!options.windowed);
        assert!(!options.parallel_marking);
        assert!(options.phase_times);
    }
}
