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

//! Single-pass parser from raw profiler output to record sets.
//!
//! The parser walks the text once, line by line, with no backtracking.
//! Lines that are neither test markers nor tagged with `MajorGC:` or
//! `MinorGC:` are ignored, so the profile can be interleaved with any other
//! output.
//!
//! # Basic Usage
//!
//! ```rust
//! use gcprof_core::parse_profile;
//!
//! let log = "\
//! MajorGC: PID Runtime total
//! MajorGC: 1   0xa     2.0
//! Testing url http://example.com
//! MajorGC: 1   0xa     4.0
//! PageCompleteCheck returned true
//! ";
//!
//! let data = parse_profile(log).unwrap();
//! assert_eq!(data.major.len(), 2);
//! assert_eq!(data.major.records()[0].test_num(), 0);
//! assert_eq!(data.major.records()[1].test_num(), 1);
//! assert_eq!(data.test_count, 1);
//! assert!(data.minor.is_empty());
//! ```

use crate::classifier::{LineClassifier, LineKind, WindowTracker};
use crate::error::{ProfileError, ProfileResult};
use crate::options::TestMarkers;
use crate::record::{GcCategory, Record, RecordSet};
use crate::store::RecordStore;
use tracing::debug;

/// Everything recovered from one log.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    /// Major GC records in log order.
    pub major: RecordSet,
    /// Minor GC records in log order.
    pub minor: RecordSet,
    /// Number of test windows opened.
    pub test_count: u32,
    /// Data lines rejected because their width did not match the layout.
    pub dropped_lines: usize,
}

impl ProfileData {
    /// Major records followed by minor records.
    pub fn all_records(&self) -> impl Iterator<Item = &Record> {
        self.major.iter().chain(self.minor.iter())
    }

    /// Record set for `category`.
    pub fn set(&self, category: GcCategory) -> &RecordSet {
        match category {
            GcCategory::Major => &self.major,
            GcCategory::Minor => &self.minor,
        }
    }
}

/// Line-oriented profile parser.
#[derive(Debug, Clone)]
pub struct ProfileParser {
    classifier: LineClassifier,
}

impl Default for ProfileParser {
    fn default() -> Self {
        Self::new(TestMarkers::default())
    }
}

impl ProfileParser {
    pub fn new(markers: TestMarkers) -> Self {
        Self {
            classifier: LineClassifier::new(markers),
        }
    }

    /// Parse a complete log.
    ///
    /// # Errors
    ///
    /// - `ProfileError::NestedTestWindow`: a start marker inside an open window
    /// - `ProfileError::InvalidHeader`: a category's first header lacks `PID`/`Runtime`
    /// - `ProfileError::NoProfileData`: neither category produced a record
    pub fn parse(&self, text: &str) -> ProfileResult<ProfileData> {
        let mut tracker = WindowTracker::new();
        let mut major = RecordStore::new(GcCategory::Major);
        let mut minor = RecordStore::new(GcCategory::Minor);

        for (index, line) in text.lines().enumerate() {
            let line_num = index + 1;

            match self.classifier.classify(line, tracker.is_in_test()) {
                LineKind::TestStart => {
                    let test_num = tracker.enter(line_num)?;
                    debug!(line = line_num, test_num, "test window opened");
                }
                LineKind::TestEnd => {
                    if let Some(test_num) = tracker.exit() {
                        debug!(line = line_num, test_num, "test window closed");
                    }
                }
                LineKind::Event { category, line } => {
                    let store = match category {
                        GcCategory::Major => &mut major,
                        GcCategory::Minor => &mut minor,
                    };
                    store.accept(line_num, line, tracker.current_test_num())?;
                }
                LineKind::Other => {}
            }
        }

        if major.is_empty() && minor.is_empty() {
            return Err(ProfileError::NoProfileData);
        }

        let dropped_lines = major.dropped() + minor.dropped();
        debug!(
            major = major.len(),
            minor = minor.len(),
            dropped_lines,
            tests = tracker.test_count(),
            "parsed profile"
        );

        Ok(ProfileData {
            major: major.into_set(),
            minor: minor.into_set(),
            test_count: tracker.test_count(),
            dropped_lines,
        })
    }
}

/// Parse a log with the default test markers.
pub fn parse_profile(text: &str) -> ProfileResult<ProfileData> {
    ProfileParser::default().parse(text)
}
