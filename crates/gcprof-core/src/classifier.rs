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

//! Line classification and test window tracking.
//!
//! The scan keeps two pieces of state: which test window (if any) is open,
//! and, per category, whether a header has been seen. The first lives here in
//! [`WindowTracker`]; the second in the parser's record stores.
//!
//! ```text
//!            start marker (test_count += 1)
//!   Outside ───────────────────────────────▶ Inside { test_num }
//!      ▲                                         │
//!      └──────────────── end marker ─────────────┘
//!
//!   Inside + start marker ──▶ ProfileError::NestedTestWindow
//! ```

use crate::error::{ProfileError, ProfileResult};
use crate::layout::Layout;
use crate::options::TestMarkers;
use crate::record::GcCategory;

/// Marker for running-total lines, which are not events.
pub const TOTALS_MARKER: &str = "TOTALS:";

/// Whether the scan is inside a test window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Outside,
    Inside {
        test_num: u32,
    },
}

/// Test window state machine.
///
/// Windows are numbered from 1 in the order they open. Nesting is a
/// structural error.
#[derive(Debug, Clone, Default)]
pub struct WindowTracker {
    state: WindowState,
    test_count: u32,
}

impl WindowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a window; returns its number.
    ///
    /// # Errors
    ///
    /// `ProfileError::NestedTestWindow` if a window is already open.
    pub fn enter(&mut self, line: usize) -> ProfileResult<u32> {
        if let WindowState::Inside { .. } = self.state {
            return Err(ProfileError::NestedTestWindow { line });
        }
        self.test_count += 1;
        self.state = WindowState::Inside {
            test_num: self.test_count,
        };
        Ok(self.test_count)
    }

    /// Close the open window, returning its number. No-op when outside.
    pub fn exit(&mut self) -> Option<u32> {
        match std::mem::take(&mut self.state) {
            WindowState::Inside { test_num } => Some(test_num),
            WindowState::Outside => None,
        }
    }

    #[inline]
    pub fn state(&self) -> WindowState {
        self.state
    }

    #[inline]
    pub fn is_in_test(&self) -> bool {
        matches!(self.state, WindowState::Inside { .. })
    }

    /// Number of the open window, or 0 when outside.
    #[inline]
    pub fn current_test_num(&self) -> u32 {
        match self.state {
            WindowState::Inside { test_num } => test_num,
            WindowState::Outside => 0,
        }
    }

    /// Windows opened so far.
    #[inline]
    pub fn test_count(&self) -> u32 {
        self.test_count
    }
}

/// What a category body (text after the `MajorGC:`/`MinorGC:` tag) holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLine<'a> {
    /// Running totals; ignored.
    Totals,
    /// Column header.
    Header(&'a str),
    /// Fixed-width event data.
    Data(&'a str),
}

impl<'a> EventLine<'a> {
    pub fn classify(body: &'a str) -> Self {
        if body.contains(TOTALS_MARKER) {
            EventLine::Totals
        } else if Layout::is_header(body) {
            EventLine::Header(body)
        } else {
            EventLine::Data(body)
        }
    }
}

/// Classification of one raw log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    TestStart,
    TestEnd,
    Event {
        category: GcCategory,
        line: EventLine<'a>,
    },
    Other,
}

/// Recognizes test markers and GC category tags.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    markers: TestMarkers,
}

impl LineClassifier {
    pub fn new(markers: TestMarkers) -> Self {
        Self { markers }
    }

    #[inline]
    pub fn markers(&self) -> &TestMarkers {
        &self.markers
    }

    /// Classify `line`.
    ///
    /// End markers only count while a window is open; otherwise the line is
    /// examined for category tags like any other.
    pub fn classify<'a>(&self, line: &'a str, in_test: bool) -> LineKind<'a> {
        if line.contains(self.markers.start.as_str()) {
            return LineKind::TestStart;
        }
        if in_test && line.contains(self.markers.end.as_str()) {
            return LineKind::TestEnd;
        }

        for category in [GcCategory::Major, GcCategory::Minor] {
            if let Some(body) = strip_tag(line, category.tag()) {
                return LineKind::Event {
                    category,
                    line: EventLine::classify(body),
                };
            }
        }

        LineKind::Other
    }
}

/// Text after the first occurrence of `tag`, minus the single separating
/// space the profiler prints.
fn strip_tag<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let (_, rest) = line.split_once(tag)?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}
