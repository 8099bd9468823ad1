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

//! Column layouts derived from profiler header lines.
//!
//! The profiler prints a header line per category and then fixed-width data
//! lines aligned to it. A [`Layout`] captures both halves of that contract:
//! the [`FieldMap`] (column name to record index) and the [`Span`] list used
//! to cut every following data line into fields.
//!
//! ```text
//! PID   Runtime  Timestamp  Reason         total
//! |---| |------| |--------| |-----------|  |---|
//! ```
//!
//! Each span covers a column name plus the whitespace that follows it, so a
//! value printed under a header column is recovered by slicing the data line
//! at the same character offsets and trimming.
//!
//! # Examples
//!
//! ```rust
//! use gcprof_core::{GcCategory, Layout};
//!
//! let layout = Layout::from_header(GcCategory::Major, 1, "PID Runtime total").unwrap();
//! assert_eq!(layout.field_map().index_of("total"), Some(2));
//! assert_eq!(layout.field_map().index_of("testNum"), Some(3));
//!
//! let fields = layout.slice("  7 0x1      2.5");
//! assert_eq!(fields, vec!["7", "0x1", "2.5"]);
//! ```

use crate::error::{ProfileError, ProfileResult};
use crate::record::GcCategory;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

/// Column holding the process identifier; every header starts with it.
pub const PID_FIELD: &str = "PID";

/// Column holding the runtime identifier; always second.
pub const RUNTIME_FIELD: &str = "Runtime";

/// Synthetic column appended to every field map for the test window number.
pub const TEST_NUM_FIELD: &str = "testNum";

fn header_token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"(\w+)\s*").expect("static header pattern is valid"))
}

/// Half-open character interval `[start, end)` within a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Width of the span in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no characters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cut this span out of `line`.
    ///
    /// Offsets past the end of the line are clamped, so a short line yields
    /// empty trailing columns rather than an error.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        if line.is_ascii() {
            let start = self.start.min(line.len());
            let end = self.end.min(line.len()).max(start);
            return &line[start..end];
        }

        let start = char_to_byte(line, self.start);
        let end = char_to_byte(line, self.end).max(start);
        &line[start..end]
    }
}

fn char_to_byte(line: &str, char_offset: usize) -> usize {
    line.char_indices()
        .nth(char_offset)
        .map_or(line.len(), |(byte, _)| byte)
}

/// Mapping from column name to record index.
///
/// Indices follow header order. [`PID_FIELD`] and [`RUNTIME_FIELD`] are always
/// at 0 and 1, and [`TEST_NUM_FIELD`] is always the last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl FieldMap {
    fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut map = Self {
            names: Vec::new(),
            index: HashMap::new(),
        };
        for name in names {
            map.push(name);
        }
        map.push(TEST_NUM_FIELD);
        map
    }

    fn push(&mut self, name: &str) {
        if self.index.contains_key(name) {
            warn!(column = name, "duplicate header column, keeping first occurrence");
            return;
        }
        self.index.insert(name.to_string(), self.names.len());
        self.names.push(name.to_string());
    }

    /// Index of a column, if the header declared it.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether the header declared a column.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of entries, including the synthetic test number.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the test number column is present in every map.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Index of the synthetic test number column.
    #[inline]
    pub fn test_num_index(&self) -> usize {
        self.names.len() - 1
    }
}

/// Field map plus the spans used to slice data lines of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    category: GcCategory,
    field_map: FieldMap,
    spans: Vec<Span>,
}

impl Layout {
    /// Build a layout from a header line (category tag already stripped).
    ///
    /// Tokens are runs of word characters; each token's span extends over the
    /// whitespace that follows it.
    ///
    /// # Errors
    ///
    /// `ProfileError::InvalidHeader` if the header does not start with the
    /// `PID` and `Runtime` columns.
    pub fn from_header(category: GcCategory, line: usize, header: &str) -> ProfileResult<Self> {
        let mut names = Vec::new();
        let mut spans = Vec::new();

        for m in header_token_regex().captures_iter(header) {
            let (Some(whole), Some(name)) = (m.get(0), m.get(1)) else {
                continue;
            };
            let start = header[..whole.start()].chars().count();
            let end = start + whole.as_str().chars().count();
            names.push(name.as_str());
            spans.push(Span::new(start, end));
        }

        let field_map = FieldMap::from_names(names);

        if field_map.index_of(PID_FIELD) != Some(0) {
            return Err(ProfileError::invalid_header(
                category,
                line,
                format!("first column must be '{}'", PID_FIELD),
            ));
        }
        if field_map.index_of(RUNTIME_FIELD) != Some(1) {
            return Err(ProfileError::invalid_header(
                category,
                line,
                format!("second column must be '{}'", RUNTIME_FIELD),
            ));
        }

        Ok(Self {
            category,
            field_map,
            spans,
        })
    }

    /// Whether a category body is a header line.
    #[inline]
    pub fn is_header(body: &str) -> bool {
        body.starts_with(PID_FIELD)
    }

    /// Category this layout belongs to.
    #[inline]
    pub fn category(&self) -> GcCategory {
        self.category
    }

    /// Column name to index mapping.
    #[inline]
    pub fn field_map(&self) -> &FieldMap {
        &self.field_map
    }

    /// Spans in header order.
    #[inline]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Slice a data line into trimmed column values, one per span.
    pub fn slice(&self, line: &str) -> Vec<String> {
        self.spans
            .iter()
            .map(|span| span.slice(line).trim().to_string())
            .collect()
    }
}
