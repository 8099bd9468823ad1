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

//! Parsed GC events and the record sets that hold them.

use crate::error::{ProfileError, ProfileResult};
use crate::layout::Layout;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The two event categories the profiler reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GcCategory {
    Major,
    Minor,
}

impl GcCategory {
    /// Tag that marks a log line as belonging to this category.
    #[inline]
    pub fn tag(self) -> &'static str {
        match self {
            GcCategory::Major => "MajorGC:",
            GcCategory::Minor => "MinorGC:",
        }
    }

    /// Lowercase category name.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            GcCategory::Major => "major",
            GcCategory::Minor => "minor",
        }
    }
}

impl fmt::Display for GcCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one runtime: (process id, runtime id).
///
/// Both halves are kept as the profiler printed them and are only ever
/// compared, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuntimeKey {
    pub pid: String,
    pub runtime: String,
}

impl RuntimeKey {
    /// Create a runtime key.
    pub fn new(pid: impl Into<String>, runtime: impl Into<String>) -> Self {
        Self {
            pid: pid.into(),
            runtime: runtime.into(),
        }
    }
}

impl fmt::Display for RuntimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pid, self.runtime)
    }
}

/// One GC event: the sliced column values plus the test window it fell in.
///
/// The test number plays the part of the final [`TEST_NUM_FIELD`] column, so
/// [`len`](Self::len) counts it.
///
/// [`TEST_NUM_FIELD`]: crate::layout::TEST_NUM_FIELD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
    test_num: u32,
}

impl Record {
    /// Create a record from column values and a test number (0 = outside).
    pub fn new(fields: Vec<String>, test_num: u32) -> Self {
        Self { fields, test_num }
    }

    /// Column values in layout order, excluding the test number.
    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Value of the column at `index`.
    #[inline]
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Test window the event occurred in, or 0 if outside any window.
    #[inline]
    pub fn test_num(&self) -> u32 {
        self.test_num
    }

    /// Whether the event occurred inside a test window.
    #[inline]
    pub fn in_test(&self) -> bool {
        self.test_num != 0
    }

    /// Number of entries, test number included.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len() + 1
    }

    /// Always false: every record carries its test number.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The (PID, Runtime) pair from the first two columns.
    pub fn runtime_key(&self) -> RuntimeKey {
        RuntimeKey::new(
            self.field(0).unwrap_or_default(),
            self.field(1).unwrap_or_default(),
        )
    }

    /// Whether this record belongs to `key`, without allocating.
    #[inline]
    pub fn matches_runtime(&self, key: &RuntimeKey) -> bool {
        self.field(0) == Some(key.pid.as_str()) && self.field(1) == Some(key.runtime.as_str())
    }
}

/// Ordered records of one category together with the layout that produced
/// them.
///
/// Sets are never mutated once built; filters derive new sets.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    category: GcCategory,
    layout: Option<Arc<Layout>>,
    records: Vec<Record>,
    shutdown_trimmed: bool,
}

impl RecordSet {
    /// Create a set. `layout` is `None` when the category's header never
    /// appeared, in which case `records` is expected to be empty.
    pub fn new(category: GcCategory, layout: Option<Arc<Layout>>, records: Vec<Record>) -> Self {
        Self {
            category,
            layout,
            records,
            shutdown_trimmed: false,
        }
    }

    /// Empty set with no layout.
    pub fn empty(category: GcCategory) -> Self {
        Self::new(category, None, Vec::new())
    }

    /// New set sharing this set's category, layout and trim state.
    pub fn derive(&self, records: Vec<Record>) -> Self {
        Self {
            category: self.category,
            layout: self.layout.clone(),
            records,
            shutdown_trimmed: self.shutdown_trimmed,
        }
    }

    pub(crate) fn mark_shutdown_trimmed(mut self) -> Self {
        self.shutdown_trimmed = true;
        self
    }

    /// Whether shutdown trimming has already been applied.
    #[inline]
    pub fn is_shutdown_trimmed(&self) -> bool {
        self.shutdown_trimmed
    }

    #[inline]
    pub fn category(&self) -> GcCategory {
        self.category
    }

    #[inline]
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_deref()
    }

    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the layout declares `name`.
    pub fn has_field(&self, name: &str) -> bool {
        self.layout()
            .is_some_and(|layout| layout.field_map().contains(name))
    }

    /// Record index of the column `name`.
    ///
    /// # Errors
    ///
    /// `ProfileError::MissingField` if there is no layout or the layout lacks
    /// the column.
    pub fn field_index(&self, name: &str) -> ProfileResult<usize> {
        self.layout()
            .and_then(|layout| layout.field_map().index_of(name))
            .ok_or_else(|| ProfileError::missing_field(self.category, name))
    }

    /// Resolve the column `name` for typed access.
    ///
    /// # Errors
    ///
    /// As [`field_index`](Self::field_index).
    pub fn column<'n>(&self, name: &'n str) -> ProfileResult<Column<'n>> {
        Ok(Column {
            category: self.category,
            name,
            index: self.field_index(name)?,
        })
    }
}

/// A column resolved against one set's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<'n> {
    category: GcCategory,
    name: &'n str,
    index: usize,
}

impl<'n> Column<'n> {
    #[inline]
    pub fn name(&self) -> &'n str {
        self.name
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw (trimmed) text of this column in `record`.
    #[inline]
    pub fn text<'r>(&self, record: &'r Record) -> &'r str {
        record.field(self.index).unwrap_or_default()
    }

    /// This column of `record` parsed as `T`.
    ///
    /// # Errors
    ///
    /// `ProfileError::InvalidNumber` if the text does not parse.
    pub fn parse<T: FromStr>(&self, record: &Record) -> ProfileResult<T> {
        let text = self.text(record);
        text.parse()
            .map_err(|_| ProfileError::invalid_number(self.category, self.name, text))
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
