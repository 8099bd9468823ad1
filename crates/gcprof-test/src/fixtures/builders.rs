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

//! Builders for profiler logs with correctly aligned columns.
//!
//! Hand-aligning fixed-width tables is error prone: a value one character
//! left of its header column lands in the neighbouring field. The
//! [`ProfileLogBuilder`] collects rows first and pads every column of a
//! category to a common width when the log is rendered.

/// Major GC columns in the order the profiler prints them.
pub const MAJOR_COLUMNS: &[&str] = &[
    "PID", "Runtime", "Timestamp", "Reason", "States", "SizeKB", "MllcKB", "total", "bgwrk",
    "waitBG", "prep", "mark", "sweep", "cmpct", "pmDons", "mkRate",
];

/// Minor GC columns in the order the profiler prints them.
pub const MINOR_COLUMNS: &[&str] = &[
    "PID", "Runtime", "Timestamp", "Reason", "PRate", "NewKB", "total",
];

/// Default process id used by the event builders.
pub const DEFAULT_PID: &str = "1000";

/// Default runtime id used by the event builders.
pub const DEFAULT_RUNTIME: &str = "0x1";

/// One major GC slice with values for every [`MAJOR_COLUMNS`] entry.
///
/// # Examples
///
/// ```
/// use gcprof_test::fixtures::builders::MajorSlice;
///
/// let slice = MajorSlice::new(2.5).reason("TOO_MUCH_MALLOC").size_kb(4096);
/// let row = slice.row();
/// assert_eq!(row[3], "TOO_MUCH_MALLOC");
/// assert_eq!(row[7], "2.5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MajorSlice {
    pid: String,
    runtime: String,
    timestamp: f64,
    reason: String,
    states: String,
    size_kb: u64,
    malloc_kb: u64,
    total: f64,
    phases: [Option<f64>; 6],
    donations: i64,
    mark_rate: i64,
}

impl MajorSlice {
    /// A slice of `total` milliseconds with default values elsewhere.
    pub fn new(total: f64) -> Self {
        Self {
            pid: DEFAULT_PID.to_string(),
            runtime: DEFAULT_RUNTIME.to_string(),
            timestamp: 0.0,
            reason: "ALLOC_TRIGGER".to_string(),
            states: "0 -> 1".to_string(),
            size_kb: 1024,
            malloc_kb: 256,
            total,
            phases: [None; 6],
            donations: 0,
            mark_rate: 0,
        }
    }

    pub fn runtime(mut self, pid: impl Into<String>, runtime: impl Into<String>) -> Self {
        self.pid = pid.into();
        self.runtime = runtime.into();
        self
    }

    pub fn timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn states(mut self, states: impl Into<String>) -> Self {
        self.states = states.into();
        self
    }

    pub fn size_kb(mut self, size_kb: u64) -> Self {
        self.size_kb = size_kb;
        self
    }

    pub fn malloc_kb(mut self, malloc_kb: u64) -> Self {
        self.malloc_kb = malloc_kb;
        self
    }

    /// Phase times in `bgwrk, waitBG, prep, mark, sweep, cmpct` order.
    pub fn phases(mut self, phases: [f64; 6]) -> Self {
        self.phases = phases.map(Some);
        self
    }

    /// Parallel marking donations and mark rate.
    pub fn marking(mut self, donations: i64, mark_rate: i64) -> Self {
        self.donations = donations;
        self.mark_rate = mark_rate;
        self
    }

    /// Column values in [`MAJOR_COLUMNS`] order.
    pub fn row(&self) -> Vec<String> {
        let mut row = vec![
            self.pid.clone(),
            self.runtime.clone(),
            self.timestamp.to_string(),
            self.reason.clone(),
            self.states.clone(),
            self.size_kb.to_string(),
            self.malloc_kb.to_string(),
            self.total.to_string(),
        ];
        row.extend(
            self.phases
                .iter()
                .map(|p| p.map(|v| v.to_string()).unwrap_or_default()),
        );
        row.push(self.donations.to_string());
        row.push(self.mark_rate.to_string());
        row
    }
}

/// One nursery collection with values for every [`MINOR_COLUMNS`] entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NurseryCollection {
    pid: String,
    runtime: String,
    timestamp: f64,
    reason: String,
    promotion_rate: String,
    nursery_kb: u64,
    total: f64,
}

impl NurseryCollection {
    /// A collection of `total` microseconds with default values elsewhere.
    pub fn new(total: f64) -> Self {
        Self {
            pid: DEFAULT_PID.to_string(),
            runtime: DEFAULT_RUNTIME.to_string(),
            timestamp: 0.0,
            reason: "OUT_OF_NURSERY".to_string(),
            promotion_rate: "0%".to_string(),
            nursery_kb: 1024,
            total,
        }
    }

    pub fn runtime(mut self, pid: impl Into<String>, runtime: impl Into<String>) -> Self {
        self.pid = pid.into();
        self.runtime = runtime.into();
        self
    }

    pub fn timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Promotion rate in percent; rendered with a `%` suffix.
    pub fn promotion_rate(mut self, percent: f64) -> Self {
        self.promotion_rate = format!("{}%", percent);
        self
    }

    /// Raw promotion rate text, for malformed values.
    pub fn promotion_rate_text(mut self, text: impl Into<String>) -> Self {
        self.promotion_rate = text.into();
        self
    }

    pub fn nursery_kb(mut self, nursery_kb: u64) -> Self {
        self.nursery_kb = nursery_kb;
        self
    }

    /// Column values in [`MINOR_COLUMNS`] order.
    pub fn row(&self) -> Vec<String> {
        vec![
            self.pid.clone(),
            self.runtime.clone(),
            self.timestamp.to_string(),
            self.reason.clone(),
            self.promotion_rate.clone(),
            self.nursery_kb.to_string(),
            self.total.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    Major,
    Minor,
}

impl Table {
    fn tag(self) -> &'static str {
        match self {
            Table::Major => "MajorGC: ",
            Table::Minor => "MinorGC: ",
        }
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Header(Table),
    Row(Table, Vec<String>),
    Totals(Table),
    Raw(String),
}

/// Builder for complete profiler logs.
///
/// # Examples
///
/// ```
/// use gcprof_test::fixtures::builders::{MajorSlice, ProfileLogBuilder};
///
/// let log = ProfileLogBuilder::new()
///     .major_header()
///     .major(MajorSlice::new(1.0))
///     .start_test("http://example.com")
///     .major(MajorSlice::new(2.0).states("1 -> 0"))
///     .end_test()
///     .build();
///
/// assert!(log.starts_with("MajorGC: PID "));
/// assert_eq!(log.lines().count(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ProfileLogBuilder {
    prefix: String,
    major_columns: Vec<String>,
    minor_columns: Vec<String>,
    entries: Vec<Entry>,
}

impl Default for ProfileLogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileLogBuilder {
    /// Builder using the standard major and minor columns.
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            major_columns: MAJOR_COLUMNS.iter().map(|c| c.to_string()).collect(),
            minor_columns: MINOR_COLUMNS.iter().map(|c| c.to_string()).collect(),
            entries: Vec::new(),
        }
    }

    /// Text printed before every category tag, like a browser's process
    /// prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Replace the major columns; use with [`major_row`](Self::major_row).
    pub fn major_columns(mut self, columns: &[&str]) -> Self {
        self.major_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Replace the minor columns; use with [`minor_row`](Self::minor_row).
    pub fn minor_columns(mut self, columns: &[&str]) -> Self {
        self.minor_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn major_header(mut self) -> Self {
        self.entries.push(Entry::Header(Table::Major));
        self
    }

    pub fn minor_header(mut self) -> Self {
        self.entries.push(Entry::Header(Table::Minor));
        self
    }

    pub fn major(self, slice: MajorSlice) -> Self {
        self.major_row(slice.row())
    }

    pub fn minor(self, collection: NurseryCollection) -> Self {
        self.minor_row(collection.row())
    }

    /// A major data row with arbitrary values.
    pub fn major_row<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        let row = values.into_iter().map(Into::into).collect();
        self.entries.push(Entry::Row(Table::Major, row));
        self
    }

    /// A minor data row with arbitrary values.
    pub fn minor_row<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        let row = values.into_iter().map(Into::into).collect();
        self.entries.push(Entry::Row(Table::Minor, row));
        self
    }

    /// A running-totals line for the major table.
    pub fn major_totals(mut self) -> Self {
        self.entries.push(Entry::Totals(Table::Major));
        self
    }

    /// A running-totals line for the minor table.
    pub fn minor_totals(mut self) -> Self {
        self.entries.push(Entry::Totals(Table::Minor));
        self
    }

    /// Open a test window.
    pub fn start_test(mut self, url: &str) -> Self {
        self.entries.push(Entry::Raw(format!("[raptor] Testing url {}", url)));
        self
    }

    /// Close the open test window.
    pub fn end_test(mut self) -> Self {
        self.entries
            .push(Entry::Raw("[raptor] PageCompleteCheck returned true".to_string()));
        self
    }

    /// An arbitrary line, printed as is.
    pub fn raw(mut self, line: impl Into<String>) -> Self {
        self.entries.push(Entry::Raw(line.into()));
        self
    }

    fn columns(&self, table: Table) -> &[String] {
        match table {
            Table::Major => &self.major_columns,
            Table::Minor => &self.minor_columns,
        }
    }

    /// Width of every column: the widest header name or value plus one
    /// separating space.
    fn widths(&self, table: Table) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .columns(table)
            .iter()
            .map(|c| c.chars().count())
            .collect();
        for entry in &self.entries {
            if let Entry::Row(t, row) = entry {
                if *t != table {
                    continue;
                }
                for (i, value) in row.iter().enumerate() {
                    let len = value.chars().count();
                    match widths.get_mut(i) {
                        Some(w) => *w = (*w).max(len),
                        None => widths.push(len),
                    }
                }
            }
        }
        widths.iter().map(|w| w + 1).collect()
    }

    fn render_cells(&self, table: Table, cells: &[String], widths: &[usize]) -> String {
        let mut line = format!("{}{}", self.prefix, table.tag());
        for (i, cell) in cells.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(cell.len() + 1);
            line.push_str(&format!("{:<width$}", cell, width = width));
        }
        line
    }

    /// Render the log, one entry per line, newline terminated.
    pub fn build(self) -> String {
        let major_widths = self.widths(Table::Major);
        let minor_widths = self.widths(Table::Minor);
        let widths = |table: Table| match table {
            Table::Major => &major_widths,
            Table::Minor => &minor_widths,
        };

        let mut out = String::new();
        for entry in &self.entries {
            let line = match entry {
                Entry::Header(table) => {
                    self.render_cells(*table, self.columns(*table), widths(*table))
                }
                Entry::Row(table, row) => self.render_cells(*table, row, widths(*table)),
                Entry::Totals(table) => {
                    format!("{}{}TOTALS: 0 0 0", self.prefix, table.tag())
                }
                Entry::Raw(line) => line.clone(),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
