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

//! Reduction of parsed record sets to a metrics mapping.
//!
//! # Pipeline
//!
//! 1. Optionally keep only the most active runtime.
//! 2. Trim the shutdown collections from both sets.
//! 3. Summarize the whole log.
//! 4. Optionally add the first-major-GC metrics.
//! 5. When the log has test windows, summarize again for the records inside
//!    and outside them, suffixing each metric with ` in test` or
//!    ` outside test`.
//!
//! # Examples
//!
//! ```rust
//! use gcprof_core::{summarize_profile, MetricCategory, MetricValue, SummaryOptions};
//!
//! let log = "\
//! MajorGC: PID Runtime Reason        total States
//! MajorGC: 1   0xa     ALLOC_TRIGGER 0     0 -> 1
//! MajorGC: 1   0xa     ALLOC_TRIGGER 1.5   1 -> 2
//! MajorGC: 1   0xa     ALLOC_TRIGGER 2.0   2 -> 0
//! ";
//!
//! let options = SummaryOptions::builder()
//!     .categories([MetricCategory::Major].into_iter().collect())
//!     .build();
//! let metrics = summarize_profile(log, &options).unwrap();
//! assert_eq!(metrics.get("Major GC slices"), Some(MetricValue::Count(2)));
//! assert_eq!(metrics.get("Major GC time"), Some(MetricValue::Value(3.5)));
//! assert_eq!(metrics.get("Major GC count"), Some(MetricValue::Count(1)));
//! ```

use crate::error::{ProfileError, ProfileResult};
use crate::filter;
use crate::metrics::{Metrics, IN_TEST_SUFFIX, OUTSIDE_TEST_SUFFIX};
use crate::options::{MetricCategory, SummaryOptions};
use crate::parser::{ProfileData, ProfileParser};
use crate::record::RecordSet;
use crate::runtime::most_active_runtime;
use crate::stats;
use tracing::debug;

/// Per-event GC time in milliseconds.
pub const TOTAL_FIELD: &str = "total";
/// Incremental state transitions, e.g. `0 -> 1`.
pub const STATES_FIELD: &str = "States";
/// Event time in seconds since runtime start.
pub const TIMESTAMP_FIELD: &str = "Timestamp";
/// GC heap size.
pub const SIZE_FIELD: &str = "SizeKB";
/// Malloc heap size.
pub const MALLOC_SIZE_FIELD: &str = "MllcKB";
/// Nursery size.
pub const NURSERY_SIZE_FIELD: &str = "NewKB";
/// Nursery promotion rate, printed with a `%` suffix.
pub const PROMOTION_RATE_FIELD: &str = "PRate";
/// Parallel marking work donations.
pub const DONATIONS_FIELD: &str = "pmDons";
/// Marking rate; nonzero only on the slice that finishes marking.
pub const MARK_RATE_FIELD: &str = "mkRate";

/// Major GC phase duration columns, in report order.
pub const PHASE_FIELDS: [&str; 6] = ["bgwrk", "waitBG", "prep", "mark", "sweep", "cmpct"];

const IDLE_STATES: &str = "0 -> 0";
const FROM_IDLE: &str = "0 ->";
const PROMOTION_REASON: &str = "OUT_OF_NURSERY";

/// Minor GC totals are reported in microseconds.
const MINOR_TIME_SCALE: f64 = 1000.0;

/// Computes metrics from parsed profile data according to a set of options.
#[derive(Debug, Clone, Copy)]
pub struct Summarizer<'o> {
    options: &'o SummaryOptions,
}

impl<'o> Summarizer<'o> {
    pub fn new(options: &'o SummaryOptions) -> Self {
        Self { options }
    }

    /// Summarize `data`.
    ///
    /// # Errors
    ///
    /// - `ProfileError::EmptyRecordSet` from runtime selection
    /// - `ProfileError::MissingField` when a requested metric needs a column
    ///   absent from a non-empty set
    /// - `ProfileError::InvalidNumber` / `ProfileError::BadPromotionRate` for
    ///   unparseable values
    pub fn summarize(&self, data: &ProfileData) -> ProfileResult<Metrics> {
        let (major, minor) = if self.options.filter_most_active_runtime {
            let key = most_active_runtime(data.all_records())?;
            debug!(runtime = %key, "selected most active runtime");
            (
                filter::by_runtime(&data.major, &key),
                filter::by_runtime(&data.minor, &key),
            )
        } else {
            (data.major.clone(), data.minor.clone())
        };

        let major = filter::trim_shutdown(&major);
        let minor = filter::trim_shutdown(&minor);

        let mut metrics = Metrics::new();
        self.summarize_pass(&mut metrics, &major, &minor, "")?;

        if self.options.first_major_gc && self.wants(MetricCategory::Major) {
            first_major_gc(&mut metrics, &major)?;
        }

        if self.options.windowed && data.test_count > 0 {
            for (in_test, suffix) in [(true, IN_TEST_SUFFIX), (false, OUTSIDE_TEST_SUFFIX)] {
                let major = filter::by_window(&major, in_test);
                let minor = filter::by_window(&minor, in_test);
                self.summarize_pass(&mut metrics, &major, &minor, suffix)?;
            }
        }

        Ok(metrics)
    }

    #[inline]
    fn wants(&self, category: MetricCategory) -> bool {
        self.options.categories.contains(category)
    }

    fn wants_both(&self, a: MetricCategory, b: MetricCategory) -> bool {
        self.options.categories.contains_both(a, b)
    }

    fn summarize_pass(
        &self,
        metrics: &mut Metrics,
        major: &RecordSet,
        minor: &RecordSet,
        suffix: &str,
    ) -> ProfileResult<()> {
        let key = |name: &str| format!("{}{}", name, suffix);

        let (major_count, major_time) = collection_totals(major)?;
        let (minor_count, minor_time) = collection_totals(minor)?;
        let minor_time = minor_time / MINOR_TIME_SCALE;

        if self.wants(MetricCategory::Major) {
            metrics.insert(key("Major GC slices"), major_count)?;
            metrics.insert(key("Major GC time"), major_time)?;
            if major_count > 0 {
                metrics.insert(key("Mean major GC slice time"), major_time / major_count as f64)?;
            }
        }

        if self.wants(MetricCategory::Minor) {
            metrics.insert(key("Minor GC count"), minor_count)?;
            metrics.insert(key("Minor GC time"), minor_time)?;
            if minor_count > 0 {
                metrics.insert(key("Mean minor GC time"), minor_time / minor_count as f64)?;
            }
        }

        metrics.insert(key("Total GC time"), major_time + minor_time)?;

        if self.wants(MetricCategory::Major) {
            metrics.insert(key("Major GC count"), major_gc_count(major)?)?;
        }

        if self.wants_both(MetricCategory::Major, MetricCategory::Size) {
            let heap = float_column(major, SIZE_FIELD)?;
            let malloc = float_column(major, MALLOC_SIZE_FIELD)?;
            metrics.insert(key("Max GC heap size / KB"), stats::max(&heap))?;
            metrics.insert(key("Median GC heap size / KB"), stats::median(&heap))?;
            metrics.insert(key("Max malloc heap size / KB"), stats::max(&malloc))?;
            metrics.insert(key("Median malloc heap size / KB"), stats::median(&malloc))?;
        }

        if self.wants_both(MetricCategory::Minor, MetricCategory::Size) {
            let nursery = float_column(minor, NURSERY_SIZE_FIELD)?;
            metrics.insert(key("Max nursery size / KB"), stats::max(&nursery))?;
            metrics.insert(key("Median nursery size / KB"), stats::median(&nursery))?;
        }

        if self.wants_both(MetricCategory::Major, MetricCategory::Reason) {
            for reason in ["ALLOC_TRIGGER", "TOO_MUCH_MALLOC"] {
                let count = filter::by_reason(major, reason)?.len();
                metrics.insert(key(&format!("{} slices", reason)), count)?;
            }
        }

        if self.wants_both(MetricCategory::Minor, MetricCategory::Reason) {
            let full = filter::by_full_store_buffer_reason(minor)?.len();
            metrics.insert(key("Full store buffer nursery collections"), full)?;

            let promoted = filter::by_reason(minor, PROMOTION_REASON)?;
            metrics.insert(
                key("Mean full nursery promotion rate"),
                mean_promotion_rate(&promoted)?,
            )?;
        }

        if self.wants(MetricCategory::Major) && self.options.phase_times {
            for phase in PHASE_FIELDS {
                if let Some(total) = phase_total(major, phase)? {
                    metrics.insert(key(&format!("Total major GC time in phase {}", phase)), total)?;
                }
            }
        }

        if self.wants(MetricCategory::Major) && self.options.parallel_marking {
            if let Some(marking) = parallel_marking(major)? {
                metrics.insert(
                    key("Parallel marking donations per collection"),
                    marking.donations_per_collection,
                )?;
                metrics.insert(key("Geometric mean mark rate"), marking.geometric_mean_rate)?;
            }
        }

        Ok(())
    }
}

/// Parse `text` with the options' markers and summarize it.
pub fn summarize_profile(text: &str, options: &SummaryOptions) -> ProfileResult<Metrics> {
    let data = ProfileParser::new(options.markers.clone()).parse(text)?;
    Summarizer::new(options).summarize(&data)
}

/// Collections with nonzero time, and the summed time of all records.
fn collection_totals(set: &RecordSet) -> ProfileResult<(u64, f64)> {
    let times = float_column(set, TOTAL_FIELD)?;
    let count = times.iter().filter(|&&t| t != 0.0).count() as u64;
    Ok((count, times.iter().sum()))
}

/// Collections that started from the idle state.
fn major_gc_count(set: &RecordSet) -> ProfileResult<u64> {
    if set.is_empty() {
        return Ok(0);
    }
    let states = set.column(STATES_FIELD)?;
    Ok(set
        .iter()
        .filter(|r| states.text(r).contains(FROM_IDLE))
        .count() as u64)
}

/// Every value of the column `name` as a float; empty for an empty set.
fn float_column(set: &RecordSet, name: &str) -> ProfileResult<Vec<f64>> {
    if set.is_empty() {
        return Ok(Vec::new());
    }
    let column = set.column(name)?;
    set.iter().map(|r| column.parse::<f64>(r)).collect()
}

fn mean_promotion_rate(set: &RecordSet) -> ProfileResult<f64> {
    if set.is_empty() {
        return Ok(0.0);
    }
    let column = set.column(PROMOTION_RATE_FIELD)?;
    let rates = set
        .iter()
        .map(|r| parse_percentage(column.text(r)))
        .collect::<ProfileResult<Vec<f64>>>()?;
    Ok(stats::mean(&rates))
}

/// Parse a value such as `37.5%`.
fn parse_percentage(value: &str) -> ProfileResult<f64> {
    value
        .strip_suffix('%')
        .and_then(|number| number.trim().parse().ok())
        .ok_or_else(|| ProfileError::BadPromotionRate {
            value: value.to_string(),
        })
}

/// Sum of one phase column, skipping blank cells. `None` if the header
/// lacks the column.
fn phase_total(set: &RecordSet, phase: &str) -> ProfileResult<Option<f64>> {
    if !set.has_field(phase) {
        return Ok(None);
    }
    let column = set.column(phase)?;
    let mut total = 0.0;
    for record in set {
        if !column.text(record).is_empty() {
            total += column.parse::<f64>(record)?;
        }
    }
    Ok(Some(total))
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ParallelMarking {
    donations_per_collection: f64,
    geometric_mean_rate: f64,
}

/// Donations and mark rate over the slices that finished marking. `None`
/// if the columns are absent or no slice reported a rate.
fn parallel_marking(set: &RecordSet) -> ProfileResult<Option<ParallelMarking>> {
    if !set.has_field(DONATIONS_FIELD) || !set.has_field(MARK_RATE_FIELD) {
        return Ok(None);
    }
    let donations_col = set.column(DONATIONS_FIELD)?;
    let rate_col = set.column(MARK_RATE_FIELD)?;

    let mut donations = Vec::new();
    let mut rates = Vec::new();
    for record in set {
        let rate: i64 = rate_col.parse(record)?;
        let dons: i64 = donations_col.parse(record)?;
        if rate == 0 {
            if dons != 0 {
                debug!(donations = dons, "donations reported without a mark rate");
            }
            continue;
        }
        donations.push(dons as f64);
        rates.push(rate as f64);
    }

    if rates.is_empty() {
        return Ok(None);
    }

    Ok(Some(ParallelMarking {
        donations_per_collection: stats::mean(&donations),
        geometric_mean_rate: stats::geometric_mean(&rates),
    }))
}

/// Timestamp and heap size of the first major slice that did any work.
fn first_major_gc(metrics: &mut Metrics, major: &RecordSet) -> ProfileResult<()> {
    if major.is_empty() {
        return Ok(());
    }
    let timestamp = major.column(TIMESTAMP_FIELD)?;
    let size = major.column(SIZE_FIELD)?;
    let total = major.column(TOTAL_FIELD)?;
    let states = major.column(STATES_FIELD)?;

    for record in major {
        let idle = total.parse::<f64>(record)? == 0.0 && states.text(record) == IDLE_STATES;
        if idle {
            continue;
        }
        metrics.insert("First major GC", timestamp.parse::<f64>(record)?)?;
        metrics.insert("Heap size / KB at first major GC", size.parse::<u64>(record)?)?;
        break;
    }
    Ok(())
}
