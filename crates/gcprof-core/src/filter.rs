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

//! Order-preserving record filters.
//!
//! Every filter takes a [`RecordSet`] by reference and returns a new one that
//! shares its layout; the input is never modified.
//!
//! # Examples
//!
//! ```rust
//! use gcprof_core::filter::{by_reason, by_window};
//! use gcprof_core::parse_profile;
//!
//! let log = "\
//! MajorGC: PID Runtime Reason        total
//! MajorGC: 1   0xa     ALLOC_TRIGGER 1.0
//! Testing url http://example.com
//! MajorGC: 1   0xa     ALLOC_TRIGGER 2.0
//! MajorGC: 1   0xa     CC_FINISHED   3.0
//! ";
//!
//! let data = parse_profile(log).unwrap();
//! let in_test = by_window(&data.major, true);
//! let alloc = by_reason(&in_test, "ALLOC_TRIGGER").unwrap();
//! assert_eq!(alloc.len(), 1);
//! ```

use crate::error::ProfileResult;
use crate::record::{GcCategory, Record, RecordSet, RuntimeKey};
use tracing::debug;

/// Column holding the reason code.
pub const REASON_FIELD: &str = "Reason";

/// Major reason that may follow the shutdown collections.
pub const FINISH_GC_REASON: &str = "FINISH_GC";

/// Minor reason of the final nursery eviction at shutdown.
pub const EVICT_NURSERY_REASON: &str = "EVICT_NURSERY";

/// Whether `reason` marks a collection triggered by runtime teardown.
#[inline]
pub fn is_shutdown_reason(reason: &str) -> bool {
    reason.contains("SHUTDOWN") || reason.contains("DESTROY") || reason == "ROOTS_REMOVED"
}

/// Whether `reason` is one of the `FULL_*_BUFFER` store buffer overflows.
#[inline]
pub fn is_full_store_buffer_reason(reason: &str) -> bool {
    reason.starts_with("FULL") && reason.ends_with("BUFFER")
}

/// Keep the records of one runtime.
pub fn by_runtime(set: &RecordSet, key: &RuntimeKey) -> RecordSet {
    retain(set, |record| record.matches_runtime(key))
}

/// Keep records inside (`in_test == true`) or outside any test window.
pub fn by_window(set: &RecordSet, in_test: bool) -> RecordSet {
    retain(set, |record| record.in_test() == in_test)
}

/// Keep records whose reason is exactly `reason`.
///
/// # Errors
///
/// `ProfileError::MissingField` if the set has records but no `Reason`
/// column.
pub fn by_reason(set: &RecordSet, reason: &str) -> ProfileResult<RecordSet> {
    by_reason_matching(set, |value| value == reason)
}

/// Keep records whose reason starts with `FULL` and ends with `BUFFER`.
///
/// # Errors
///
/// `ProfileError::MissingField` if the set has records but no `Reason`
/// column.
pub fn by_full_store_buffer_reason(set: &RecordSet) -> ProfileResult<RecordSet> {
    by_reason_matching(set, is_full_store_buffer_reason)
}

fn by_reason_matching<F>(set: &RecordSet, mut pred: F) -> ProfileResult<RecordSet>
where
    F: FnMut(&str) -> bool,
{
    if set.is_empty() {
        return Ok(set.derive(Vec::new()));
    }
    let index = set.field_index(REASON_FIELD)?;
    Ok(retain(set, |record| record.field(index).is_some_and(&mut pred)))
}

fn retain<F>(set: &RecordSet, mut pred: F) -> RecordSet
where
    F: FnMut(&Record) -> bool,
{
    set.derive(set.iter().filter(|r| pred(r)).cloned().collect())
}

/// Remove the collections the runtime performs while shutting down.
///
/// Only the tail is examined; shutdown-reasoned records earlier in the log
/// are real events and are kept.
///
/// - Major: pop trailing records while their reason
///   [is a shutdown reason](is_shutdown_reason), then pop one more if its
///   reason is `FINISH_GC`.
/// - Minor: pop one trailing record if its reason is `EVICT_NURSERY`.
///
/// The result is flagged as trimmed and trimming a flagged set returns it
/// unchanged, so applying this twice equals applying it once. A set without
/// a `Reason` column has nothing to match and is only flagged.
pub fn trim_shutdown(set: &RecordSet) -> RecordSet {
    if set.is_shutdown_trimmed() {
        return set.clone();
    }

    let Ok(index) = set.field_index(REASON_FIELD) else {
        return set.clone().mark_shutdown_trimmed();
    };

    let records = set.records();
    let reason_at = |end: usize| records[end - 1].field(index).unwrap_or_default();
    let mut end = records.len();

    match set.category() {
        GcCategory::Major => {
            while end > 0 && is_shutdown_reason(reason_at(end)) {
                end -= 1;
            }
            if end > 0 && reason_at(end) == FINISH_GC_REASON {
                end -= 1;
            }
        }
        GcCategory::Minor => {
            if end > 0 && reason_at(end) == EVICT_NURSERY_REASON {
                end -= 1;
            }
        }
    }

    let removed = records.len() - end;
    if removed > 0 {
        debug!(category = %set.category(), removed, "trimmed shutdown collections");
    }

    set.derive(records[..end].to_vec()).mark_shutdown_trimmed()
}
