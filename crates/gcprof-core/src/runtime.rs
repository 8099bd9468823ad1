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

//! Picking the runtime of interest out of an interleaved log.
//!
//! Several runtimes (processes, or engines within one process) may write to
//! the same log. The one that produced the most events is assumed to be the
//! one under test. This is a heuristic: two runtimes with near-equal event
//! counts can be confused, and an exact tie goes to whichever runtime
//! appeared first.

use crate::error::{ProfileError, ProfileResult};
use crate::record::{Record, RuntimeKey};
use std::collections::HashMap;

/// Event counts per runtime, in order of first appearance.
pub fn count_runtimes<'a, I>(records: I) -> Vec<(RuntimeKey, usize)>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut positions: HashMap<RuntimeKey, usize> = HashMap::new();
    let mut counts: Vec<(RuntimeKey, usize)> = Vec::new();

    for record in records {
        let key = record.runtime_key();
        match positions.get(&key) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts
}

/// The runtime with strictly the most records; first seen wins a tie.
///
/// # Errors
///
/// `ProfileError::EmptyRecordSet` if `records` yields nothing.
///
/// # Examples
///
/// ```rust
/// use gcprof_core::{most_active_runtime, Record, RuntimeKey};
///
/// let rec = |pid: &str, rt: &str| Record::new(vec![pid.into(), rt.into()], 0);
/// let records = vec![rec("1", "a"), rec("2", "b"), rec("2", "b")];
///
/// let key = most_active_runtime(&records).unwrap();
/// assert_eq!(key, RuntimeKey::new("2", "b"));
/// ```
pub fn most_active_runtime<'a, I>(records: I) -> ProfileResult<RuntimeKey>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut best: Option<(RuntimeKey, usize)> = None;

    for (key, count) in count_runtimes(records) {
        let better = match &best {
            Some((_, best_count)) => count > *best_count,
            None => true,
        };
        if better {
            best = Some((key, count));
        }
    }

    best.map(|(key, _)| key).ok_or(ProfileError::EmptyRecordSet)
}
