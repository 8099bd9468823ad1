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

//! GC heap size over time, per runtime.
//!
//! Each runtime's timestamps count from its own start. To lay the series on
//! one approximate global clock, a runtime first seen after another is
//! shifted so that it starts no earlier than the latest timestamp seen so
//! far.
//!
//! ```rust
//! use gcprof_core::extract_heap_timeline;
//!
//! let log = "\
//! MajorGC: PID Runtime Timestamp SizeKB
//! MajorGC: 1   0xa     1.0       100
//! MajorGC: 2   0xb     0.5       50
//! ";
//!
//! let timeline = extract_heap_timeline(log).unwrap();
//! assert_eq!(timeline.series().len(), 2);
//! // The second runtime starts at 0.5 on its own clock, 1.0 globally.
//! assert_eq!(timeline.series()[1].samples[0].timestamp, 0.5);
//! assert_eq!(timeline.series()[1].samples[1].timestamp, 1.0);
//! ```

use crate::error::ProfileResult;
use crate::layout::{PID_FIELD, RUNTIME_FIELD};
use crate::parser::parse_profile;
use crate::record::{RecordSet, RuntimeKey};
use crate::summary::{SIZE_FIELD, TIMESTAMP_FIELD};
use std::collections::HashMap;

/// One point of a heap size series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeapSample {
    /// Seconds on the estimated global clock.
    pub timestamp: f64,
    pub size_kb: u64,
}

/// Heap samples of one runtime, opening with a zero-size sample at its
/// start offset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RuntimeSeries {
    pub key: RuntimeKey,
    pub samples: Vec<HeapSample>,
}

/// Heap series for every runtime, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HeapTimeline {
    series: Vec<RuntimeSeries>,
}

impl HeapTimeline {
    /// Build the timeline from major GC records.
    ///
    /// # Errors
    ///
    /// `ProfileError::MissingField` if a non-empty set lacks `PID`,
    /// `Runtime`, `Timestamp` or `SizeKB`; `ProfileError::InvalidNumber` if
    /// a timestamp or size does not parse.
    pub fn from_records(major: &RecordSet) -> ProfileResult<Self> {
        let mut timeline = Self::default();
        if major.is_empty() {
            return Ok(timeline);
        }

        let pid = major.column(PID_FIELD)?;
        let runtime = major.column(RUNTIME_FIELD)?;
        let timestamp = major.column(TIMESTAMP_FIELD)?;
        let size = major.column(SIZE_FIELD)?;

        // Series index and start offset for each runtime.
        let mut starts: HashMap<RuntimeKey, (usize, f64)> = HashMap::new();
        let mut latest: Option<f64> = None;

        for record in major {
            let key = RuntimeKey::new(pid.text(record), runtime.text(record));
            let local: f64 = timestamp.parse(record)?;
            let size_kb: u64 = size.parse(record)?;

            let (index, offset) = match starts.get(&key) {
                Some(&start) => start,
                None => {
                    let offset = match latest {
                        Some(latest) => (latest - local).max(0.0),
                        None => 0.0,
                    };
                    let index = timeline.series.len();
                    timeline.series.push(RuntimeSeries {
                        key: key.clone(),
                        samples: vec![HeapSample {
                            timestamp: offset,
                            size_kb: 0,
                        }],
                    });
                    starts.insert(key, (index, offset));
                    (index, offset)
                }
            };

            let global = local + offset;
            latest = Some(global);
            timeline.series[index].samples.push(HeapSample {
                timestamp: global,
                size_kb,
            });
        }

        Ok(timeline)
    }

    pub fn series(&self) -> &[RuntimeSeries] {
        &self.series
    }

    /// Series for one runtime.
    pub fn get(&self, key: &RuntimeKey) -> Option<&RuntimeSeries> {
        self.series.iter().find(|s| &s.key == key)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Every sample as `(key, sample)`, series by series.
    pub fn samples(&self) -> impl Iterator<Item = (&RuntimeKey, &HeapSample)> + '_ {
        self.series
            .iter()
            .flat_map(|s| s.samples.iter().map(move |sample| (&s.key, sample)))
    }
}

/// Parse `text` and build its heap size timeline.
pub fn extract_heap_timeline(text: &str) -> ProfileResult<HeapTimeline> {
    let data = parse_profile(text)?;
    HeapTimeline::from_records(&data.major)
}
