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

//! GC Profile Log Summarizer
//!
//! Parses the plain-text output of a JavaScript engine's GC profiler and
//! reduces it to a flat set of named metrics: collection counts and times,
//! heap and nursery sizes, reason-code breakdowns, phase times and parallel
//! marking statistics.
//!
//! # Input
//!
//! The profiler prints fixed-width tables interleaved with whatever else the
//! browser logs. Major and minor collections each have their own header:
//!
//! ```text
//! MajorGC: PID   Runtime  Timestamp Reason        total States
//! MajorGC: 4242  0x7f01   1.204     ALLOC_TRIGGER 2.5   0 -> 1
//! MinorGC: PID   Runtime  Timestamp Reason         total PRate
//! MinorGC: 4242  0x7f01   1.210     OUT_OF_NURSERY 310   12.5%
//! ```
//!
//! Column boundaries come from the header, so values must sit under their
//! column names. Lines containing `Testing url` and `PageCompleteCheck
//! returned true` delimit test windows; every event records the window it
//! fell in.
//!
//! # Features
//!
//! - **Single pass**: one forward scan, no backtracking
//! - **Tolerant**: garbled lines are logged through `tracing` and counted
//! - **Runtime selection**: interleaved runtimes reduce to the busiest one
//! - **Windowed**: metrics repeat for events inside and outside test windows
//! - **serde** (optional): serialize options, metrics and heap timelines
//!
//! # Quick Start
//!
//! ```rust
//! use gcprof_core::{summarize_profile, MetricCategory, SummaryOptions};
//!
//! let log = "\
//! MajorGC: PID Runtime Reason        total States
//! MajorGC: 1   0xa     ALLOC_TRIGGER 1.5   0 -> 1
//! Testing url http://example.com
//! MajorGC: 1   0xa     ALLOC_TRIGGER 2.0   1 -> 0
//! PageCompleteCheck returned true
//! ";
//!
//! let options = SummaryOptions::builder()
//!     .categories([MetricCategory::Major].into_iter().collect())
//!     .build();
//! let metrics = summarize_profile(log, &options).unwrap();
//!
//! assert_eq!(metrics.get("Major GC time").unwrap().as_f64(), 3.5);
//! assert_eq!(metrics.get("Major GC time in test").unwrap().as_f64(), 2.0);
//! assert_eq!(metrics.get("Major GC time outside test").unwrap().as_f64(), 1.5);
//! ```

mod classifier;
mod error;
mod heap;
mod layout;
mod metrics;
mod options;
mod parser;
mod record;
mod runtime;
mod store;
mod summary;

pub mod filter;
pub mod stats;

pub use classifier::{EventLine, LineClassifier, LineKind, WindowState, WindowTracker, TOTALS_MARKER};
pub use error::{ProfileError, ProfileResult};
pub use heap::{extract_heap_timeline, HeapSample, HeapTimeline, RuntimeSeries};
pub use layout::{FieldMap, Layout, Span, PID_FIELD, RUNTIME_FIELD, TEST_NUM_FIELD};
pub use metrics::{MetricValue, Metrics, IN_TEST_SUFFIX, OUTSIDE_TEST_SUFFIX};
pub use options::{
    Categories, MetricCategory, ParseCategoryError, SummaryOptions, SummaryOptionsBuilder,
    TestMarkers, DEFAULT_END_MARKER, DEFAULT_START_MARKER,
};
pub use parser::{parse_profile, ProfileData, ProfileParser};
pub use record::{Column, GcCategory, Record, RecordSet, RuntimeKey};
pub use runtime::{count_runtimes, most_active_runtime};
pub use store::RecordStore;
pub use summary::{summarize_profile, Summarizer, PHASE_FIELDS};
