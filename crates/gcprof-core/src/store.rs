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

//! Per-category accumulation of parsed records.

use crate::classifier::EventLine;
use crate::error::ProfileResult;
use crate::layout::Layout;
use crate::record::{GcCategory, Record, RecordSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Grows one category's records during the scan.
///
/// The first header seen fixes the layout; later headers are ignored.
#[derive(Debug)]
pub struct RecordStore {
    category: GcCategory,
    layout: Option<Arc<Layout>>,
    records: Vec<Record>,
    dropped: usize,
}

impl RecordStore {
    pub fn new(category: GcCategory) -> Self {
        Self {
            category,
            layout: None,
            records: Vec::new(),
            dropped: 0,
        }
    }

    /// Feed one category body seen at `line` while window `test_num` is open.
    ///
    /// # Errors
    ///
    /// Propagates `ProfileError::InvalidHeader` from the first header.
    pub fn accept(&mut self, line: usize, event: EventLine<'_>, test_num: u32) -> ProfileResult<()> {
        match event {
            EventLine::Totals => Ok(()),
            EventLine::Header(header) => {
                if self.layout.is_none() {
                    let layout = Layout::from_header(self.category, line, header)?;
                    debug!(
                        category = %self.category,
                        line,
                        columns = layout.field_map().len(),
                        "discovered header"
                    );
                    self.layout = Some(Arc::new(layout));
                }
                Ok(())
            }
            EventLine::Data(body) => {
                self.push_data(line, body, test_num);
                Ok(())
            }
        }
    }

    fn push_data(&mut self, line: usize, body: &str, test_num: u32) {
        let Some(layout) = self.layout.as_ref() else {
            warn!(category = %self.category, line, "skipping profile line before header");
            self.dropped += 1;
            return;
        };

        let record = Record::new(layout.slice(body), test_num);
        let expected = layout.field_map().len();
        if record.len() != expected {
            warn!(
                category = %self.category,
                line,
                expected,
                got = record.len(),
                "skipping garbled profile line"
            );
            self.dropped += 1;
            return;
        }

        self.records.push(record);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lines rejected so far.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn into_set(self) -> RecordSet {
        RecordSet::new(self.category, self.layout, self.records)
    }
}
