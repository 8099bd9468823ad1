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

//! Heap-size command - GC heap size over time, per runtime

use super::{read_file, write_output};
use crate::error::CliError;
use clap::ValueEnum;
use gcprof_core::{extract_heap_timeline, HeapTimeline};
use serde::Serialize;
use tracing::debug;

/// Output format of the heap-size command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HeapFormat {
    /// One object per runtime with its samples.
    #[default]
    Json,
    /// One `pid,runtime,timestamp,size_kb` row per sample.
    Csv,
}

#[derive(Serialize)]
struct HeapRow<'a> {
    pid: &'a str,
    runtime: &'a str,
    timestamp: f64,
    size_kb: u64,
}

/// Extract the heap size timeline of a GC profiler log.
///
/// Timestamps of later runtimes are shifted onto an estimated global clock;
/// each series opens with a zero-size sample at its start offset.
///
/// # Errors
///
/// `CliError::Io` / `CliError::FileTooLarge` if the log cannot be read,
/// `CliError::Profile` if it cannot be parsed or lacks a required column.
pub fn heap_size(file: &str, format: HeapFormat, output: Option<&str>) -> Result<(), CliError> {
    let content = read_file(file)?;
    let timeline = extract_heap_timeline(&content)?;
    debug!(file, runtimes = timeline.series().len(), "extracted heap timeline");

    let rendered = match format {
        HeapFormat::Json => render_heap_json(&timeline)?,
        HeapFormat::Csv => render_heap_csv(&timeline)?,
    };
    write_output(&rendered, output)
}

/// Render the timeline as pretty-printed JSON.
pub fn render_heap_json(timeline: &HeapTimeline) -> Result<String, CliError> {
    let mut json = serde_json::to_string_pretty(timeline)?;
    json.push('\n');
    Ok(json)
}

/// Render the timeline as CSV with a header row.
pub fn render_heap_csv(timeline: &HeapTimeline) -> Result<String, CliError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (key, sample) in timeline.samples() {
        writer.serialize(HeapRow {
            pid: &key.pid,
            runtime: &key.runtime,
            timestamp: sample.timestamp,
            size_kb: sample.size_kb,
        })?;
    }
    // An empty timeline still gets a header row.
    if timeline.is_empty() {
        writer.write_record(["pid", "runtime", "timestamp", "size_kb"])?;
    }

    let bytes = writer.into_inner().map_err(|e| CliError::CsvFormat {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| CliError::CsvFormat {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
MajorGC: PID Runtime Timestamp SizeKB
MajorGC: 1   0xa     1.0       100
MajorGC: 2   0xb     0.5       50
";

    #[test]
    fn test_csv_rows() {
        let timeline = extract_heap_timeline(LOG).unwrap();
        let csv = render_heap_csv(&timeline).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "pid,runtime,timestamp,size_kb",
                "1,0xa,0.0,0",
                "1,0xa,1.0,100",
                "2,0xb,0.5,0",
                "2,0xb,1.0,50",
            ]
        );
    }

    #[test]
    fn test_csv_of_empty_timeline() {
        let csv = render_heap_csv(&HeapTimeline::default()).unwrap();
        assert_eq!(csv, "pid,runtime,timestamp,size_kb\n");
    }

    #[test]
    fn test_json_shape() {
        let timeline = extract_heap_timeline(LOG).unwrap();
        let json = render_heap_json(&timeline).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["key"]["pid"], "1");
        assert_eq!(value[1]["key"]["runtime"], "0xb");
        assert_eq!(value[1]["samples"][1]["size_kb"], 50);
        assert_eq!(value[1]["samples"][1]["timestamp"], 1.0);
    }
}
