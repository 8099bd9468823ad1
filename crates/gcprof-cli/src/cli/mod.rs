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

//! Command-line definitions and dispatch.

use crate::commands::{self, HeapFormat, OutputFormat};
use crate::error::CliError;
use clap::Subcommand;
use gcprof_core::{
    Categories, MetricCategory, SummaryOptions, DEFAULT_END_MARKER, DEFAULT_START_MARKER,
};

/// gcprof commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use gcprof_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a GC profiler log into named metrics
    ///
    /// By default only the runtime with the most events is summarized, and
    /// metrics are repeated for events inside and outside test windows when
    /// the log has any.
    Summarize {
        /// Input log file
        #[arg(value_name = "FILE")]
        file: String,

        /// Metric categories to produce (major, minor, size, reason); all when omitted
        #[arg(short, long = "category", value_name = "CATEGORY", value_delimiter = ',')]
        categories: Vec<MetricCategory>,

        /// Summarize every runtime instead of only the busiest one
        #[arg(long)]
        all_runtimes: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Skip per-phase major GC times
        #[arg(long)]
        no_phase_times: bool,

        /// Skip parallel marking statistics
        #[arg(long)]
        no_parallel_marking: bool,

        /// Report the timestamp and heap size of the first major GC
        #[arg(long)]
        first_major_gc: bool,

        /// Skip the in-test and outside-test metric passes
        #[arg(long)]
        no_windows: bool,

        /// Substring marking the start of a test window
        #[arg(long, value_name = "TEXT")]
        start_marker: Option<String>,

        /// Substring marking the end of a test window
        #[arg(long, value_name = "TEXT")]
        end_marker: Option<String>,
    },

    /// Print the GC heap size over time for every runtime
    HeapSize {
        /// Input log file
        #[arg(value_name = "FILE")]
        file: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = HeapFormat::Json)]
        format: HeapFormat,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Any [`CliError`] raised while reading, summarizing or writing.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Summarize {
                file,
                categories,
                all_runtimes,
                format,
                output,
                no_phase_times,
                no_parallel_marking,
                first_major_gc,
                no_windows,
                start_marker,
                end_marker,
            } => {
                let start = marker(start_marker, DEFAULT_START_MARKER)?;
                let end = marker(end_marker, DEFAULT_END_MARKER)?;
                let categories = if categories.is_empty() {
                    Categories::all()
                } else {
                    categories.into_iter().collect()
                };
                let options = SummaryOptions::builder()
                    .categories(categories)
                    .filter_most_active_runtime(!all_runtimes)
                    .markers(start, end)
                    .phase_times(!no_phase_times)
                    .parallel_marking(!no_parallel_marking)
                    .first_major_gc(first_major_gc)
                    .windowed(!no_windows)
                    .build();
                commands::summarize(&file, &options, format, output.as_deref())
            }
            Commands::HeapSize {
                file,
                format,
                output,
            } => commands::heap_size(&file, format, output.as_deref()),
        }
    }
}

// An empty marker would match every line.
fn marker(value: Option<String>, default: &str) -> Result<String, CliError> {
    match value {
        Some(text) if text.is_empty() => {
            Err(CliError::invalid_input("test window markers must not be empty"))
        }
        Some(text) => Ok(text),
        None => Ok(default.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse(args: &[&str]) -> Commands {
        TestCli::try_parse_from(std::iter::once("gcprof").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_summarize_defaults() {
        match parse(&["summarize", "gc.log"]) {
            Commands::Summarize {
                categories,
                all_runtimes,
                format,
                no_windows,
                start_marker,
                ..
            } => {
                assert!(categories.is_empty());
                assert!(!all_runtimes);
                assert_eq!(format, OutputFormat::Text);
                assert!(!no_windows);
                assert_eq!(start_marker, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_categories_repeat_and_split() {
        match parse(&["summarize", "gc.log", "-c", "major,size", "--category", "reason"]) {
            Commands::Summarize { categories, .. } => assert_eq!(
                categories,
                vec![MetricCategory::Major, MetricCategory::Size, MetricCategory::Reason]
            ),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = TestCli::try_parse_from(["gcprof", "summarize", "gc.log", "-c", "heap"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_heap_size_csv() {
        match parse(&["heap-size", "gc.log", "--format", "csv"]) {
            Commands::HeapSize { format, .. } => assert_eq!(format, HeapFormat::Csv),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_marker_defaults_and_empty() {
        assert_eq!(marker(None, DEFAULT_START_MARKER).unwrap(), DEFAULT_START_MARKER);
        assert_eq!(marker(Some("BEGIN".into()), DEFAULT_START_MARKER).unwrap(), "BEGIN");
        assert!(matches!(
            marker(Some(String::new()), DEFAULT_END_MARKER),
            Err(CliError::InvalidInput(_))
        ));
    }
}
