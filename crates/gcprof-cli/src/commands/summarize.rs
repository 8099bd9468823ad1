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

//! Summarize command - reduce a profiler log to named GC metrics

use super::{read_file, write_output};
use crate::error::CliError;
use clap::ValueEnum;
use colored::Colorize;
use gcprof_core::{summarize_profile, Metrics, SummaryOptions};
use tracing::debug;

/// Output format of the summarize command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned `name  value` lines.
    #[default]
    Text,
    /// A JSON object mapping metric names to numbers.
    Json,
}

/// Summarize a GC profiler log.
///
/// Reads `file`, summarizes it with `options` and writes the metrics to
/// `output` (stdout when `None`). Text written to stdout has colored metric
/// names.
///
/// # Errors
///
/// `CliError::Io` / `CliError::FileTooLarge` if the log cannot be read,
/// `CliError::Profile` if it cannot be parsed or summarized.
///
/// # Examples
///
/// ```no_run
/// use gcprof_cli::commands::summarize;
/// use gcprof_cli::commands::OutputFormat;
/// use gcprof_core::SummaryOptions;
///
/// # fn main() -> Result<(), gcprof_cli::error::CliError> {
/// summarize("gc.log", &SummaryOptions::default(), OutputFormat::Json, None)?;
/// # Ok(())
/// # }
/// ```
pub fn summarize(
    file: &str,
    options: &SummaryOptions,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<(), CliError> {
    let content = read_file(file)?;
    let metrics = summarize_profile(&content, options)?;
    debug!(file, metrics = metrics.len(), "summarized profile");

    let rendered = match format {
        OutputFormat::Json => render_metrics_json(&metrics)?,
        OutputFormat::Text => render_metrics_text(&metrics, output.is_none()),
    };
    write_output(&rendered, output)
}

/// Render metrics as aligned text, one metric per line.
pub fn render_metrics_text(metrics: &Metrics, color: bool) -> String {
    let width = metrics.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (name, value) in metrics.iter() {
        let padding = " ".repeat(width - name.len());
        if color {
            out.push_str(&format!("{}{}  {}\n", name.cyan(), padding, value));
        } else {
            out.push_str(&format!("{}{}  {}\n", name, padding, value));
        }
    }
    out
}

/// Render metrics as a pretty-printed JSON object.
pub fn render_metrics_json(metrics: &Metrics) -> Result<String, CliError> {
    let mut json = serde_json::to_string_pretty(metrics)?;
    json.push('\n');
    Ok(json)
}
