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

//! CLI command implementations

mod heap_size;
mod summarize;

pub use heap_size::{heap_size, render_heap_csv, render_heap_json, HeapFormat};
pub use summarize::{render_metrics_json, render_metrics_text, summarize, OutputFormat};

use crate::error::CliError;
use std::fs;
use std::io::{self, Write};

/// Default maximum input size (1 GB).
///
/// Overridden by the `GCPROF_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Environment variable holding the maximum input size in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "GCPROF_MAX_FILE_SIZE";

/// Maximum input size from the environment, or [`DEFAULT_MAX_FILE_SIZE`] if
/// unset or unparseable.
fn get_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a profiler log with size validation.
///
/// The size is checked from metadata before anything is read.
///
/// # Errors
///
/// `CliError::Io` if the metadata or contents cannot be read (including
/// invalid UTF-8); `CliError::FileTooLarge` if the file exceeds the limit.
///
/// # Examples
///
/// ```no_run
/// use gcprof_cli::commands::read_file;
///
/// # fn main() -> Result<(), gcprof_cli::error::CliError> {
/// let log = read_file("gc.log")?;
/// assert!(!log.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn read_file(path: &str) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file, or to stdout when `path` is `None`.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}
