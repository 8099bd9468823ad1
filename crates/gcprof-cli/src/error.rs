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

//! Error types for the gcprof CLI.
//!
//! Every command returns `Result<(), CliError>`; `main` prints the error and
//! exits non-zero.

use gcprof_core::ProfileError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by `gcprof` commands.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Reading metadata, reading or writing a file failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The input file exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        max_mb: u64,
    },

    /// The log could not be parsed or summarized.
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// JSON serialization failed.
    #[error("JSON format error: {message}")]
    JsonFormat { message: String },

    /// CSV serialization failed.
    #[error("CSV format error: {message}")]
    CsvFormat { message: String },

    /// Invalid command-line input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    ///
    /// ```rust,no_run
    /// use gcprof_cli::error::CliError;
    ///
    /// let result = std::fs::read_to_string("gc.log")
    ///     .map_err(|e| CliError::io_error("gc.log", e));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}

impl From<csv::Error> for CliError {
    fn from(source: csv::Error) -> Self {
        Self::CsvFormat {
            message: source.to_string(),
        }
    }
}
