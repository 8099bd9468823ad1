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

//! Error types for profile parsing and summarization.
//!
//! Every variant here is fatal for the summarization call that produced it.
//! Per-line anomalies (a data line whose sliced width does not match its
//! category's layout) are not errors: they are dropped, logged and counted in
//! [`ProfileData::dropped_lines`](crate::ProfileData::dropped_lines).
//!
//! # Error Categories
//!
//! - **Structural**: no profile data at all, nested test windows, bad headers
//! - **Value**: numeric or percentage columns that do not parse
//! - **Schema**: a metric needs a column the header never declared
//! - **Internal**: the summarizer tried to write the same metric twice
//!
//! # Examples
//!
//! ```rust
//! use gcprof_core::{parse_profile, ProfileError};
//!
//! let err = parse_profile("nothing to see here\n").unwrap_err();
//! assert!(matches!(err, ProfileError::NoProfileData));
//!
//! let nested = "Testing url a\nTesting url b\n";
//! let err = parse_profile(nested).unwrap_err();
//! assert_eq!(err.line(), Some(2));
//! ```

use crate::record::GcCategory;
use thiserror::Error;

/// Errors that abort a parse or summarization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// The whole log was scanned and neither category produced a record.
    #[error("No profile data present")]
    NoProfileData,

    /// A test-start marker was seen while a test window was already open.
    #[error("Nested test window at line {line}: test already in progress")]
    NestedTestWindow { line: usize },

    /// A header line that cannot serve as a column layout.
    #[error("Invalid {category} header at line {line}: {message}")]
    InvalidHeader {
        category: GcCategory,
        line: usize,
        message: String,
    },

    /// Runtime selection was asked to choose from nothing.
    #[error("Cannot select a runtime from an empty record set")]
    EmptyRecordSet,

    /// A promotion-rate value that is not a `%`-suffixed number.
    #[error("Bad promotion rate: '{value}'")]
    BadPromotionRate { value: String },

    /// A numeric column held something that does not parse as a number.
    #[error("Invalid number in {category} column '{field}': '{value}'")]
    InvalidNumber {
        category: GcCategory,
        field: String,
        value: String,
    },

    /// A metric needs a column absent from the category's header.
    #[error("Missing {category} column '{field}'")]
    MissingField { category: GcCategory, field: String },

    /// A metric name was produced twice in one summarization pass.
    #[error("Duplicate metric: {0}")]
    DuplicateMetric(String),
}

impl ProfileError {
    /// Create an invalid header error.
    #[inline]
    pub fn invalid_header(category: GcCategory, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            category,
            line,
            message: message.into(),
        }
    }

    /// Create an invalid number error.
    #[inline]
    pub fn invalid_number(
        category: GcCategory,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidNumber {
            category,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a missing field error.
    #[inline]
    pub fn missing_field(category: GcCategory, field: impl Into<String>) -> Self {
        Self::MissingField {
            category,
            field: field.into(),
        }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::NestedTestWindow { line } | Self::InvalidHeader { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;
