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

//! The metrics mapping produced by a summarization.

use crate::error::{ProfileError, ProfileResult};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// Suffix for metrics restricted to records inside test windows.
pub const IN_TEST_SUFFIX: &str = " in test";

/// Suffix for metrics restricted to records outside test windows.
pub const OUTSIDE_TEST_SUFFIX: &str = " outside test";

/// A single metric value.
///
/// Counts stay integral so that renderers do not print `2.0 slices`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MetricValue {
    Count(u64),
    Value(f64),
}

impl MetricValue {
    /// The value as a float.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            MetricValue::Count(n) => n as f64,
            MetricValue::Value(v) => v,
        }
    }
}

impl From<u64> for MetricValue {
    fn from(n: u64) -> Self {
        MetricValue::Count(n)
    }
}

impl From<usize> for MetricValue {
    fn from(n: usize) -> Self {
        MetricValue::Count(n as u64)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Value(v)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{}", n),
            MetricValue::Value(v) => write!(f, "{}", v),
        }
    }
}

/// Metric name to value, ordered by name.
///
/// # Examples
///
/// ```rust
/// use gcprof_core::{MetricValue, Metrics};
///
/// let mut metrics = Metrics::new();
/// metrics.insert("Major GC slices", 2u64).unwrap();
/// metrics.insert("Major GC time", 3.5).unwrap();
///
/// assert_eq!(metrics.get("Major GC slices"), Some(MetricValue::Count(2)));
/// assert!(metrics.insert("Major GC time", 1.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Metrics(BTreeMap<String, MetricValue>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metric.
    ///
    /// # Errors
    ///
    /// `ProfileError::DuplicateMetric` if `name` is already present; the
    /// existing value is kept.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<MetricValue>,
    ) -> ProfileResult<()> {
        match self.0.entry(name.into()) {
            btree_map::Entry::Occupied(entry) => {
                Err(ProfileError::DuplicateMetric(entry.key().clone()))
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(value.into());
                Ok(())
            }
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MetricValue)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Move every metric of `other` into `self`.
    ///
    /// # Errors
    ///
    /// `ProfileError::DuplicateMetric` on the first name both maps share.
    pub fn merge(&mut self, other: Metrics) -> ProfileResult<()> {
        for (name, value) in other.0 {
            self.insert(name, value)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Metrics {
    type Item = (&'a String, &'a MetricValue);
    type IntoIter = btree_map::Iter<'a, String, MetricValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
