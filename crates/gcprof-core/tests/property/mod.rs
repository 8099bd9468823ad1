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

//! Property-based tests for gcprof core.
//!
//! # Test Modules
//!
//! - `trim`: shutdown trimming is idempotent and only removes a tail
//! - `filters`: filters preserve order and commute
//! - `windows`: events are attributed to the window they fall in
//!
//! Logs are generated with the aligned builder from `gcprof-test`.

pub mod filters;
pub mod trim;
pub mod windows;
