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

//! gcprof command-line interface.
//!
//! The `gcprof` binary reads a GC profiler log and prints either a metric
//! summary or the heap size timeline. The modules are public so that the
//! commands can be driven from tests and other tools:
//!
//! - [`cli`]: clap command definitions and dispatch
//! - [`commands`]: command implementations and file I/O helpers
//! - [`error`]: [`CliError`](error::CliError)

pub mod cli;
pub mod commands;
pub mod error;
