// Dweve Wirebench - Wire-format Serialization Benchmark
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
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

//! Core session vocabulary.
//!
//! # Modules
//!
//! - `config`: Session configuration and environment overrides
//! - `measurement`: Metrics and per-run results
//! - `capture`: Assembling run results from server headers and client timings
//! - `sampler`: Resource and client-timing samplers

pub mod capture;
pub mod config;
pub mod measurement;
pub mod sampler;

pub use capture::{LongTask, NetworkTiming, ResourceTimingEntry, RunCapture, ServerMetrics};
pub use config::{parse_formats, parse_sizes, BenchConfig, ExportFormat, DEFAULT_ITERATIONS};
pub use measurement::{Metric, RunMetrics, RunRecord, RunResult};
pub use sampler::{
    ClientTimingSource, NativeClientTiming, NullClientTiming, NullSampler, ProcessSampler,
    ResourceSampler, ResourceSnapshot, TaskWindow,
};
