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

//! Wirebench Session Engine
//!
//! Measures, aggregates and scores wire-format serialization runs.
//!
//! ## Features
//!
//! - **Run capture**: server metric headers, resource timing, client heap and
//!   long tasks folded into one result per run
//! - **Aggregation**: mean, median, nearest-rank p95/p99, population
//!   variance per metric and `(size, format)` pair
//! - **Scoring**: min-max normalization, four weighted categories, overall
//!   score, winners and ranking
//! - **Anomaly detection**: measurement-validity warnings
//! - **Reports**: console, JSON and Markdown
//!
//! ## Usage
//!
//! ```rust
//! use wirebench_bench::core::{BenchConfig, NullClientTiming, NullSampler};
//! use wirebench_bench::harness::{LoopbackTransport, SessionRunner};
//! use wirebench_codecs::CodecRegistry;
//! use wirebench_core::{DatasetSizePreset, EventGenerator, Format};
//!
//! let config = BenchConfig::default()
//!     .with_sizes(&[DatasetSizePreset::Records(100)])
//!     .with_formats(&[Format::JsonStream, Format::MessagePack])
//!     .with_iterations(3);
//! let registry = CodecRegistry::standard();
//! let mut transport = LoopbackTransport::new(
//!     &registry,
//!     EventGenerator::new(config.seed),
//!     Box::new(NullSampler),
//! );
//! let outcome = SessionRunner::new(&config, &registry)
//!     .with_client_timing(Box::new(NullClientTiming))
//!     .run(&mut transport)
//!     .unwrap();
//! assert_eq!(outcome.rows.len(), 2);
//! ```

pub mod analysis;
pub mod core;
pub mod error;
pub mod harness;
pub mod reporters;
pub mod scoring;

pub use analysis::{detect_anomalies, Anomaly, AnomalyKind, AnomalyThresholds, Severity};
pub use error::{BenchError, Result, TransportError};
pub use harness::{SessionOutcome, SessionRunner};
pub use scoring::{Category, ScoringReport};
