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

//! Session harness.
//!
//! Provides the machinery that turns a configuration into results.
//!
//! # Modules
//!
//! - `transport`: Serving side of a run (loopback and HTTP)
//! - `runner`: Sequential session execution
//! - `collector`: Per-`(size, format)` metric buckets
//! - `aggregator`: Summary statistics per bucket

pub mod aggregator;
pub mod collector;
pub mod runner;
pub mod transport;

pub use aggregator::{aggregate, aggregate_collector, compute_stats, sizes_of, AggregateRow, Stats};
pub use collector::{MetricBucket, MetricCollector};
pub use runner::{iterations_of, SessionOutcome, SessionRunner};
pub use transport::{HttpTransport, LoopbackTransport, Transport, TransportResponse};
