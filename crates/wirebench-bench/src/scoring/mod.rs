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

//! Multi-criteria scoring.
//!
//! # Modules
//!
//! - `categories`: Categories, sub-metrics and weights
//! - `normalize`: Min-max normalization and renormalized weighted means
//! - `engine`: Per-size scores, averages, winners and ranking

pub mod categories;
pub mod engine;
pub mod normalize;

pub use categories::{Category, SubMetric};
pub use engine::{score, score_size, CategoryScore, RankedFormat, ScoringReport, SizeScores};
pub use normalize::{mean_present, normalize, weighted_mean};
