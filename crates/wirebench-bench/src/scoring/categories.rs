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

//! Scoring categories and their sub-metric weights.

use crate::core::measurement::Metric;
use crate::harness::aggregator::AggregateRow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Speed,
    Efficiency,
    Stability,
    Resources,
}

/// A value derived from an aggregate row that feeds a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubMetric {
    /// Mean of the metric.
    Mean(Metric),
    /// Population variance of the metric.
    Variance(Metric),
    /// `p99 / mean` of the metric; null unless both are positive.
    TailRatio(Metric),
}

impl SubMetric {
    /// Value of this sub-metric for one row.
    pub fn value(&self, row: &AggregateRow) -> Option<f64> {
        match *self {
            SubMetric::Mean(metric) => row.stat(metric).mean,
            SubMetric::Variance(metric) => row.stat(metric).variance,
            SubMetric::TailRatio(metric) => {
                let stats = row.stat(metric);
                match (stats.p99, stats.mean) {
                    (Some(p99), Some(mean)) if p99 > 0.0 && mean > 0.0 => Some(p99 / mean),
                    _ => None,
                }
            }
        }
    }

    pub fn higher_is_better(&self) -> bool {
        match self {
            SubMetric::Mean(metric) => metric.higher_is_better(),
            SubMetric::Variance(_) | SubMetric::TailRatio(_) => false,
        }
    }
}

const SPEED: [(SubMetric, f64); 5] = [
    (SubMetric::Mean(Metric::EndToEndMs), 0.50),
    (SubMetric::Mean(Metric::TtfbMs), 0.15),
    (SubMetric::Mean(Metric::ParseMs), 0.20),
    (SubMetric::Mean(Metric::DownloadMs), 0.10),
    (SubMetric::Mean(Metric::ServerSerializeMs), 0.05),
];

const EFFICIENCY: [(SubMetric, f64); 3] = [
    (SubMetric::Mean(Metric::PayloadBytes), 0.50),
    (SubMetric::Mean(Metric::TransferBytes), 0.30),
    (SubMetric::Mean(Metric::BytesPerRecord), 0.20),
];

const STABILITY: [(SubMetric, f64); 3] = [
    (SubMetric::TailRatio(Metric::EndToEndMs), 0.40),
    (SubMetric::Variance(Metric::EndToEndMs), 0.35),
    (SubMetric::Mean(Metric::LongTaskMs), 0.25),
];

const RESOURCES: [(SubMetric, f64); 5] = [
    (SubMetric::Mean(Metric::ServerHeapDelta), 0.30),
    (SubMetric::Mean(Metric::ServerCpuTimeMs), 0.30),
    (SubMetric::Mean(Metric::ServerGcTimeMs), 0.15),
    (SubMetric::Mean(Metric::ClientHeapDelta), 0.15),
    (SubMetric::Mean(Metric::ServerGcCount), 0.10),
];

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Speed,
        Category::Efficiency,
        Category::Stability,
        Category::Resources,
    ];

    /// Weight in the overall score.
    pub fn weight(&self) -> f64 {
        match self {
            Category::Speed => 0.35,
            Category::Efficiency => 0.25,
            Category::Stability => 0.20,
            Category::Resources => 0.20,
        }
    }

    /// Weighted sub-metrics of this category.
    pub fn sub_metrics(&self) -> &'static [(SubMetric, f64)] {
        match self {
            Category::Speed => &SPEED,
            Category::Efficiency => &EFFICIENCY,
            Category::Stability => &STABILITY,
            Category::Resources => &RESOURCES,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Speed => "speed",
            Category::Efficiency => "efficiency",
            Category::Stability => "stability",
            Category::Resources => "resources",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
