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

//! Result aggregation and statistics computation.
//!
//! Collapses each [`MetricBucket`] into an [`AggregateRow`]: summary
//! statistics for every tracked metric plus the bucket's run tallies.

use crate::core::measurement::{Metric, RunRecord};
use crate::harness::collector::{MetricBucket, MetricCollector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wirebench_core::{DatasetSizePreset, Format};

/// Statistical summary of one metric's samples.
///
/// Every field is `None` when there are no samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
    pub stddev: Option<f64>,
    pub variance: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Number of samples.
    pub count: usize,
}

/// Computes the statistical summary of a sample.
///
/// Percentiles use the nearest rank `floor(q * (n - 1))` of the sorted
/// sample; variance and standard deviation are population forms.
/// Non-finite values are ignored.
///
/// # Example
///
/// ```
/// use wirebench_bench::harness::compute_stats;
///
/// let stats = compute_stats(&[50.0, 10.0, 40.0, 20.0, 30.0]);
/// assert_eq!(stats.median, Some(30.0));
/// assert_eq!(stats.p95, Some(40.0));
/// ```
pub fn compute_stats(values: &[f64]) -> Stats {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Stats::default();
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let (min, max) = (sorted[0], sorted[n - 1]);
    // A constant sample is exact; summing it can drift by an ulp.
    let (mean, variance) = if min == max {
        (min, 0.0)
    } else {
        let mean = (sorted.iter().sum::<f64>() / n as f64).clamp(min, max);
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        (mean, variance)
    };
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    Stats {
        mean: Some(mean),
        median: Some(median),
        p95: Some(nearest_rank(&sorted, 0.95)),
        p99: Some(nearest_rank(&sorted, 0.99)),
        stddev: Some(variance.sqrt()),
        variance: Some(variance),
        min: Some(min),
        max: Some(max),
        count: n,
    }
}

fn nearest_rank(sorted: &[f64], q: f64) -> f64 {
    let idx = (q * (sorted.len() - 1) as f64).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Aggregated view of one `(size, format)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRow {
    pub size: DatasetSizePreset,
    pub format: Format,
    /// Successful runs.
    pub ok_runs: usize,
    /// Failed runs.
    pub errors: usize,
    /// Distinct failure messages.
    pub error_messages: Vec<String>,
    /// Stats for every tracked metric.
    pub metrics: BTreeMap<Metric, Stats>,
}

impl AggregateRow {
    /// Builds a row from a bucket, with an entry for every metric.
    pub fn from_bucket(size: DatasetSizePreset, format: Format, bucket: &MetricBucket) -> Self {
        let metrics = Metric::ALL
            .iter()
            .map(|&metric| (metric, compute_stats(bucket.values(metric))))
            .collect();

        Self {
            size,
            format,
            ok_runs: bucket.ok_runs(),
            errors: bucket.errors(),
            error_messages: bucket.error_messages().to_vec(),
            metrics,
        }
    }

    /// Stats of `metric` (all-null if the metric is unknown to the row).
    pub fn stat(&self, metric: Metric) -> Stats {
        self.metrics.get(&metric).copied().unwrap_or_default()
    }

    /// Mean of `metric`.
    pub fn mean(&self, metric: Metric) -> Option<f64> {
        self.stat(metric).mean
    }

    /// Total runs, successful or not.
    pub fn runs(&self) -> usize {
        self.ok_runs + self.errors
    }
}

/// Aggregates every bucket of a collector.
///
/// Rows come out ordered by size, then by format.
pub fn aggregate_collector(collector: &MetricCollector) -> Vec<AggregateRow> {
    collector
        .buckets()
        .map(|(size, format, bucket)| AggregateRow::from_bucket(size, format, bucket))
        .collect()
}

/// Aggregates a list of run records.
pub fn aggregate(records: &[RunRecord]) -> Vec<AggregateRow> {
    let mut collector = MetricCollector::new();
    for record in records {
        collector.record_run(record);
    }
    aggregate_collector(&collector)
}

/// Distinct sizes present in `rows`, ascending.
pub fn sizes_of(rows: &[AggregateRow]) -> Vec<DatasetSizePreset> {
    let mut sizes: Vec<_> = rows.iter().map(|row| row.size).collect();
    sizes.sort();
    sizes.dedup();
    sizes
}
