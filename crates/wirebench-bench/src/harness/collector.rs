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

//! Metric collection for sessions.
//!
//! Accumulates run results into one [`MetricBucket`] per `(size, format)`
//! pair. Successful runs contribute their metric values; failed runs only
//! bump the error tally.

use crate::core::measurement::{Metric, RunRecord, RunResult};
use std::collections::BTreeMap;
use wirebench_core::{DatasetSizePreset, Format};

/// Raw samples for one `(size, format)` pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricBucket {
    values: BTreeMap<Metric, Vec<f64>>,
    ok_runs: usize,
    errors: usize,
    error_messages: Vec<String>,
}

impl MetricBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one run result into the bucket.
    ///
    /// Non-finite values are discarded; a failed run contributes no values.
    pub fn record(&mut self, result: &RunResult) {
        match result {
            RunResult::Ok { metrics } => {
                self.ok_runs += 1;
                for (metric, value) in metrics.iter() {
                    if value.is_finite() {
                        self.values.entry(metric).or_default().push(value);
                    }
                }
            }
            RunResult::Error { message } => {
                self.errors += 1;
                if !self.error_messages.contains(message) {
                    self.error_messages.push(message.clone());
                }
            }
        }
    }

    /// Samples of `metric`; empty if never observed.
    pub fn values(&self, metric: Metric) -> &[f64] {
        self.values.get(&metric).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ok_runs(&self) -> usize {
        self.ok_runs
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Distinct error messages, in first-seen order.
    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }
}

/// Collects run results for a whole session.
#[derive(Debug, Clone, Default)]
pub struct MetricCollector {
    buckets: BTreeMap<(DatasetSizePreset, Format), MetricBucket>,
}

impl MetricCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one run result.
    pub fn record(&mut self, size: DatasetSizePreset, format: Format, result: &RunResult) {
        self.buckets.entry((size, format)).or_default().record(result);
    }

    /// Records a run together with its coordinates.
    pub fn record_run(&mut self, run: &RunRecord) {
        self.record(run.size, run.format, &run.result);
    }

    /// Drops every bucket.
    pub fn reset(&mut self) {
        self.buckets.clear();
    }

    pub fn bucket(&self, size: DatasetSizePreset, format: Format) -> Option<&MetricBucket> {
        self.buckets.get(&(size, format))
    }

    /// Buckets ordered by size, then by format.
    pub fn buckets(&self) -> impl Iterator<Item = (DatasetSizePreset, Format, &MetricBucket)> {
        self.buckets
            .iter()
            .map(|((size, format), bucket)| (*size, *format, bucket))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
