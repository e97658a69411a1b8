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

//! Measurement-validity checks over aggregated rows.
//!
//! Every rule is independent; a row can trigger several. Anomalies only
//! annotate a report and never fail a session.

use crate::core::measurement::Metric;
use crate::harness::aggregator::AggregateRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wirebench_core::{DatasetSizePreset, Format};

/// Anomaly rule identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    LowSampleSize,
    ZeroVariance,
    GcInterference,
    MissingTtfb,
    InvertedScaling,
    HighVariance,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::LowSampleSize => "low_sample_size",
            AnomalyKind::ZeroVariance => "zero_variance",
            AnomalyKind::GcInterference => "gc_interference",
            AnomalyKind::MissingTtfb => "missing_ttfb",
            AnomalyKind::InvertedScaling => "inverted_scaling",
            AnomalyKind::HighVariance => "high_variance",
        }
    }
}

/// Severity level for anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Results may be misleading.
    Warning,
}

impl Severity {
    /// Returns the severity as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

/// One detected anomaly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<DatasetSizePreset>,
}

impl Anomaly {
    fn new(kind: AnomalyKind, severity: Severity, message: String) -> Self {
        Self {
            kind,
            message,
            severity,
            format: None,
            size: None,
        }
    }

    fn at(mut self, row: &AggregateRow) -> Self {
        self.format = Some(row.format);
        self.size = Some(row.size);
        self
    }
}

/// Limits the detector compares against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyThresholds {
    /// Fewer iterations than this is a low sample size.
    pub min_iterations: usize,
    /// Coefficient of variation (percent) above which timings are noisy.
    pub max_cv_pct: f64,
    /// A smaller size slower than this multiple of the next larger size.
    pub inverted_scaling_factor: f64,
    /// Mean server heap delta (bytes) below which a collection likely ran.
    pub gc_heap_delta_bytes: f64,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            min_iterations: 3,
            max_cv_pct: 50.0,
            inverted_scaling_factor: 1.5,
            gc_heap_delta_bytes: -1_000_000.0,
        }
    }
}

/// Runs every rule over the session's rows.
pub fn detect_anomalies(
    rows: &[AggregateRow],
    iterations: usize,
    thresholds: &AnomalyThresholds,
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    if iterations < thresholds.min_iterations {
        anomalies.push(Anomaly::new(
            AnomalyKind::LowSampleSize,
            Severity::Warning,
            format!(
                "Only {} iteration(s) per format; at least {} are needed for stable statistics",
                iterations, thresholds.min_iterations
            ),
        ));
    }

    for row in rows {
        let e2e = row.stat(Metric::EndToEndMs);

        if e2e.count > 1 && (e2e.stddev == Some(0.0) || e2e.min == e2e.max) {
            anomalies.push(
                Anomaly::new(
                    AnomalyKind::ZeroVariance,
                    Severity::Warning,
                    format!(
                        "{} at {}: {} identical end-to-end timings, the clock may be too coarse",
                        row.format, row.size, e2e.count
                    ),
                )
                .at(row),
            );
        }

        if let (Some(mean), Some(stddev)) = (e2e.mean, e2e.stddev) {
            if mean > 0.0 {
                let cv = stddev / mean * 100.0;
                if cv > thresholds.max_cv_pct {
                    anomalies.push(
                        Anomaly::new(
                            AnomalyKind::HighVariance,
                            Severity::Warning,
                            format!(
                                "{} at {}: end-to-end CV {:.1}% exceeds {:.0}%",
                                row.format, row.size, cv, thresholds.max_cv_pct
                            ),
                        )
                        .at(row),
                    );
                }
            }
        }

        if let Some(delta) = row.mean(Metric::ServerHeapDelta) {
            if delta < thresholds.gc_heap_delta_bytes {
                anomalies.push(
                    Anomaly::new(
                        AnomalyKind::GcInterference,
                        Severity::Info,
                        format!(
                            "{} at {}: mean server heap delta {:.0} bytes suggests a collection during encoding",
                            row.format, row.size, delta
                        ),
                    )
                    .at(row),
                );
            }
        }
    }

    let any_ok = rows.iter().any(|row| row.ok_runs > 0);
    let no_ttfb = rows.iter().all(|row| row.stat(Metric::TtfbMs).count == 0);
    if any_ok && no_ttfb {
        anomalies.push(Anomaly::new(
            AnomalyKind::MissingTtfb,
            Severity::Warning,
            "No run exposed time-to-first-byte; network timing is unavailable".to_string(),
        ));
    }

    anomalies.extend(inverted_scaling(rows, thresholds.inverted_scaling_factor));
    anomalies
}

fn inverted_scaling(rows: &[AggregateRow], factor: f64) -> Vec<Anomaly> {
    let mut by_format: BTreeMap<Format, Vec<(DatasetSizePreset, f64)>> = BTreeMap::new();
    for row in rows {
        if let Some(mean) = row.mean(Metric::EndToEndMs) {
            by_format.entry(row.format).or_default().push((row.size, mean));
        }
    }

    let mut anomalies = Vec::new();
    for (format, mut points) in by_format {
        points.sort_by(|a, b| a.0.cmp(&b.0));
        for pair in points.windows(2) {
            let (smaller, small_mean) = pair[0];
            let (larger, large_mean) = pair[1];
            if smaller.record_count() == larger.record_count() {
                continue;
            }
            if small_mean > factor * large_mean {
                anomalies.push(Anomaly {
                    kind: AnomalyKind::InvertedScaling,
                    message: format!(
                        "{}: {} took {:.2} ms, more than {}x the {:.2} ms at {}",
                        format, smaller, small_mean, factor, large_mean, larger
                    ),
                    severity: Severity::Warning,
                    format: Some(format),
                    size: Some(smaller),
                });
            }
        }
    }
    anomalies
}
