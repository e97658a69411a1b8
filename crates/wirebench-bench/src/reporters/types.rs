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

//! Report types and structures.

use crate::analysis::anomaly::{Anomaly, Severity};
use crate::core::config::BenchConfig;
use crate::harness::aggregator::{sizes_of, AggregateRow};
use crate::harness::runner::SessionOutcome;
use crate::scoring::engine::ScoringReport;
use serde::{Deserialize, Serialize};
use wirebench_core::{DatasetSizePreset, Format};

/// The configuration a report was produced with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub iterations: usize,
    pub sizes: Vec<DatasetSizePreset>,
    pub formats: Vec<Format>,
    pub gc_between_iterations: bool,
    pub seed: u64,
    /// Where payloads came from (`loopback` or a server URL).
    pub transport: String,
}

impl ConfigSummary {
    pub fn new(config: &BenchConfig, transport: impl Into<String>) -> Self {
        Self {
            iterations: config.iterations,
            sizes: config.sizes.clone(),
            formats: config.formats.clone(),
            gc_between_iterations: config.gc_between_iterations,
            seed: config.seed,
            transport: transport.into(),
        }
    }
}

/// Aggregated rows of one dataset size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeSection {
    pub size: DatasetSizePreset,
    pub record_count: usize,
    pub rows: Vec<AggregateRow>,
}

/// Complete session report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    /// Report title.
    pub title: String,
    /// Report timestamp (RFC 3339).
    pub timestamp: String,
    pub config: ConfigSummary,
    pub sizes: Vec<SizeSection>,
    pub scoring: ScoringReport,
    pub anomalies: Vec<Anomaly>,
}

impl SessionReport {
    /// Creates a report stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        config: ConfigSummary,
        rows: &[AggregateRow],
        scoring: ScoringReport,
        anomalies: Vec<Anomaly>,
    ) -> Self {
        let sizes = sizes_of(rows)
            .into_iter()
            .map(|size| SizeSection {
                size,
                record_count: size.record_count(),
                rows: rows.iter().filter(|r| r.size == size).cloned().collect(),
            })
            .collect();

        Self {
            title: title.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            config,
            sizes,
            scoring,
            anomalies,
        }
    }

    /// Creates a report from a finished session.
    pub fn from_outcome(
        title: impl Into<String>,
        config: ConfigSummary,
        outcome: &SessionOutcome,
    ) -> Self {
        Self::new(
            title,
            config,
            &outcome.rows,
            outcome.scoring.clone(),
            outcome.anomalies.clone(),
        )
    }

    /// Number of aggregated rows.
    pub fn row_count(&self) -> usize {
        self.sizes.iter().map(|s| s.rows.len()).sum()
    }

    /// Anomalies of warning severity.
    pub fn warning_count(&self) -> usize {
        self.anomalies
            .iter()
            .filter(|a| a.severity == Severity::Warning)
            .count()
    }
}

/// Formats an optional number, `-` when absent.
pub(crate) fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| "-".to_string())
}

/// Formats a byte count with a binary unit.
pub(crate) fn fmt_bytes(value: Option<f64>) -> String {
    match value {
        Some(v) if v.abs() >= 1024.0 * 1024.0 => format!("{:.2} MiB", v / (1024.0 * 1024.0)),
        Some(v) if v.abs() >= 1024.0 => format!("{:.1} KiB", v / 1024.0),
        Some(v) => format!("{:.0} B", v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
pub(crate) fn sample_report() -> SessionReport {
    use crate::core::measurement::{Metric, RunMetrics, RunRecord, RunResult};
    use std::time::Duration;

    let records = vec![
        RunRecord::new(
            DatasetSizePreset::Small,
            Format::Cbor,
            1,
            RunResult::ok(
                RunMetrics::default()
                    .with(Metric::EndToEndMs, 4.0)
                    .with(Metric::PayloadBytes, 2048.0),
            ),
        ),
        RunRecord::new(
            DatasetSizePreset::Small,
            Format::JsonDom,
            1,
            RunResult::error("HTTP 500: boom"),
        ),
    ];
    let config = BenchConfig::default().with_iterations(1);
    let outcome =
        SessionOutcome::from_records(records, 1, &config.thresholds, Duration::ZERO);
    SessionReport::from_outcome("Test", ConfigSummary::new(&config, "loopback"), &outcome)
}
