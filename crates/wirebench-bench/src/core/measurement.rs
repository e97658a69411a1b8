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

//! Per-run observations.
//!
//! A [`RunResult`] is the outcome of one encode, transfer and decode for a
//! `(format, size)` pair. Successful runs carry [`RunMetrics`], a fixed set
//! of named numeric metrics where any metric may be unavailable (`None`).

use serde::{Deserialize, Serialize};
use std::fmt;
use wirebench_core::{DatasetSizePreset, Format};

/// A named numeric metric captured per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    EndToEndMs,
    ServerSerializeMs,
    ParseMs,
    TtfbMs,
    DownloadMs,
    DnsMs,
    ConnectMs,
    PayloadBytes,
    ServerPayloadBytes,
    TransferBytes,
    BytesPerRecord,
    ServerHeapBefore,
    ServerHeapAfter,
    ServerHeapDelta,
    ServerGcCount,
    ServerGcTimeMs,
    ServerCpuTimeMs,
    ClientHeapBefore,
    ClientHeapAfter,
    ClientHeapDelta,
    LongTaskCount,
    LongTaskMs,
    EventCount,
}

impl Metric {
    /// Every tracked metric, in report order.
    pub const ALL: [Metric; 23] = [
        Metric::EndToEndMs,
        Metric::ServerSerializeMs,
        Metric::ParseMs,
        Metric::TtfbMs,
        Metric::DownloadMs,
        Metric::DnsMs,
        Metric::ConnectMs,
        Metric::PayloadBytes,
        Metric::ServerPayloadBytes,
        Metric::TransferBytes,
        Metric::BytesPerRecord,
        Metric::ServerHeapBefore,
        Metric::ServerHeapAfter,
        Metric::ServerHeapDelta,
        Metric::ServerGcCount,
        Metric::ServerGcTimeMs,
        Metric::ServerCpuTimeMs,
        Metric::ClientHeapBefore,
        Metric::ClientHeapAfter,
        Metric::ClientHeapDelta,
        Metric::LongTaskCount,
        Metric::LongTaskMs,
        Metric::EventCount,
    ];

    /// Identifier used in reports and exported runs.
    pub fn id(&self) -> &'static str {
        match self {
            Metric::EndToEndMs => "endToEndMs",
            Metric::ServerSerializeMs => "serverSerializeMs",
            Metric::ParseMs => "parseMs",
            Metric::TtfbMs => "ttfbMs",
            Metric::DownloadMs => "downloadMs",
            Metric::DnsMs => "dnsMs",
            Metric::ConnectMs => "connectMs",
            Metric::PayloadBytes => "payloadBytes",
            Metric::ServerPayloadBytes => "serverPayloadBytes",
            Metric::TransferBytes => "transferBytes",
            Metric::BytesPerRecord => "bytesPerRecord",
            Metric::ServerHeapBefore => "serverHeapBefore",
            Metric::ServerHeapAfter => "serverHeapAfter",
            Metric::ServerHeapDelta => "serverHeapDelta",
            Metric::ServerGcCount => "serverGcCount",
            Metric::ServerGcTimeMs => "serverGcTimeMs",
            Metric::ServerCpuTimeMs => "serverCpuTimeMs",
            Metric::ClientHeapBefore => "clientHeapBefore",
            Metric::ClientHeapAfter => "clientHeapAfter",
            Metric::ClientHeapDelta => "clientHeapDelta",
            Metric::LongTaskCount => "longTaskCount",
            Metric::LongTaskMs => "longTaskMs",
            Metric::EventCount => "eventCount",
        }
    }

    /// Whether larger values are better. Only the record count is.
    pub fn higher_is_better(&self) -> bool {
        matches!(self, Metric::EventCount)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Metric values of one successful run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetrics {
    pub end_to_end_ms: Option<f64>,
    pub server_serialize_ms: Option<f64>,
    pub parse_ms: Option<f64>,
    pub ttfb_ms: Option<f64>,
    pub download_ms: Option<f64>,
    pub dns_ms: Option<f64>,
    pub connect_ms: Option<f64>,
    pub payload_bytes: Option<f64>,
    pub server_payload_bytes: Option<f64>,
    pub transfer_bytes: Option<f64>,
    pub bytes_per_record: Option<f64>,
    pub server_heap_before: Option<f64>,
    pub server_heap_after: Option<f64>,
    pub server_heap_delta: Option<f64>,
    pub server_gc_count: Option<f64>,
    pub server_gc_time_ms: Option<f64>,
    pub server_cpu_time_ms: Option<f64>,
    pub client_heap_before: Option<f64>,
    pub client_heap_after: Option<f64>,
    pub client_heap_delta: Option<f64>,
    pub long_task_count: Option<f64>,
    pub long_task_ms: Option<f64>,
    pub event_count: Option<f64>,
}

impl RunMetrics {
    /// Value of `metric`, if captured.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::EndToEndMs => self.end_to_end_ms,
            Metric::ServerSerializeMs => self.server_serialize_ms,
            Metric::ParseMs => self.parse_ms,
            Metric::TtfbMs => self.ttfb_ms,
            Metric::DownloadMs => self.download_ms,
            Metric::DnsMs => self.dns_ms,
            Metric::ConnectMs => self.connect_ms,
            Metric::PayloadBytes => self.payload_bytes,
            Metric::ServerPayloadBytes => self.server_payload_bytes,
            Metric::TransferBytes => self.transfer_bytes,
            Metric::BytesPerRecord => self.bytes_per_record,
            Metric::ServerHeapBefore => self.server_heap_before,
            Metric::ServerHeapAfter => self.server_heap_after,
            Metric::ServerHeapDelta => self.server_heap_delta,
            Metric::ServerGcCount => self.server_gc_count,
            Metric::ServerGcTimeMs => self.server_gc_time_ms,
            Metric::ServerCpuTimeMs => self.server_cpu_time_ms,
            Metric::ClientHeapBefore => self.client_heap_before,
            Metric::ClientHeapAfter => self.client_heap_after,
            Metric::ClientHeapDelta => self.client_heap_delta,
            Metric::LongTaskCount => self.long_task_count,
            Metric::LongTaskMs => self.long_task_ms,
            Metric::EventCount => self.event_count,
        }
    }

    /// Set (or clear) the value of `metric`.
    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        let slot = match metric {
            Metric::EndToEndMs => &mut self.end_to_end_ms,
            Metric::ServerSerializeMs => &mut self.server_serialize_ms,
            Metric::ParseMs => &mut self.parse_ms,
            Metric::TtfbMs => &mut self.ttfb_ms,
            Metric::DownloadMs => &mut self.download_ms,
            Metric::DnsMs => &mut self.dns_ms,
            Metric::ConnectMs => &mut self.connect_ms,
            Metric::PayloadBytes => &mut self.payload_bytes,
            Metric::ServerPayloadBytes => &mut self.server_payload_bytes,
            Metric::TransferBytes => &mut self.transfer_bytes,
            Metric::BytesPerRecord => &mut self.bytes_per_record,
            Metric::ServerHeapBefore => &mut self.server_heap_before,
            Metric::ServerHeapAfter => &mut self.server_heap_after,
            Metric::ServerHeapDelta => &mut self.server_heap_delta,
            Metric::ServerGcCount => &mut self.server_gc_count,
            Metric::ServerGcTimeMs => &mut self.server_gc_time_ms,
            Metric::ServerCpuTimeMs => &mut self.server_cpu_time_ms,
            Metric::ClientHeapBefore => &mut self.client_heap_before,
            Metric::ClientHeapAfter => &mut self.client_heap_after,
            Metric::ClientHeapDelta => &mut self.client_heap_delta,
            Metric::LongTaskCount => &mut self.long_task_count,
            Metric::LongTaskMs => &mut self.long_task_ms,
            Metric::EventCount => &mut self.event_count,
        };
        *slot = value;
    }

    /// Builder-style [`RunMetrics::set`].
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    /// Captured metrics with their values.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL
            .iter()
            .filter_map(move |&metric| self.get(metric).map(|value| (metric, value)))
    }
}

/// Outcome of one run. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunResult {
    /// The payload was fetched and decoded.
    Ok {
        /// Captured metrics
        metrics: RunMetrics,
    },
    /// Transport, decode or verification failed; no metrics are kept.
    Error {
        /// Raw error message
        message: String,
    },
}

impl RunResult {
    /// Successful run with the given metrics.
    pub fn ok(metrics: RunMetrics) -> Self {
        RunResult::Ok { metrics }
    }

    /// Failed run.
    pub fn error(message: impl Into<String>) -> Self {
        RunResult::Error {
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RunResult::Ok { .. })
    }

    /// Metrics of a successful run.
    pub fn metrics(&self) -> Option<&RunMetrics> {
        match self {
            RunResult::Ok { metrics } => Some(metrics),
            RunResult::Error { .. } => None,
        }
    }

    /// Message of a failed run.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            RunResult::Ok { .. } => None,
            RunResult::Error { message } => Some(message),
        }
    }
}

/// A run result with the coordinates it was observed at.
///
/// This is the unit of raw-run export: a list of records can be
/// re-aggregated and re-scored offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub size: DatasetSizePreset,
    pub format: Format,
    /// 1-based iteration number.
    pub iteration: usize,
    pub result: RunResult,
}

impl RunRecord {
    pub fn new(size: DatasetSizePreset, format: Format, iteration: usize, result: RunResult) -> Self {
        Self {
            size,
            format,
            iteration,
            result,
        }
    }
}
