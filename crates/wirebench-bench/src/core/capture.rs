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

//! Run metrics capture.
//!
//! Assembles a [`RunResult`] from the pieces observed around one run: the
//! server's metric headers, a resource-timing entry, client-side heap and
//! long-task observations, and the client's own wall-clock measurements.

use crate::core::measurement::{RunMetrics, RunResult};
use serde::{Deserialize, Serialize};

pub const HEADER_SERIALIZE_NANOS: &str = "X-Serialize-Nanos";
pub const HEADER_PAYLOAD_BYTES: &str = "X-Payload-Bytes";
pub const HEADER_FORMAT: &str = "X-Format";
pub const HEADER_HEAP_BEFORE: &str = "X-Heap-Used-Before";
pub const HEADER_HEAP_AFTER: &str = "X-Heap-Used-After";
pub const HEADER_HEAP_DELTA: &str = "X-Heap-Delta";
pub const HEADER_GC_COUNT: &str = "X-GC-Count";
pub const HEADER_GC_TIME_MS: &str = "X-GC-Time-Ms";
pub const HEADER_CPU_TIME_NANOS: &str = "X-CPU-Time-Nanos";
pub const HEADER_EVENT_COUNT: &str = "X-Event-Count";

/// Server-side metrics carried in response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMetrics {
    pub serialize_nanos: Option<i64>,
    pub payload_bytes: Option<i64>,
    pub format: Option<String>,
    pub heap_before: Option<i64>,
    pub heap_after: Option<i64>,
    pub heap_delta: Option<i64>,
    pub gc_count: Option<i64>,
    pub gc_time_ms: Option<i64>,
    /// Negative values mean the server cannot measure thread CPU time.
    pub cpu_time_nanos: Option<i64>,
    pub event_count: Option<i64>,
}

impl ServerMetrics {
    /// Parse the metric header protocol.
    ///
    /// Header names match case-insensitively. Absent or unparsable headers
    /// are left as `None`.
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut metrics = ServerMetrics::default();
        for (name, value) in headers {
            let value = value.trim();
            let slot = match name.trim().to_ascii_lowercase().as_str() {
                "x-serialize-nanos" => &mut metrics.serialize_nanos,
                "x-payload-bytes" => &mut metrics.payload_bytes,
                "x-heap-used-before" => &mut metrics.heap_before,
                "x-heap-used-after" => &mut metrics.heap_after,
                "x-heap-delta" => &mut metrics.heap_delta,
                "x-gc-count" => &mut metrics.gc_count,
                "x-gc-time-ms" => &mut metrics.gc_time_ms,
                "x-cpu-time-nanos" => &mut metrics.cpu_time_nanos,
                "x-event-count" => &mut metrics.event_count,
                "x-format" => {
                    if !value.is_empty() {
                        metrics.format = Some(value.to_string());
                    }
                    continue;
                }
                _ => continue,
            };
            *slot = value.parse().ok();
        }
        metrics
    }

    /// Render as response headers, skipping absent values.
    pub fn to_headers(&self) -> Vec<(String, String)> {
        let numeric = [
            (HEADER_SERIALIZE_NANOS, self.serialize_nanos),
            (HEADER_PAYLOAD_BYTES, self.payload_bytes),
            (HEADER_HEAP_BEFORE, self.heap_before),
            (HEADER_HEAP_AFTER, self.heap_after),
            (HEADER_HEAP_DELTA, self.heap_delta),
            (HEADER_GC_COUNT, self.gc_count),
            (HEADER_GC_TIME_MS, self.gc_time_ms),
            (HEADER_CPU_TIME_NANOS, self.cpu_time_nanos),
            (HEADER_EVENT_COUNT, self.event_count),
        ];

        let mut headers = Vec::with_capacity(numeric.len() + 1);
        if let Some(format) = &self.format {
            headers.push((HEADER_FORMAT.to_string(), format.clone()));
        }
        for (name, value) in numeric {
            if let Some(value) = value {
                headers.push((name.to_string(), value.to_string()));
            }
        }
        headers
    }

    /// Server encode duration in milliseconds.
    pub fn serialize_ms(&self) -> Option<f64> {
        self.serialize_nanos.map(|nanos| nanos as f64 / 1e6)
    }

    /// Thread CPU time in milliseconds; `None` when unsupported.
    pub fn cpu_time_ms(&self) -> Option<f64> {
        self.cpu_time_nanos
            .filter(|nanos| *nanos >= 0)
            .map(|nanos| nanos as f64 / 1e6)
    }
}

/// Raw resource-timing marks for one fetch, in milliseconds relative to the
/// start of the fetch. A zero mark means the phase was not observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTimingEntry {
    pub domain_lookup_start: f64,
    pub domain_lookup_end: f64,
    pub connect_start: f64,
    pub connect_end: f64,
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
    pub transfer_size: u64,
}

/// Network phase breakdown derived from a [`ResourceTimingEntry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTiming {
    pub dns_ms: Option<f64>,
    pub connect_ms: Option<f64>,
    pub ttfb_ms: Option<f64>,
    pub download_ms: Option<f64>,
    pub transfer_bytes: Option<f64>,
}

impl From<&ResourceTimingEntry> for NetworkTiming {
    fn from(entry: &ResourceTimingEntry) -> Self {
        let phase = |start: f64, end: f64| (end > 0.0).then(|| (end - start).max(0.0));
        let exposed = entry.response_start > 0.0;

        NetworkTiming {
            dns_ms: phase(entry.domain_lookup_start, entry.domain_lookup_end),
            connect_ms: phase(entry.connect_start, entry.connect_end),
            ttfb_ms: exposed.then(|| (entry.response_start - entry.request_start).max(0.0)),
            download_ms: (exposed && entry.response_end > 0.0)
                .then(|| (entry.response_end - entry.response_start).max(0.0)),
            transfer_bytes: (entry.transfer_size > 0).then_some(entry.transfer_size as f64),
        }
    }
}

/// One main-thread block of at least the long-task threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongTask {
    pub start_time_ms: f64,
    pub duration_ms: f64,
}

/// Builder that folds one run's observations into a [`RunResult`].
///
/// # Example
///
/// ```
/// use wirebench_bench::core::capture::RunCapture;
/// use wirebench_bench::core::Metric;
///
/// let result = RunCapture::new()
///     .end_to_end_ms(12.0)
///     .parse_ms(3.0)
///     .payload_bytes(4_000)
///     .decoded_records(100)
///     .finish();
/// let metrics = result.metrics().unwrap();
/// assert_eq!(metrics.get(Metric::BytesPerRecord), Some(40.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunCapture {
    end_to_end_ms: Option<f64>,
    parse_ms: Option<f64>,
    payload_bytes: Option<u64>,
    server: ServerMetrics,
    network: NetworkTiming,
    client_heap: (Option<u64>, Option<u64>),
    long_tasks: Option<Vec<LongTask>>,
    decoded_records: Option<usize>,
}

impl RunCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn end_to_end_ms(mut self, ms: f64) -> Self {
        self.end_to_end_ms = Some(ms);
        self
    }

    /// Client decode duration.
    pub fn parse_ms(mut self, ms: f64) -> Self {
        self.parse_ms = Some(ms);
        self
    }

    /// Payload size as observed by the receiver.
    pub fn payload_bytes(mut self, bytes: u64) -> Self {
        self.payload_bytes = Some(bytes);
        self
    }

    pub fn server(mut self, server: ServerMetrics) -> Self {
        self.server = server;
        self
    }

    pub fn network(mut self, network: NetworkTiming) -> Self {
        self.network = network;
        self
    }

    /// Client heap readings taken before the fetch and after decode.
    pub fn client_heap(mut self, before: Option<u64>, after: Option<u64>) -> Self {
        self.client_heap = (before, after);
        self
    }

    /// Long tasks observed during the run; `None` when unobservable.
    pub fn long_tasks(mut self, tasks: Option<Vec<LongTask>>) -> Self {
        self.long_tasks = tasks;
        self
    }

    pub fn decoded_records(mut self, count: usize) -> Self {
        self.decoded_records = Some(count);
        self
    }

    /// Produce the run result.
    ///
    /// A decoded record count that disagrees with the server's event count
    /// turns the run into an error.
    pub fn finish(self) -> RunResult {
        if let (Some(decoded), Some(expected)) = (self.decoded_records, self.server.event_count) {
            if decoded as i64 != expected {
                return RunResult::error(format!(
                    "decoded {} records, server reported {}",
                    decoded, expected
                ));
            }
        }

        let server = &self.server;
        let event_count = server
            .event_count
            .map(|count| count as f64)
            .or(self.decoded_records.map(|count| count as f64));
        let payload_bytes = self.payload_bytes.map(|bytes| bytes as f64);
        let bytes_per_record = match (payload_bytes, event_count) {
            (Some(bytes), Some(count)) if bytes > 0.0 && count > 0.0 => Some(bytes / count),
            _ => None,
        };

        let (heap_before, heap_after) = self.client_heap;
        let client_heap_delta = match (heap_before, heap_after) {
            (Some(before), Some(after)) => Some(after as f64 - before as f64),
            _ => None,
        };

        let (long_task_count, long_task_ms) = match &self.long_tasks {
            Some(tasks) => (
                Some(tasks.len() as f64),
                Some(tasks.iter().map(|task| task.duration_ms).sum()),
            ),
            None => (None, None),
        };

        let as_f64 = |value: Option<i64>| value.map(|v| v as f64);

        RunResult::ok(RunMetrics {
            end_to_end_ms: self.end_to_end_ms,
            server_serialize_ms: server.serialize_ms(),
            parse_ms: self.parse_ms,
            ttfb_ms: self.network.ttfb_ms,
            download_ms: self.network.download_ms,
            dns_ms: self.network.dns_ms,
            connect_ms: self.network.connect_ms,
            payload_bytes,
            server_payload_bytes: as_f64(server.payload_bytes),
            transfer_bytes: self.network.transfer_bytes,
            bytes_per_record,
            server_heap_before: as_f64(server.heap_before),
            server_heap_after: as_f64(server.heap_after),
            server_heap_delta: as_f64(server.heap_delta),
            server_gc_count: as_f64(server.gc_count),
            server_gc_time_ms: as_f64(server.gc_time_ms),
            server_cpu_time_ms: server.cpu_time_ms(),
            client_heap_before: heap_before.map(|v| v as f64),
            client_heap_after: heap_after.map(|v| v as f64),
            client_heap_delta,
            long_task_count,
            long_task_ms,
            event_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::measurement::Metric;

    #[test]
    fn test_headers_parse_case_insensitive() {
        let headers = [
            ("x-serialize-nanos", "2500000"),
            ("X-PAYLOAD-BYTES", "1024"),
            ("X-Format", "cbor"),
            ("X-Heap-Delta", "-2048"),
            ("X-Event-Count", "10"),
            ("Content-Type", "application/cbor"),
        ];
        let server = ServerMetrics::from_headers(headers);
        assert_eq!(server.serialize_nanos, Some(2_500_000));
        assert_eq!(server.serialize_ms(), Some(2.5));
        assert_eq!(server.payload_bytes, Some(1024));
        assert_eq!(server.format.as_deref(), Some("cbor"));
        assert_eq!(server.heap_delta, Some(-2048));
        assert_eq!(server.event_count, Some(10));
        assert_eq!(server.gc_count, None);
    }

    #[test]
    fn test_unparsable_header_is_none() {
        let server = ServerMetrics::from_headers([("X-GC-Count", "n/a"), ("X-GC-Time-Ms", "")]);
        assert_eq!(server.gc_count, None);
        assert_eq!(server.gc_time_ms, None);
    }

    #[test]
    fn test_negative_cpu_time_is_unsupported() {
        let server = ServerMetrics::from_headers([("X-CPU-Time-Nanos", "-1")]);
        assert_eq!(server.cpu_time_nanos, Some(-1));
        assert_eq!(server.cpu_time_ms(), None);

        let server = ServerMetrics::from_headers([("X-CPU-Time-Nanos", "3000000")]);
        assert_eq!(server.cpu_time_ms(), Some(3.0));
    }

    #[test]
    fn test_headers_round_trip() {
        let server = ServerMetrics {
            serialize_nanos: Some(1),
            payload_bytes: Some(2),
            format: Some("arrow".into()),
            heap_before: Some(3),
            heap_after: Some(4),
            heap_delta: Some(1),
            gc_count: Some(0),
            gc_time_ms: Some(0),
            cpu_time_nanos: Some(5),
            event_count: Some(6),
        };
        let headers = server.to_headers();
        let parsed =
            ServerMetrics::from_headers(headers.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        assert_eq!(parsed, server);
    }

    #[test]
    fn test_network_timing_phases() {
        let entry = ResourceTimingEntry {
            domain_lookup_start: 1.0,
            domain_lookup_end: 3.0,
            connect_start: 3.0,
            connect_end: 7.0,
            request_start: 8.0,
            response_start: 20.0,
            response_end: 50.0,
            transfer_size: 4096,
        };
        let timing = NetworkTiming::from(&entry);
        assert_eq!(timing.dns_ms, Some(2.0));
        assert_eq!(timing.connect_ms, Some(4.0));
        assert_eq!(timing.ttfb_ms, Some(12.0));
        assert_eq!(timing.download_ms, Some(30.0));
        assert_eq!(timing.transfer_bytes, Some(4096.0));
    }

    #[test]
    fn test_zero_response_start_hides_ttfb() {
        let entry = ResourceTimingEntry {
            request_start: 5.0,
            response_end: 40.0,
            ..Default::default()
        };
        let timing = NetworkTiming::from(&entry);
        assert_eq!(timing.ttfb_ms, None);
        assert_eq!(timing.download_ms, None);
        assert_eq!(timing.dns_ms, None);
        assert_eq!(timing.transfer_bytes, None);
    }

    #[test]
    fn test_bytes_per_record_null_when_zero() {
        let result = RunCapture::new().payload_bytes(0).decoded_records(10).finish();
        assert_eq!(result.metrics().unwrap().bytes_per_record, None);

        let result = RunCapture::new().payload_bytes(100).finish();
        assert_eq!(result.metrics().unwrap().bytes_per_record, None);
    }

    #[test]
    fn test_event_count_prefers_server_header() {
        let server = ServerMetrics {
            event_count: Some(20),
            ..Default::default()
        };
        let result = RunCapture::new()
            .server(server)
            .payload_bytes(200)
            .decoded_records(20)
            .finish();
        let metrics = result.metrics().unwrap();
        assert_eq!(metrics.get(Metric::EventCount), Some(20.0));
        assert_eq!(metrics.get(Metric::BytesPerRecord), Some(10.0));
    }

    #[test]
    fn test_record_count_mismatch_is_error() {
        let server = ServerMetrics {
            event_count: Some(20),
            ..Default::default()
        };
        let result = RunCapture::new().server(server).decoded_records(19).finish();
        assert!(!result.is_ok());
        assert!(result.error_message().unwrap().contains("19"));
    }

    #[test]
    fn test_client_side_metrics() {
        let tasks = vec![
            LongTask {
                start_time_ms: 0.0,
                duration_ms: 60.0,
            },
            LongTask {
                start_time_ms: 100.0,
                duration_ms: 75.0,
            },
        ];
        let result = RunCapture::new()
            .client_heap(Some(1_000), Some(1_500))
            .long_tasks(Some(tasks))
            .finish();
        let metrics = result.metrics().unwrap();
        assert_eq!(metrics.client_heap_delta, Some(500.0));
        assert_eq!(metrics.long_task_count, Some(2.0));
        assert_eq!(metrics.long_task_ms, Some(135.0));

        let result = RunCapture::new().long_tasks(None).finish();
        assert_eq!(result.metrics().unwrap().long_task_count, None);
    }
}
