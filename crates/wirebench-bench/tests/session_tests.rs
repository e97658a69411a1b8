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

//! End-to-end session tests against a scripted serving side.

use proptest::prelude::*;
use std::thread;
use std::time::Duration;
use wirebench_bench::core::capture::{ResourceTimingEntry, ServerMetrics};
use wirebench_bench::core::{BenchConfig, Metric, NullClientTiming, RunMetrics, RunRecord, RunResult};
use wirebench_bench::harness::{aggregate, compute_stats, SessionRunner, Transport, TransportResponse};
use wirebench_bench::scoring::{normalize, score};
use wirebench_bench::{detect_anomalies, AnomalyKind, AnomalyThresholds, Category, TransportError};
use wirebench_codecs::CodecRegistry;
use wirebench_core::{DatasetSizePreset, EventGenerator, Format};

const SIZE: DatasetSizePreset = DatasetSizePreset::Records(20);

/// Serving side with a fixed per-format delay and optional failing format.
struct ScriptedTransport<'r> {
    registry: &'r CodecRegistry,
    delays: Vec<(Format, Duration)>,
    failing: Option<Format>,
    gc_requests: usize,
}

impl<'r> ScriptedTransport<'r> {
    fn new(registry: &'r CodecRegistry, delays: Vec<(Format, Duration)>) -> Self {
        Self {
            registry,
            delays,
            failing: None,
            gc_requests: 0,
        }
    }

    fn delay(&self, format: Format) -> Duration {
        self.delays
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, d)| *d)
            .unwrap_or_default()
    }
}

impl Transport for ScriptedTransport<'_> {
    fn fetch(
        &mut self,
        format: Format,
        size: DatasetSizePreset,
    ) -> Result<TransportResponse, TransportError> {
        if self.failing == Some(format) {
            return Err(TransportError::Status {
                status: 500,
                body: "encoder crashed".to_string(),
            });
        }

        let delay = self.delay(format);
        thread::sleep(delay);

        let events = EventGenerator::default().generate(size.record_count());
        let body = self
            .registry
            .get(format)
            .map_err(|e| TransportError::Request(e.to_string()))?
            .encode(&events)
            .map_err(|e| TransportError::Body(e.to_string()))?;

        let delay_ms = delay.as_secs_f64() * 1e3;
        let server = ServerMetrics {
            serialize_nanos: Some(delay.as_nanos() as i64),
            payload_bytes: Some(body.len() as i64),
            format: Some(format.id().to_string()),
            event_count: Some(events.len() as i64),
            ..Default::default()
        };
        let timing = ResourceTimingEntry {
            request_start: 1.0,
            response_start: 1.0 + delay_ms,
            response_end: 1.0 + delay_ms * 1.2,
            transfer_size: body.len() as u64,
            ..Default::default()
        };

        Ok(TransportResponse {
            body,
            headers: server.to_headers(),
            timing: Some(timing),
        })
    }

    fn request_gc(&mut self) -> Result<(), TransportError> {
        self.gc_requests += 1;
        Err(TransportError::Request("gc endpoint unavailable".to_string()))
    }
}

fn three_format_config() -> BenchConfig {
    BenchConfig::default()
        .with_sizes(&[SIZE])
        .with_formats(&[Format::JsonStream, Format::MessagePack, Format::Cbor])
        .with_iterations(3)
}

fn scripted(registry: &CodecRegistry) -> ScriptedTransport<'_> {
    ScriptedTransport::new(
        registry,
        vec![
            (Format::JsonStream, Duration::from_millis(15)),
            (Format::MessagePack, Duration::from_millis(30)),
            (Format::Cbor, Duration::from_millis(30)),
        ],
    )
}

#[test]
fn test_faster_format_wins_speed() {
    let config = three_format_config();
    let registry = CodecRegistry::standard();
    let mut transport = scripted(&registry);

    let outcome = SessionRunner::new(&config, &registry)
        .with_client_timing(Box::new(NullClientTiming))
        .run(&mut transport)
        .unwrap();

    assert_eq!(outcome.records.len(), 9);
    assert_eq!(outcome.error_count(), 0);
    // Failing GC requests between iterations are ignored.
    assert_eq!(transport.gc_requests, 2);

    let speed_winner = outcome.scoring.winner(Category::Speed);
    assert_eq!(speed_winner, Some(Format::JsonStream));

    let fast = outcome.scoring.average(Format::JsonStream).unwrap();
    let slow = outcome.scoring.average(Format::Cbor).unwrap();
    assert!(fast.speed.unwrap() > slow.speed.unwrap());

    for row in &outcome.rows {
        assert_eq!(row.ok_runs, 3);
        assert_eq!(row.stat(Metric::EndToEndMs).count, 3);
        assert_eq!(row.mean(Metric::EventCount), Some(20.0));
    }
}

#[test]
fn test_failing_format_is_isolated() {
    let config = three_format_config();
    let registry = CodecRegistry::standard();
    let mut transport = scripted(&registry);
    transport.failing = Some(Format::MessagePack);

    let outcome = SessionRunner::new(&config, &registry)
        .with_client_timing(Box::new(NullClientTiming))
        .run(&mut transport)
        .unwrap();

    let failed = outcome
        .rows
        .iter()
        .find(|row| row.format == Format::MessagePack)
        .unwrap();
    assert_eq!(failed.errors, 3);
    assert_eq!(failed.ok_runs, 0);
    assert_eq!(failed.error_messages, vec!["HTTP 500: encoder crashed".to_string()]);
    assert!(failed.metrics.values().all(|stats| stats.count == 0 && stats.mean.is_none()));

    // Excluded from normalization, not scored zero.
    let scores = &outcome.scoring.sizes[0].scores;
    let failed_score = scores.iter().find(|s| s.format == Format::MessagePack).unwrap();
    assert_eq!(failed_score.speed, None);
    assert_eq!(failed_score.overall, None);
    let cbor = scores.iter().find(|s| s.format == Format::Cbor).unwrap();
    assert!(cbor.speed.is_some());

    let last = outcome.scoring.ranking.last().unwrap();
    assert_eq!(last.format, Format::MessagePack);
    assert_eq!(last.errors, 3);
}

#[test]
fn test_percentiles_use_nearest_rank() {
    let stats = compute_stats(&[10.0, 20.0, 30.0, 40.0, 50.0]);
    assert_eq!(stats.p95, Some(40.0));
    assert_eq!(stats.median, Some(30.0));
    assert_eq!(stats.count, 5);
}

#[test]
fn test_normalization_tie_scores_one() {
    let scores = normalize(
        &[(Format::JsonDom, Some(3.0)), (Format::Arrow, Some(3.0))],
        false,
    );
    assert_eq!(scores[&Format::JsonDom], 1.0);
    assert_eq!(scores[&Format::Arrow], 1.0);
}

fn speed_run(format: Format, e2e: f64, parse: f64, serialize: f64) -> RunRecord {
    RunRecord::new(
        SIZE,
        format,
        1,
        RunResult::ok(
            RunMetrics::default()
                .with(Metric::EndToEndMs, e2e)
                .with(Metric::ParseMs, parse)
                .with(Metric::ServerSerializeMs, serialize),
        ),
    )
}

#[test]
fn test_speed_weights_renormalize_without_network_timing() {
    // ttfb and download are null for every format.
    let records = vec![
        speed_run(Format::JsonDom, 10.0, 6.0, 1.0),
        speed_run(Format::Cbor, 20.0, 2.0, 2.0),
        speed_run(Format::Arrow, 30.0, 4.0, 3.0),
    ];
    let report = score(&aggregate(&records));
    let scores = &report.sizes[0].scores;

    // Remaining weights 0.50, 0.20, 0.05 rescaled to sum to 1.
    let expect = |e2e: f64, parse: f64, ser: f64| (0.50 * e2e + 0.20 * parse + 0.05 * ser) / 0.75;
    let expected = [
        (Format::JsonDom, expect(1.0, 0.0, 1.0)),
        (Format::Cbor, expect(0.5, 1.0, 0.5)),
        (Format::Arrow, expect(0.0, 0.5, 0.0)),
    ];
    for (format, value) in expected {
        let score = scores.iter().find(|s| s.format == format).unwrap();
        assert!(
            (score.speed.unwrap() - value).abs() < 1e-9,
            "{} speed {:?} != {}",
            format,
            score.speed,
            value
        );
    }
}

#[test]
fn test_anomaly_rules() {
    let records: Vec<RunRecord> = (1..=3)
        .map(|iteration| {
            RunRecord::new(
                SIZE,
                Format::Cbor,
                iteration,
                RunResult::ok(
                    RunMetrics::default()
                        .with(Metric::EndToEndMs, 8.0)
                        .with(Metric::TtfbMs, 1.0),
                ),
            )
        })
        .collect();
    let rows = aggregate(&records);

    let anomalies = detect_anomalies(&rows, 1, &AnomalyThresholds::default());
    let kinds: Vec<_> = anomalies.iter().map(|a| a.kind).collect();
    assert!(kinds.contains(&AnomalyKind::LowSampleSize));
    assert!(kinds.contains(&AnomalyKind::ZeroVariance));
    assert!(!kinds.contains(&AnomalyKind::MissingTtfb));
}

proptest! {
    #[test]
    fn prop_stats_are_ordered(values in prop::collection::vec(-1e6f64..1e6, 1..64)) {
        let stats = compute_stats(&values);
        let min = stats.min.unwrap();
        let max = stats.max.unwrap();
        prop_assert_eq!(stats.count, values.len());
        prop_assert!(min <= stats.median.unwrap() && stats.median.unwrap() <= max);
        prop_assert!(stats.median.unwrap() <= stats.p99.unwrap() || values.len() % 2 == 0);
        prop_assert!(stats.p95.unwrap() <= stats.p99.unwrap());
        prop_assert!(stats.p99.unwrap() <= max);
        prop_assert!(stats.variance.unwrap() >= 0.0);
    }

    #[test]
    fn prop_normalized_scores_in_unit_range(values in prop::collection::vec(prop::option::of(0f64..1e4), 7)) {
        let input: Vec<(Format, Option<f64>)> = Format::ALL.iter().copied().zip(values.iter().copied()).collect();
        let scores = normalize(&input, false);
        prop_assert_eq!(scores.len(), values.iter().filter(|v| v.is_some()).count());
        for score in scores.values() {
            prop_assert!((0.0..=1.0).contains(score));
        }
    }
}
