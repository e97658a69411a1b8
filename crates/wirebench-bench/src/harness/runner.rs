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

//! Session runner.
//!
//! Drives a strictly sequential session: for each size, iterations `1..=N`,
//! and within an iteration each configured format in order. Every run is
//! folded into a [`RunResult`]; per-run failures never abort the session.

use crate::analysis::anomaly::{detect_anomalies, Anomaly, AnomalyThresholds};
use crate::core::capture::{NetworkTiming, RunCapture};
use crate::core::config::BenchConfig;
use crate::core::measurement::{RunRecord, RunResult};
use crate::core::sampler::{ClientTimingSource, NativeClientTiming, TaskWindow};
use crate::error::{BenchError, Result};
use crate::harness::aggregator::{aggregate, AggregateRow};
use crate::harness::transport::Transport;
use crate::scoring::engine::{score, ScoringReport};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use wirebench_codecs::CodecRegistry;
use wirebench_core::{guard_decode, DatasetSizePreset, Format};

/// Everything a finished session produced.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// Raw runs in execution order.
    pub records: Vec<RunRecord>,
    /// One row per `(size, format)`.
    pub rows: Vec<AggregateRow>,
    pub scoring: ScoringReport,
    pub anomalies: Vec<Anomaly>,
    /// Wall-clock duration of the session.
    pub elapsed: Duration,
}

impl SessionOutcome {
    /// Aggregates, scores and checks a list of runs.
    ///
    /// Used both at the end of a live session and to re-score exported runs.
    pub fn from_records(
        records: Vec<RunRecord>,
        iterations: usize,
        thresholds: &AnomalyThresholds,
        elapsed: Duration,
    ) -> Self {
        let rows = aggregate(&records);
        let scoring = score(&rows);
        let anomalies = detect_anomalies(&rows, iterations, thresholds);
        Self {
            records,
            rows,
            scoring,
            anomalies,
            elapsed,
        }
    }

    pub fn error_count(&self) -> usize {
        self.rows.iter().map(|row| row.errors).sum()
    }
}

/// Highest iteration number among `records`.
pub fn iterations_of(records: &[RunRecord]) -> usize {
    records.iter().map(|r| r.iteration).max().unwrap_or(0)
}

/// Runs sessions against a [`Transport`].
pub struct SessionRunner<'a> {
    config: &'a BenchConfig,
    registry: &'a CodecRegistry,
    client: Box<dyn ClientTimingSource>,
}

impl<'a> SessionRunner<'a> {
    /// Creates a runner decoding with `registry`.
    pub fn new(config: &'a BenchConfig, registry: &'a CodecRegistry) -> Self {
        Self {
            config,
            registry,
            client: Box::new(NativeClientTiming::default()),
        }
    }

    /// Replaces the decoding-side timing source.
    pub fn with_client_timing(mut self, client: Box<dyn ClientTimingSource>) -> Self {
        self.client = client;
        self
    }

    /// Runs a full session.
    ///
    /// # Errors
    ///
    /// Fails before the first run on an invalid configuration, and with
    /// [`BenchError::SessionTimeout`] once the session exceeds its budget.
    pub fn run(&self, transport: &mut dyn Transport) -> Result<SessionOutcome> {
        let config = self.config;
        config.validate()?;

        info!(
            sizes = config.sizes.len(),
            formats = config.formats.len(),
            iterations = config.iterations,
            runs = config.run_count(),
            "starting session"
        );

        let started = Instant::now();
        let mut records = Vec::with_capacity(config.run_count());

        for &size in &config.sizes {
            for iteration in 1..=config.iterations {
                for &format in &config.formats {
                    self.check_timeout(started, records.len())?;

                    let result = self.run_once(transport, format, size);
                    match &result {
                        RunResult::Ok { metrics } => debug!(
                            %format,
                            %size,
                            iteration,
                            end_to_end_ms = ?metrics.end_to_end_ms,
                            payload_bytes = ?metrics.payload_bytes,
                            "run complete"
                        ),
                        RunResult::Error { message } => {
                            warn!(%format, %size, iteration, error = %message, "run failed")
                        }
                    }
                    records.push(RunRecord::new(size, format, iteration, result));
                }

                if config.gc_between_iterations && iteration < config.iterations {
                    if let Err(e) = transport.request_gc() {
                        warn!(error = %e, "gc request failed, continuing");
                    }
                }
            }
        }

        let elapsed = started.elapsed();
        let outcome =
            SessionOutcome::from_records(records, config.iterations, &config.thresholds, elapsed);

        info!(
            runs = outcome.records.len(),
            errors = outcome.error_count(),
            anomalies = outcome.anomalies.len(),
            winner = ?outcome.scoring.overall_winner,
            elapsed_ms = elapsed.as_millis() as u64,
            "session complete"
        );
        Ok(outcome)
    }

    fn check_timeout(&self, started: Instant, completed: usize) -> Result<()> {
        let Some(limit) = self.config.session_timeout else {
            return Ok(());
        };
        let elapsed = started.elapsed();
        if elapsed >= limit {
            return Err(BenchError::SessionTimeout {
                elapsed,
                limit,
                completed,
            });
        }
        Ok(())
    }

    /// One fetch, decode and capture.
    fn run_once(
        &self,
        transport: &mut dyn Transport,
        format: Format,
        size: DatasetSizePreset,
    ) -> RunResult {
        let codec = match self.registry.get(format) {
            Ok(codec) => codec,
            Err(e) => return RunResult::error(e.to_string()),
        };

        let heap_before = self.client.heap_used();
        let started = Instant::now();

        let response = match transport.fetch(format, size) {
            Ok(response) => response,
            Err(e) => return RunResult::error(e.to_string()),
        };

        let parse_start = Instant::now();
        let decoded = guard_decode(format, || codec.decode(&response.body));
        let parse = parse_start.elapsed();
        let end_to_end = started.elapsed();

        let records = match decoded {
            Ok(records) => records,
            Err(e) => return RunResult::error(e.to_string()),
        };

        let mut window = TaskWindow::new(started);
        window.block(parse_start, parse);
        let heap_after = self.client.heap_used();

        RunCapture::new()
            .end_to_end_ms(end_to_end.as_secs_f64() * 1e3)
            .parse_ms(parse.as_secs_f64() * 1e3)
            .payload_bytes(response.body.len() as u64)
            .server(response.server_metrics())
            .network(response.timing.as_ref().map(NetworkTiming::from).unwrap_or_default())
            .client_heap(heap_before, heap_after)
            .long_tasks(self.client.long_tasks(&window))
            .decoded_records(records.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::measurement::Metric;
    use crate::core::sampler::{NullClientTiming, NullSampler};
    use crate::harness::transport::LoopbackTransport;
    use wirebench_core::{CalendarEvent, Codec, CodecError, EventGenerator};

    fn config() -> BenchConfig {
        BenchConfig::default()
            .with_sizes(&[DatasetSizePreset::Records(50)])
            .with_formats(&[Format::JsonStream, Format::Cbor])
            .with_iterations(2)
    }

    #[test]
    fn test_loopback_session() {
        let config = config();
        let registry = CodecRegistry::standard();
        let mut transport =
            LoopbackTransport::new(&registry, EventGenerator::new(config.seed), Box::new(NullSampler));
        let outcome = SessionRunner::new(&config, &registry)
            .with_client_timing(Box::new(NullClientTiming))
            .run(&mut transport)
            .unwrap();

        assert_eq!(outcome.records.len(), 4);
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.error_count(), 0);
        // Execution order: iteration, then format.
        assert_eq!(outcome.records[0].format, Format::JsonStream);
        assert_eq!(outcome.records[1].format, Format::Cbor);
        assert_eq!(outcome.records[2].iteration, 2);

        for row in &outcome.rows {
            assert_eq!(row.ok_runs, 2);
            assert_eq!(row.mean(Metric::EventCount), Some(50.0));
            assert!(row.mean(Metric::EndToEndMs).is_some());
            assert!(row.mean(Metric::TtfbMs).is_some());
            assert_eq!(row.mean(Metric::ClientHeapDelta), None);
        }
        assert!(outcome.scoring.overall_winner.is_some());
    }

    #[test]
    fn test_unregistered_decoder_is_a_run_error() {
        let config = config();
        let full = CodecRegistry::standard();
        let decoders = CodecRegistry::new();
        let mut transport =
            LoopbackTransport::new(&full, EventGenerator::default(), Box::new(NullSampler));
        let outcome = SessionRunner::new(&config, &decoders)
            .with_client_timing(Box::new(NullClientTiming))
            .run(&mut transport)
            .unwrap();
        assert_eq!(outcome.error_count(), 4);
        assert!(outcome.scoring.overall_winner.is_none());
    }

    struct PanickingCodec;

    impl Codec for PanickingCodec {
        fn format(&self) -> Format {
            Format::JsonStream
        }

        fn encode(&self, _: &[CalendarEvent]) -> std::result::Result<Vec<u8>, CodecError> {
            Ok(Vec::new())
        }

        fn decode(&self, _: &[u8]) -> std::result::Result<Vec<CalendarEvent>, CodecError> {
            panic!("vector index out of bounds")
        }
    }

    #[test]
    fn test_decoder_panic_is_a_run_error() {
        let config = config();
        let full = CodecRegistry::standard();
        let decoders = CodecRegistry::new()
            .with(PanickingCodec)
            .with(wirebench_codecs::CborCodec);
        let mut transport =
            LoopbackTransport::new(&full, EventGenerator::default(), Box::new(NullSampler));
        let outcome = SessionRunner::new(&config, &decoders)
            .with_client_timing(Box::new(NullClientTiming))
            .run(&mut transport)
            .unwrap();

        assert_eq!(outcome.records.len(), 4);
        let json = outcome
            .rows
            .iter()
            .find(|row| row.format == Format::JsonStream)
            .unwrap();
        assert_eq!(json.errors, 2);
        assert!(json.error_messages[0].contains("decoder panicked"));
        let cbor = outcome.rows.iter().find(|row| row.format == Format::Cbor).unwrap();
        assert_eq!(cbor.ok_runs, 2);
        assert_eq!(outcome.scoring.overall_winner, Some(Format::Cbor));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = config().with_iterations(0);
        let registry = CodecRegistry::standard();
        let mut transport =
            LoopbackTransport::new(&registry, EventGenerator::default(), Box::new(NullSampler));
        let err = SessionRunner::new(&config, &registry)
            .run(&mut transport)
            .unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig { .. }));
    }

    #[test]
    fn test_session_timeout() {
        let config = config().with_session_timeout(Duration::from_nanos(1));
        let registry = CodecRegistry::standard();
        let mut transport =
            LoopbackTransport::new(&registry, EventGenerator::default(), Box::new(NullSampler));
        let err = SessionRunner::new(&config, &registry)
            .run(&mut transport)
            .unwrap_err();
        assert!(matches!(err, BenchError::SessionTimeout { .. }));
    }

    #[test]
    fn test_iterations_of() {
        assert_eq!(iterations_of(&[]), 0);
    }
}
