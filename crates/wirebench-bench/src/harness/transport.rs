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

//! Transports that deliver encoded payloads to the session.
//!
//! A transport plays the serving side of a run: given a `(format, size)` it
//! returns the encoded body, the metric headers and, when it can observe
//! them, resource-timing marks. [`LoopbackTransport`] encodes in process;
//! [`HttpTransport`] fetches from a server speaking the same header protocol.

use crate::core::capture::{ResourceTimingEntry, ServerMetrics};
use crate::core::sampler::{ResourceSampler, ResourceSnapshot};
use crate::error::TransportError;
use std::io::Read;
use std::time::{Duration, Instant};
use tracing::debug;
use wirebench_codecs::CodecRegistry;
use wirebench_core::{CalendarEvent, DatasetSizePreset, EventGenerator, Format};

/// Response to one benchmark request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportResponse {
    /// Encoded payload.
    pub body: Vec<u8>,
    /// Response headers, including the metric headers.
    pub headers: Vec<(String, String)>,
    /// Resource-timing marks, if observable.
    pub timing: Option<ResourceTimingEntry>,
}

impl TransportResponse {
    /// Server metrics parsed from the headers.
    pub fn server_metrics(&self) -> ServerMetrics {
        ServerMetrics::from_headers(
            self.headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        )
    }
}

/// Serving side of a session.
pub trait Transport {
    /// Fetch the encoded payload for `(format, size)`.
    fn fetch(
        &mut self,
        format: Format,
        size: DatasetSizePreset,
    ) -> Result<TransportResponse, TransportError>;

    /// Ask the serving side to collect garbage. Advisory only.
    fn request_gc(&mut self) -> Result<(), TransportError>;
}

fn elapsed_ms(origin: Instant, at: Instant) -> f64 {
    at.saturating_duration_since(origin).as_secs_f64() * 1e3
}

/// In-process serving side.
///
/// Encodes with the shared registry and reports the same metric headers a
/// remote server would. Time to first byte covers the encode, download covers
/// copying the payload out. DNS and connect phases are never observed.
pub struct LoopbackTransport<'r> {
    registry: &'r CodecRegistry,
    generator: EventGenerator,
    sampler: Box<dyn ResourceSampler>,
    cached: Option<(DatasetSizePreset, Vec<CalendarEvent>)>,
}

impl<'r> LoopbackTransport<'r> {
    pub fn new(
        registry: &'r CodecRegistry,
        generator: EventGenerator,
        sampler: Box<dyn ResourceSampler>,
    ) -> Self {
        Self {
            registry,
            generator,
            sampler,
            cached: None,
        }
    }

    fn ensure_events(&mut self, size: DatasetSizePreset) -> Result<(), TransportError> {
        let stale = self.cached.as_ref().map_or(true, |(cached, _)| *cached != size);
        if stale {
            let events = self
                .generator
                .generate_for(size)
                .map_err(|e| TransportError::Status {
                    status: 400,
                    body: e.to_string(),
                })?;
            self.cached = Some((size, events));
        }
        Ok(())
    }
}

fn server_metrics(
    format: Format,
    before: ResourceSnapshot,
    after: ResourceSnapshot,
    serialize: Duration,
    payload_bytes: usize,
    event_count: usize,
) -> ServerMetrics {
    let as_i64 = |value: u64| i64::try_from(value).unwrap_or(i64::MAX);
    let diff = |b: Option<u64>, a: Option<u64>| match (b, a) {
        (Some(b), Some(a)) => Some(as_i64(a) - as_i64(b)),
        _ => None,
    };

    ServerMetrics {
        serialize_nanos: Some(i64::try_from(serialize.as_nanos()).unwrap_or(i64::MAX)),
        payload_bytes: Some(payload_bytes as i64),
        format: Some(format.id().to_string()),
        heap_before: before.heap_used.map(as_i64),
        heap_after: after.heap_used.map(as_i64),
        heap_delta: diff(before.heap_used, after.heap_used),
        gc_count: diff(before.gc_count, after.gc_count),
        gc_time_ms: diff(before.gc_time_ms, after.gc_time_ms),
        // -1 signals "unsupported" on the wire.
        cpu_time_nanos: Some(diff(before.cpu_time_nanos, after.cpu_time_nanos).unwrap_or(-1)),
        event_count: Some(event_count as i64),
    }
}

impl Transport for LoopbackTransport<'_> {
    fn fetch(
        &mut self,
        format: Format,
        size: DatasetSizePreset,
    ) -> Result<TransportResponse, TransportError> {
        let registry = self.registry;
        let codec = registry.get(format).map_err(|_| TransportError::Status {
            status: 501,
            body: "Format not implemented".to_string(),
        })?;

        let origin = Instant::now();
        self.ensure_events(size)?;
        let events = self
            .cached
            .as_ref()
            .map(|(_, events)| events.as_slice())
            .unwrap_or(&[]);
        let event_count = events.len();

        let request_start = Instant::now();
        let before = self.sampler.snapshot();
        let encoded = codec.encode(events);
        let serialize = request_start.elapsed();
        let after = self.sampler.snapshot();
        let payload = encoded.map_err(|e| TransportError::Status {
            status: 500,
            body: e.to_string(),
        })?;

        let response_start = Instant::now();
        let body = payload.as_slice().to_vec();
        let response_end = Instant::now();

        let server = server_metrics(format, before, after, serialize, body.len(), event_count);
        let mut headers = vec![(
            "Content-Type".to_string(),
            codec.content_type().to_string(),
        )];
        headers.extend(server.to_headers());

        let timing = ResourceTimingEntry {
            request_start: elapsed_ms(origin, request_start),
            response_start: elapsed_ms(origin, response_start),
            response_end: elapsed_ms(origin, response_end),
            transfer_size: body.len() as u64,
            ..Default::default()
        };

        Ok(TransportResponse {
            body,
            headers,
            timing: Some(timing),
        })
    }

    fn request_gc(&mut self) -> Result<(), TransportError> {
        debug!("loopback gc request, nothing to collect");
        Ok(())
    }
}

/// Client of a remote serving side.
///
/// `GET {base}/benchmark?format=<id>&size=<id>` fetches a payload and
/// `POST {base}/gc` requests a collection.
pub struct HttpTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_error(err: ureq::Error) -> TransportError {
        match err {
            ureq::Error::Status(status, response) => TransportError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => TransportError::Request(transport.to_string()),
        }
    }
}

impl Transport for HttpTransport {
    fn fetch(
        &mut self,
        format: Format,
        size: DatasetSizePreset,
    ) -> Result<TransportResponse, TransportError> {
        let url = format!("{}/benchmark", self.base_url);
        let size_id = size.id();

        let origin = Instant::now();
        let response = self
            .agent
            .get(&url)
            .query("format", format.id())
            .query("size", &size_id)
            .call()
            .map_err(Self::map_error)?;
        let response_start = Instant::now();

        let headers: Vec<(String, String)> = response
            .headers_names()
            .into_iter()
            .filter_map(|name| {
                let value = response.header(&name)?.to_string();
                Some((name, value))
            })
            .collect();

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| TransportError::Body(e.to_string()))?;
        let response_end = Instant::now();

        // Connection setup is folded into time to first byte.
        let timing = ResourceTimingEntry {
            response_start: elapsed_ms(origin, response_start),
            response_end: elapsed_ms(origin, response_end),
            transfer_size: body.len() as u64,
            ..Default::default()
        };

        Ok(TransportResponse {
            body,
            headers,
            timing: Some(timing),
        })
    }

    fn request_gc(&mut self) -> Result<(), TransportError> {
        let url = format!("{}/gc", self.base_url);
        self.agent.post(&url).call().map_err(Self::map_error)?;
        Ok(())
    }
}
