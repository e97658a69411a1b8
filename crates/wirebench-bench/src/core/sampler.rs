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

//! Resource and client-timing samplers.
//!
//! Heap, GC and CPU readings are platform specific, so the session takes
//! them through [`ResourceSampler`] and [`ClientTimingSource`]. Readings a
//! platform cannot provide come back as `None` and end up as null metrics.

use crate::core::capture::LongTask;
use std::time::{Duration, Instant};

/// Tasks blocking at least this long count as long tasks.
pub const LONG_TASK_THRESHOLD: Duration = Duration::from_millis(50);

/// Point-in-time resource readings of the encoding side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceSnapshot {
    pub heap_used: Option<u64>,
    pub gc_count: Option<u64>,
    pub gc_time_ms: Option<u64>,
    pub cpu_time_nanos: Option<u64>,
}

/// Source of resource snapshots.
pub trait ResourceSampler: Send {
    fn snapshot(&self) -> ResourceSnapshot;
}

/// Samples the current process through procfs.
///
/// Heap is the resident set size. A native runtime has no collector, so GC
/// readings are always zero. Off Linux every reading is `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSampler;

impl ResourceSampler for ProcessSampler {
    fn snapshot(&self) -> ResourceSnapshot {
        let heap_used = resident_bytes();
        let cpu_time_nanos = thread_cpu_nanos();
        let has_procfs = heap_used.is_some();

        ResourceSnapshot {
            heap_used,
            gc_count: has_procfs.then_some(0),
            gc_time_ms: has_procfs.then_some(0),
            cpu_time_nanos,
        }
    }
}

/// Sampler for platforms without any introspection.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSampler;

impl ResourceSampler for NullSampler {
    fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot::default()
    }
}

#[cfg(target_os = "linux")]
fn resident_bytes() -> Option<u64> {
    let contents = std::fs::read_to_string("/proc/self/statm").ok()?;
    let pages: u64 = contents.split_whitespace().nth(1)?.parse().ok()?;
    // 4 KiB pages
    Some(pages * 4096)
}

#[cfg(not(target_os = "linux"))]
fn resident_bytes() -> Option<u64> {
    None
}

#[cfg(target_os = "linux")]
fn thread_cpu_nanos() -> Option<u64> {
    let contents = std::fs::read_to_string("/proc/thread-self/schedstat").ok()?;
    contents.split_whitespace().next()?.parse().ok()
}

#[cfg(not(target_os = "linux"))]
fn thread_cpu_nanos() -> Option<u64> {
    None
}

/// A span during which the decoding thread was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingSpan {
    pub start: Instant,
    pub duration: Duration,
}

/// Observation window of one run on the decoding side.
#[derive(Debug, Clone)]
pub struct TaskWindow {
    pub started: Instant,
    pub blocking_spans: Vec<BlockingSpan>,
}

impl TaskWindow {
    pub fn new(started: Instant) -> Self {
        Self {
            started,
            blocking_spans: Vec::new(),
        }
    }

    /// Record a blocking span.
    pub fn block(&mut self, start: Instant, duration: Duration) {
        self.blocking_spans.push(BlockingSpan { start, duration });
    }
}

/// Decoding-side heap and long-task observations.
pub trait ClientTimingSource: Send {
    fn heap_used(&self) -> Option<u64>;

    /// Long tasks seen during `window`; `None` if not observable.
    fn long_tasks(&self, window: &TaskWindow) -> Option<Vec<LongTask>>;
}

/// Native timing: heap from a [`ResourceSampler`], long tasks from the
/// blocking spans recorded in the window.
pub struct NativeClientTiming {
    sampler: Box<dyn ResourceSampler>,
}

impl NativeClientTiming {
    pub fn new(sampler: Box<dyn ResourceSampler>) -> Self {
        Self { sampler }
    }
}

impl Default for NativeClientTiming {
    fn default() -> Self {
        Self::new(Box::new(ProcessSampler))
    }
}

impl ClientTimingSource for NativeClientTiming {
    fn heap_used(&self) -> Option<u64> {
        self.sampler.snapshot().heap_used
    }

    fn long_tasks(&self, window: &TaskWindow) -> Option<Vec<LongTask>> {
        let tasks = window
            .blocking_spans
            .iter()
            .filter(|span| span.duration >= LONG_TASK_THRESHOLD)
            .map(|span| LongTask {
                start_time_ms: span
                    .start
                    .saturating_duration_since(window.started)
                    .as_secs_f64()
                    * 1e3,
                duration_ms: span.duration.as_secs_f64() * 1e3,
            })
            .collect();
        Some(tasks)
    }
}

/// Timing source that observes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClientTiming;

impl ClientTimingSource for NullClientTiming {
    fn heap_used(&self) -> Option<u64> {
        None
    }

    fn long_tasks(&self, _window: &TaskWindow) -> Option<Vec<LongTask>> {
        None
    }
}
