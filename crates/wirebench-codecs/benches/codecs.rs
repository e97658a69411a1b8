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

//! Encode and decode throughput of every codec on generated fixtures.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wirebench_codecs::CodecRegistry;
use wirebench_core::{DatasetSizePreset, EventGenerator};

fn bench_encode(c: &mut Criterion) {
    let registry = CodecRegistry::standard();
    let mut group = c.benchmark_group("encode");

    for size in [DatasetSizePreset::Small, DatasetSizePreset::Medium] {
        let events = EventGenerator::default().generate(size.record_count());
        group.throughput(Throughput::Elements(events.len() as u64));

        for format in registry.formats() {
            let Ok(codec) = registry.get(format) else {
                continue;
            };
            group.bench_with_input(BenchmarkId::new(format.id(), size), &events, |b, events| {
                b.iter(|| codec.encode(black_box(events)))
            });
        }
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let registry = CodecRegistry::standard();
    let mut group = c.benchmark_group("decode");

    for size in [DatasetSizePreset::Small, DatasetSizePreset::Medium] {
        let events = EventGenerator::default().generate(size.record_count());

        for format in registry.formats() {
            let Ok(codec) = registry.get(format) else {
                continue;
            };
            let Ok(bytes) = codec.encode(&events) else {
                continue;
            };
            group.throughput(Throughput::Bytes(bytes.len() as u64));
            group.bench_with_input(BenchmarkId::new(format.id(), size), &bytes, |b, bytes| {
                b.iter(|| codec.decode(black_box(bytes)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
