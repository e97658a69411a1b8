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

//! Round-trip tests for every registered codec.
//!
//! # Properties Tested
//!
//! 1. **Generated fixtures**: every preset-sized fixture decodes to itself
//! 2. **Arbitrary records**: any field values survive, including extreme
//!    integers and unicode text
//! 3. **List shape**: empty and populated `tags`/`resources` stay distinct

use proptest::prelude::*;
use wirebench_codecs::CodecRegistry;
use wirebench_core::{CalendarEvent, EventGenerator, Format};

fn assert_round_trip(registry: &CodecRegistry, events: &[CalendarEvent]) {
    for format in registry.formats() {
        let codec = registry.get(format).unwrap();
        let bytes = codec
            .encode(events)
            .unwrap_or_else(|e| panic!("{} encode failed: {}", format, e));
        let decoded = codec
            .decode(&bytes)
            .unwrap_or_else(|e| panic!("{} decode failed: {}", format, e));
        assert_eq!(decoded, events, "{} round trip differs", format);
    }
}

#[test]
fn test_generated_fixture_round_trips() {
    let registry = CodecRegistry::standard();
    let events = EventGenerator::default().generate(1_000);
    assert_round_trip(&registry, &events);
}

#[test]
fn test_empty_sequence_round_trips() {
    assert_round_trip(&CodecRegistry::standard(), &[]);
}

#[test]
fn test_empty_and_populated_lists_stay_distinct() {
    let mut events = EventGenerator::default().generate(4);
    events[0].tags.clear();
    events[1].resources.clear();
    events[2].tags.clear();
    events[2].resources.clear();
    assert_round_trip(&CodecRegistry::standard(), &events);
}

#[test]
fn test_binary_formats_are_smaller_than_json() {
    let registry = CodecRegistry::standard();
    let events = EventGenerator::default().generate(200);
    let json = registry
        .get(Format::JsonStream)
        .unwrap()
        .encode(&events)
        .unwrap()
        .len();
    for format in [Format::MessagePack, Format::Cbor, Format::Arrow] {
        let size = registry.get(format).unwrap().encode(&events).unwrap().len();
        assert!(size < json, "{} ({} bytes) not smaller than json ({})", format, size, json);
    }
}

#[test]
fn test_content_types_match_formats() {
    let registry = CodecRegistry::standard();
    for format in Format::ALL {
        let codec = registry.get(format).unwrap();
        assert_eq!(codec.content_type(), format.content_type());
    }
}

#[test]
fn test_truncated_payloads_fail_cleanly() {
    let registry = CodecRegistry::standard();
    let events = EventGenerator::default().generate(3);
    for format in registry.formats() {
        let codec = registry.get(format).unwrap();
        let bytes = codec.encode(&events).unwrap();
        for len in 0..bytes.len() {
            match codec.decode(&bytes[..len]) {
                Err(err) => assert_eq!(err.format(), format),
                Ok(decoded) => panic!(
                    "{} decoded {} records from {}/{} bytes",
                    format,
                    decoded.len(),
                    len,
                    bytes.len()
                ),
            }
        }
    }
}

#[test]
fn test_corrupted_bytes_never_panic() {
    let registry = CodecRegistry::standard();
    let events = EventGenerator::default().generate(3);
    for format in registry.formats() {
        let codec = registry.get(format).unwrap();
        let bytes = codec.encode(&events).unwrap();
        for idx in 0..bytes.len() {
            let mut corrupted = bytes.clone();
            corrupted[idx] ^= 0xFF;
            if let Err(err) = codec.decode(&corrupted) {
                assert_eq!(err.format(), format, "byte {}", idx);
            }
        }
    }
}

fn text() -> impl Strategy<Value = String> {
    "\\PC{0,24}"
}

fn strings() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z ]{0,12}", 0..4)
}

prop_compose! {
    fn arb_event()(
        (id, start_time, end_time, created_at, updated_at) in
            (any::<i64>(), any::<i64>(), any::<i64>(), any::<i64>(), any::<i64>()),
        (attendees, priority, all_day) in (any::<i32>(), any::<i32>(), any::<bool>()),
        (title, location, organizer, description, timezone) in
            (text(), text(), text(), text(), text()),
        (tags, resources) in (strings(), strings()),
    ) -> CalendarEvent {
        CalendarEvent {
            id,
            title,
            location,
            organizer,
            start_time,
            end_time,
            attendees,
            all_day,
            description,
            tags,
            resources,
            created_at,
            updated_at,
            priority,
            timezone,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: every codec reproduces arbitrary records field for field
    #[test]
    fn prop_arbitrary_records_round_trip(events in prop::collection::vec(arb_event(), 0..8)) {
        let registry = CodecRegistry::standard();
        for format in registry.formats() {
            let codec = registry.get(format).unwrap();
            let bytes = codec.encode(&events).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let decoded = codec.decode(&bytes).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(&decoded, &events, "{} round trip differs", format);
        }
    }

    /// Property: generated fixtures of any count round trip
    #[test]
    fn prop_generated_counts_round_trip(count in 0usize..64, seed in any::<u64>()) {
        let registry = CodecRegistry::standard();
        let events = EventGenerator::new(seed).generate(count);
        for format in registry.formats() {
            let codec = registry.get(format).unwrap();
            let bytes = codec.encode(&events).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(codec.decode(&bytes).map_err(|e| TestCaseError::fail(e.to_string()))?, events.clone());
        }
    }
}
