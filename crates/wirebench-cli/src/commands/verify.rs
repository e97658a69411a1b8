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

//! Verify command - codec round-trip check

use crate::error::{CliError, Result};
use colored::Colorize;
use wirebench_codecs::CodecRegistry;
use wirebench_core::{CalendarEvent, Codec, EventGenerator};

/// Round-trip generated records through every registered codec.
///
/// The generated records are followed by one record with empty list fields
/// so that empty versus populated lists are both exercised.
///
/// # Errors
///
/// Returns `Err` if `records` exceeds the dataset limit or any codec fails to
/// reproduce the input.
pub fn verify(records: usize, seed: u64) -> Result<()> {
    let events = fixture(records, seed)?;
    let registry = CodecRegistry::standard();

    println!("Verifying {} codecs on {} records", registry.len(), events.len());

    let mut failed = 0;
    for format in registry.formats() {
        let outcome = registry
            .get(format)
            .map_err(|e| e.to_string())
            .and_then(|codec| check(codec, &events));
        match outcome {
            Ok(bytes) => println!(
                "{} {:<12} {:>12} bytes",
                "✓".green().bold(),
                format.id(),
                bytes
            ),
            Err(message) => {
                failed += 1;
                println!("{} {:<12} {}", "✗".red().bold(), format.id(), message);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Verification {
            failed,
            total: registry.len(),
        });
    }
    Ok(())
}

fn fixture(records: usize, seed: u64) -> Result<Vec<CalendarEvent>> {
    let mut events = EventGenerator::new(seed).generate_checked(records)?;
    let edge = CalendarEvent {
        id: events.len() as i64 + 1,
        tags: Vec::new(),
        resources: Vec::new(),
        ..events.last().cloned().unwrap_or_default()
    };
    events.push(edge);
    Ok(events)
}

/// Encoded size on success, a description of the failure otherwise.
fn check(codec: &dyn Codec, events: &[CalendarEvent]) -> std::result::Result<usize, String> {
    let bytes = codec.encode(events).map_err(|e| e.to_string())?;
    let decoded = codec.decode(&bytes).map_err(|e| e.to_string())?;

    if decoded.len() != events.len() {
        return Err(format!(
            "decoded {} records, expected {}",
            decoded.len(),
            events.len()
        ));
    }
    match decoded.iter().zip(events).position(|(got, want)| got != want) {
        Some(index) => Err(format!("record {} differs after round trip", index)),
        None => Ok(bytes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirebench_core::{CodecError, Format};

    struct Lossy;

    impl Codec for Lossy {
        fn format(&self) -> Format {
            Format::JsonDom
        }

        fn encode(&self, records: &[CalendarEvent]) -> std::result::Result<Vec<u8>, CodecError> {
            Ok(vec![0; records.len()])
        }

        fn decode(&self, bytes: &[u8]) -> std::result::Result<Vec<CalendarEvent>, CodecError> {
            Ok(vec![CalendarEvent::default(); bytes.len()])
        }
    }

    #[test]
    fn test_fixture_ends_with_empty_lists() {
        let events = fixture(10, 1).unwrap();
        assert_eq!(events.len(), 11);
        let edge = &events[10];
        assert_eq!(edge.id, 11);
        assert!(edge.tags.is_empty());
        assert!(edge.resources.is_empty());
        assert!(!events[0].tags.is_empty());
    }

    #[test]
    fn test_check_detects_lossy_codec() {
        let events = fixture(3, 1).unwrap();
        let err = check(&Lossy, &events).unwrap_err();
        assert_eq!(err, "record 0 differs after round trip");
    }

    #[test]
    fn test_standard_codecs_pass() {
        assert!(verify(20, 42).is_ok());
    }
}
