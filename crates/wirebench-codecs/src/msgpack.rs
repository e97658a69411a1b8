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

//! MessagePack codec.

use wirebench_core::{CalendarEvent, Codec, CodecError, Format};

/// MessagePack with named map keys, so payloads are self-describing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePackCodec;

impl Codec for MessagePackCodec {
    fn format(&self) -> Format {
        Format::MessagePack
    }

    fn encode(&self, records: &[CalendarEvent]) -> Result<Vec<u8>, CodecError> {
        rmp_serde::to_vec_named(records).map_err(|e| CodecError::encode(Format::MessagePack, e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<CalendarEvent>, CodecError> {
        rmp_serde::from_slice(bytes).map_err(|e| CodecError::decode(Format::MessagePack, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirebench_core::EventGenerator;

    #[test]
    fn test_keys_are_named() {
        let events = EventGenerator::default().generate(1);
        let bytes = MessagePackCodec.encode(&events).unwrap();
        let needle = b"startTime";
        assert!(bytes.windows(needle.len()).any(|w| w == needle));
    }

    #[test]
    fn test_truncated_payload_fails() {
        let events = EventGenerator::default().generate(5);
        let bytes = MessagePackCodec.encode(&events).unwrap();
        let err = MessagePackCodec.decode(&bytes[..bytes.len() / 2]).unwrap_err();
        assert_eq!(err.format(), Format::MessagePack);
    }
}
