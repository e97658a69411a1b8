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

//! CBOR codec (RFC 8949).

use wirebench_core::{CalendarEvent, Codec, CodecError, Format};

/// CBOR through serde.
#[derive(Debug, Clone, Copy, Default)]
pub struct CborCodec;

impl Codec for CborCodec {
    fn format(&self) -> Format {
        Format::Cbor
    }

    fn encode(&self, records: &[CalendarEvent]) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        ciborium::into_writer(records, &mut buf).map_err(|e| CodecError::encode(Format::Cbor, e))?;
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<CalendarEvent>, CodecError> {
        ciborium::from_reader(bytes).map_err(|e| CodecError::decode(Format::Cbor, e))
    }
}
