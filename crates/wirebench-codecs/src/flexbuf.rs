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

//! FlexBuffers codec.
//!
//! The root of a payload is read from the end of the buffer, so a truncated
//! payload can still present a plausible root. Decoding insists on an
//! untyped vector root for records, and a zero-record payload must be exactly
//! the encoding of an empty vector.

use flexbuffers::{FlexBufferType, Reader};
use wirebench_core::{guard_decode, CalendarEvent, Codec, CodecError, Format};

/// Schema-less FlexBuffers: a vector of keyed maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlexBuffersCodec;

impl Codec for FlexBuffersCodec {
    fn format(&self) -> Format {
        Format::FlexBuffers
    }

    fn encode(&self, records: &[CalendarEvent]) -> Result<Vec<u8>, CodecError> {
        flexbuffers::to_vec(records).map_err(|e| CodecError::encode(Format::FlexBuffers, e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<CalendarEvent>, CodecError> {
        guard_decode(Format::FlexBuffers, || {
            if bytes == empty_payload()?.as_slice() {
                return Ok(Vec::new());
            }

            let root = Reader::get_root(bytes).map_err(decode_error)?;
            if root.flexbuffer_type() != FlexBufferType::Vector {
                return Err(decode_error(format!(
                    "root is {:?}, expected a vector",
                    root.flexbuffer_type()
                )));
            }

            let events: Vec<CalendarEvent> = flexbuffers::from_slice(bytes).map_err(decode_error)?;
            if events.is_empty() {
                return Err(decode_error(format!(
                    "{} byte payload decodes to an empty vector",
                    bytes.len()
                )));
            }
            Ok(events)
        })
    }
}

fn empty_payload() -> Result<Vec<u8>, CodecError> {
    flexbuffers::to_vec(Vec::<CalendarEvent>::new()).map_err(decode_error)
}

fn decode_error(e: impl ToString) -> CodecError {
    CodecError::decode(Format::FlexBuffers, e)
}
