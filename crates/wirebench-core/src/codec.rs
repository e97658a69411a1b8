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

//! The codec contract.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::CodecError;
use crate::format::Format;
use crate::model::CalendarEvent;

/// Uniform interface every wire format implementation satisfies.
///
/// # Contract
///
/// For every record sequence produced by the fixture generator,
/// `decode(&encode(records)?)? == records`, field for field, including empty
/// versus populated list fields. The contract only constrains semantics: a
/// codec is free to be textual or binary, schema-based or schema-less, row-
/// or column-oriented.
///
/// Implementations are `Send + Sync` so a single registry can be shared by
/// reference between the encoding side and the decoding side of a session.
pub trait Codec: Send + Sync {
    /// The format this codec implements.
    fn format(&self) -> Format;

    /// Declared content type of encoded payloads.
    fn content_type(&self) -> &'static str {
        self.format().content_type()
    }

    /// Encode a record sequence.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] on type or range violations or writer
    /// failures.
    fn encode(&self, records: &[CalendarEvent]) -> Result<Vec<u8>, CodecError>;

    /// Decode a payload produced by [`Codec::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] on malformed or truncated input.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<CalendarEvent>, CodecError>;
}

/// Run a decode step, turning a panic into [`CodecError::Decode`].
///
/// Some decoder crates panic on corrupted input instead of returning an
/// error. Wrapping the step keeps a malformed payload a per-run failure.
///
/// # Examples
///
/// ```
/// use wirebench_core::{guard_decode, CodecError, Format};
///
/// let err = guard_decode::<(), _>(Format::Arrow, || panic!("bad offset")).unwrap_err();
/// assert!(matches!(err, CodecError::Decode { .. }));
/// assert!(err.to_string().contains("bad offset"));
/// ```
pub fn guard_decode<T, F>(format: Format, decode: F) -> Result<T, CodecError>
where
    F: FnOnce() -> Result<T, CodecError>,
{
    panic::catch_unwind(AssertUnwindSafe(decode)).unwrap_or_else(|payload| {
        Err(CodecError::decode(
            format,
            format!("decoder panicked: {}", panic_message(payload.as_ref())),
        ))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
