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

//! The closed catalogue of wire formats under comparison.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A serialization strategy under comparison.
///
/// The declaration order is the iteration order used everywhere a stable
/// format order matters (session loop, report rows, winner tie-breaks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON built and read through an in-memory document tree.
    JsonDom,
    /// JSON written and read directly through serde.
    JsonStream,
    /// Schema-less FlexBuffers.
    FlexBuffers,
    /// Schema-based FlatBuffers.
    FlatBuffers,
    /// MessagePack with named map keys.
    MessagePack,
    /// CBOR (RFC 8949).
    Cbor,
    /// Apache Arrow IPC stream (column-oriented).
    Arrow,
}

impl Format {
    /// Every format, in iteration order.
    pub const ALL: [Format; 7] = [
        Format::JsonDom,
        Format::JsonStream,
        Format::FlexBuffers,
        Format::FlatBuffers,
        Format::MessagePack,
        Format::Cbor,
        Format::Arrow,
    ];

    /// Stable wire identifier (used in URLs, headers and reports).
    pub fn id(&self) -> &'static str {
        match self {
            Format::JsonDom => "jsondom",
            Format::JsonStream => "jsonstream",
            Format::FlexBuffers => "flexbuffers",
            Format::FlatBuffers => "flatbuffers",
            Format::MessagePack => "messagepack",
            Format::Cbor => "cbor",
            Format::Arrow => "arrow",
        }
    }

    /// Declared content type of an encoded payload.
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::JsonDom | Format::JsonStream => "application/json; charset=utf-8",
            Format::FlexBuffers => "application/x-flexbuffers",
            Format::FlatBuffers => "application/x-flatbuffers",
            Format::MessagePack => "application/x-msgpack",
            Format::Cbor => "application/cbor",
            Format::Arrow => "application/vnd.apache.arrow.stream",
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Format::JsonDom => "JSON (DOM)",
            Format::JsonStream => "JSON (streaming)",
            Format::FlexBuffers => "FlexBuffers",
            Format::FlatBuffers => "FlatBuffers",
            Format::MessagePack => "MessagePack",
            Format::Cbor => "CBOR",
            Format::Arrow => "Apache Arrow",
        }
    }

    /// Whether the payload is human-readable text.
    pub fn is_textual(&self) -> bool {
        matches!(self, Format::JsonDom | Format::JsonStream)
    }

    /// Whether encoding relies on a fixed schema shared by both ends.
    pub fn is_schema_based(&self) -> bool {
        matches!(self, Format::FlatBuffers | Format::Arrow)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Format {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Format::ALL
            .iter()
            .copied()
            .find(|format| format.id().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnknownFormat(trimmed.to_string()))
    }
}
