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

//! Error types for the Wirebench core vocabulary.

use crate::format::Format;
use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while parsing identifiers or validating inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Format identifier is not part of the catalogue.
    #[error("Unknown format '{0}'")]
    UnknownFormat(String),

    /// Dataset size identifier is neither a preset name nor an integer.
    #[error("Invalid dataset size '{0}': expected small, medium, large or a record count")]
    InvalidSize(String),

    /// Dataset size exceeds the maximum allowed limit.
    #[error("Dataset size {requested} exceeds maximum allowed limit of {max}")]
    DatasetTooLarge {
        /// Requested record count
        requested: usize,
        /// Maximum allowed record count
        max: usize,
    },
}

/// Errors raised by a codec while encoding or decoding a record sequence.
///
/// Both variants are terminal for the run that produced them: the session
/// records the run as failed and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Records could not be encoded (type or range violation, writer failure).
    #[error("{format} encode failed: {message}")]
    Encode {
        /// Format whose encoder failed
        format: Format,
        /// Underlying failure
        message: String,
    },

    /// Bytes could not be decoded (malformed or truncated input).
    #[error("{format} decode failed: {message}")]
    Decode {
        /// Format whose decoder failed
        format: Format,
        /// Underlying failure
        message: String,
    },
}

impl CodecError {
    /// Create an encode error for `format`.
    pub fn encode(format: Format, message: impl ToString) -> Self {
        Self::Encode {
            format,
            message: message.to_string(),
        }
    }

    /// Create a decode error for `format`.
    pub fn decode(format: Format, message: impl ToString) -> Self {
        Self::Decode {
            format,
            message: message.to_string(),
        }
    }

    /// Format that raised the error.
    pub fn format(&self) -> Format {
        match self {
            Self::Encode { format, .. } | Self::Decode { format, .. } => *format,
        }
    }
}
