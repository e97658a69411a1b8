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

//! Error types for Wirebench sessions.
//!
//! Per-run failures (codec, transport) never surface here: they are folded
//! into the run's result and tallied by the aggregator. [`BenchError`] covers
//! the failures that stop a whole session or an export.

use std::io;
use std::time::Duration;
use thiserror::Error;
use wirebench_core::CoreError;

/// Result type for session-level operations.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Session-level failures.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Invalid configuration parameter.
    #[error("Invalid configuration for '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Dataset size exceeds the maximum allowed limit.
    #[error("Dataset size {requested} exceeds maximum allowed limit of {max}")]
    DatasetTooLarge {
        /// Requested record count
        requested: usize,
        /// Maximum allowed record count
        max: usize,
    },

    /// The session ran past its time budget.
    #[error("Session timed out after {elapsed:?} (limit {limit:?}, {completed} runs completed)")]
    SessionTimeout {
        /// Time spent when the timeout was detected
        elapsed: Duration,
        /// Configured limit
        limit: Duration,
        /// Runs finished before the abort
        completed: usize,
    },

    /// File I/O failed during export or import.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Report or run data could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BenchError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<CoreError> for BenchError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DatasetTooLarge { requested, max } => {
                Self::DatasetTooLarge { requested, max }
            }
            CoreError::UnknownFormat(value) => {
                Self::invalid_config("formats", format!("unknown format '{}'", value))
            }
            CoreError::InvalidSize(value) => {
                Self::invalid_config("sizes", format!("invalid size '{}'", value))
            }
        }
    }
}

/// Failures fetching a payload from the serving side.
///
/// The raw message is preserved so it can be reported verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or no response arrived.
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),
}
