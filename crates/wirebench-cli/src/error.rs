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

//! Structured error types for the Wirebench CLI.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use wirebench_bench::BenchError;
use wirebench_core::CoreError;

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures of a CLI command.
///
/// Every variant renders as a single line; `main` prints it after `Error: `
/// and exits with status 1.
#[derive(Error, Debug)]
pub enum CliError {
    /// Reading or writing a file failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A command-line argument was rejected.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Argument name
        name: String,
        /// Reason for rejection
        reason: String,
    },

    /// Session, export or import failure.
    #[error(transparent)]
    Bench(#[from] BenchError),

    /// One or more codecs failed the round-trip check.
    #[error("{failed} of {total} codecs failed verification")]
    Verification {
        /// Codecs that failed
        failed: usize,
        /// Codecs checked
        total: usize,
    },
}

impl CliError {
    /// Creates an I/O error carrying the offending path.
    pub fn io_error(path: impl AsRef<Path>, err: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::Bench(err.into())
    }
}
