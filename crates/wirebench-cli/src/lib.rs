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

//! Wirebench CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Sessions
//!
//! - **run**: Run a measurement session over loopback or against a server
//! - **score**: Re-aggregate and score raw runs exported by `run --raw-runs`
//!
//! ## Codecs
//!
//! - **formats**: List the supported formats and their content types
//! - **verify**: Round-trip generated records through every codec
//!
//! # Example
//!
//! ```no_run
//! use wirebench_cli::commands::verify;
//!
//! # fn main() -> Result<(), wirebench_cli::error::CliError> {
//! verify(100, 42)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;

pub use error::{CliError, Result};
