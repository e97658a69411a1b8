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

//! CLI command definitions and argument parsing.
//!
//! Commands are grouped by category and flattened so they all appear at the
//! top level:
//!
//! - [`session`]: measurement sessions (run, score)
//! - [`codec`]: codec inspection (formats, verify)

mod codec;
mod session;

use crate::error::Result;
use clap::Subcommand;

pub use codec::CodecCommands;
pub use session::{RunArgs, ScoreArgs, SessionCommands, DEFAULT_TITLE};

/// Top-level CLI commands.
///
/// ```no_run
/// use clap::Parser;
/// use wirebench_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Session(SessionCommands),

    #[command(flatten)]
    Codec(CodecCommands),
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    ///
    /// Returns the command's [`CliError`](crate::CliError).
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Session(cmd) => cmd.execute(),
            Commands::Codec(cmd) => cmd.execute(),
        }
    }
}
