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

//! Session commands: running and re-scoring measurement sessions.

use crate::commands;
use crate::error::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Default report title.
pub const DEFAULT_TITLE: &str = "Wire-format comparison";

/// Session commands.
#[derive(Subcommand)]
pub enum SessionCommands {
    /// Run a measurement session
    ///
    /// Encodes, transfers and decodes generated calendar events for every
    /// selected size and format, then prints the scored report. Without
    /// `--server` payloads are produced in-process by the built-in codecs.
    ///
    /// Unset options fall back to WIREBENCH_ITERATIONS, WIREBENCH_SIZES,
    /// WIREBENCH_FORMATS and WIREBENCH_TIMEOUT_SECS.
    Run(RunArgs),

    /// Score exported raw runs
    ///
    /// Re-aggregates a runs file written by `run --raw-runs` and prints the
    /// resulting report.
    Score(ScoreArgs),
}

/// Arguments of `wirebench run`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Base URL of a benchmark server (loopback when omitted)
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Iterations per size and format
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Comma-separated sizes (small, medium, large or a record count)
    #[arg(short, long, value_name = "LIST")]
    pub sizes: Option<String>,

    /// Comma-separated format ids
    #[arg(short, long, value_name = "LIST")]
    pub formats: Option<String>,

    /// Fixture generator seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Session time budget in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Skip the garbage collection request between iterations
    #[arg(long)]
    pub no_gc: bool,

    /// Write the JSON report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the Markdown report to this file
    #[arg(long, value_name = "FILE")]
    pub markdown: Option<PathBuf>,

    /// Write the raw runs to this file for later re-scoring
    #[arg(long, value_name = "FILE")]
    pub raw_runs: Option<PathBuf>,

    /// Report title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Print a short summary instead of the full report
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments of `wirebench score`.
#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Runs file written by `run --raw-runs`
    #[arg(value_name = "RUNS")]
    pub runs: PathBuf,

    /// Write the JSON report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the Markdown report to this file
    #[arg(long, value_name = "FILE")]
    pub markdown: Option<PathBuf>,

    /// Report title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Print a short summary instead of the full report
    #[arg(short, long)]
    pub quiet: bool,
}

impl SessionCommands {
    /// Execute the session command.
    ///
    /// # Errors
    ///
    /// Returns `Err` on invalid arguments, a failed session, or a failed
    /// export.
    pub fn execute(self) -> Result<()> {
        match self {
            SessionCommands::Run(args) => commands::run(&args),
            SessionCommands::Score(args) => commands::score(&args),
        }
    }
}
