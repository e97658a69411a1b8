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

//! Wirebench command line interface

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wirebench_cli::cli::Commands;

/// Wirebench - wire-format serialization benchmark
///
/// Runs measurement sessions across the supported wire formats, scores
/// them per category and reports anomalies in the measurements.
///
/// # Examples
///
/// ```bash
/// # Loopback session over the small preset
/// wirebench run --sizes small --iterations 3
///
/// # Measure a remote server and keep the raw runs
/// wirebench run --server http://localhost:8080 --raw-runs runs.json
///
/// # Re-score exported runs
/// wirebench score runs.json --markdown report.md
/// ```
#[derive(Parser)]
#[command(name = "wirebench")]
#[command(author, version, about = "Wirebench - wire-format serialization benchmark", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// Logs go to stderr so stdout only carries reports.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wirebench=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
