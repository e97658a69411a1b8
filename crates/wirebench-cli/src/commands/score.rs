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

//! Score command - re-scoring exported runs

use super::{present, write_exports};
use crate::cli::ScoreArgs;
use crate::error::{CliError, Result};
use std::time::Duration;
use wirebench_bench::core::{BenchConfig, RunRecord};
use wirebench_bench::harness::iterations_of;
use wirebench_bench::reporters::{load_runs, ConfigSummary, SessionReport};
use wirebench_bench::SessionOutcome;

/// Aggregate, score and report a runs file written by `run --raw-runs`.
///
/// Anomaly thresholds come from the defaults; the iteration count is the
/// highest iteration number found in the file.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or parsed, holds no runs, or a
/// report file cannot be written.
pub fn score(args: &ScoreArgs) -> Result<()> {
    let records = load_runs(&args.runs)?;
    if records.is_empty() {
        return Err(CliError::invalid_argument(
            "runs",
            format!("'{}' contains no runs", args.runs.display()),
        ));
    }

    let config = BenchConfig::from_env();
    let summary = summarize(&records, &config, &args.runs.display().to_string());
    let outcome = SessionOutcome::from_records(
        records,
        summary.iterations,
        &config.thresholds,
        Duration::ZERO,
    );
    let report = SessionReport::from_outcome(args.title.clone(), summary, &outcome);

    write_exports(&report, args.output.as_deref(), args.markdown.as_deref())?;
    present(&report, !args.quiet);
    Ok(())
}

/// Describes the session the runs came from.
fn summarize(records: &[RunRecord], config: &BenchConfig, source: &str) -> ConfigSummary {
    let mut sizes = Vec::new();
    let mut formats = Vec::new();
    for record in records {
        if !sizes.contains(&record.size) {
            sizes.push(record.size);
        }
        if !formats.contains(&record.format) {
            formats.push(record.format);
        }
    }

    ConfigSummary {
        iterations: iterations_of(records),
        sizes,
        formats,
        gc_between_iterations: config.gc_between_iterations,
        seed: config.seed,
        transport: format!("file:{}", source),
    }
}
