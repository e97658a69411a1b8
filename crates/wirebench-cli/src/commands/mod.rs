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

//! CLI command implementations

mod formats;
mod run;
mod score;
mod verify;

pub use formats::formats;
pub use run::run;
pub use score::score;
pub use verify::verify;

use crate::error::{CliError, Result};
use colored::Colorize;
use std::path::Path;
use wirebench_bench::reporters::{
    export_json, export_markdown, print_report, print_summary, SessionReport,
};

/// Writes the requested report files.
fn write_exports(
    report: &SessionReport,
    output: Option<&Path>,
    markdown: Option<&Path>,
) -> Result<()> {
    if let Some(path) = output {
        export_json(report, path).map_err(|e| CliError::io_error(path, e))?;
        eprintln!("{} JSON report written to {}", "✓".green().bold(), path.display());
    }
    if let Some(path) = markdown {
        export_markdown(report, path).map_err(|e| CliError::io_error(path, e))?;
        eprintln!("{} Markdown report written to {}", "✓".green().bold(), path.display());
    }
    Ok(())
}

fn present(report: &SessionReport, full: bool) {
    if full {
        print_report(report);
    } else {
        print_summary(report);
    }
}
