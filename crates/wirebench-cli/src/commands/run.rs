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

//! Run command - live measurement sessions

use super::{present, write_exports};
use crate::cli::RunArgs;
use crate::error::Result;
use colored::Colorize;
use std::time::Duration;
use tracing::info;
use wirebench_bench::core::{parse_formats, parse_sizes, BenchConfig, ExportFormat, ProcessSampler};
use wirebench_bench::harness::{HttpTransport, LoopbackTransport};
use wirebench_bench::reporters::{export_runs, ConfigSummary, SessionReport};
use wirebench_bench::{SessionOutcome, SessionRunner};
use wirebench_codecs::CodecRegistry;
use wirebench_core::EventGenerator;

/// Run a measurement session and report it.
///
/// The configuration starts from the environment and is then overridden by
/// the command-line flags. Failed runs are part of the report and do not fail
/// the command.
///
/// # Errors
///
/// Returns `Err` if the configuration is invalid, the session times out, or a
/// report file cannot be written.
pub fn run(args: &RunArgs) -> Result<()> {
    let config = apply_args(BenchConfig::from_env(), args)?;
    config.validate()?;

    let registry = CodecRegistry::standard();
    let runner = SessionRunner::new(&config, &registry);

    let (outcome, transport) = match &args.server {
        Some(url) => {
            info!(server = %url, "measuring remote server");
            let mut transport = HttpTransport::new(url.clone(), config.request_timeout);
            (runner.run(&mut transport)?, url.clone())
        }
        None => {
            let mut transport = LoopbackTransport::new(
                &registry,
                EventGenerator::new(config.seed),
                Box::new(ProcessSampler),
            );
            (runner.run(&mut transport)?, "loopback".to_string())
        }
    };

    if let Some(path) = &args.raw_runs {
        export_runs(&outcome.records, path)?;
        eprintln!(
            "{} {} runs written to {}",
            "✓".green().bold(),
            outcome.records.len(),
            path.display()
        );
    }

    let report = SessionReport::from_outcome(
        args.title.clone(),
        ConfigSummary::new(&config, transport),
        &outcome,
    );

    write_exports(&report, args.output.as_deref(), args.markdown.as_deref())?;
    present(&report, config.has_format(ExportFormat::Console));
    report_failures(&outcome);

    Ok(())
}

/// Overlays command-line flags on `config`.
fn apply_args(mut config: BenchConfig, args: &RunArgs) -> Result<BenchConfig> {
    if let Some(sizes) = &args.sizes {
        config = config.with_sizes(&parse_sizes(sizes)?);
    }
    if let Some(formats) = &args.formats {
        config = config.with_formats(&parse_formats(formats)?);
    }
    if let Some(iterations) = args.iterations {
        config = config.with_iterations(iterations);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(secs) = args.timeout {
        config = config.with_session_timeout(Duration::from_secs(secs));
    }
    if args.no_gc {
        config = config.with_gc_between_iterations(false);
    }
    if args.output.is_some() {
        config = config.with_export_format(ExportFormat::Json);
    }
    if args.markdown.is_some() {
        config = config.with_export_format(ExportFormat::Markdown);
    }
    if args.quiet {
        config.export_formats.retain(|f| *f != ExportFormat::Console);
    }
    Ok(config)
}

fn report_failures(outcome: &SessionOutcome) {
    let errors = outcome.error_count();
    if errors > 0 {
        eprintln!(
            "{} {} of {} runs failed",
            "⚠".yellow().bold(),
            errors,
            outcome.records.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::DEFAULT_TITLE;
    use std::path::PathBuf;
    use wirebench_core::{DatasetSizePreset, Format};

    fn default_args() -> RunArgs {
        RunArgs {
            server: None,
            iterations: None,
            sizes: None,
            formats: None,
            seed: None,
            timeout: None,
            no_gc: false,
            output: None,
            markdown: None,
            raw_runs: None,
            title: DEFAULT_TITLE.to_string(),
            quiet: false,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let base = BenchConfig::default().with_iterations(9);
        let args = RunArgs {
            iterations: Some(2),
            sizes: Some("small,250,small".to_string()),
            formats: Some("cbor,arrow".to_string()),
            seed: Some(7),
            timeout: Some(60),
            no_gc: true,
            ..default_args()
        };

        let config = apply_args(base, &args).unwrap();
        assert_eq!(config.iterations, 2);
        assert_eq!(
            config.sizes,
            vec![DatasetSizePreset::Small, DatasetSizePreset::Records(250)]
        );
        assert_eq!(config.formats, vec![Format::Cbor, Format::Arrow]);
        assert_eq!(config.seed, 7);
        assert_eq!(config.session_timeout, Some(Duration::from_secs(60)));
        assert!(!config.gc_between_iterations);
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let base = BenchConfig::default().with_iterations(9);
        let config = apply_args(base.clone(), &default_args()).unwrap();
        assert_eq!(config, base);
    }

    #[test]
    fn test_export_flags() {
        let args = RunArgs {
            output: Some(PathBuf::from("report.json")),
            quiet: true,
            ..default_args()
        };
        let config = apply_args(BenchConfig::default(), &args).unwrap();
        assert!(config.has_format(ExportFormat::Json));
        assert!(!config.has_format(ExportFormat::Markdown));
        assert!(!config.has_format(ExportFormat::Console));
    }

    #[test]
    fn test_bad_format_rejected() {
        let args = RunArgs {
            formats: Some("cbor,protobuf".to_string()),
            ..default_args()
        };
        let err = apply_args(BenchConfig::default(), &args).unwrap_err();
        assert!(err.to_string().contains("protobuf"));
    }
}
