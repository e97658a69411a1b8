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

//! Session configuration.
//!
//! [`BenchConfig`] holds everything a session needs: which sizes and formats
//! to run, how many iterations, time budgets, the generator seed and the
//! anomaly thresholds. Values come from defaults, then `WIREBENCH_*`
//! environment variables, then explicit builder calls (the CLI's flags).

use crate::analysis::anomaly::AnomalyThresholds;
use crate::error::{BenchError, Result};
use std::time::Duration;
use tracing::warn;
use wirebench_core::{validate_dataset_size, DatasetSizePreset, Format, DEFAULT_SEED};

/// Default iteration count per `(size, format)` pair.
pub const DEFAULT_ITERATIONS: usize = 5;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_ITERATIONS: &str = "WIREBENCH_ITERATIONS";
pub const ENV_SIZES: &str = "WIREBENCH_SIZES";
pub const ENV_FORMATS: &str = "WIREBENCH_FORMATS";
pub const ENV_TIMEOUT_SECS: &str = "WIREBENCH_TIMEOUT_SECS";

/// Export format options for session reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// JSON format for machine-readable reports.
    Json,
    /// Markdown format for documentation.
    Markdown,
    /// Console output for immediate feedback.
    Console,
}

/// Session configuration.
///
/// # Example
///
/// ```
/// use wirebench_bench::core::config::{BenchConfig, ExportFormat};
/// use wirebench_core::{DatasetSizePreset, Format};
///
/// let config = BenchConfig::default()
///     .with_sizes(&[DatasetSizePreset::Small])
///     .with_formats(&[Format::Cbor, Format::Arrow])
///     .with_iterations(3)
///     .with_export_format(ExportFormat::Json);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.run_count(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Dataset sizes, run in this order.
    pub sizes: Vec<DatasetSizePreset>,
    /// Formats, run in this order within an iteration.
    pub formats: Vec<Format>,
    /// Iterations per `(size, format)` pair.
    pub iterations: usize,
    /// Ask the server to collect garbage between iterations.
    pub gc_between_iterations: bool,
    /// Whole-session time budget, checked between runs.
    pub session_timeout: Option<Duration>,
    /// Per-request timeout of the HTTP transport.
    pub request_timeout: Duration,
    /// Fixture generator seed.
    pub seed: u64,
    pub thresholds: AnomalyThresholds,
    pub export_formats: Vec<ExportFormat>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DatasetSizePreset::PRESETS.to_vec(),
            formats: Format::ALL.to_vec(),
            iterations: DEFAULT_ITERATIONS,
            gc_between_iterations: true,
            session_timeout: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            seed: DEFAULT_SEED,
            thresholds: AnomalyThresholds::default(),
            export_formats: vec![ExportFormat::Console],
        }
    }
}

impl BenchConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::default().apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay `WIREBENCH_*` values from `lookup`.
    ///
    /// Invalid values are logged and ignored.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_ITERATIONS) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.iterations = n,
                _ => warn!(variable = ENV_ITERATIONS, value = %raw, "ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(ENV_SIZES) {
            match parse_sizes(&raw) {
                Ok(sizes) => self = self.with_sizes(&sizes),
                Err(e) => warn!(variable = ENV_SIZES, value = %raw, error = %e, "ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(ENV_FORMATS) {
            match parse_formats(&raw) {
                Ok(formats) => self = self.with_formats(&formats),
                Err(e) => warn!(variable = ENV_FORMATS, value = %raw, error = %e, "ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.session_timeout = Some(Duration::from_secs(secs)),
                _ => warn!(variable = ENV_TIMEOUT_SECS, value = %raw, "ignoring invalid value"),
            }
        }

        self
    }

    /// Sets the dataset sizes.
    ///
    /// Sizes with the same record count are duplicates (`small` and `1000`);
    /// the first occurrence wins.
    pub fn with_sizes(mut self, sizes: &[DatasetSizePreset]) -> Self {
        self.sizes.clear();
        for size in sizes {
            if !self
                .sizes
                .iter()
                .any(|kept| kept.record_count() == size.record_count())
            {
                self.sizes.push(*size);
            }
        }
        self
    }

    /// Sets the formats. Duplicates are dropped, first occurrence wins.
    pub fn with_formats(mut self, formats: &[Format]) -> Self {
        self.formats.clear();
        for format in formats {
            if !self.formats.contains(format) {
                self.formats.push(*format);
            }
        }
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_gc_between_iterations(mut self, enabled: bool) -> Self {
        self.gc_between_iterations = enabled;
        self
    }

    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = Some(timeout);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_thresholds(mut self, thresholds: AnomalyThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Adds an export format.
    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        if !self.export_formats.contains(&format) {
            self.export_formats.push(format);
        }
        self
    }

    /// Returns whether a specific export format is enabled.
    pub fn has_format(&self, format: ExportFormat) -> bool {
        self.export_formats.contains(&format)
    }

    /// Total number of runs a session performs.
    pub fn run_count(&self) -> usize {
        self.sizes.len() * self.formats.len() * self.iterations
    }

    /// Check the configuration before a session starts.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidConfig`] for empty size or format lists,
    /// zero iterations or a zero timeout, and [`BenchError::DatasetTooLarge`]
    /// for an oversized explicit record count.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(BenchError::invalid_config("sizes", "at least one size is required"));
        }
        if self.formats.is_empty() {
            return Err(BenchError::invalid_config("formats", "at least one format is required"));
        }
        if self.iterations == 0 {
            return Err(BenchError::invalid_config("iterations", "must be at least 1"));
        }
        if self.request_timeout.is_zero() {
            return Err(BenchError::invalid_config("request_timeout", "must be positive"));
        }
        if self.session_timeout.is_some_and(|t| t.is_zero()) {
            return Err(BenchError::invalid_config("session_timeout", "must be positive"));
        }
        for size in &self.sizes {
            validate_dataset_size(size.record_count())?;
        }
        Ok(())
    }
}

/// Parse a comma-separated size list such as `small,medium,2500`.
pub fn parse_sizes(input: &str) -> Result<Vec<DatasetSizePreset>> {
    let sizes = input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.parse::<DatasetSizePreset>())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if sizes.is_empty() {
        return Err(BenchError::invalid_config("sizes", "empty size list"));
    }
    Ok(sizes)
}

/// Parse a comma-separated format list such as `cbor,arrow`.
pub fn parse_formats(input: &str) -> Result<Vec<Format>> {
    let formats = input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.parse::<Format>())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if formats.is_empty() {
        return Err(BenchError::invalid_config("formats", "empty format list"));
    }
    Ok(formats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.sizes.len(), 3);
        assert_eq!(config.formats, Format::ALL.to_vec());
        assert_eq!(config.iterations, DEFAULT_ITERATIONS);
        assert!(config.has_format(ExportFormat::Console));
        assert!(!config.has_format(ExportFormat::Json));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = BenchConfig::default().apply_env_from(env(&[
            (ENV_ITERATIONS, "7"),
            (ENV_SIZES, "small, 250"),
            (ENV_FORMATS, "cbor,ARROW"),
            (ENV_TIMEOUT_SECS, "60"),
        ]));
        assert_eq!(config.iterations, 7);
        assert_eq!(
            config.sizes,
            vec![DatasetSizePreset::Small, DatasetSizePreset::Records(250)]
        );
        assert_eq!(config.formats, vec![Format::Cbor, Format::Arrow]);
        assert_eq!(config.session_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let config = BenchConfig::default().apply_env_from(env(&[
            (ENV_ITERATIONS, "zero"),
            (ENV_SIZES, "huge"),
            (ENV_FORMATS, "protobuf"),
            (ENV_TIMEOUT_SECS, "0"),
        ]));
        assert_eq!(config, BenchConfig::default());
    }

    #[test]
    fn test_builders_dedup() {
        let config = BenchConfig::default()
            .with_formats(&[Format::Cbor, Format::Cbor, Format::JsonDom])
            .with_sizes(&[DatasetSizePreset::Medium, DatasetSizePreset::Medium]);
        assert_eq!(config.formats, vec![Format::Cbor, Format::JsonDom]);
        assert_eq!(config.sizes, vec![DatasetSizePreset::Medium]);
    }

    #[test]
    fn test_sizes_dedup_by_record_count() {
        let sizes = parse_sizes("small,1000,10000,medium,250").unwrap();
        let config = BenchConfig::default().with_sizes(&sizes);
        assert_eq!(
            config.sizes,
            vec![
                DatasetSizePreset::Small,
                DatasetSizePreset::Records(10_000),
                DatasetSizePreset::Records(250),
            ]
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let err = BenchConfig::default().with_iterations(0).validate().unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig { ref parameter, .. } if parameter == "iterations"));

        let err = BenchConfig::default().with_formats(&[]).validate().unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig { .. }));

        let err = BenchConfig::default()
            .with_sizes(&[DatasetSizePreset::Records(usize::MAX)])
            .validate()
            .unwrap_err();
        assert!(matches!(err, BenchError::DatasetTooLarge { .. }));
    }

    #[test]
    fn test_parse_lists() {
        assert_eq!(
            parse_formats("jsondom,messagepack").unwrap(),
            vec![Format::JsonDom, Format::MessagePack]
        );
        assert!(parse_formats(" , ").is_err());
        assert!(parse_sizes("small,0").is_err());
    }
}
