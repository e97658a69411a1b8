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

//! JSON export for session reports and raw runs.

use crate::core::measurement::RunRecord;
use crate::error::Result;
use crate::reporters::types::SessionReport;
use std::fs;
use std::io;
use std::path::Path;

/// Exports a session report as pretty JSON.
///
/// # Arguments
///
/// * `report` - The session report to export
/// * `path` - Output file path
pub fn export_json(report: &SessionReport, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, json)?;
    Ok(())
}

/// Exports raw runs so they can be re-scored later.
pub fn export_runs(records: &[RunRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

/// Loads runs written by [`export_runs`].
pub fn load_runs(path: &Path) -> Result<Vec<RunRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
