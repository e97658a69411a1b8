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

//! Markdown export for session reports.

use crate::core::measurement::Metric;
use crate::reporters::types::{fmt_bytes, fmt_opt, SessionReport};
use crate::scoring::categories::Category;
use std::fs;
use std::io;
use std::path::Path;

/// Renders a session report as Markdown.
pub fn render_markdown(report: &SessionReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.title));
    md.push_str(&format!("**Timestamp:** {}\n\n", report.timestamp));
    md.push_str(&format!(
        "**Transport:** {} | **Iterations:** {} | **Seed:** {}\n\n",
        report.config.transport, report.config.iterations, report.config.seed
    ));

    for section in &report.sizes {
        md.push_str(&format!(
            "## {} ({} records)\n\n",
            section.size, section.record_count
        ));
        md.push_str("| Format | End-to-end (ms) | p95 (ms) | Parse (ms) | TTFB (ms) | Payload | Bytes/record | OK | Errors |\n");
        md.push_str("|--------|-----------------|----------|------------|-----------|---------|--------------|----|--------|\n");

        for row in &section.rows {
            let e2e = row.stat(Metric::EndToEndMs);
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                row.format.label(),
                fmt_opt(e2e.mean, 2),
                fmt_opt(e2e.p95, 2),
                fmt_opt(row.mean(Metric::ParseMs), 2),
                fmt_opt(row.mean(Metric::TtfbMs), 2),
                fmt_bytes(row.mean(Metric::PayloadBytes)),
                fmt_opt(row.mean(Metric::BytesPerRecord), 1),
                row.ok_runs,
                row.errors
            ));
        }
        md.push('\n');
    }

    if !report.scoring.ranking.is_empty() {
        md.push_str("## Ranking\n\n");
        md.push_str("| Rank | Format | Speed | Efficiency | Stability | Resources | Overall | Errors |\n");
        md.push_str("|------|--------|-------|------------|-----------|-----------|---------|--------|\n");
        for entry in &report.scoring.ranking {
            let Some(average) = report.scoring.average(entry.format) else {
                continue;
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                entry.rank,
                entry.format.label(),
                fmt_opt(average.speed, 3),
                fmt_opt(average.efficiency, 3),
                fmt_opt(average.stability, 3),
                fmt_opt(average.resources, 3),
                fmt_opt(entry.overall, 3),
                entry.errors
            ));
        }

        md.push_str("\n## Winners\n\n");
        for category in Category::ALL {
            if let Some(winner) = report.scoring.winner(category) {
                md.push_str(&format!("- **{}**: {}\n", category, winner.label()));
            }
        }
        if let Some(winner) = report.scoring.overall_winner {
            md.push_str(&format!("- **overall**: {}\n", winner.label()));
        }
    }

    if !report.anomalies.is_empty() {
        md.push_str("\n## Anomalies\n\n");
        for anomaly in &report.anomalies {
            md.push_str(&format!(
                "- **[{}]** `{}`: {}\n",
                anomaly.severity.as_str().to_uppercase(),
                anomaly.kind.as_str(),
                anomaly.message
            ));
        }
    }

    md
}

/// Exports a session report as Markdown.
///
/// # Arguments
///
/// * `report` - The session report to export
/// * `path` - Output file path
pub fn export_markdown(report: &SessionReport, path: &Path) -> io::Result<()> {
    fs::write(path, render_markdown(report))
}
