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

//! Console reporter for session results.

use crate::core::measurement::Metric;
use crate::reporters::types::{fmt_bytes, fmt_opt, SessionReport};
use crate::scoring::categories::Category;
use crate::scoring::engine::CategoryScore;

/// Renders the full report as console text.
pub fn render_report(report: &SessionReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);
    let thin = "-".repeat(80);

    out.push_str(&format!("\n{}\n", rule));
    out.push_str(&format!("WIREBENCH REPORT: {}\n", report.title));
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("Timestamp: {}\n", report.timestamp));
    out.push_str(&format!(
        "Transport: {} | Iterations: {} | Seed: {}\n",
        report.config.transport, report.config.iterations, report.config.seed
    ));

    for section in &report.sizes {
        out.push_str(&format!("\n{}\n", thin));
        out.push_str(&format!(
            "SIZE: {} ({} records)\n",
            section.size, section.record_count
        ));
        out.push_str(&format!("{}\n", thin));
        out.push_str(&format!(
            "{:<18} {:>10} {:>10} {:>10} {:>10} {:>12} {:>9} {:>7}\n",
            "Format", "e2e ms", "p95 ms", "parse ms", "ttfb ms", "payload", "B/rec", "ok/err"
        ));
        for row in &section.rows {
            let e2e = row.stat(Metric::EndToEndMs);
            out.push_str(&format!(
                "{:<18} {:>10} {:>10} {:>10} {:>10} {:>12} {:>9} {:>7}\n",
                row.format.label(),
                fmt_opt(e2e.mean, 2),
                fmt_opt(e2e.p95, 2),
                fmt_opt(row.mean(Metric::ParseMs), 2),
                fmt_opt(row.mean(Metric::TtfbMs), 2),
                fmt_bytes(row.mean(Metric::PayloadBytes)),
                fmt_opt(row.mean(Metric::BytesPerRecord), 1),
                format!("{}/{}", row.ok_runs, row.errors),
            ));
        }

        if let Some(scores) = report.scoring.at_size(section.size) {
            out.push_str("\nScores:\n");
            push_score_table(&mut out, &scores.scores);
        }
    }

    if !report.scoring.averages.is_empty() {
        out.push_str(&format!("\n{}\n", thin));
        out.push_str("AVERAGE SCORES:\n");
        out.push_str(&format!("{}\n", thin));
        push_score_table(&mut out, &report.scoring.averages);
    }

    if !report.scoring.ranking.is_empty() {
        out.push_str(&format!("\n{}\n", thin));
        out.push_str("RANKING:\n");
        out.push_str(&format!("{}\n", thin));
        for entry in &report.scoring.ranking {
            let errors = if entry.errors > 0 {
                format!(" ({} errors)", entry.errors)
            } else {
                String::new()
            };
            out.push_str(&format!(
                "{}. {} {}{}\n",
                entry.rank,
                entry.format.label(),
                fmt_opt(entry.overall, 3),
                errors
            ));
        }

        let winners: Vec<String> = Category::ALL
            .iter()
            .map(|c| {
                let winner = report
                    .scoring
                    .winner(*c)
                    .map(|f| f.label())
                    .unwrap_or("-");
                format!("{}: {}", c, winner)
            })
            .collect();
        out.push_str(&format!("\nWinners: {}\n", winners.join(", ")));
        if let Some(winner) = report.scoring.overall_winner {
            out.push_str(&format!("Overall winner: {}\n", winner.label()));
        }
    }

    if !report.anomalies.is_empty() {
        out.push_str(&format!("\n{}\n", thin));
        out.push_str("ANOMALIES:\n");
        out.push_str(&format!("{}\n", thin));
        for anomaly in &report.anomalies {
            out.push_str(&format!(
                "[{}] {}: {}\n",
                anomaly.severity.as_str().to_uppercase(),
                anomaly.kind.as_str(),
                anomaly.message
            ));
        }
    }

    out.push_str(&format!("{}\n", rule));
    out
}

fn push_score_table(out: &mut String, scores: &[CategoryScore]) {
    out.push_str(&format!(
        "{:<18} {:>8} {:>10} {:>9} {:>9} {:>8}\n",
        "Format", "Speed", "Efficiency", "Stability", "Resources", "Overall"
    ));
    for score in scores {
        out.push_str(&format!(
            "{:<18} {:>8} {:>10} {:>9} {:>9} {:>8}\n",
            score.format.label(),
            fmt_opt(score.speed, 3),
            fmt_opt(score.efficiency, 3),
            fmt_opt(score.stability, 3),
            fmt_opt(score.resources, 3),
            fmt_opt(score.overall, 3),
        ));
    }
}

/// Prints the full session report to console.
pub fn print_report(report: &SessionReport) {
    print!("{}", render_report(report));
}

/// Prints a one-screen summary.
pub fn print_summary(report: &SessionReport) {
    println!("\n{}", "=".repeat(60));
    println!("SUMMARY: {}", report.title);
    println!("{}", "=".repeat(60));
    println!("Rows: {}", report.row_count());
    println!("Anomalies: {} ({} warnings)", report.anomalies.len(), report.warning_count());
    match report.scoring.overall_winner {
        Some(winner) => println!("Overall winner: {}", winner.label()),
        None => println!("Overall winner: none"),
    }
    println!("{}\n", "=".repeat(60));
}
