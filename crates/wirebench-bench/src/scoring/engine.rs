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

//! Composite scoring of aggregated rows.
//!
//! For every size, each category sub-metric is normalized across the
//! formats that produced a value, folded into category scores, and the
//! categories into an overall score. Per-format averages across sizes
//! decide the category winners and the final ranking.

use crate::harness::aggregator::{sizes_of, AggregateRow};
use crate::scoring::categories::Category;
use crate::scoring::normalize::{mean_present, normalize, weighted_mean};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wirebench_core::{DatasetSizePreset, Format};

/// Category and overall scores of one format, each in `[0, 1]` or null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub format: Format,
    pub speed: Option<f64>,
    pub efficiency: Option<f64>,
    pub stability: Option<f64>,
    pub resources: Option<f64>,
    pub overall: Option<f64>,
}

impl CategoryScore {
    fn empty(format: Format) -> Self {
        Self {
            format,
            speed: None,
            efficiency: None,
            stability: None,
            resources: None,
            overall: None,
        }
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        match category {
            Category::Speed => self.speed,
            Category::Efficiency => self.efficiency,
            Category::Stability => self.stability,
            Category::Resources => self.resources,
        }
    }

    fn set(&mut self, category: Category, value: Option<f64>) {
        match category {
            Category::Speed => self.speed = value,
            Category::Efficiency => self.efficiency = value,
            Category::Stability => self.stability = value,
            Category::Resources => self.resources = value,
        }
    }

    fn with_overall(mut self) -> Self {
        self.overall = weighted_mean(Category::ALL.iter().map(|c| (self.get(*c), c.weight())));
        self
    }
}

/// Scores of every format at one size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeScores {
    pub size: DatasetSizePreset,
    pub scores: Vec<CategoryScore>,
}

/// A format's place in the final ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedFormat {
    /// 1-based rank.
    pub rank: usize,
    pub format: Format,
    pub overall: Option<f64>,
    /// Failed runs across all sizes.
    pub errors: usize,
}

/// Scoring outcome of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringReport {
    /// Per-size scores, smallest size first.
    pub sizes: Vec<SizeScores>,
    /// Per-format averages across sizes, in format order.
    pub averages: Vec<CategoryScore>,
    /// Best format per category; absent when no format scored.
    pub winners: BTreeMap<Category, Format>,
    pub overall_winner: Option<Format>,
    /// Every format, best first; unscored formats last.
    pub ranking: Vec<RankedFormat>,
}

impl ScoringReport {
    /// Averaged scores of `format`.
    pub fn average(&self, format: Format) -> Option<&CategoryScore> {
        self.averages.iter().find(|score| score.format == format)
    }

    pub fn winner(&self, category: Category) -> Option<Format> {
        self.winners.get(&category).copied()
    }

    /// Scores at one size.
    pub fn at_size(&self, size: DatasetSizePreset) -> Option<&SizeScores> {
        self.sizes.iter().find(|s| s.size == size)
    }
}

/// Scores the rows of a single size.
///
/// Returns one entry per row, in row order. Rows without usable values get
/// null scores and do not influence the normalization of the others.
pub fn score_size(rows: &[&AggregateRow]) -> Vec<CategoryScore> {
    let mut scores: Vec<CategoryScore> =
        rows.iter().map(|row| CategoryScore::empty(row.format)).collect();

    for category in Category::ALL {
        let normalized: Vec<(BTreeMap<Format, f64>, f64)> = category
            .sub_metrics()
            .iter()
            .map(|(sub, weight)| {
                let values: Vec<(Format, Option<f64>)> =
                    rows.iter().map(|row| (row.format, sub.value(row))).collect();
                (normalize(&values, sub.higher_is_better()), *weight)
            })
            .collect();

        for score in scores.iter_mut() {
            let value = weighted_mean(
                normalized
                    .iter()
                    .map(|(by_format, weight)| (by_format.get(&score.format).copied(), *weight)),
            );
            score.set(category, value);
        }
    }

    scores.into_iter().map(CategoryScore::with_overall).collect()
}

/// Scores a whole session.
pub fn score(rows: &[AggregateRow]) -> ScoringReport {
    let sizes: Vec<SizeScores> = sizes_of(rows)
        .into_iter()
        .map(|size| {
            let at_size: Vec<&AggregateRow> = rows.iter().filter(|r| r.size == size).collect();
            SizeScores {
                size,
                scores: score_size(&at_size),
            }
        })
        .collect();

    let mut formats: Vec<Format> = rows.iter().map(|row| row.format).collect();
    formats.sort();
    formats.dedup();

    let averages: Vec<CategoryScore> = formats
        .iter()
        .map(|&format| {
            let per_size: Vec<&CategoryScore> = sizes
                .iter()
                .flat_map(|s| s.scores.iter())
                .filter(|score| score.format == format)
                .collect();
            let mut average = CategoryScore::empty(format);
            for category in Category::ALL {
                average.set(category, mean_present(per_size.iter().map(|s| s.get(category))));
            }
            average.overall = mean_present(per_size.iter().map(|s| s.overall));
            average
        })
        .collect();

    let winners = Category::ALL
        .iter()
        .filter_map(|&category| {
            best_of(averages.iter().map(|s| (s.format, s.get(category))))
                .map(|format| (category, format))
        })
        .collect();
    let overall_winner = best_of(averages.iter().map(|s| (s.format, s.overall)));

    let mut ranked: Vec<&CategoryScore> = averages.iter().collect();
    // Stable: equal scores keep format order.
    ranked.sort_by(|a, b| match (a.overall, b.overall) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    let ranking = ranked
        .into_iter()
        .enumerate()
        .map(|(i, score)| RankedFormat {
            rank: i + 1,
            format: score.format,
            overall: score.overall,
            errors: rows
                .iter()
                .filter(|r| r.format == score.format)
                .map(|r| r.errors)
                .sum(),
        })
        .collect();

    ScoringReport {
        sizes,
        averages,
        winners,
        overall_winner,
        ranking,
    }
}

/// Strictly highest score; ties go to the earliest candidate.
fn best_of<I>(candidates: I) -> Option<Format>
where
    I: IntoIterator<Item = (Format, Option<f64>)>,
{
    let mut best: Option<(Format, f64)> = None;
    for (format, score) in candidates {
        let Some(score) = score else { continue };
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((format, score));
        }
    }
    best.map(|(format, _)| format)
}
