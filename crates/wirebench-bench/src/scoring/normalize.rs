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

//! Cross-format normalization and weighted combination.

use std::collections::BTreeMap;
use wirebench_core::Format;

/// Min-max normalizes one metric across formats into `[0, 1]`.
///
/// Formats without a (finite) value are left out of the result rather than
/// scored zero. When every present value is equal, each scores `1.0`.
///
/// # Example
///
/// ```
/// use wirebench_bench::scoring::normalize;
/// use wirebench_core::Format;
///
/// let scores = normalize(
///     &[(Format::Cbor, Some(10.0)), (Format::Arrow, Some(20.0)), (Format::JsonDom, None)],
///     false,
/// );
/// assert_eq!(scores[&Format::Cbor], 1.0);
/// assert_eq!(scores[&Format::Arrow], 0.0);
/// assert!(!scores.contains_key(&Format::JsonDom));
/// ```
pub fn normalize(values: &[(Format, Option<f64>)], higher_is_better: bool) -> BTreeMap<Format, f64> {
    let present: Vec<(Format, f64)> = values
        .iter()
        .filter_map(|(format, value)| value.filter(|v| v.is_finite()).map(|v| (*format, v)))
        .collect();

    let Some(min) = present.iter().map(|(_, v)| *v).reduce(f64::min) else {
        return BTreeMap::new();
    };
    let max = present.iter().map(|(_, v)| *v).fold(min, f64::max);
    let range = max - min;

    present
        .into_iter()
        .map(|(format, v)| {
            let score = if range == 0.0 {
                1.0
            } else if higher_is_better {
                (v - min) / range
            } else {
                (max - v) / range
            };
            (format, score)
        })
        .collect()
}

/// Weighted mean over the parts that have a value.
///
/// The denominator is the sum of the weights actually used, so missing parts
/// neither count as zero nor shrink the result. `None` if no part has a value.
pub fn weighted_mean<I>(parts: I) -> Option<f64>
where
    I: IntoIterator<Item = (Option<f64>, f64)>,
{
    let (sum, weight) = parts
        .into_iter()
        .filter_map(|(value, weight)| value.map(|v| (v * weight, weight)))
        .fold((0.0, 0.0), |(sum, total), (v, w)| (sum + v, total + w));

    (weight > 0.0).then(|| sum / weight)
}

/// Arithmetic mean of the present values; `None` if there are none.
pub fn mean_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_is_better() {
        let scores = normalize(
            &[
                (Format::JsonDom, Some(30.0)),
                (Format::Cbor, Some(10.0)),
                (Format::Arrow, Some(20.0)),
            ],
            false,
        );
        assert_eq!(scores[&Format::Cbor], 1.0);
        assert_eq!(scores[&Format::Arrow], 0.5);
        assert_eq!(scores[&Format::JsonDom], 0.0);
    }

    #[test]
    fn test_higher_is_better() {
        let scores = normalize(&[(Format::Cbor, Some(5.0)), (Format::Arrow, Some(15.0))], true);
        assert_eq!(scores[&Format::Cbor], 0.0);
        assert_eq!(scores[&Format::Arrow], 1.0);
    }

    #[test]
    fn test_tie_scores_one() {
        let scores = normalize(
            &[
                (Format::Cbor, Some(7.0)),
                (Format::Arrow, Some(7.0)),
                (Format::MessagePack, Some(7.0)),
            ],
            false,
        );
        assert_eq!(scores.len(), 3);
        assert!(scores.values().all(|s| *s == 1.0));
    }

    #[test]
    fn test_missing_values_excluded() {
        let scores = normalize(
            &[
                (Format::Cbor, None),
                (Format::Arrow, Some(f64::NAN)),
                (Format::MessagePack, Some(3.0)),
            ],
            false,
        );
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[&Format::MessagePack], 1.0);
        assert!(normalize(&[(Format::Cbor, None)], false).is_empty());
    }

    #[test]
    fn test_weighted_mean_renormalizes() {
        let mean = weighted_mean([(Some(1.0), 0.5), (None, 0.3), (Some(0.0), 0.2)]).unwrap();
        assert!((mean - 0.5 / 0.7).abs() < 1e-12);
        assert_eq!(weighted_mean([(None, 1.0)]), None);
        assert_eq!(weighted_mean(Vec::<(Option<f64>, f64)>::new()), None);
    }

    #[test]
    fn test_mean_present() {
        assert_eq!(mean_present([Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean_present([None, None]), None);
    }
}
