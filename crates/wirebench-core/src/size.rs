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

//! Dataset size presets.
//!
//! A preset is either one of the named tiers or an explicit record count.
//! Presets order by record count so that "next larger size" is well defined
//! for scaling checks.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Maximum dataset size (10 million records).
///
/// Prevents memory exhaustion from oversized size requests.
pub const MAX_DATASET_SIZE: usize = 10_000_000;

/// Record count of the `small` tier.
pub const SMALL_RECORDS: usize = 1_000;
/// Record count of the `medium` tier.
pub const MEDIUM_RECORDS: usize = 10_000;
/// Record count of the `large` tier.
pub const LARGE_RECORDS: usize = 50_000;

/// Named record-count tier or explicit record count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DatasetSizePreset {
    /// 1,000 records.
    #[default]
    Small,
    /// 10,000 records.
    Medium,
    /// 50,000 records.
    Large,
    /// Explicit record count.
    Records(usize),
}

impl DatasetSizePreset {
    /// The three named tiers, smallest first.
    pub const PRESETS: [DatasetSizePreset; 3] = [
        DatasetSizePreset::Small,
        DatasetSizePreset::Medium,
        DatasetSizePreset::Large,
    ];

    /// Number of records this preset generates.
    pub fn record_count(&self) -> usize {
        match self {
            DatasetSizePreset::Small => SMALL_RECORDS,
            DatasetSizePreset::Medium => MEDIUM_RECORDS,
            DatasetSizePreset::Large => LARGE_RECORDS,
            DatasetSizePreset::Records(count) => *count,
        }
    }

    /// Identifier used on the wire and in reports.
    pub fn id(&self) -> String {
        match self {
            DatasetSizePreset::Small => "small".to_string(),
            DatasetSizePreset::Medium => "medium".to_string(),
            DatasetSizePreset::Large => "large".to_string(),
            DatasetSizePreset::Records(count) => count.to_string(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            DatasetSizePreset::Records(_) => 1,
            _ => 0,
        }
    }
}

impl Ord for DatasetSizePreset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.record_count()
            .cmp(&other.record_count())
            .then_with(|| self.rank().cmp(&other.rank()))
    }
}

impl PartialOrd for DatasetSizePreset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DatasetSizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for DatasetSizePreset {
    type Err = CoreError;

    /// Parse a preset name (case-insensitive) or a positive record count.
    ///
    /// Blank input resolves to [`DatasetSizePreset::Small`].
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().to_ascii_lowercase();
        match trimmed.as_str() {
            "" | "small" => Ok(DatasetSizePreset::Small),
            "medium" => Ok(DatasetSizePreset::Medium),
            "large" => Ok(DatasetSizePreset::Large),
            other => {
                let count: usize = other
                    .parse()
                    .map_err(|_| CoreError::InvalidSize(s.trim().to_string()))?;
                if count == 0 {
                    return Err(CoreError::InvalidSize(s.trim().to_string()));
                }
                validate_dataset_size(count)?;
                Ok(DatasetSizePreset::Records(count))
            }
        }
    }
}

impl From<DatasetSizePreset> for String {
    fn from(size: DatasetSizePreset) -> Self {
        size.id()
    }
}

impl TryFrom<String> for DatasetSizePreset {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Validate that a dataset size is within acceptable limits.
///
/// # Examples
///
/// ```
/// use wirebench_core::{validate_dataset_size, MAX_DATASET_SIZE};
///
/// assert!(validate_dataset_size(1000).is_ok());
/// assert!(validate_dataset_size(MAX_DATASET_SIZE + 1).is_err());
/// ```
#[inline]
pub fn validate_dataset_size(size: usize) -> Result<()> {
    if size > MAX_DATASET_SIZE {
        Err(CoreError::DatasetTooLarge {
            requested: size,
            max: MAX_DATASET_SIZE,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_presets() {
        assert_eq!("small".parse(), Ok(DatasetSizePreset::Small));
        assert_eq!("MEDIUM".parse(), Ok(DatasetSizePreset::Medium));
        assert_eq!(" large ".parse(), Ok(DatasetSizePreset::Large));
        assert_eq!("".parse(), Ok(DatasetSizePreset::Small));
        assert_eq!("250".parse(), Ok(DatasetSizePreset::Records(250)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "huge".parse::<DatasetSizePreset>(),
            Err(CoreError::InvalidSize(_))
        ));
        assert!(matches!(
            "0".parse::<DatasetSizePreset>(),
            Err(CoreError::InvalidSize(_))
        ));
        assert!(matches!(
            "-5".parse::<DatasetSizePreset>(),
            Err(CoreError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_parse_enforces_limit() {
        let err = (MAX_DATASET_SIZE + 1)
            .to_string()
            .parse::<DatasetSizePreset>()
            .unwrap_err();
        assert!(matches!(err, CoreError::DatasetTooLarge { .. }));
    }

    #[test]
    fn test_ordering_by_record_count() {
        let mut sizes = vec![
            DatasetSizePreset::Large,
            DatasetSizePreset::Records(5_000),
            DatasetSizePreset::Small,
            DatasetSizePreset::Medium,
        ];
        sizes.sort();
        assert_eq!(
            sizes,
            vec![
                DatasetSizePreset::Small,
                DatasetSizePreset::Records(5_000),
                DatasetSizePreset::Medium,
                DatasetSizePreset::Large,
            ]
        );
        assert!(DatasetSizePreset::Small < DatasetSizePreset::Records(1_000));
    }

    #[test]
    fn test_validate_dataset_size() {
        assert!(validate_dataset_size(MAX_DATASET_SIZE).is_ok());
        assert!(validate_dataset_size(MAX_DATASET_SIZE + 1).is_err());
    }
}
