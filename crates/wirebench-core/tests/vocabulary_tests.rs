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

//! Property tests for the shared vocabulary types.

use proptest::prelude::*;
use wirebench_core::{DatasetSizePreset, EventGenerator, Format, MAX_DATASET_SIZE};

proptest! {
    #[test]
    fn prop_record_counts_parse_to_presets(count in 1usize..=MAX_DATASET_SIZE) {
        let size: DatasetSizePreset = count.to_string().parse().unwrap();
        prop_assert_eq!(size.record_count(), count);
        prop_assert_eq!(size.id().parse::<DatasetSizePreset>().unwrap(), size);
    }

    #[test]
    fn prop_preset_json_is_its_id(count in 1usize..100_000) {
        let size = DatasetSizePreset::Records(count);
        let json = serde_json::to_string(&size).unwrap();
        prop_assert_eq!(json, format!("\"{}\"", count));
    }

    #[test]
    fn prop_generation_is_deterministic(seed in any::<u64>(), count in 0usize..64) {
        let generator = EventGenerator::new(seed);
        let first = generator.generate(count);
        prop_assert_eq!(first.len(), count);
        prop_assert_eq!(&first, &generator.generate(count));
        for (i, event) in first.iter().enumerate() {
            prop_assert_eq!(event.id, i as i64 + 1);
            prop_assert!(event.end_time > event.start_time);
        }
    }

    #[test]
    fn prop_format_parse_ignores_case(index in 0usize..Format::ALL.len(), upper in any::<bool>()) {
        let format = Format::ALL[index];
        let text = if upper {
            format.id().to_ascii_uppercase()
        } else {
            format.id().to_string()
        };
        prop_assert_eq!(text.parse::<Format>().unwrap(), format);
    }
}

#[test]
fn test_named_presets_serialize_by_name() {
    let json = serde_json::to_string(&DatasetSizePreset::PRESETS).unwrap();
    assert_eq!(json, r#"["small","medium","large"]"#);

    let back: Vec<DatasetSizePreset> = serde_json::from_str(r#"["large","250"]"#).unwrap();
    assert_eq!(
        back,
        vec![DatasetSizePreset::Large, DatasetSizePreset::Records(250)]
    );
}

#[test]
fn test_invalid_preset_fails_to_deserialize() {
    assert!(serde_json::from_str::<DatasetSizePreset>(r#""huge""#).is_err());
    assert!(serde_json::from_str::<DatasetSizePreset>(r#""0""#).is_err());
}
