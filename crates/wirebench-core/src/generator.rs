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

//! Deterministic fixture generator.
//!
//! Every format encodes the same record sequence for a given size, so the
//! generator is seeded from `seed + count` and never touches a global RNG.

use crate::error::Result;
use crate::model::CalendarEvent;
use crate::size::{validate_dataset_size, DatasetSizePreset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default generator seed.
pub const DEFAULT_SEED: u64 = 42;

/// Epoch milliseconds of the first event slot.
pub const BASE_TIME_MS: i64 = 1_700_000_000_000;

const SLOT_MS: i64 = 900_000;
const JITTER_MS: i64 = 300_000;
const MIN_DURATION_MS: i64 = 1_800_000;

const TITLES: [&str; 10] = [
    "Standup",
    "Planning",
    "1:1",
    "Design Review",
    "Incident Review",
    "Roadmap",
    "Sprint Demo",
    "Retro",
    "All Hands",
    "Ops Sync",
];
const LOCATIONS: [&str; 6] = ["Room 1", "Room 2", "Room 3", "HQ", "Remote", "Zoom"];
const TAGS: [&str; 6] = ["team", "urgent", "customer", "internal", "release", "oncall"];
const RESOURCES: [&str; 4] = ["Projector", "Whiteboard", "Conference Phone", "Screen Share"];
const TIMEZONES: [&str; 4] = ["UTC", "America/Los_Angeles", "Europe/London", "Asia/Kolkata"];

/// Generates calendar events for a dataset size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventGenerator {
    seed: u64,
}

impl Default for EventGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl EventGenerator {
    /// Create a generator with an explicit base seed.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Base seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the record sequence for a size preset.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DatasetTooLarge`](crate::CoreError::DatasetTooLarge)
    /// if the preset exceeds [`MAX_DATASET_SIZE`](crate::MAX_DATASET_SIZE).
    pub fn generate_for(&self, size: DatasetSizePreset) -> Result<Vec<CalendarEvent>> {
        self.generate_checked(size.record_count())
    }

    /// Generate `count` records after validating the count.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DatasetTooLarge`](crate::CoreError::DatasetTooLarge)
    /// if `count` exceeds [`MAX_DATASET_SIZE`](crate::MAX_DATASET_SIZE).
    pub fn generate_checked(&self, count: usize) -> Result<Vec<CalendarEvent>> {
        validate_dataset_size(count)?;
        Ok(self.generate(count))
    }

    /// Generate `count` records (unchecked).
    ///
    /// The same `(seed, count)` pair always yields the same sequence.
    pub fn generate(&self, count: usize) -> Vec<CalendarEvent> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(count as u64));
        let mut events = Vec::with_capacity(count);

        for i in 0..count {
            let ordinal = i as i64 + 1;
            let start = BASE_TIME_MS + i as i64 * SLOT_MS + rng.gen_range(0..JITTER_MS);
            let end = start + MIN_DURATION_MS + rng.gen_range(0..JITTER_MS);
            let attendees = rng.gen_range(1..=25);
            let all_day = rng.gen_range(0..20) == 0;
            let priority = rng.gen_range(1..=5);
            let title = format!("{} {}", pick(&mut rng, &TITLES), ordinal);
            let location = pick(&mut rng, &LOCATIONS).to_string();
            let organizer = format!("user{}@example.com", rng.gen_range(1..=500));
            let description = format!("Event {} details", ordinal);
            let tag_count = rng.gen_range(2..=3);
            let tags = pick_many(&mut rng, &TAGS, tag_count);
            let resource_count = rng.gen_range(1..=2);
            let resources = pick_many(&mut rng, &RESOURCES, resource_count);
            let timezone = pick(&mut rng, &TIMEZONES).to_string();

            events.push(CalendarEvent {
                id: ordinal,
                title,
                location,
                organizer,
                start_time: start,
                end_time: end,
                attendees,
                all_day,
                description,
                tags,
                resources,
                created_at: start - 3_600_000,
                updated_at: start - 1_800_000,
                priority,
                timezone,
            });
        }

        events
    }
}

fn pick<'a>(rng: &mut StdRng, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

// Draws with replacement.
fn pick_many(rng: &mut StdRng, pool: &[&str], count: usize) -> Vec<String> {
    (0..count).map(|_| pick(rng, pool).to_string()).collect()
}
