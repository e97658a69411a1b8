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

//! The benchmarked record type.

use serde::{Deserialize, Serialize};

/// A calendar event, the fixed record every format encodes.
///
/// Timestamps are epoch milliseconds. Field names serialize in camelCase so
/// that every self-describing format carries the same keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub organizer: String,
    pub start_time: i64,
    pub end_time: i64,
    pub attendees: i32,
    pub all_day: bool,
    pub description: String,
    pub tags: Vec<String>,
    pub resources: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub priority: i32,
    pub timezone: String,
}

impl CalendarEvent {
    /// Field names in wire order.
    pub const FIELDS: [&'static str; 15] = [
        "id",
        "title",
        "location",
        "organizer",
        "startTime",
        "endTime",
        "attendees",
        "allDay",
        "description",
        "tags",
        "resources",
        "createdAt",
        "updatedAt",
        "priority",
        "timezone",
    ];

    /// Event duration in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        self.end_time - self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_keys() {
        let event = CalendarEvent {
            id: 7,
            start_time: 10,
            end_time: 25,
            all_day: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&event).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), CalendarEvent::FIELDS.len());
        for key in CalendarEvent::FIELDS {
            assert!(object.contains_key(key), "missing key {}", key);
        }
        assert_eq!(event.duration_ms(), 15);
    }
}
