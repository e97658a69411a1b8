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

//! JSON codecs.
//!
//! Two renditions of the same text format: [`JsonDomCodec`] goes through a
//! [`serde_json::Value`] tree and reads fields back by key, while
//! [`JsonStreamCodec`] lets serde write and read the records directly.
//! Both produce a top-level array of objects with camelCase keys and both
//! reject missing or mistyped fields.

use serde_json::{Map, Value};
use wirebench_core::{CalendarEvent, Codec, CodecError, Format};

/// JSON through an in-memory document tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDomCodec;

/// JSON through serde, no intermediate tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStreamCodec;

impl Codec for JsonDomCodec {
    fn format(&self) -> Format {
        Format::JsonDom
    }

    fn encode(&self, records: &[CalendarEvent]) -> Result<Vec<u8>, CodecError> {
        let array = Value::Array(records.iter().map(event_to_value).collect());
        serde_json::to_vec(&array).map_err(|e| CodecError::encode(Format::JsonDom, e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<CalendarEvent>, CodecError> {
        let root: Value =
            serde_json::from_slice(bytes).map_err(|e| CodecError::decode(Format::JsonDom, e))?;
        let items = root
            .as_array()
            .ok_or_else(|| CodecError::decode(Format::JsonDom, "expected a top-level array"))?;

        items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let object = item.as_object().ok_or_else(|| {
                    CodecError::decode(Format::JsonDom, format!("record {} is not an object", idx))
                })?;
                event_from_object(object)
                    .map_err(|e| CodecError::decode(Format::JsonDom, format!("record {}: {}", idx, e)))
            })
            .collect()
    }
}

impl Codec for JsonStreamCodec {
    fn format(&self) -> Format {
        Format::JsonStream
    }

    fn encode(&self, records: &[CalendarEvent]) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(records).map_err(|e| CodecError::encode(Format::JsonStream, e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<CalendarEvent>, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::decode(Format::JsonStream, e))
    }
}

fn event_to_value(event: &CalendarEvent) -> Value {
    let mut object = Map::with_capacity(CalendarEvent::FIELDS.len());
    object.insert("id".into(), event.id.into());
    object.insert("title".into(), event.title.as_str().into());
    object.insert("location".into(), event.location.as_str().into());
    object.insert("organizer".into(), event.organizer.as_str().into());
    object.insert("startTime".into(), event.start_time.into());
    object.insert("endTime".into(), event.end_time.into());
    object.insert("attendees".into(), event.attendees.into());
    object.insert("allDay".into(), event.all_day.into());
    object.insert("description".into(), event.description.as_str().into());
    object.insert("tags".into(), string_list(&event.tags));
    object.insert("resources".into(), string_list(&event.resources));
    object.insert("createdAt".into(), event.created_at.into());
    object.insert("updatedAt".into(), event.updated_at.into());
    object.insert("priority".into(), event.priority.into());
    object.insert("timezone".into(), event.timezone.as_str().into());
    Value::Object(object)
}

fn string_list(values: &[String]) -> Value {
    Value::Array(values.iter().map(|v| Value::String(v.clone())).collect())
}

fn event_from_object(object: &Map<String, Value>) -> Result<CalendarEvent, String> {
    Ok(CalendarEvent {
        id: get_i64(object, "id")?,
        title: get_string(object, "title")?,
        location: get_string(object, "location")?,
        organizer: get_string(object, "organizer")?,
        start_time: get_i64(object, "startTime")?,
        end_time: get_i64(object, "endTime")?,
        attendees: get_i32(object, "attendees")?,
        all_day: get_bool(object, "allDay")?,
        description: get_string(object, "description")?,
        tags: get_string_list(object, "tags")?,
        resources: get_string_list(object, "resources")?,
        created_at: get_i64(object, "createdAt")?,
        updated_at: get_i64(object, "updatedAt")?,
        priority: get_i32(object, "priority")?,
        timezone: get_string(object, "timezone")?,
    })
}

fn field<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a Value, String> {
    object
        .get(key)
        .ok_or_else(|| format!("missing field '{}'", key))
}

fn get_i64(object: &Map<String, Value>, key: &str) -> Result<i64, String> {
    field(object, key)?
        .as_i64()
        .ok_or_else(|| format!("field '{}' is not an integer", key))
}

fn get_i32(object: &Map<String, Value>, key: &str) -> Result<i32, String> {
    let value = get_i64(object, key)?;
    i32::try_from(value).map_err(|_| format!("field '{}' out of range: {}", key, value))
}

fn get_bool(object: &Map<String, Value>, key: &str) -> Result<bool, String> {
    field(object, key)?
        .as_bool()
        .ok_or_else(|| format!("field '{}' is not a boolean", key))
}

fn get_string(object: &Map<String, Value>, key: &str) -> Result<String, String> {
    field(object, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("field '{}' is not a string", key))
}

fn get_string_list(object: &Map<String, Value>, key: &str) -> Result<Vec<String>, String> {
    let items = field(object, key)?
        .as_array()
        .ok_or_else(|| format!("field '{}' is not an array", key))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| format!("field '{}' contains a non-string element", key))
        })
        .collect()
}
