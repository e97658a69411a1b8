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

//! FlatBuffers codec.
//!
//! Tables follow this schema, with accessors laid out the way `flatc`
//! generates them:
//!
//! ```text
//! table CalendarEvent {
//!   id: long; title: string (required); location: string (required);
//!   organizer: string (required); start_time: long; end_time: long;
//!   attendees: int; all_day: bool; description: string (required);
//!   tags: [string] (required); resources: [string] (required);
//!   created_at: long; updated_at: long; priority: int;
//!   timezone: string (required);
//! }
//! table CalendarEventList { events: [CalendarEvent]; }
//! root_type CalendarEventList;
//! ```
//!
//! Payloads are verified before any field is read, so malformed input is a
//! decode error rather than an out-of-bounds read.

use flatbuffers::{
    FlatBufferBuilder, Follow, ForwardsUOffset, InvalidFlatbuffer, Table, VOffsetT, Vector,
    Verifiable, Verifier, VerifierOptions, WIPOffset,
};
use wirebench_core::{guard_decode, CalendarEvent, Codec, CodecError, Format, MAX_DATASET_SIZE};

const SIZE_WORD: usize = 4;

/// Schema-based FlatBuffers tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatBuffersCodec;

impl Codec for FlatBuffersCodec {
    fn format(&self) -> Format {
        Format::FlatBuffers
    }

    fn encode(&self, records: &[CalendarEvent]) -> Result<Vec<u8>, CodecError> {
        let mut fbb = FlatBufferBuilder::with_capacity(1024 + records.len() * 256);
        let offsets: Vec<_> = records
            .iter()
            .map(|event| build_event(&mut fbb, event))
            .collect();
        let events = fbb.create_vector(&offsets);

        let start = fbb.start_table();
        fbb.push_slot_always::<WIPOffset<_>>(EventListTable::VT_EVENTS, events);
        let root = fbb.end_table(start);
        fbb.finish(root, None);

        Ok(fbb.finished_data().to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<CalendarEvent>, CodecError> {
        // Finished buffers are padded to a whole word; a shorter tail can only
        // come from truncation into the trailing string padding.
        if bytes.len() % SIZE_WORD != 0 {
            return Err(CodecError::decode(
                Format::FlatBuffers,
                format!("{} byte payload is not word aligned", bytes.len()),
            ));
        }
        let opts = VerifierOptions {
            max_tables: MAX_DATASET_SIZE + 1,
            ..Default::default()
        };
        guard_decode(Format::FlatBuffers, || {
            let list = flatbuffers::root_with_opts::<EventListTable>(&opts, bytes)
                .map_err(|e| CodecError::decode(Format::FlatBuffers, e))?;

            let Some(events) = list.events() else {
                return Ok(Vec::new());
            };
            events.iter().map(event_from_table).collect()
        })
    }
}

fn build_event<'fbb>(
    fbb: &mut FlatBufferBuilder<'fbb>,
    event: &CalendarEvent,
) -> WIPOffset<EventTable<'fbb>> {
    let title = fbb.create_string(&event.title);
    let location = fbb.create_string(&event.location);
    let organizer = fbb.create_string(&event.organizer);
    let description = fbb.create_string(&event.description);
    let timezone = fbb.create_string(&event.timezone);
    let tags = create_string_vector(fbb, &event.tags);
    let resources = create_string_vector(fbb, &event.resources);

    let start = fbb.start_table();
    fbb.push_slot::<i64>(EventTable::VT_ID, event.id, 0);
    fbb.push_slot::<i64>(EventTable::VT_START_TIME, event.start_time, 0);
    fbb.push_slot::<i64>(EventTable::VT_END_TIME, event.end_time, 0);
    fbb.push_slot::<i64>(EventTable::VT_CREATED_AT, event.created_at, 0);
    fbb.push_slot::<i64>(EventTable::VT_UPDATED_AT, event.updated_at, 0);
    fbb.push_slot_always::<WIPOffset<_>>(EventTable::VT_TITLE, title);
    fbb.push_slot_always::<WIPOffset<_>>(EventTable::VT_LOCATION, location);
    fbb.push_slot_always::<WIPOffset<_>>(EventTable::VT_ORGANIZER, organizer);
    fbb.push_slot_always::<WIPOffset<_>>(EventTable::VT_DESCRIPTION, description);
    fbb.push_slot_always::<WIPOffset<_>>(EventTable::VT_TAGS, tags);
    fbb.push_slot_always::<WIPOffset<_>>(EventTable::VT_RESOURCES, resources);
    fbb.push_slot_always::<WIPOffset<_>>(EventTable::VT_TIMEZONE, timezone);
    fbb.push_slot::<i32>(EventTable::VT_ATTENDEES, event.attendees, 0);
    fbb.push_slot::<i32>(EventTable::VT_PRIORITY, event.priority, 0);
    fbb.push_slot::<bool>(EventTable::VT_ALL_DAY, event.all_day, false);
    let end = fbb.end_table(start);
    WIPOffset::new(end.value())
}

fn create_string_vector<'fbb>(
    fbb: &mut FlatBufferBuilder<'fbb>,
    values: &[String],
) -> WIPOffset<Vector<'fbb, ForwardsUOffset<&'fbb str>>> {
    let offsets: Vec<_> = values.iter().map(|v| fbb.create_string(v)).collect();
    fbb.create_vector(&offsets)
}

fn event_from_table(table: EventTable<'_>) -> Result<CalendarEvent, CodecError> {
    Ok(CalendarEvent {
        id: table.id(),
        title: required(table.title(), "title")?.to_string(),
        location: required(table.location(), "location")?.to_string(),
        organizer: required(table.organizer(), "organizer")?.to_string(),
        start_time: table.start_time(),
        end_time: table.end_time(),
        attendees: table.attendees(),
        all_day: table.all_day(),
        description: required(table.description(), "description")?.to_string(),
        tags: string_vector(table.tags()),
        resources: string_vector(table.resources()),
        created_at: table.created_at(),
        updated_at: table.updated_at(),
        priority: table.priority(),
        timezone: required(table.timezone(), "timezone")?.to_string(),
    })
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, CodecError> {
    value.ok_or_else(|| CodecError::decode(Format::FlatBuffers, format!("missing field '{}'", field)))
}

fn string_vector<'a>(vector: Option<Vector<'a, ForwardsUOffset<&'a str>>>) -> Vec<String> {
    vector
        .map(|v| v.iter().map(str::to_string).collect())
        .unwrap_or_default()
}

struct EventTable<'a> {
    _tab: Table<'a>,
}

impl<'a> Follow<'a> for EventTable<'a> {
    type Inner = EventTable<'a>;

    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: Table::new(buf, loc),
        }
    }
}

impl<'a> EventTable<'a> {
    const VT_ID: VOffsetT = 4;
    const VT_TITLE: VOffsetT = 6;
    const VT_LOCATION: VOffsetT = 8;
    const VT_ORGANIZER: VOffsetT = 10;
    const VT_START_TIME: VOffsetT = 12;
    const VT_END_TIME: VOffsetT = 14;
    const VT_ATTENDEES: VOffsetT = 16;
    const VT_ALL_DAY: VOffsetT = 18;
    const VT_DESCRIPTION: VOffsetT = 20;
    const VT_TAGS: VOffsetT = 22;
    const VT_RESOURCES: VOffsetT = 24;
    const VT_CREATED_AT: VOffsetT = 26;
    const VT_UPDATED_AT: VOffsetT = 28;
    const VT_PRIORITY: VOffsetT = 30;
    const VT_TIMEZONE: VOffsetT = 32;

    #[inline]
    fn id(&self) -> i64 {
        unsafe { self._tab.get::<i64>(Self::VT_ID, Some(0)) }.unwrap_or_default()
    }
    #[inline]
    fn title(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_TITLE, None) }
    }
    #[inline]
    fn location(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_LOCATION, None) }
    }
    #[inline]
    fn organizer(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_ORGANIZER, None) }
    }
    #[inline]
    fn start_time(&self) -> i64 {
        unsafe { self._tab.get::<i64>(Self::VT_START_TIME, Some(0)) }.unwrap_or_default()
    }
    #[inline]
    fn end_time(&self) -> i64 {
        unsafe { self._tab.get::<i64>(Self::VT_END_TIME, Some(0)) }.unwrap_or_default()
    }
    #[inline]
    fn attendees(&self) -> i32 {
        unsafe { self._tab.get::<i32>(Self::VT_ATTENDEES, Some(0)) }.unwrap_or_default()
    }
    #[inline]
    fn all_day(&self) -> bool {
        unsafe { self._tab.get::<bool>(Self::VT_ALL_DAY, Some(false)) }.unwrap_or_default()
    }
    #[inline]
    fn description(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_DESCRIPTION, None) }
    }
    #[inline]
    fn tags(&self) -> Option<Vector<'a, ForwardsUOffset<&'a str>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<&'a str>>>>(Self::VT_TAGS, None)
        }
    }
    #[inline]
    fn resources(&self) -> Option<Vector<'a, ForwardsUOffset<&'a str>>> {
        unsafe {
            self._tab.get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<&'a str>>>>(
                Self::VT_RESOURCES,
                None,
            )
        }
    }
    #[inline]
    fn created_at(&self) -> i64 {
        unsafe { self._tab.get::<i64>(Self::VT_CREATED_AT, Some(0)) }.unwrap_or_default()
    }
    #[inline]
    fn updated_at(&self) -> i64 {
        unsafe { self._tab.get::<i64>(Self::VT_UPDATED_AT, Some(0)) }.unwrap_or_default()
    }
    #[inline]
    fn priority(&self) -> i32 {
        unsafe { self._tab.get::<i32>(Self::VT_PRIORITY, Some(0)) }.unwrap_or_default()
    }
    #[inline]
    fn timezone(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_TIMEZONE, None) }
    }
}

impl Verifiable for EventTable<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<i64>("id", Self::VT_ID, false)?
            .visit_field::<ForwardsUOffset<&str>>("title", Self::VT_TITLE, true)?
            .visit_field::<ForwardsUOffset<&str>>("location", Self::VT_LOCATION, true)?
            .visit_field::<ForwardsUOffset<&str>>("organizer", Self::VT_ORGANIZER, true)?
            .visit_field::<i64>("start_time", Self::VT_START_TIME, false)?
            .visit_field::<i64>("end_time", Self::VT_END_TIME, false)?
            .visit_field::<i32>("attendees", Self::VT_ATTENDEES, false)?
            .visit_field::<bool>("all_day", Self::VT_ALL_DAY, false)?
            .visit_field::<ForwardsUOffset<&str>>("description", Self::VT_DESCRIPTION, true)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<&str>>>>(
                "tags",
                Self::VT_TAGS,
                true,
            )?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<&str>>>>(
                "resources",
                Self::VT_RESOURCES,
                true,
            )?
            .visit_field::<i64>("created_at", Self::VT_CREATED_AT, false)?
            .visit_field::<i64>("updated_at", Self::VT_UPDATED_AT, false)?
            .visit_field::<i32>("priority", Self::VT_PRIORITY, false)?
            .visit_field::<ForwardsUOffset<&str>>("timezone", Self::VT_TIMEZONE, true)?
            .finish();
        Ok(())
    }
}

struct EventListTable<'a> {
    _tab: Table<'a>,
}

impl<'a> Follow<'a> for EventListTable<'a> {
    type Inner = EventListTable<'a>;

    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: Table::new(buf, loc),
        }
    }
}

impl<'a> EventListTable<'a> {
    const VT_EVENTS: VOffsetT = 4;

    #[inline]
    fn events(&self) -> Option<Vector<'a, ForwardsUOffset<EventTable<'a>>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<EventTable<'a>>>>>(
                    Self::VT_EVENTS,
                    None,
                )
        }
    }
}

impl Verifiable for EventListTable<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<EventTable>>>>(
                "events",
                Self::VT_EVENTS,
                false,
            )?
            .finish();
        Ok(())
    }
}
