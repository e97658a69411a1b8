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

//! Apache Arrow IPC stream codec.
//!
//! Records are pivoted into one column per field and written as a single
//! record batch. Decoding accepts any number of batches (at least one) but
//! insists on every column being present, non-null and of the expected type.
//!
//! Message framing is checked before the stream reader sees the payload: the
//! reader sizes its buffers from the declared lengths, so a corrupted length
//! must be rejected up front.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Int32Array, Int64Array, ListArray, ListBuilder, StringArray,
    StringBuilder,
};
use arrow::datatypes::{Field, Schema};
use arrow::ipc;
use arrow::ipc::reader::StreamReader;
use arrow::ipc::writer::StreamWriter;
use arrow::record_batch::RecordBatch;
use wirebench_core::{guard_decode, CalendarEvent, Codec, CodecError, Format};

const CONTINUATION_MARKER: i32 = -1;

/// Column-oriented Arrow IPC stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowCodec;

impl Codec for ArrowCodec {
    fn format(&self) -> Format {
        Format::Arrow
    }

    fn encode(&self, records: &[CalendarEvent]) -> Result<Vec<u8>, CodecError> {
        let batch = to_record_batch(records)?;

        let mut buf = Vec::new();
        {
            let mut writer =
                StreamWriter::try_new(&mut buf, &batch.schema()).map_err(encode_error)?;
            writer.write(&batch).map_err(encode_error)?;
            writer.finish().map_err(encode_error)?;
        }
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<CalendarEvent>, CodecError> {
        guard_decode(Format::Arrow, || {
            check_framing(bytes)?;
            let reader = StreamReader::try_new(bytes, None).map_err(decode_error)?;

            let mut events = Vec::new();
            for batch in reader {
                let batch = batch.map_err(decode_error)?;
                read_batch(&batch, &mut events)?;
            }
            Ok(events)
        })
    }
}

/// Walks the IPC message frames without materializing any of them.
///
/// Every declared metadata, body and buffer length must fit in the payload,
/// the stream must close with the end-of-stream marker, and it must carry at
/// least one record batch.
fn check_framing(bytes: &[u8]) -> Result<(), CodecError> {
    let mut offset = 0;
    let mut batches = 0;

    loop {
        let mut len = read_i32(bytes, offset)?;
        offset += 4;
        if len == CONTINUATION_MARKER {
            len = read_i32(bytes, offset)?;
            offset += 4;
        }
        if len == 0 {
            break;
        }
        let len = usize::try_from(len)
            .map_err(|_| decode_error(format!("negative message length {}", len)))?;
        let metadata = bytes
            .get(offset..)
            .and_then(|rest| rest.get(..len))
            .ok_or_else(|| decode_error("message metadata runs past the payload"))?;
        offset += len;

        let message = ipc::root_as_message(metadata).map_err(decode_error)?;
        let body_len = usize::try_from(message.bodyLength())
            .ok()
            .filter(|body| *body <= bytes.len() - offset)
            .ok_or_else(|| {
                decode_error(format!(
                    "message body of {} bytes runs past the payload",
                    message.bodyLength()
                ))
            })?;

        if let Some(batch) = message.header_as_record_batch() {
            check_batch(&batch, body_len)?;
            batches += 1;
        } else if let Some(data) = message
            .header_as_dictionary_batch()
            .and_then(|dictionary| dictionary.data())
        {
            check_batch(&data, body_len)?;
        }
        offset += body_len;
    }

    if batches == 0 {
        return Err(decode_error("stream holds no record batch"));
    }
    Ok(())
}

// Row counts are capped at one value per body bit.
fn check_batch(batch: &ipc::RecordBatch<'_>, body_len: usize) -> Result<(), CodecError> {
    let body = body_len as i64;
    let max_rows = body.saturating_mul(8);

    if !(0..=max_rows).contains(&batch.length()) {
        return Err(decode_error(format!(
            "record batch declares {} rows for a {} byte body",
            batch.length(),
            body_len
        )));
    }
    if let Some(nodes) = batch.nodes() {
        for node in nodes.iter() {
            if !(0..=max_rows).contains(&node.length())
                || !(0..=node.length()).contains(&node.null_count())
            {
                return Err(decode_error("field node length out of range"));
            }
        }
    }
    if let Some(buffers) = batch.buffers() {
        for buffer in buffers.iter() {
            let fits = buffer.offset() >= 0
                && buffer.length() >= 0
                && buffer
                    .offset()
                    .checked_add(buffer.length())
                    .is_some_and(|end| end <= body);
            if !fits {
                return Err(decode_error("buffer runs past the message body"));
            }
        }
    }
    Ok(())
}

fn read_i32(bytes: &[u8], offset: usize) -> Result<i32, CodecError> {
    bytes
        .get(offset..)
        .and_then(|rest| rest.get(..4))
        .and_then(|word| <[u8; 4]>::try_from(word).ok())
        .map(i32::from_le_bytes)
        .ok_or_else(|| decode_error("truncated stream: missing end-of-stream marker"))
}

fn to_record_batch(records: &[CalendarEvent]) -> Result<RecordBatch, CodecError> {
    let columns: Vec<(&str, ArrayRef)> = vec![
        ("id", int64s(records.iter().map(|r| r.id))),
        ("title", strings(records.iter().map(|r| r.title.as_str()))),
        ("location", strings(records.iter().map(|r| r.location.as_str()))),
        ("organizer", strings(records.iter().map(|r| r.organizer.as_str()))),
        ("startTime", int64s(records.iter().map(|r| r.start_time))),
        ("endTime", int64s(records.iter().map(|r| r.end_time))),
        ("attendees", int32s(records.iter().map(|r| r.attendees))),
        ("allDay", bools(records.iter().map(|r| r.all_day))),
        ("description", strings(records.iter().map(|r| r.description.as_str()))),
        ("tags", string_lists(records.iter().map(|r| r.tags.as_slice()))),
        ("resources", string_lists(records.iter().map(|r| r.resources.as_slice()))),
        ("createdAt", int64s(records.iter().map(|r| r.created_at))),
        ("updatedAt", int64s(records.iter().map(|r| r.updated_at))),
        ("priority", int32s(records.iter().map(|r| r.priority))),
        ("timezone", strings(records.iter().map(|r| r.timezone.as_str()))),
    ];

    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), false))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let arrays = columns.into_iter().map(|(_, array)| array).collect();

    RecordBatch::try_new(schema, arrays).map_err(encode_error)
}

fn int64s(values: impl Iterator<Item = i64>) -> ArrayRef {
    Arc::new(Int64Array::from_iter_values(values))
}

fn int32s(values: impl Iterator<Item = i32>) -> ArrayRef {
    Arc::new(Int32Array::from_iter_values(values))
}

fn bools(values: impl Iterator<Item = bool>) -> ArrayRef {
    Arc::new(values.map(Some).collect::<BooleanArray>())
}

fn strings<'a>(values: impl Iterator<Item = &'a str>) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(values))
}

fn string_lists<'a>(lists: impl Iterator<Item = &'a [String]>) -> ArrayRef {
    let mut builder = ListBuilder::new(StringBuilder::new());
    for values in lists {
        for value in values {
            builder.values().append_value(value);
        }
        builder.append(true);
    }
    Arc::new(builder.finish())
}

fn read_batch(batch: &RecordBatch, out: &mut Vec<CalendarEvent>) -> Result<(), CodecError> {
    let id = column::<Int64Array>(batch, "id")?;
    let title = column::<StringArray>(batch, "title")?;
    let location = column::<StringArray>(batch, "location")?;
    let organizer = column::<StringArray>(batch, "organizer")?;
    let start_time = column::<Int64Array>(batch, "startTime")?;
    let end_time = column::<Int64Array>(batch, "endTime")?;
    let attendees = column::<Int32Array>(batch, "attendees")?;
    let all_day = column::<BooleanArray>(batch, "allDay")?;
    let description = column::<StringArray>(batch, "description")?;
    let tags = column::<ListArray>(batch, "tags")?;
    let resources = column::<ListArray>(batch, "resources")?;
    let created_at = column::<Int64Array>(batch, "createdAt")?;
    let updated_at = column::<Int64Array>(batch, "updatedAt")?;
    let priority = column::<Int32Array>(batch, "priority")?;
    let timezone = column::<StringArray>(batch, "timezone")?;

    out.reserve(batch.num_rows());
    for row in 0..batch.num_rows() {
        out.push(CalendarEvent {
            id: id.value(row),
            title: title.value(row).to_string(),
            location: location.value(row).to_string(),
            organizer: organizer.value(row).to_string(),
            start_time: start_time.value(row),
            end_time: end_time.value(row),
            attendees: attendees.value(row),
            all_day: all_day.value(row),
            description: description.value(row).to_string(),
            tags: list_values(tags, row, "tags")?,
            resources: list_values(resources, row, "resources")?,
            created_at: created_at.value(row),
            updated_at: updated_at.value(row),
            priority: priority.value(row),
            timezone: timezone.value(row).to_string(),
        });
    }
    Ok(())
}

fn column<'b, T: Array + 'static>(batch: &'b RecordBatch, name: &str) -> Result<&'b T, CodecError> {
    let array = batch
        .column_by_name(name)
        .ok_or_else(|| decode_error(format!("missing column '{}'", name)))?;
    if array.null_count() > 0 {
        return Err(decode_error(format!("column '{}' contains nulls", name)));
    }
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        decode_error(format!(
            "column '{}' has unexpected type {}",
            name,
            array.data_type()
        ))
    })
}

fn list_values(list: &ListArray, row: usize, name: &str) -> Result<Vec<String>, CodecError> {
    let values = list.value(row);
    let strings = values
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| decode_error(format!("column '{}' is not a list of strings", name)))?;
    strings
        .iter()
        .map(|value| {
            value
                .map(str::to_string)
                .ok_or_else(|| decode_error(format!("column '{}' contains a null element", name)))
        })
        .collect()
}

fn encode_error(e: impl ToString) -> CodecError {
    CodecError::encode(Format::Arrow, e)
}

fn decode_error(e: impl ToString) -> CodecError {
    CodecError::decode(Format::Arrow, e)
}
