// Copyright (c) 2026 Recfuzz
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! Record stream decoder.
//!
//! ## Wire layout (one record)
//!
//! ```text
//! name_len(1) || name(name_len) || value(4, i32 LE) || desc_len(1) || desc(desc_len)
//! ```
//!
//! A stream is zero or more records, optionally terminated by a single
//! [`END_MARKER`] byte. Decoding stops at the marker, at the end of the
//! buffer, or at the first record that fails a structural check.
//!
//! ## Guarantees
//! - No read past `buffer.len()`: every field is sliced with `get`.
//! - Oversized length prefixes are rejected, never truncated.
//! - The consumed byte count is computed once, with checked arithmetic.

use std::iter::FusedIterator;

use thiserror::Error;

use crate::core::record::{Description, Field, Name, Record, DESCRIPTION_CAPACITY, NAME_CAPACITY};

/// Byte that terminates a record stream when found at a record boundary.
pub const END_MARKER: u8 = 0xFF;
/// Shortest buffer [`parse`] accepts.
pub const MIN_INPUT_LEN: usize = 4;
/// Size of the `value` field.
pub const VALUE_LEN: usize = 4;
/// Bytes taken by a record with empty name and description.
pub const MIN_RECORD_LEN: usize = 1 + VALUE_LEN + 1;

/// Record decoding errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not enough bytes left for a required field.
    #[error("truncated input at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedInput {
        /// Offset where the missing field starts.
        offset: usize,
        /// Bytes required from `offset`.
        needed: usize,
        /// Bytes remaining from `offset`.
        available: usize,
    },
    /// A length prefix does not fit the destination field.
    #[error("{field} length {len} exceeds capacity {capacity}")]
    FieldTooLarge {
        /// Field the prefix belongs to.
        field: Field,
        /// Declared length.
        len: usize,
        /// Field capacity (including the reserved terminator byte).
        capacity: usize,
    },
    /// Offset arithmetic overflowed.
    #[error("malformed length at offset {offset}")]
    MalformedLength {
        /// Offset where the overflowing computation started.
        offset: usize,
    },
}

/// Why a [`RecordStream`] stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamEnd {
    /// Cursor reached the end of the buffer.
    Exhausted,
    /// End marker found at `offset` (not consumed).
    EndMarker {
        /// Marker position.
        offset: usize,
    },
    /// A record failed to decode; nothing from it was yielded.
    Failed(ParseError),
}

impl StreamEnd {
    /// The decoding error, if the stream stopped on one.
    pub fn error(&self) -> Option<&ParseError> {
        match self {
            StreamEnd::Failed(e) => Some(e),
            _ => None,
        }
    }
}

fn advance(at: usize, by: usize) -> Result<usize, ParseError> {
    at.checked_add(by)
        .ok_or(ParseError::MalformedLength { offset: at })
}

fn take(buffer: &[u8], at: usize, len: usize) -> Result<&[u8], ParseError> {
    let end = advance(at, len)?;
    buffer.get(at..end).ok_or(ParseError::TruncatedInput {
        offset: at,
        needed: len,
        available: buffer.len().saturating_sub(at),
    })
}

/// Decode the record starting at `offset`.
///
/// Returns the record and the exact number of bytes it occupies, which the
/// caller adds to its cursor.
///
/// Length prefixes are checked against field capacity before the buffer
/// length, so an oversized prefix is reported as
/// [`ParseError::FieldTooLarge`] whatever follows it.
pub fn decode_one(buffer: &[u8], offset: usize) -> Result<(Record, usize), ParseError> {
    let name_len = usize::from(take(buffer, offset, 1)?[0]);
    if name_len >= NAME_CAPACITY {
        return Err(ParseError::FieldTooLarge {
            field: Field::Name,
            len: name_len,
            capacity: NAME_CAPACITY,
        });
    }
    let name_at = advance(offset, 1)?;
    let name = take(buffer, name_at, name_len)?;

    // value and desc_len are read together.
    let value_at = advance(name_at, name_len)?;
    let fixed = take(buffer, value_at, VALUE_LEN + 1)?;
    let value = i32::from_le_bytes([fixed[0], fixed[1], fixed[2], fixed[3]]);
    let desc_len = usize::from(fixed[VALUE_LEN]);
    if desc_len >= DESCRIPTION_CAPACITY {
        return Err(ParseError::FieldTooLarge {
            field: Field::Description,
            len: desc_len,
            capacity: DESCRIPTION_CAPACITY,
        });
    }
    let desc_at = advance(value_at, VALUE_LEN + 1)?;
    let description = take(buffer, desc_at, desc_len)?;

    let consumed = advance(desc_at, desc_len)? - offset;
    let record = Record {
        name: Name::from_bytes(name)?,
        value,
        description: Description::from_bytes(description)?,
    };
    Ok((record, consumed))
}

/// Lazy record sequence over an immutable buffer.
///
/// Holds only a cursor; calling [`decode_stream`] again on the same buffer
/// restarts from the first record.
#[derive(Clone, Debug)]
pub struct RecordStream<'a> {
    buffer: &'a [u8],
    cursor: usize,
    decoded: usize,
    end: Option<StreamEnd>,
}

impl<'a> RecordStream<'a> {
    /// Current cursor (start of the next record).
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Records yielded so far.
    pub fn decoded(&self) -> usize {
        self.decoded
    }

    /// Why the stream stopped, or `None` while it can still yield.
    pub fn end(&self) -> Option<&StreamEnd> {
        self.end.as_ref()
    }
}

impl<'a> Iterator for RecordStream<'a> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.end.is_some() {
            return None;
        }
        match self.buffer.get(self.cursor) {
            None => {
                self.end = Some(StreamEnd::Exhausted);
                return None;
            }
            Some(&END_MARKER) => {
                self.end = Some(StreamEnd::EndMarker {
                    offset: self.cursor,
                });
                return None;
            }
            Some(_) => {}
        }
        match decode_one(self.buffer, self.cursor) {
            Ok((record, consumed)) => {
                // decode_one only succeeds when cursor + consumed <= len.
                self.cursor += consumed;
                self.decoded += 1;
                Some(record)
            }
            Err(e) => {
                self.end = Some(StreamEnd::Failed(e));
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.end.is_some() {
            return (0, Some(0));
        }
        let remaining = self.buffer.len().saturating_sub(self.cursor);
        (0, Some(remaining / MIN_RECORD_LEN))
    }
}

impl FusedIterator for RecordStream<'_> {}

/// Start decoding records from the beginning of `buffer`.
pub fn decode_stream(buffer: &[u8]) -> RecordStream<'_> {
    RecordStream {
        buffer,
        cursor: 0,
        decoded: 0,
        end: None,
    }
}

/// Decode every record in `buffer`.
///
/// Buffers shorter than [`MIN_INPUT_LEN`] are rejected as truncated. The
/// stream ending at the buffer end or at an end marker is success; stopping
/// on a bad record returns that record's error.
pub fn parse(buffer: &[u8]) -> Result<Vec<Record>, ParseError> {
    if buffer.len() < MIN_INPUT_LEN {
        return Err(ParseError::TruncatedInput {
            offset: 0,
            needed: MIN_INPUT_LEN,
            available: buffer.len(),
        });
    }
    let mut stream = decode_stream(buffer);
    let records: Vec<Record> = stream.by_ref().collect();
    match stream.end().and_then(StreamEnd::error) {
        Some(e) => Err(e.clone()),
        None => Ok(records),
    }
}
