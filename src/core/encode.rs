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
#![warn(missing_docs)]

//! Record wire encoding, the inverse of [`crate::core::parser::decode_one`].

use crate::core::parser::END_MARKER;
use crate::core::record::Record;

/// Append one record to `out`.
///
/// Field lengths are below their capacities by construction, so each fits
/// its one-byte prefix.
pub fn encode_record(record: &Record, out: &mut Vec<u8>) {
    out.reserve(record.encoded_len());
    push_prefixed(out, record.name.as_bytes());
    out.extend_from_slice(&record.value.to_le_bytes());
    push_prefixed(out, record.description.as_bytes());
}

/// Encode `records` back to back, with a trailing end marker when
/// `terminate` is set.
pub fn encode_stream<'a, I>(records: I, terminate: bool) -> Vec<u8>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut out = Vec::new();
    for r in records {
        encode_record(r, &mut out);
    }
    if terminate {
        out.push(END_MARKER);
    }
    out
}

fn push_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    // Capacities are at most 256, so len <= 255.
    #[allow(clippy::cast_possible_truncation)]
    out.push(bytes.len() as u8);
    out.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::{decode_stream, StreamEnd};

    #[test]
    fn matches_reference_layout() {
        let r = Record::new("abc", 1, "").unwrap();
        let mut out = Vec::new();
        encode_record(&r, &mut out);
        assert_eq!(out, vec![0x03, b'a', b'b', b'c', 0x01, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn terminated_stream_ends_on_marker() {
        let recs = vec![
            Record::new("one", 1, "first").unwrap(),
            Record::new("two", -2, "").unwrap(),
        ];
        let bytes = encode_stream(&recs, true);
        assert_eq!(bytes.last(), Some(&END_MARKER));

        let mut stream = decode_stream(&bytes);
        let decoded: Vec<Record> = stream.by_ref().collect();
        assert_eq!(decoded, recs);
        assert_eq!(
            stream.end(),
            Some(&StreamEnd::EndMarker {
                offset: bytes.len() - 1
            })
        );
    }
}
