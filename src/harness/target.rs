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

//! Target seam: implement [`FuzzTarget`] to put your own code under the harness.

use tracing::debug;

use crate::core::parser::{decode_stream, ParseError, StreamEnd, MIN_INPUT_LEN};

/// Code driven by the harness, one input at a time.
///
/// `init` runs once before the first input, `run` once per input,
/// `cleanup` after every `run` (success or not) and `shutdown` once at exit.
pub trait FuzzTarget {
    /// Name used in log events.
    const NAME: &'static str;
    /// Error returned by the hooks.
    type Error: std::error::Error + Send + Sync + 'static;

    /// One-time setup.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Process one input.
    fn run(&mut self, input: &[u8]) -> Result<(), Self::Error>;

    /// Reset per-iteration state.
    fn cleanup(&mut self) {}

    /// Release global resources.
    fn shutdown(&mut self) {}
}

/// The record parser wired as a target.
#[derive(Clone, Debug, Default)]
pub struct RecordParserTarget {
    strict: bool,
    last_records: usize,
    total_records: u64,
}

impl RecordParserTarget {
    /// Non-strict mode succeeds whenever the stream stops, including on a
    /// bad record or an input shorter than [`MIN_INPUT_LEN`]; strict mode
    /// reports both as errors.
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            ..Self::default()
        }
    }

    /// Records decoded by the most recent `run`.
    pub fn last_records(&self) -> usize {
        self.last_records
    }

    /// Records decoded since construction.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }
}

impl FuzzTarget for RecordParserTarget {
    const NAME: &'static str = "record_parser";
    type Error = ParseError;

    fn run(&mut self, input: &[u8]) -> Result<(), ParseError> {
        if self.strict && input.len() < MIN_INPUT_LEN {
            return Err(ParseError::TruncatedInput {
                offset: 0,
                needed: MIN_INPUT_LEN,
                available: input.len(),
            });
        }
        let mut stream = decode_stream(input);
        for (idx, rec) in stream.by_ref().enumerate() {
            debug!(
                idx,
                name = %rec.name.to_string_lossy(),
                value = rec.value,
                desc = %rec.description.to_string_lossy(),
                "record"
            );
        }
        self.last_records = stream.decoded();
        self.total_records += stream.decoded() as u64;

        match stream.end() {
            Some(StreamEnd::Failed(e)) => {
                debug!(offset = stream.offset(), error = %e, "stream stopped on bad record");
                if self.strict {
                    return Err(e.clone());
                }
            }
            Some(end) => debug!(?end, records = self.last_records, "stream complete"),
            None => {}
        }
        Ok(())
    }

    fn cleanup(&mut self) {
        self.last_records = 0;
    }
}
