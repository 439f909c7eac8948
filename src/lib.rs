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

//! Recfuzz - a template for wiring target code into an external fuzzer.
//!
//! This repository provides:
//! - A bounds-checked binary record parser (the worked example target)
//! - A record encoder for building seed corpora
//! - A harness with init/run/cleanup/shutdown hooks and a bounded input buffer
//! - TOML configuration with environment overrides and structured logging

/// Core record model, decoder and encoder.
pub mod core;
/// Fuzzing harness template and the record parser wiring.
pub mod harness;
/// Observability (structured logging setup).
pub mod monitoring;

pub use crate::core::parser::{decode_one, decode_stream, parse, ParseError, RecordStream, StreamEnd};
pub use crate::core::record::Record;
