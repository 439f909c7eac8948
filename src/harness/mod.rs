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

/// TOML configuration with environment overrides.
pub mod config;
/// Harness driver and lifecycle.
pub mod runner;
/// Target trait and the record parser target.
pub mod target;

pub use config::HarnessConfig;
pub use runner::{Harness, HarnessError, STATUS_FAILED, STATUS_OK};
pub use target::{FuzzTarget, RecordParserTarget};
