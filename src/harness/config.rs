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

//! Harness configuration.
//!
//! ## Format (TOML, every key optional)
//!
//! ```text
//! max_input_size = 1024
//! iterations = 1
//! strict = false
//!
//! [log]
//! format = "compact"   # or "json"
//! level = "info"
//! ```
//!
//! Environment variables override the file: `RECFUZZ_MAX_INPUT`,
//! `RECFUZZ_ITERATIONS`, `RECFUZZ_STRICT`, `RECFUZZ_LOG_FORMAT`,
//! `RECFUZZ_LOG_LEVEL`. `RECFUZZ_CONFIG` names the file when no path is given.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::monitoring::logging::{LogConfig, LogFormat};

/// Default bytes read per input.
pub const DEFAULT_MAX_INPUT_SIZE: usize = 1024;
/// Hard upper bound on `max_input_size` (1 MiB).
pub const MAX_INPUT_SIZE_LIMIT: usize = 1024 * 1024;
/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "RECFUZZ_CONFIG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Cannot read config file.
    #[error("read config {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Cannot parse TOML.
    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
    /// An environment override could not be parsed.
    #[error("bad environment value for {key}")]
    BadEnv {
        /// Variable name.
        key: &'static str,
    },
}

/// Harness settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Bytes read from each input file; longer files are cut here.
    pub max_input_size: usize,
    /// Entries per process in persistent mode.
    pub iterations: u32,
    /// Treat a stream that stopped on a bad record, or an input shorter
    /// than four bytes, as a failure.
    pub strict: bool,
    /// Logging.
    pub log: LogConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            iterations: 1,
            strict: false,
            log: LogConfig::default(),
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl HarnessConfig {
    /// Parse TOML text and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: HarnessConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    /// Resolve the effective config: `path`, else `RECFUZZ_CONFIG`, else
    /// defaults; then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = env_var(CONFIG_ENV).map(PathBuf::from);
        let mut cfg = match path.or(from_env.as_deref()) {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        cfg.apply_overrides(env_var)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `RECFUZZ_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("RECFUZZ_MAX_INPUT") {
            self.max_input_size = v.trim().parse().map_err(|_| ConfigError::BadEnv {
                key: "RECFUZZ_MAX_INPUT",
            })?;
        }
        if let Some(v) = lookup("RECFUZZ_ITERATIONS") {
            self.iterations = v.trim().parse().map_err(|_| ConfigError::BadEnv {
                key: "RECFUZZ_ITERATIONS",
            })?;
        }
        if let Some(v) = lookup("RECFUZZ_STRICT") {
            self.strict = parse_bool(&v).ok_or(ConfigError::BadEnv {
                key: "RECFUZZ_STRICT",
            })?;
        }
        if let Some(v) = lookup("RECFUZZ_LOG_FORMAT") {
            self.log.format = v.parse::<LogFormat>().map_err(|_| ConfigError::BadEnv {
                key: "RECFUZZ_LOG_FORMAT",
            })?;
        }
        if let Some(v) = lookup("RECFUZZ_LOG_LEVEL") {
            self.log.level = v;
        }
        Ok(())
    }

    /// Range checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_size == 0 {
            return Err(ConfigError::Invalid("max_input_size must be > 0"));
        }
        if self.max_input_size > MAX_INPUT_SIZE_LIMIT {
            return Err(ConfigError::Invalid("max_input_size exceeds 1 MiB"));
        }
        if self.iterations == 0 {
            return Err(ConfigError::Invalid("iterations must be > 0"));
        }
        if self.log.max_level().is_err() {
            return Err(ConfigError::Invalid("unknown log level"));
        }
        Ok(())
    }
}
