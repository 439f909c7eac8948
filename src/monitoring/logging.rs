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

//! Logging setup for the harness binaries. The library only emits events.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

/// Logging errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggingError {
    /// Level string not recognised.
    #[error("unknown log level {0:?}")]
    BadLevel(String),
    /// Format string not recognised.
    #[error("unknown log format {0:?}")]
    BadFormat(String),
}

/// Output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human readable.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, LoggingError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggingError::BadFormat(s.to_string())),
        }
    }
}

/// Logging configuration (`[log]` table).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// Maximum level: trace, debug, info, warn or error.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Compact,
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    /// Parsed maximum level.
    pub fn max_level(&self) -> Result<Level, LoggingError> {
        Level::from_str(self.level.trim()).map_err(|_| LoggingError::BadLevel(self.level.clone()))
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(cfg: &LogConfig) -> Result<(), LoggingError> {
    let level = cfg.max_level()?;
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .with_writer(std::io::stderr);
    let _ = match cfg.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_case_insensitively() {
        let mut cfg = LogConfig::default();
        assert_eq!(cfg.max_level(), Ok(Level::INFO));
        cfg.level = "DEBUG".into();
        assert_eq!(cfg.max_level(), Ok(Level::DEBUG));
        cfg.level = "loud".into();
        assert_eq!(cfg.max_level(), Err(LoggingError::BadLevel("loud".into())));
    }

    #[test]
    fn format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("compact".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert_eq!(
            "pretty".parse::<LogFormat>(),
            Err(LoggingError::BadFormat("pretty".into()))
        );
    }

    #[test]
    fn init_twice_is_harmless() {
        let cfg = LogConfig::default();
        assert!(init(&cfg).is_ok());
        assert!(init(&cfg).is_ok());
    }
}
