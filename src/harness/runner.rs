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

//! Harness driver.
//!
//! One [`Harness`] owns one target and one reusable input buffer. Each
//! entry reads at most `max_input_size` bytes from a file, hands them to the
//! target and resets. The fuzzer sees the integer status from
//! [`Harness::entry_status`]: `0` for success, `-1` otherwise.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::harness::config::HarnessConfig;
use crate::harness::target::FuzzTarget;

/// Status reported for a successful entry.
pub const STATUS_OK: i32 = 0;
/// Status reported for a failed entry.
pub const STATUS_FAILED: i32 = -1;

/// Harness errors.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Input file could not be opened or read.
    #[error("read input {path}: {source}")]
    Read {
        /// Input path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Input file was empty.
    #[error("empty input")]
    EmptyInput,
    /// Target initialisation failed.
    #[error("target init: {0}")]
    Init(String),
    /// Target rejected the input.
    #[error("target: {0}")]
    Target(String),
}

/// Drives a [`FuzzTarget`] over file inputs.
#[derive(Debug)]
pub struct Harness<T: FuzzTarget> {
    target: T,
    config: HarnessConfig,
    buffer: Vec<u8>,
    initialized: bool,
    iterations_run: u64,
}

impl<T: FuzzTarget> Harness<T> {
    /// Wrap `target`. The input buffer is allocated once here.
    pub fn new(target: T, config: HarnessConfig) -> Self {
        Self {
            buffer: Vec::with_capacity(config.max_input_size),
            target,
            config,
            initialized: false,
            iterations_run: 0,
        }
    }

    /// Borrow the target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Active configuration.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Entries that ran to completion, successful or not.
    pub fn iterations_run(&self) -> u64 {
        self.iterations_run
    }

    /// Run the target's init hook once.
    pub fn init(&mut self) -> Result<(), HarnessError> {
        if self.initialized {
            return Ok(());
        }
        self.target
            .init()
            .map_err(|e| HarnessError::Init(e.to_string()))?;
        self.initialized = true;
        info!(target_name = T::NAME, max_input = self.config.max_input_size, "harness initialized");
        Ok(())
    }

    /// Read one input file and run the target on it.
    pub fn entry(&mut self, path: &Path) -> Result<(), HarnessError> {
        self.init()?;
        let res = self.load(path).and_then(|()| {
            self.target
                .run(&self.buffer)
                .map_err(|e| HarnessError::Target(e.to_string()))
        });
        self.cleanup();
        self.iterations_run += 1;
        res
    }

    /// [`Harness::entry`] reduced to the fuzzer-visible status.
    pub fn entry_status(&mut self, path: &Path) -> i32 {
        match self.entry(path) {
            Ok(()) => STATUS_OK,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "entry failed");
                STATUS_FAILED
            }
        }
    }

    /// Persistent mode: re-run `path` up to `iterations` times, stopping at
    /// the first failure. Returns the last status.
    pub fn run_persistent(&mut self, path: &Path) -> i32 {
        let mut status = STATUS_OK;
        for i in 0..self.config.iterations {
            status = self.entry_status(path);
            if status != STATUS_OK {
                warn!(iteration = i, status, "persistent loop stopped");
                break;
            }
        }
        status
    }

    /// Run the target's shutdown hook and return the target.
    pub fn shutdown(mut self) -> T {
        if self.initialized {
            self.target.shutdown();
        }
        info!(target_name = T::NAME, iterations = self.iterations_run, "harness shutdown");
        self.target
    }

    fn load(&mut self, path: &Path) -> Result<(), HarnessError> {
        let read_err = |source| HarnessError::Read {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(read_err)?;
        self.buffer.clear();
        // Bytes past max_input_size are ignored.
        file.take(self.config.max_input_size as u64)
            .read_to_end(&mut self.buffer)
            .map_err(read_err)?;
        if self.buffer.is_empty() {
            return Err(HarnessError::EmptyInput);
        }
        debug!(path = %path.display(), len = self.buffer.len(), "input loaded");
        Ok(())
    }

    fn cleanup(&mut self) {
        self.target.cleanup();
        self.buffer.fill(0);
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::fs;

    #[derive(Default)]
    struct Probe {
        inits: u32,
        runs: Vec<Vec<u8>>,
        cleanups: u32,
        shutdowns: u32,
    }

    impl FuzzTarget for Probe {
        const NAME: &'static str = "probe";
        type Error = Infallible;

        fn init(&mut self) -> Result<(), Infallible> {
            self.inits += 1;
            Ok(())
        }

        fn run(&mut self, input: &[u8]) -> Result<(), Infallible> {
            self.runs.push(input.to_vec());
            Ok(())
        }

        fn cleanup(&mut self) {
            self.cleanups += 1;
        }

        fn shutdown(&mut self) {
            self.shutdowns += 1;
        }
    }

    #[test]
    fn lifecycle_hooks_run_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input.bin");
        fs::write(&path, b"hello").expect("write");

        let mut h = Harness::new(Probe::default(), HarnessConfig::default());
        assert_eq!(h.entry_status(&path), STATUS_OK);
        assert_eq!(h.entry_status(&path), STATUS_OK);
        assert_eq!(h.iterations_run(), 2);

        let probe = h.shutdown();
        assert_eq!(probe.inits, 1);
        assert_eq!(probe.runs, vec![b"hello".to_vec(), b"hello".to_vec()]);
        assert_eq!(probe.cleanups, 2);
        assert_eq!(probe.shutdowns, 1);
    }

    #[test]
    fn input_is_cut_at_max_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("big.bin");
        fs::write(&path, vec![7u8; 100]).expect("write");

        let cfg = HarnessConfig {
            max_input_size: 16,
            ..HarnessConfig::default()
        };
        let mut h = Harness::new(Probe::default(), cfg);
        h.entry(&path).expect("entry");
        assert_eq!(h.target().runs[0].len(), 16);
    }

    #[test]
    fn empty_and_missing_inputs_fail() {
        let dir = tempfile::tempdir().expect("tempdir");
        let empty = dir.path().join("empty.bin");
        fs::write(&empty, b"").expect("write");

        let mut h = Harness::new(Probe::default(), HarnessConfig::default());
        assert!(matches!(h.entry(&empty), Err(HarnessError::EmptyInput)));
        assert!(matches!(
            h.entry(&dir.path().join("missing.bin")),
            Err(HarnessError::Read { .. })
        ));
        assert_eq!(h.entry_status(&empty), STATUS_FAILED);
        // cleanup still runs after failed reads
        assert_eq!(h.target().cleanups, 3);
        assert!(h.target().runs.is_empty());
    }

    #[test]
    fn shutdown_skipped_when_never_initialized() {
        let h = Harness::new(Probe::default(), HarnessConfig::default());
        let probe = h.shutdown();
        assert_eq!(probe.shutdowns, 0);
    }

    #[test]
    fn persistent_loop_runs_configured_iterations() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input.bin");
        fs::write(&path, b"x").expect("write");

        let cfg = HarnessConfig {
            iterations: 5,
            ..HarnessConfig::default()
        };
        let mut h = Harness::new(Probe::default(), cfg);
        assert_eq!(h.run_persistent(&path), STATUS_OK);
        assert_eq!(h.iterations_run(), 5);
        assert_eq!(h.target().inits, 1);
    }
}
