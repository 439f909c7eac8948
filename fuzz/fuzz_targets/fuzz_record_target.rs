// Copyright (c) 2026 Recfuzz
// Licensed under the Apache-2.0 License.

#![no_main]
#![forbid(unsafe_code)]

use libfuzzer_sys::fuzz_target;
use recfuzz::harness::{FuzzTarget, RecordParserTarget};

// In-process equivalent of `recfuzz @@`: the target sees the same bytes the
// harness would have read from a file.
fuzz_target!(|data: &[u8]| {
    let mut target = RecordParserTarget::new(true);
    let _ = target.run(&data[..data.len().min(1024)]);
    target.cleanup();
});
