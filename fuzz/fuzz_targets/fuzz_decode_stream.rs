// Copyright (c) 2026 Recfuzz
// Licensed under the Apache-2.0 License.

#![no_main]
#![forbid(unsafe_code)]

use libfuzzer_sys::fuzz_target;
use recfuzz::{decode_stream, parse, StreamEnd};

fuzz_target!(|data: &[u8]| {
    let mut stream = decode_stream(data);
    let mut last = 0usize;
    while let Some(rec) = stream.next() {
        let now = stream.offset();
        assert!(now > last, "cursor did not advance");
        assert!(now <= data.len());
        assert_eq!(now - last, rec.encoded_len());
        last = now;
    }
    if let Some(StreamEnd::EndMarker { offset }) = stream.end() {
        assert_eq!(data[*offset], 0xFF);
    }

    // parse agrees with a drained stream
    if data.len() >= 4 {
        let records = parse(data);
        assert_eq!(records.is_err(), stream.end().and_then(StreamEnd::error).is_some());
    }
});
