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


#![no_main]
#![forbid(unsafe_code)]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use recfuzz::core::encode::encode_record;
use recfuzz::core::record::{DESCRIPTION_CAPACITY, NAME_CAPACITY};
use recfuzz::decode_one;

#[derive(Clone, Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    offset: u16,
}

fuzz_target!(|inp: Input| {
    let offset = usize::from(inp.offset);
    if let Ok((rec, consumed)) = decode_one(&inp.data, offset) {
        assert!(offset + consumed <= inp.data.len());
        assert!(rec.name.len() < NAME_CAPACITY);
        assert!(rec.description.len() < DESCRIPTION_CAPACITY);

        // re-encoding reproduces the consumed bytes
        let mut out = Vec::new();
        encode_record(&rec, &mut out);
        assert_eq!(out.as_slice(), &inp.data[offset..offset + consumed]);
    }
});
