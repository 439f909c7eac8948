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

use anyhow::Result;
use recfuzz::core::encode::encode_stream;
use recfuzz::core::parser::END_MARKER;
use recfuzz::Record;
use std::path::PathBuf;

fn seeds() -> Result<Vec<(&'static str, Vec<u8>)>> {
    let single = Record::new("abc", 1, "")?;
    let many = [
        Record::new("alpha", 10, "first record")?,
        Record::new("beta", -20, "second record")?,
        Record::new("", 0, "")?,
    ];
    let widest = Record::new([b'n'; 63], i32::MAX, [b'd'; 255])?;

    let mut oversized_name = vec![0x40];
    oversized_name.extend_from_slice(&[b'A'; 63]);

    Ok(vec![
        ("single.bin", encode_stream([&single], false)),
        ("many_terminated.bin", encode_stream(&many, true)),
        ("widest.bin", encode_stream([&widest], true)),
        ("end_marker.bin", vec![END_MARKER]),
        ("oversized_name.bin", oversized_name),
    ])
}

fn main() -> Result<()> {
    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "corpus".to_string()));
    std::fs::create_dir_all(&out_dir)?;

    for (name, bytes) in seeds()? {
        std::fs::write(out_dir.join(name), &bytes)?;
        println!("{name} {}", hex::encode(&bytes));
    }
    Ok(())
}
