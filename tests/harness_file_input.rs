#![forbid(unsafe_code)]

use recfuzz::core::encode::encode_stream;
use recfuzz::harness::{
    Harness, HarnessConfig, HarnessError, RecordParserTarget, STATUS_FAILED, STATUS_OK,
};
use recfuzz::Record;
use std::fs;

fn write_input(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).expect("write");
    path
}

#[test]
fn valid_corpus_file_succeeds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let recs = vec![
        Record::new("first", 1, "one").expect("record"),
        Record::new("second", 2, "two").expect("record"),
    ];
    let path = write_input(&dir, "ok.bin", &encode_stream(&recs, true));

    let mut h = Harness::new(RecordParserTarget::new(true), HarnessConfig::default());
    assert_eq!(h.entry_status(&path), STATUS_OK);
    let target = h.shutdown();
    assert_eq!(target.total_records(), 2);
}

#[test]
fn bad_tail_depends_on_strictness() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut bytes = encode_stream(&[Record::new("abc", 1, "").expect("record")], false);
    bytes.push(0x40);
    let path = write_input(&dir, "tail.bin", &bytes);

    let mut lenient = Harness::new(RecordParserTarget::new(false), HarnessConfig::default());
    assert_eq!(lenient.entry_status(&path), STATUS_OK);

    let mut strict = Harness::new(RecordParserTarget::new(true), HarnessConfig::default());
    assert!(matches!(strict.entry(&path), Err(HarnessError::Target(_))));
    assert_eq!(strict.entry_status(&path), STATUS_FAILED);
}

#[test]
fn input_beyond_bound_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rec = Record::new("abc", 1, "").expect("record");
    let mut bytes = encode_stream(&[rec], false);
    // a second, truncated record that only appears past the read bound
    bytes.extend_from_slice(&[0x05, b'x']);
    let path = write_input(&dir, "bounded.bin", &bytes);

    let cfg = HarnessConfig {
        max_input_size: 9,
        strict: true,
        ..HarnessConfig::default()
    };
    let mut h = Harness::new(RecordParserTarget::new(true), cfg);
    assert_eq!(h.entry_status(&path), STATUS_OK);
    assert_eq!(h.shutdown().total_records(), 1);
}

#[test]
fn empty_file_fails_in_both_modes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let empty = write_input(&dir, "empty.bin", b"");

    for strict in [false, true] {
        let mut h = Harness::new(RecordParserTarget::new(strict), HarnessConfig::default());
        assert!(matches!(h.entry(&empty), Err(HarnessError::EmptyInput)));
        assert_eq!(h.entry_status(&empty), STATUS_FAILED);
        assert_eq!(h.iterations_run(), 2);
    }
}

#[test]
fn short_files_pass_only_when_permissive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let marker = write_input(&dir, "end_marker.bin", &[0xFF]);
    let short = write_input(&dir, "short.bin", &[0x00, 0x00, 0x00]);

    let mut lenient = Harness::new(RecordParserTarget::new(false), HarnessConfig::default());
    assert_eq!(lenient.entry_status(&marker), STATUS_OK);
    assert_eq!(lenient.entry_status(&short), STATUS_OK);
    assert_eq!(lenient.shutdown().total_records(), 0);

    let mut strict = Harness::new(RecordParserTarget::new(true), HarnessConfig::default());
    assert_eq!(strict.entry_status(&marker), STATUS_FAILED);
    assert!(matches!(strict.entry(&short), Err(HarnessError::Target(_))));
}

#[test]
fn config_file_drives_persistent_loop() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg_path = write_input(&dir, "recfuzz.toml", b"iterations = 3\nstrict = true\n");
    let input = write_input(&dir, "in.bin", &[0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);

    let cfg = HarnessConfig::from_file(&cfg_path).expect("config");
    let mut h = Harness::new(RecordParserTarget::new(cfg.strict), cfg);
    assert_eq!(h.run_persistent(&input), STATUS_OK);
    assert_eq!(h.iterations_run(), 3);
    assert_eq!(h.shutdown().total_records(), 3);
}
