//! End-to-end coverage of the `lzkn1` binary's `-c`/`-d`/`-r` flag surface
//! and output-path derivation rules.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::tempdir;

fn lzkn1() -> Command {
    Command::cargo_bin("lzkn1").expect("binary builds")
}

#[test]
fn compress_defaults_to_dot_lzkn1_suffix() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("asset.bin");
    fs::write(&input, b"hello hello hello hello").unwrap();

    lzkn1().arg(&input).assert().success();

    let output = dir.path().join("asset.bin.lzkn1");
    assert!(output.exists());
    let bytes = fs::read(&output).unwrap();
    assert_eq!(bytes[0], 0);
    assert_eq!(bytes[1], 24);
}

#[test]
fn explicit_compress_flag_matches_default() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("asset.bin");
    fs::write(&input, b"abcabcabcabc").unwrap();
    let output = dir.path().join("out.bin");

    lzkn1()
        .args(["-c"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    assert!(output.exists());
}

#[test]
fn decompress_appends_dot_unc_suffix() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("asset.bin");
    fs::write(&input, b"roundtrip me please").unwrap();
    let compressed = dir.path().join("asset.bin.lzkn1");

    lzkn1()
        .arg(&input)
        .arg(&compressed)
        .assert()
        .success();

    lzkn1()
        .args(["-d"])
        .arg(&compressed)
        .assert()
        .success();

    let decompressed_path = dir.path().join("asset.bin.lzkn1.unc");
    let roundtripped = fs::read(&decompressed_path).unwrap();
    assert_eq!(roundtripped, b"roundtrip me please");
}

#[test]
fn recompress_overwrites_input_in_place() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("asset.bin");
    fs::write(&original, b"zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz").unwrap();
    let compressed = dir.path().join("asset.bin.lzkn1");

    lzkn1().arg(&original).arg(&compressed).assert().success();
    let before = fs::read(&compressed).unwrap();

    lzkn1()
        .args(["-r"])
        .arg(&compressed)
        .assert()
        .success();

    let after = fs::read(&compressed).unwrap();
    assert_eq!(before, after, "recompressing an already-optimal stream is stable");
}

#[test]
fn stats_flag_prints_a_summary_to_stderr() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("asset.bin");
    fs::write(&input, b"abababababababababababab").unwrap();

    lzkn1()
        .args(["-c", "--stats"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("mode1=").or(predicate::str::contains("mode2=")));
}

#[test]
fn conflicting_mode_flags_are_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("asset.bin");
    fs::write(&input, b"data").unwrap();

    lzkn1()
        .args(["-c", "-d"])
        .arg(&input)
        .assert()
        .failure();
}

#[test]
fn missing_input_file_reports_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.bin");

    lzkn1()
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn round_trips_a_multi_block_file_via_explicit_flags() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("big.bin");
    let mut f = fs::File::create(&input).unwrap();
    let mut content = Vec::new();
    for i in 0..5000u32 {
        content.push((i % 251) as u8);
    }
    f.write_all(&content).unwrap();
    drop(f);

    let compressed = dir.path().join("big.lzkn1");
    let decompressed = dir.path().join("big.out");

    lzkn1()
        .args(["-c"])
        .arg(&input)
        .arg(&compressed)
        .assert()
        .success();
    lzkn1()
        .args(["-d"])
        .arg(&compressed)
        .arg(&decompressed)
        .assert()
        .success();

    assert_eq!(fs::read(&decompressed).unwrap(), content);
}
