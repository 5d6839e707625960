use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use commitgram_core::ingest::{Compression, MalformedPolicy};
use commitgram_core::types::IngestError;
use commitgram_core::{run, RunConfig, RunError};
use serde_json::json;
use tempfile::TempDir;

const HEADER: &str =
    "author;first trigram;second trigram;third trigram;fourth trigram;fifth trigram\n";

fn push(login: &str, messages: &[&str]) -> String {
    let commits: Vec<_> = messages.iter().map(|m| json!({ "message": m })).collect();
    json!({
        "type": "PushEvent",
        "actor": { "login": login },
        "payload": { "commits": commits },
    })
    .to_string()
}

fn sample_lines() -> Vec<String> {
    vec![
        push("alice", &["Fix the build. Fix the build!"]),
        json!({ "type": "WatchEvent", "actor": { "login": "bob" } }).to_string(),
        push("bob", &["Update README.md\n\nAdd install steps."]),
        push("carol", &[]),
        push("alice", &["fix the build again"]),
    ]
}

fn write_plain(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

fn write_gzip(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut enc = flate2::write::GzEncoder::new(
        fs::File::create(&path).unwrap(),
        flate2::Compression::default(),
    );
    enc.write_all((lines.join("\n") + "\n").as_bytes()).unwrap();
    enc.finish().unwrap();
    path
}

fn write_bzip2(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut enc = bzip2::write::BzEncoder::new(
        fs::File::create(&path).unwrap(),
        bzip2::Compression::default(),
    );
    enc.write_all((lines.join("\n") + "\n").as_bytes()).unwrap();
    enc.finish().unwrap();
    path
}

fn run_to_string(input: PathBuf, output: PathBuf) -> String {
    run(&RunConfig::new(input, &output)).expect("run succeeds");
    fs::read_to_string(output).unwrap()
}

#[test]
fn profiles_sample_dump() {
    let dir = TempDir::new().unwrap();
    let input = write_plain(dir.path(), "events.jsonl", &sample_lines());
    let output = dir.path().join("top.csv");

    let report = run(&RunConfig::new(&input, &output)).unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(report.summary.records, 5);
    assert_eq!(report.summary.push_events, 4);
    assert_eq!(report.summary.skipped_events, 1);

    let expected = [
        HEADER,
        "alice;fix the build;the build fix;build fix the;the build again;\n",
        "bob;update readmemd add;readmemd add install;add install steps;;\n",
        "carol;;;;;\n",
    ]
    .concat();
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
    assert!(!dir.path().join("top.csv.tmp").exists());
}

#[test]
fn compressed_inputs_match_plain() {
    let dir = TempDir::new().unwrap();
    let lines = sample_lines();

    let plain = run_to_string(
        write_plain(dir.path(), "events.jsonl", &lines),
        dir.path().join("plain.csv"),
    );
    let gz = run_to_string(
        write_gzip(dir.path(), "events.jsonl.gz", &lines),
        dir.path().join("gz.csv"),
    );
    let bz = run_to_string(
        write_bzip2(dir.path(), "events.jsonl.bz2", &lines),
        dir.path().join("bz.csv"),
    );

    assert_eq!(plain, gz);
    assert_eq!(plain, bz);
}

#[test]
fn explicit_compression_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let input = write_gzip(dir.path(), "events.data", &sample_lines());
    let output = dir.path().join("top.csv");

    let config = RunConfig {
        compression: Compression::Gzip,
        ..RunConfig::new(&input, &output)
    };
    let report = run(&config).unwrap();
    assert_eq!(report.rows, 3);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = write_plain(dir.path(), "events.jsonl", &sample_lines());

    let first = run_to_string(input.clone(), dir.path().join("a.csv"));
    let second = run_to_string(input, dir.path().join("b.csv"));
    assert_eq!(first, second);
}

#[test]
fn empty_input_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.jsonl");
    fs::write(&input, "").unwrap();

    let out = run_to_string(input, dir.path().join("top.csv"));
    assert_eq!(out, HEADER);
}

#[test]
fn strict_run_fails_without_writing_output() {
    let dir = TempDir::new().unwrap();
    let mut lines = sample_lines();
    lines.insert(2, "{\"type\":\"PushEvent\",".to_owned());
    let input = write_plain(dir.path(), "events.jsonl", &lines);
    let output = dir.path().join("top.csv");

    let err = run(&RunConfig::new(&input, &output)).unwrap_err();
    match err {
        RunError::Ingest(ref e @ IngestError::Malformed { .. }) => assert_eq!(e.line(), Some(3)),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn skip_policy_continues_past_bad_lines() {
    let dir = TempDir::new().unwrap();
    let mut lines = sample_lines();
    lines.insert(2, "not json at all".to_owned());
    let input = write_plain(dir.path(), "events.jsonl", &lines);
    let output = dir.path().join("top.csv");

    let config = RunConfig {
        on_malformed: MalformedPolicy::Skip,
        ..RunConfig::new(&input, &output)
    };
    let report = run(&config).unwrap();

    assert_eq!(report.summary.malformed, 1);
    assert_eq!(report.rows, 3);
    assert!(fs::read_to_string(&output).unwrap().starts_with(HEADER));
}

#[test]
fn missing_input_is_an_open_error() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("top.csv");

    let err = run(&RunConfig::new(dir.path().join("missing.jsonl.bz2"), &output)).unwrap_err();
    assert!(matches!(err, RunError::Ingest(IngestError::Open { .. })));
    assert!(!output.exists());
}

#[test]
fn existing_output_is_replaced() {
    let dir = TempDir::new().unwrap();
    let input = write_plain(dir.path(), "events.jsonl", &sample_lines());
    let output = dir.path().join("top.csv");
    fs::write(&output, "stale contents that are longer than nothing\n").unwrap();

    let out = run_to_string(input, output);
    assert!(out.starts_with(HEADER));
    assert!(!out.contains("stale"));
}
