//! Integration tests for the `hxmsg` command set.

use std::io::Write;

use clap::Parser;
use hexabitz_cli::{run, Cli, CliError};
use hexabitz_message::FrameError;

/// Parse and run a command line, returning its output lines.
fn run_args(args: &[&str]) -> Result<Vec<String>, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("hxmsg").chain(args.iter().copied()))
        .expect("arguments should parse");
    run(&cli)
}

// ============================================================================
// build / checksum / verify
// ============================================================================

#[test]
fn test_build_reference_frame() {
    let lines = run_args(&["build", "--dest", "2", "--src", "1", "--code", "1"]).unwrap();
    assert_eq!(lines, vec!["485A0402010001E3".to_string()]);
}

#[test]
fn test_build_with_hex_arguments() {
    let lines = run_args(&[
        "build", "-d", "0x02", "-s", "1", "-o", "0", "-c", "0x01AB", "-p", "0a",
    ])
    .unwrap();
    assert_eq!(lines, vec!["485A06020100AB010A1D".to_string()]);
}

#[test]
fn test_build_json() {
    let lines = run_args(&[
        "--format", "json", "build", "--dest", "2", "--src", "1", "--code", "1",
    ])
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["length"], 4);
    assert_eq!(value["checksum"], 0xE3);
}

#[test]
fn test_build_rejects_out_of_range_address() {
    let result = Cli::try_parse_from(["hxmsg", "build", "--dest", "300", "--src", "1", "--code", "1"]);
    assert!(result.is_err());
}

#[test]
fn test_checksum() {
    assert_eq!(run_args(&["checksum", "485A04020100 01"]).unwrap(), vec!["0xE3"]);
    assert_eq!(
        run_args(&["checksum", "--full", "485A0402010001"]).unwrap(),
        vec!["0x2C35A2E3"]
    );
    assert_eq!(run_args(&["checksum", ""]).unwrap(), vec!["0xFF"]);
}

#[test]
fn test_verify() {
    let lines = run_args(&["verify", "485A0402010001E3"]).unwrap();
    assert_eq!(
        lines,
        vec!["ok dest=2 src=1 options=0x00 code=0x0001 payload= checksum=0xE3"]
    );

    let lines = run_args(&["verify", "--wide", "485A06020100AB010A1D"]).unwrap();
    assert!(lines[0].contains("code=0x01AB payload=0A"));

    let lines = run_args(&["verify", "0X485A0402010001E3"]).unwrap();
    assert!(lines[0].starts_with("ok dest=2"));
}

#[test]
fn test_verify_reports_bad_checksum() {
    let err = run_args(&["verify", "485A0402010001E4"]).unwrap_err();
    assert!(matches!(
        err,
        CliError::Frame(FrameError::ChecksumMismatch {
            expected: 0xE3,
            actual: 0xE4
        })
    ));
}

#[test]
fn test_verify_reports_bad_hex() {
    let err = run_args(&["verify", "485G"]).unwrap_err();
    assert!(matches!(err, CliError::Hex(_)));
}

// ============================================================================
// batch
// ============================================================================

#[test]
fn test_batch_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        "defaults:\n  source: 1\nmessages:\n  - name: ping\n    destination: 2\n    code: 1\n  - destination: 2\n    code: 0x01AB\n    payload: \"0a\"\n"
    )
    .unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let lines = run_args(&["batch", path.as_str(), "--jobs", "2"]).unwrap();
    assert_eq!(
        lines,
        vec![
            "ping 485A0402010001E3".to_string(),
            "485A06020100AB010A1D".to_string(),
        ]
    );
}

#[test]
fn test_batch_json_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"defaults":{{"source":1}},"messages":[{{"destination":2,"code":1}}]}}"#
    )
    .unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let lines = run_args(&["--format", "json", "batch", path.as_str()]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["frame"], "485A0402010001E3");
}

#[test]
fn test_batch_missing_file() {
    let err = run_args(&["batch", "/nonexistent/batch.yaml"]).unwrap_err();
    assert!(matches!(err, CliError::Io { .. }));
}
