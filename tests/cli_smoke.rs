//! Runs the gcode-parse binary end to end
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

const PROGRAM: &str = "; part 1\nN10 G1 X=5 F=100.5\n:IF X=1\nN11 M104 G1=5\n:ENDIF\n";

fn run_cli(args: &[&str], stdin: Option<&str>) -> Output {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = dir.path().join("empty.toml");
    fs::write(&config, "").expect("write config");

    let mut child = Command::new(env!("CARGO_BIN_EXE_gcode-parse"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn gcode-parse");

    {
        let mut child_stdin = child.stdin.take().expect("stdin");
        if let Some(input) = stdin {
            child_stdin.write_all(input.as_bytes()).expect("write stdin");
        }
    }

    child.wait_with_output().expect("wait for gcode-parse")
}

#[test]
fn test_json_output_from_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let input = dir.path().join("part.nc");
    fs::write(&input, PROGRAM).expect("write program");

    let output = run_cli(&["--format", "json", input.to_str().unwrap()], None);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let lines = json.as_array().expect("array of lines");
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0]["kind"], "comment");
    assert_eq!(lines[1]["kind"], "code");
    assert_eq!(lines[1]["parameters"][1]["type"], "double");
    assert_eq!(lines[2]["kind"], "control");
    assert_eq!(lines[2]["directive"], "if");
    assert_eq!(lines[3]["parameters"][0]["identifier"], "G1");
    assert_eq!(lines[3]["parameters"][0]["type"], "integer");
}

#[test]
fn test_summary_from_stdin() {
    let output = run_cli(&[], Some(PROGRAM));
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<(String, String)> = stdout
        .lines()
        .filter_map(|row| {
            let (label, count) = row.trim().rsplit_once(' ')?;
            Some((label.trim().to_string(), count.to_string()))
        })
        .collect();
    let count = |label: &str| {
        rows.iter()
            .find(|(name, _)| name == label)
            .map(|(_, count)| count.as_str())
            .unwrap_or_else(|| panic!("missing summary row '{}'", label))
    };

    assert_eq!(rows[0].0, "lines");
    assert_eq!(count("lines"), "5");
    assert_eq!(count("blank"), "0");
    assert_eq!(count("comment"), "1");
    assert_eq!(count("gcode"), "1");
    assert_eq!(count("mcode"), "1");
    assert_eq!(count("unknown code"), "0");
    assert_eq!(count("control"), "2");
    assert_eq!(count("unknown control"), "0");
    assert_eq!(count("unrecognized"), "0");
    // X, F, G1=5, X=1
    assert_eq!(count("parameters"), "4");
}

#[test]
fn test_malformed_program_fails() {
    let output = run_cli(&[], Some("N1 G1\nN abc\n"));
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed line 1"));
}

#[test]
fn test_demote_policy_keeps_going() {
    let output = run_cli(
        &["--malformed-numbers", "demote", "--format", "debug"],
        Some("N1 G1\nN abc\n"),
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1: unrecognized N abc"));
}
