//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary and verify outputs. Each test points
//! `--config` at a scratch directory so the user's config is never touched.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(config_dir: &tempfile::TempDir, args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    let config = config_dir.path().join("config.toml");
    let mut child = Command::new(env!("CARGO_BIN_EXE_energytriage"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).expect("write stdin");
        }
    }

    let output = child.wait_with_output().expect("CLI did not finish");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_buckets_text() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["buckets", "--energy", "low"], None);
    assert_eq!(code, 0, "buckets failed");
    assert!(stdout.contains("Matched to your energy (3 tasks)"));
    assert!(stdout.contains("Low energy detected"));
}

#[test]
fn test_buckets_json() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["buckets", "--json"], None);
    assert_eq!(code, 0, "buckets --json failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["energy"], "medium");
    assert_eq!(parsed["buckets"]["matched"].as_array().unwrap().len(), 4);
    assert_eq!(parsed["buckets"]["later"][0]["id"], 1);
    assert_eq!(parsed["buckets"]["completed"][0]["id"], 6);
}

#[test]
fn test_swipe_commit() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["swipe", "--task", "2", "--dx", "150", "--json"], None);
    assert_eq!(code, 0, "swipe failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["swipe"]["committed"], true);
    assert_eq!(parsed["bucket"], "completed");
    let phases: Vec<&str> = parsed["swipe"]["phases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_str().unwrap())
        .collect();
    assert_eq!(phases, vec!["idle", "dragging", "committing", "idle"]);
}

#[test]
fn test_swipe_return() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["swipe", "--task", "2", "--dx=-80", "--json"], None);
    assert_eq!(code, 0, "swipe failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["swipe"]["committed"], false);
    assert_eq!(parsed["bucket"], "matched");
}

#[test]
fn test_swipe_unknown_task() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["swipe", "--task", "999", "--dx", "150"], None);
    assert_eq!(code, 1);
    assert!(stderr.contains("Task not found: 999"));
}

#[test]
fn test_script_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let script = "\
# fresh list
add Reply to emails --energy low --minutes 20
add Write proposal --energy high
energy low
tap 1
events
";
    let (stdout, _, code) = run_cli(&dir, &["script", "--empty"], Some(script));
    assert_eq!(code, 0, "script failed");
    assert!(stdout.contains("added #1 Reply to emails"));
    assert!(stdout.contains("#1 completed=true"));
    assert!(stdout.contains("\"type\":\"TaskToggled\""));
}

#[test]
fn test_script_reports_rejections() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["script", "--empty"], Some("add   \ntap 42\n"));
    assert_eq!(code, 1);
    assert!(stderr.contains("line 1: Task name must not be empty"));
    assert!(stderr.contains("line 2: Task not found: 42"));
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(&dir, &["config", "set", "gesture.threshold", "90"], None);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, code) = run_cli(&dir, &["config", "get", "gesture.threshold"], None);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "90.0");

    // A 100-unit swipe now commits.
    let (stdout, _, _) = run_cli(&dir, &["swipe", "--task", "3", "--dx", "100", "--json"], None);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["swipe"]["committed"], true);
}

#[test]
fn test_config_rejects_invalid_value() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["config", "set", "gesture.threshold", "-1"], None);
    assert_eq!(code, 1);
    assert!(stderr.contains("gesture.threshold"));
}

#[test]
fn test_swipe_rejects_zero_frame_length() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["swipe", "--task", "2", "--dx", "150", "--frame-ms", "0"], None);
    assert_eq!(code, 2, "clap usage errors exit with 2");
    assert!(stderr.contains("frame-ms"));

    let (_, _, code) = run_cli(&dir, &["script", "--frame-ms", "0"], Some("show\n"));
    assert_eq!(code, 2);
}

#[test]
fn test_script_non_finite_swipe_does_not_hang() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["script"], Some("swipe 2 NaN\nswipe 2 150\n"));
    assert_eq!(code, 0, "script failed");
    assert!(stdout.contains("swipe #2 returned (0 frames)"));
    assert!(stdout.contains("swipe #2 committed"));
}
