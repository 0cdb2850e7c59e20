//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run with piped stdin and verify
//! outputs. MEDTIMER_ENV=dev keeps user configuration untouched.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run a CLI command with optional piped stdin and return output.
fn run_cli(args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    let mut child = Command::new("cargo")
        .args(["run", "-p", "medtimer-cli", "--"])
        .args(args)
        .env("MEDTIMER_ENV", "dev")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI command");

    if let Some(script) = stdin {
        child
            .stdin
            .as_mut()
            .unwrap()
            .write_all(script.as_bytes())
            .unwrap();
    }
    let output = child.wait_with_output().expect("Failed to run CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_shell_add_list_take_status() {
    let script = "add Metformin 500mg --at 09:00\nlist\ntake 1\nstatus\nquit\n";
    let (stdout, _stderr, code) = run_cli(&["shell"], Some(script));

    assert_eq!(code, 0);
    assert!(stdout.contains("Added: Metformin 500mg at 09:00 (id 1)"));
    assert!(stdout.contains("[1] Metformin 500mg at 09:00"));
    assert!(stdout.contains("Marked taken"));
    assert!(stdout.contains("Adherence:"));
    assert!(stdout.contains("Tip:"));
}

#[test]
fn test_shell_rejects_empty_name_and_continues() {
    let script = "add   --at 09:00\nadd Aspirin --at 21:00\nquit\n";
    let (stdout, _stderr, code) = run_cli(&["shell"], Some(script));

    assert_eq!(code, 0);
    assert!(stdout.contains("Added: Aspirin at 21:00"));
}

#[test]
fn test_shell_unknown_id_is_a_notice_not_an_abort() {
    let script = "take 99\ndel 99\nedit 99 --name Other\nlist\nquit\n";
    let (stdout, _stderr, code) = run_cli(&["shell"], Some(script));

    assert_eq!(code, 0);
    assert!(stdout.contains("no dose scheduled today for id 99"));
    assert!(stdout.contains("no medicine with id 99"));
}

#[test]
fn test_shell_report_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.csv");
    let script = format!(
        "add Metformin --at 09:00\nseed\nreport --format csv --out {}\nquit\n",
        out.display()
    );
    let (stdout, _stderr, code) = run_cli(&["shell"], Some(&script));

    assert_eq!(code, 0);
    assert!(stdout.contains("Sample week data generated (6 logs)."));
    assert!(stdout.contains("Report written to"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("# MedTimer Weekly Report"));
    assert!(text.contains("date,name,scheduled_time,status,taken_at"));
}

#[test]
fn test_shell_beep_writes_wav() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("beep.wav");
    let script = format!("beep --out {}\nquit\n", out.display());
    let (_stdout, _stderr, code) = run_cli(&["shell"], Some(&script));

    assert_eq!(code, 0);
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
}

#[test]
fn test_demo_runs_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _stderr, code) = run_cli(&["demo", "--out", dir.path().to_str().unwrap()], None);

    assert_eq!(code, 0);
    assert!(stdout.contains("Today's checklist"));
    assert!(stdout.contains("Metformin 500mg at 09:00"));
    assert!(stdout.contains("Vitamin D at 12:30"));
    assert!(stdout.contains("Aspirin at 21:00"));
    assert!(stdout.contains("Report written to"));
    assert!(dir
        .path()
        .read_dir()
        .unwrap()
        .any(|e| e.unwrap().file_name().to_string_lossy().starts_with("MedTimer_Weekly_Report")));
}

#[test]
fn test_config_get_default() {
    let (stdout, _stderr, code) = run_cli(&["config", "get", "report.format"], None);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "csv");
}

#[test]
fn test_config_list_is_json() {
    let (stdout, _stderr, code) = run_cli(&["config", "list"], None);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("alerts").is_some());
}
