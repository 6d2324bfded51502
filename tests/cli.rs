use std::fs;
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

const TIMEOUT: Duration = Duration::from_secs(10);

fn run(args: &[&str]) -> (bool, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_cybereye"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("binary should start");

    let status = match child.wait_timeout(TIMEOUT).unwrap() {
        Some(status) => status,
        None => {
            child.kill().unwrap();
            panic!("cybereye {args:?} did not finish within {TIMEOUT:?}");
        }
    };

    let output = child.wait_with_output().unwrap();
    (status.success(), String::from_utf8_lossy(&output.stdout).into_owned())
}

#[test]
fn help_lists_options() {
    let (ok, stdout) = run(&["--help"]);

    assert!(ok);
    assert!(stdout.contains("--exclude-platforms"));
    assert!(stdout.contains("--from-last"));
}

#[test]
fn missing_username_is_rejected() {
    let (ok, _) = run(&["--no-config"]);

    assert!(!ok);
}

#[test]
fn from_last_without_snapshot_is_harmless() {
    let dir = tempfile::tempdir().unwrap();
    let results = dir.path().join("last_results.json");
    let reports = dir.path().join("reports");

    let (ok, _) = run(&[
        "--no-config",
        "--accessible",
        "--from-last",
        "--results-file",
        results.to_str().unwrap(),
        "--report-dir",
        reports.to_str().unwrap(),
    ]);

    assert!(ok);
    assert!(!reports.exists());
}

#[test]
fn from_last_rebuilds_report() {
    let dir = tempfile::tempdir().unwrap();
    let results = dir.path().join("last_results.json");
    let reports = dir.path().join("reports");
    fs::write(
        &results,
        r#"{"username_investigation": {"searched_username": "alice123", "total_found": 1,
            "profiles": [{"platform": "GitHub", "found": true, "url": "https://github.com/alice123"}]}}"#,
    )
    .unwrap();

    let (ok, stdout) = run(&[
        "--no-config",
        "--accessible",
        "--from-last",
        "--results-file",
        results.to_str().unwrap(),
        "--report-dir",
        reports.to_str().unwrap(),
    ]);

    assert!(ok);
    assert!(stdout.contains("Report for alice123 saved to"));
    let written: Vec<_> = fs::read_dir(&reports).unwrap().collect();
    assert_eq!(written.len(), 1);
}

#[test]
fn zero_timeout_in_config_aborts_before_scanning() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("cybereye.toml");
    let results = dir.path().join("last_results.json");
    fs::write(&config, "timeout = 0").unwrap();

    let (ok, stdout) = run(&[
        "alice123",
        "--accessible",
        "-t",
        "10",
        "--config-path",
        config.to_str().unwrap(),
        "--results-file",
        results.to_str().unwrap(),
    ]);

    assert!(!ok);
    assert!(stdout.contains("timeout = 0"));
    assert!(stdout.contains("Aborting scan."));
    assert!(!results.exists());
}
