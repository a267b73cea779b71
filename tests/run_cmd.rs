use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;

fn cargo_bin() -> Command { Command::cargo_bin("bft").unwrap() }

#[test]
fn run_executes_code_and_ends_with_a_newline() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "+++."])
        .assert()
        .success()
        .stdout("\u{3}\n");
}

#[test]
fn run_concatenates_positional_code_parts() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "++", "+."])
        .assert()
        .success()
        .stdout("\u{3}\n");
}

#[test]
fn run_loads_code_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "increment three times and print:").unwrap();
    writeln!(file, "+++.").unwrap();

    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("\u{3}\n");
}

#[test]
fn run_without_code_or_file_is_a_usage_error() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn run_rejects_code_together_with_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "--file"])
        .arg(file.path())
        .arg("+++.")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot use positional code together with --file"));
}

#[test]
fn run_rejects_an_unknown_loop_entry_mode() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "--loop-entry", "zesty", "+++."])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid --loop-entry value"));
}

#[test]
fn run_with_a_missing_file_fails_cleanly() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "--file", "/no/such/file.bf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read code file"));
}
