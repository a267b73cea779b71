use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command { Command::cargo_bin("bft").unwrap() }

fn small_valid_program() -> &'static str { "+++." }
// '[' always enters the body, so the counter stays at 1 forever.
fn infinite_program() -> &'static str { "+[]" }

#[test]
fn test_stdout_only_for_program_output() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", small_valid_program()])
        .assert()
        .stdout(predicate::str::is_empty().not())
        .stderr(predicate::str::contains("Execution aborted").not());
}

#[test]
fn test_stderr_only_for_abort_messages() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .env("BFT_TIMEOUT_MS", "100")
        .args(["run", infinite_program()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Execution aborted"))
        .stdout(predicate::str::contains("Execution aborted").not());
}

#[test]
fn timeout_flag_overrides_the_environment() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .env("BFT_TIMEOUT_MS", "600000")
        .args(["run", "--timeout", "100", infinite_program()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("wall-clock timeout exceeded (100 ms)"));
}
