use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command { Command::cargo_bin("bft").unwrap() }

#[test]
fn loop_body_runs_once_even_on_a_fresh_tape() {
    // Default entry never inspects the cell: the '.' inside the loop emits
    // one NUL before ']' sees the zero under the moved pointer.
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "[.>]"])
        .assert()
        .success()
        .stdout("\u{0}\n");
}

#[test]
fn conventional_mode_skips_the_same_loop() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "--loop-entry", "conventional", "[.>]"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn counter_loops_behave_identically_in_both_modes() {
    // With a non-zero counter at entry the quirk is unobservable.
    for mode in ["quirky", "conventional"] {
        cargo_bin()
            .timeout(Duration::from_secs(2))
            .args(["run", "--loop-entry", mode, "+++>+++<[>+<-]>."])
            .assert()
            .success()
            .stdout("\u{6}\n");
    }
}

#[test]
fn conventional_mode_rejects_a_skipping_open_with_no_close() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", "--loop-entry", "conventional", "[+"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unmatched '['"));
}
