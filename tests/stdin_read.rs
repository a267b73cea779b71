// This test exercises the ',' (input) instruction by providing a byte on
// stdin to the binary executing the program ",." (read one byte, echo it).
use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command { Command::cargo_bin("bft").unwrap() }

#[test]
fn reads_from_stdin_and_echoes_byte() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", ",."])
        .write_stdin("Z")
        .assert()
        .success()
        .stdout("Z\n");
}

#[test]
fn cat_loop_echoes_input_then_aborts_at_end_of_input() {
    // ',' is fatal on exhausted input, so the classic cat program echoes
    // everything and then fails instead of exiting cleanly.
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["run", ",[.,]"])
        .write_stdin("hi")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("hi"))
        .stderr(predicate::str::contains("input exhausted"));
}
